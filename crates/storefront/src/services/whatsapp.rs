//! WhatsApp product enquiry links.
//!
//! The "Ask about this product" button opens `https://wa.me/<number>` with a
//! prefilled message naming the product.

use core::fmt;

use thiserror::Error;
use url::Url;

/// Base URL for WhatsApp click-to-chat links.
const BASE_URL: &str = "https://wa.me";

/// Prefix of the prefilled enquiry message.
const INQUIRY_PREFIX: &str = "Please provide me more detail about this product: ";

const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 15;

/// Errors that can occur when building an enquiry link.
#[derive(Debug, Error)]
pub enum LinkError {
    /// No enquiry number is configured.
    #[error("no WhatsApp number configured")]
    MissingNumber,

    /// The number is not 7-15 digits (E.164 without the plus).
    #[error("invalid WhatsApp number {0:?}: expected 7-15 digits")]
    InvalidNumber(String),

    /// The assembled URL did not parse.
    #[error("invalid enquiry URL: {0}")]
    Url(#[from] url::ParseError),
}

/// An international phone number in the digits-only form `wa.me` expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppNumber(String);

impl WhatsAppNumber {
    /// Parse a number, dropping a leading `+` and any spaces or dashes.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::InvalidNumber`] for anything other than 7-15 digits.
    pub fn parse(raw: &str) -> Result<Self, LinkError> {
        let trimmed = raw.trim();
        let without_plus = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let digits: String = without_plus
            .chars()
            .filter(|c| !matches!(c, ' ' | '-'))
            .collect();

        let valid = (MIN_DIGITS..=MAX_DIGITS).contains(&digits.len())
            && digits.chars().all(|c| c.is_ascii_digit());
        if !valid {
            return Err(LinkError::InvalidNumber(raw.to_owned()));
        }
        Ok(Self(digits))
    }

    /// The digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WhatsAppNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the enquiry link for `product_name`.
///
/// # Errors
///
/// Returns [`LinkError::Url`] if the assembled link does not parse.
pub fn product_inquiry_link(number: &WhatsAppNumber, product_name: &str) -> Result<Url, LinkError> {
    let message = format!("{INQUIRY_PREFIX}{}", product_name.trim());
    let link = format!(
        "{BASE_URL}/{}?text={}",
        number.as_str(),
        urlencoding::encode(&message)
    );
    Ok(Url::parse(&link)?)
}
