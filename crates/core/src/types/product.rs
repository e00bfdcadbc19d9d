//! Product records as loaded into the catalog.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::category::Category;
use super::id::ProductId;
use super::price::{CurrencyCode, Price, PriceError};

/// Errors that can occur when constructing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The value is outside `0..=5`.
    #[error("rating must be between 0 and {max} (got {value})")]
    OutOfRange {
        /// The rejected value.
        value: Decimal,
        /// Maximum allowed rating.
        max: Decimal,
    },
}

/// A review score between 0 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Rating(Decimal);

impl Rating {
    /// Highest possible rating.
    pub const MAX: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

    /// Create a rating.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::OutOfRange`] if `value` is negative or above 5.
    pub fn new(value: Decimal) -> Result<Self, RatingError> {
        if value < Decimal::ZERO || value > Self::MAX {
            return Err(RatingError::OutOfRange {
                value,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    /// The underlying score.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Rating {
    type Error = RatingError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for Decimal {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// A promotional tag shown on a product card (`new`, `bestseller`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Badge(String);

impl Badge {
    /// Create a badge, returning `None` for a blank tag.
    #[must_use]
    pub fn new(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        (!tag.is_empty()).then(|| Self(tag.to_owned()))
    }

    /// The tag text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Catalog data writes `"badge": ""` for products without a tag.
fn deserialize_badge<'de, D>(deserializer: D) -> Result<Option<Badge>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Badge::new))
}

/// A product in the catalog.
///
/// Products are immutable once loaded; the catalog owns them and hands out
/// shared references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier within the catalog.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in the storefront currency.
    pub price: Decimal,
    /// Product category.
    pub category: Category,
    /// Image path or URL.
    pub image: String,
    /// Short description shown on the card.
    pub description: String,
    /// Average review score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    /// Promotional badge.
    #[serde(
        default,
        deserialize_with = "deserialize_badge",
        skip_serializing_if = "Option::is_none"
    )]
    pub badge: Option<Badge>,
}

impl Product {
    /// The unit price as a [`Price`] in `currency`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the stored amount is negative.
    pub fn unit_price(&self, currency: CurrencyCode) -> Result<Price, PriceError> {
        Price::new(self.price, currency)
    }
}
