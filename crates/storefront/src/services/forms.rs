//! Newsletter and contact form validation.
//!
//! Validation failures come back as [`FormErrors`], one inline message per
//! invalid field, for the render layer to show next to the inputs. Accepted
//! submissions are logged and nothing else: there is no mail backend.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use four_skincare_core::Email;

/// Shown after a successful newsletter signup.
pub const SUBSCRIBED_MESSAGE: &str = "Thank you for subscribing to our newsletter!";

/// Shown after a successful contact form submission.
pub const CONTACT_RECEIVED_MESSAGE: &str =
    "Thank you for your message! We will get back to you soon.";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("Invalid regex")
});

/// A form input that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    /// The input's `name` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

/// One invalid field and the message to show beside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

/// Every invalid field in a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormErrors {
    pub fields: Vec<FieldError>,
}

impl FormErrors {
    /// Whether `field` failed validation.
    #[must_use]
    pub fn has(&self, field: FormField) -> bool {
        self.fields.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.fields.iter().map(|e| e.message).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for FormErrors {}

/// Validate a single email input.
///
/// # Errors
///
/// Returns a [`FieldError`] for [`FormField::Email`] if the address does not
/// look deliverable.
pub fn validate_email(raw: &str) -> Result<Email, FieldError> {
    let invalid = FieldError {
        field: FormField::Email,
        message: "Please enter a valid email address",
    };
    let candidate = raw.trim().to_lowercase();
    if !EMAIL_RE.is_match(&candidate) {
        return Err(invalid);
    }
    Email::parse(&candidate).map_err(|_| invalid)
}

/// Newsletter signup form.
#[derive(Debug, Clone, Default)]
pub struct NewsletterForm {
    pub email: String,
}

impl NewsletterForm {
    /// Validate and accept the signup.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrors`] if the email is invalid.
    pub fn submit(&self) -> Result<Email, FormErrors> {
        let email = validate_email(&self.email).map_err(|e| FormErrors { fields: vec![e] })?;
        info!(email_domain = email.domain(), "Newsletter subscription");
        Ok(email)
    }
}

/// Contact form.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A contact form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: Email,
    pub message: String,
}

impl ContactForm {
    /// Validate every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrors`] listing each invalid field.
    pub fn validate(&self) -> Result<ContactSubmission, FormErrors> {
        let mut fields = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            fields.push(FieldError {
                field: FormField::Name,
                message: "Please enter your name",
            });
        }

        let email = validate_email(&self.email).map_err(|e| fields.push(e)).ok();

        let message = self.message.trim();
        if message.is_empty() {
            fields.push(FieldError {
                field: FormField::Message,
                message: "Please enter a message",
            });
        }

        match email {
            Some(email) if fields.is_empty() => Ok(ContactSubmission {
                name: name.to_owned(),
                email,
                message: message.to_owned(),
            }),
            _ => Err(FormErrors { fields }),
        }
    }

    /// Validate and accept the message.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrors`] listing each invalid field.
    pub fn submit(&self) -> Result<ContactSubmission, FormErrors> {
        let submission = self.validate()?;
        info!(
            email_domain = submission.email.domain(),
            message_len = submission.message.len(),
            "Contact message received"
        );
        Ok(submission)
    }
}
