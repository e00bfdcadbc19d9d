//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for the operations a render layer calls
//! through [`crate::state::Storefront`]. Internal failures are captured to
//! Sentry by [`AppError::report`]; user-facing ones only carry a message.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::services::forms::FormErrors;
use crate::services::whatsapp::LinkError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The catalog could not be built.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A cart change could not be persisted.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Storage backend failure outside the cart.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// An outbound link could not be built.
    #[error("Link error: {0}")]
    Link(#[from] LinkError),

    /// A form submission failed validation.
    #[error("Invalid form: {0}")]
    Form(#[from] FormErrors),

    /// Reading shopper input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Whether this error reflects a fault in the storefront rather than in
    /// what the shopper asked for.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::Catalog(_)
                | Self::Cart(_)
                | Self::Storage(_)
                | Self::Io(_)
        )
    }

    /// Log the error and, for internal faults, capture it to Sentry.
    ///
    /// Returns the message to show the shopper. Internal details are not
    /// exposed.
    #[must_use]
    pub fn report(&self) -> String {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        } else {
            tracing::info!(error = %self, "Request rejected");
        }

        match self {
            Self::Cart(_) | Self::Storage(_) => {
                "Your cart could not be saved. Changes will be lost when you leave.".to_string()
            }
            Self::Config(_) | Self::Catalog(_) | Self::Io(_) => "Internal error".to_string(),
            Self::Link(_) => "Product enquiries are unavailable right now".to_string(),
            Self::Form(errors) => errors.to_string(),
            Self::NotFound(_) => self.to_string(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("product_id", "2")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
