//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SKINCARE_STORAGE_PATH` - Local storage file (default: `.four-skincare/storage.json`)
//! - `SKINCARE_CATALOG_PATH` - JSON product catalog (default: built-in product line)
//! - `SKINCARE_WHATSAPP_NUMBER` - Number used for product enquiry links (digits only)
//! - `SKINCARE_SEARCH_DEBOUNCE_MS` - Search input debounce delay (default: 300)
//! - `SKINCARE_CURRENCY` - Display currency code (default: PKR)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use four_skincare_core::CurrencyCode;

use crate::services::whatsapp::{LinkError, WhatsAppNumber};

const DEFAULT_STORAGE_PATH: &str = ".four-skincare/storage.json";
const DEFAULT_DEBOUNCE_MS: &str = "300";
const MAX_DEBOUNCE_MS: u64 = 10_000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// File backing local storage (the persisted cart lives here)
    pub storage_path: PathBuf,
    /// Optional JSON catalog replacing the built-in product line
    pub catalog_path: Option<PathBuf>,
    /// Number product enquiry links are addressed to
    pub whatsapp_number: Option<WhatsAppNumber>,
    /// Delay between the last keystroke and the search running
    pub search_debounce: Duration,
    /// Currency used to display prices and totals
    pub currency: CurrencyCode,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            catalog_path: None,
            whatsapp_number: None,
            search_debounce: Duration::from_millis(300),
            currency: CurrencyCode::PKR,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let storage_path =
            PathBuf::from(env.or_default("SKINCARE_STORAGE_PATH", DEFAULT_STORAGE_PATH));
        let catalog_path = env.optional("SKINCARE_CATALOG_PATH").map(PathBuf::from);

        let whatsapp_number = env
            .optional("SKINCARE_WHATSAPP_NUMBER")
            .map(|raw| WhatsAppNumber::parse(&raw))
            .transpose()
            .map_err(|e: LinkError| {
                ConfigError::InvalidEnvVar("SKINCARE_WHATSAPP_NUMBER".to_string(), e.to_string())
            })?;

        let debounce_ms = env
            .or_default("SKINCARE_SEARCH_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SKINCARE_SEARCH_DEBOUNCE_MS".to_string(), e.to_string())
            })?;
        if debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::InvalidEnvVar(
                "SKINCARE_SEARCH_DEBOUNCE_MS".to_string(),
                format!("must be at most {MAX_DEBOUNCE_MS} (got {debounce_ms})"),
            ));
        }

        let currency = parse_currency(&env.or_default("SKINCARE_CURRENCY", "PKR"))?;

        Ok(Self {
            storage_path,
            catalog_path,
            whatsapp_number,
            search_debounce: Duration::from_millis(debounce_ms),
            currency,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

fn parse_currency(raw: &str) -> Result<CurrencyCode, ConfigError> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "PKR" => Ok(CurrencyCode::PKR),
        "USD" => Ok(CurrencyCode::USD),
        "EUR" => Ok(CurrencyCode::EUR),
        "GBP" => Ok(CurrencyCode::GBP),
        "CAD" => Ok(CurrencyCode::CAD),
        "AUD" => Ok(CurrencyCode::AUD),
        other => Err(ConfigError::InvalidEnvVar(
            "SKINCARE_CURRENCY".to_string(),
            format!("unsupported currency {other:?}"),
        )),
    }
}
