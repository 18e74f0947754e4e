//! Cart engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CART_STORAGE_KEY` - Key the serialized cart is stored under
//!   (default: `copper-mango-cart`)
//! - `CART_CURRENCY` - ISO 4217 code for price display (default: `INR`)

use copper_mango_core::Currency;
use thiserror::Error;

/// Key the serialized cart is stored under when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "copper-mango-cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart engine configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Storage key the cart owns exclusively.
    pub storage_key: String,
    /// Currency used for every displayed amount.
    pub currency: Currency,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: Currency::default(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `CART_CURRENCY` is set to an unknown code.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storage_key = get_env_or_default("CART_STORAGE_KEY", DEFAULT_STORAGE_KEY);
        let currency = match std::env::var("CART_CURRENCY") {
            Err(_) => Currency::default(),
            Ok(code) => code.parse::<Currency>().map_err(|e| {
                ConfigError::InvalidEnvVar("CART_CURRENCY".to_string(), e.to_string())
            })?,
        };

        Ok(Self {
            storage_key,
            currency,
        })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
