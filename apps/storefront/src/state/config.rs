//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_STORE_NAME=Corner Shop                                  │
//! │     STOREFRONT_CATALOG=./catalog.toml                                  │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $STOREFRONT_CONFIG, or                                             │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Built-in demo catalog, "Php " currency                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "Corner Shop"
//! currency_symbol = "Php "
//! currency_decimals = 2
//! catalog_path = "/etc/storefront/catalog.toml"
//! log_filter = "info,storefront=debug"
//! ```
//!
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};
use storefront_core::money::MINOR_UNIT_DIGITS;
use storefront_core::{CoreError, Money};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "STOREFRONT_CONFIG";

// =============================================================================
// Config Error
// =============================================================================

/// Failures while loading configuration or the catalog file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or parsed.
    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    /// Values were read but are not usable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// Catalog file contents were rejected.
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CoreError),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// App Config
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Store name (shown on the checkout confirmation)
    pub store_name: String,

    /// Currency symbol (for display), written directly before the amount
    pub currency_symbol: String,

    /// Number of decimal places shown; amounts are kept in cents regardless
    pub currency_decimals: u8,

    /// Catalog file; the built-in demo catalog is used when unset
    pub catalog_path: Option<PathBuf>,

    /// `EnvFilter` directives; `RUST_LOG` still wins when set
    pub log_filter: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            store_name: "Storefront Demo".to_string(),
            currency_symbol: "Php ".to_string(),
            currency_decimals: 2,
            catalog_path: None,
            log_filter: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, `$STOREFRONT_CONFIG`, or the platform
    ///    config dir)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }

        if self.currency_symbol.is_empty() {
            return Err(ConfigError::Invalid(
                "currency_symbol must not be empty".into(),
            ));
        }

        if u32::from(self.currency_decimals) > MINOR_UNIT_DIGITS {
            return Err(ConfigError::Invalid(format!(
                "currency_decimals must be at most {}",
                MINOR_UNIT_DIGITS
            )));
        }

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment
    /// in production).
    ///
    /// ## Variables
    /// - `STOREFRONT_STORE_NAME`
    /// - `STOREFRONT_CURRENCY_SYMBOL`
    /// - `STOREFRONT_CURRENCY_DECIMALS`: ignored with a warning if not a number
    /// - `STOREFRONT_CATALOG`: path to a catalog TOML file
    /// - `STOREFRONT_LOG`: tracing filter directives
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("STOREFRONT_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(symbol) = lookup("STOREFRONT_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(decimals) = lookup("STOREFRONT_CURRENCY_DECIMALS") {
            match decimals.trim().parse::<u8>() {
                Ok(decimals) => self.currency_decimals = decimals,
                Err(_) => warn!(value = %decimals, "Ignoring invalid STOREFRONT_CURRENCY_DECIMALS"),
            }
        }

        if let Some(path) = lookup("STOREFRONT_CATALOG") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog_path = Some(PathBuf::from(path));
        }

        if let Some(filter) = lookup("STOREFRONT_LOG") {
            self.log_filter = Some(filter);
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    /// Formats an amount with the configured symbol and decimal places.
    ///
    /// Showing fewer places than cents rounds half to even.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "Php 12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let decimals = u32::from(self.currency_decimals);
        let mut value = amount
            .to_decimal()
            .abs()
            .round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven);
        value.rescale(decimals);

        format!(
            "{}{}{}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            value
        )
    }
}
