//! # Cart Configuration
//!
//! Settings the provider needs at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BASKET_DISPLAY_CURRENCY=EUR                                        │
//! │     BASKET_STORAGE_KEY=kiosk-2                                         │
//! │     BASKET_DATABASE_PATH=/var/lib/basket/cart.db                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/basket/basket.toml (Linux)                               │
//! │     ~/Library/Application Support/dev.basket.basket/basket.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     USD, "basket-cart", in-memory storage                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # basket.toml
//! display_currency = "USD"
//! storage_key = "basket-cart"
//! database_path = "./basket.db"  # omit for in-memory storage
//! ```

use std::path::{Path, PathBuf};

use basket_core::CurrencyCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CartError, CartResult, ConfigError};

/// Environment variable overriding [`CartConfig::display_currency`].
pub const ENV_DISPLAY_CURRENCY: &str = "BASKET_DISPLAY_CURRENCY";
/// Environment variable overriding [`CartConfig::storage_key`].
pub const ENV_STORAGE_KEY: &str = "BASKET_STORAGE_KEY";
/// Environment variable overriding [`CartConfig::database_path`].
pub const ENV_DATABASE_PATH: &str = "BASKET_DATABASE_PATH";

/// Provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Currency every total is computed in.
    #[serde(default = "default_display_currency")]
    pub display_currency: String,

    /// Key the snapshot is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// SQLite file for snapshots. `None` keeps the cart in memory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

fn default_display_currency() -> String {
    "USD".to_string()
}

fn default_storage_key() -> String {
    "basket-cart".to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        CartConfig {
            display_currency: default_display_currency(),
            storage_key: default_storage_key(),
            database_path: None,
        }
    }
}

impl CartConfig {
    // =========================================================================
    // Loading & Saving
    // =========================================================================

    /// Loads configuration from file and environment.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load(config_path: Option<PathBuf>) -> CartResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading cart config from file");
                config = Self::read_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load cart config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> CartResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = toml::to_string_pretty(self).map_err(ConfigError::from)?;
        std::fs::write(&path, contents).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        info!(?path, "Cart config saved");
        Ok(())
    }

    fn read_file(path: &Path) -> CartResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&contents).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CartResult<()> {
        self.currency()?;

        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_key must not be empty".into()).into());
        }

        Ok(())
    }

    /// Applies `BASKET_*` environment variables.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from any variable source.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(currency) = lookup(ENV_DISPLAY_CURRENCY) {
            debug!(currency = %currency, "Overriding display currency from environment");
            self.display_currency = currency;
        }

        if let Some(key) = lookup(ENV_STORAGE_KEY) {
            debug!(key = %key, "Overriding storage key from environment");
            self.storage_key = key;
        }

        if let Some(path) = lookup(ENV_DATABASE_PATH) {
            if path.trim().is_empty() {
                self.database_path = None;
            } else {
                debug!(path = %path, "Overriding database path from environment");
                self.database_path = Some(PathBuf::from(path));
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "basket", "basket")
            .map(|dirs| dirs.config_dir().join("basket.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The display currency as a validated code.
    pub fn currency(&self) -> CartResult<CurrencyCode> {
        CurrencyCode::new(self.display_currency.clone()).map_err(|e| {
            CartError::from(ConfigError::Invalid(format!("display_currency: {}", e)))
        })
    }

    /// Builder-style override of the display currency.
    pub fn with_display_currency(mut self, currency: impl Into<String>) -> Self {
        self.display_currency = currency.into();
        self
    }

    /// Builder-style override of the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Builder-style override of the database path.
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = Some(path.into());
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
