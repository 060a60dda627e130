//! # Cart Error Type
//!
//! Unified error type for provider operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Basket                                 │
//! │                                                                         │
//! │  provider.update_item("ghost", patch)                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  CartProvider                                                    │  │
//! │  │  Result<CartState, CartError>                                    │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Unknown id? ──────── CoreError::UnknownItem ─────┐             │  │
//! │  │         │                                          │             │  │
//! │  │         ▼                                          ▼             │  │
//! │  │  Save failed? ─────── StoreError::QueryFailed ── CartError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  caller: match err.code() { ErrorCode::NotFound => ..., _ => ... }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use basket_core::{CoreError, ValidationError};
use basket_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Errors raised by the cart provider and its configuration.
#[derive(Debug, Error)]
pub enum CartError {
    /// Domain error from the cart state machine.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Snapshot storage failed. The in-memory cart is unchanged.
    #[error("Failed to persist cart: {0}")]
    Store(#[from] StoreError),

    /// A snapshot could not be encoded, or a stored one is malformed.
    #[error("Invalid cart snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Configuration could not be read, written or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<ValidationError> for CartError {
    fn from(err: ValidationError) -> Self {
        CartError::Core(CoreError::Validation(err))
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read or written.
    #[error("Config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`CartConfig`](crate::config::CartConfig).
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No explicit path given and no platform config directory exists.
    #[error("No config path available")]
    NoPath,

    /// A value failed validation.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for provider operations.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Error Codes
// =============================================================================

/// Machine-readable error category.
///
/// ## Serialization
/// ```json
/// { "code": "MISSING_PRICE", "message": "Item sku-1 has no price in display currency USD" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Item id not in the cart
    NotFound,

    /// Caller input rejected before dispatch
    ValidationError,

    /// An item has no price in the display currency
    MissingPrice,

    /// Amount exceeded the representable range
    AmountOverflow,

    /// Storage backend failed
    StorageError,

    /// Snapshot encode/decode failed
    SnapshotError,

    /// Configuration problem
    ConfigError,
}

/// Serializable form of a [`CartError`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

impl CartError {
    /// Category of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CartError::Core(err) => match err {
                CoreError::UnknownItem(_) => ErrorCode::NotFound,
                CoreError::MissingPrice { .. } => ErrorCode::MissingPrice,
                CoreError::AmountOverflow { .. } => ErrorCode::AmountOverflow,
                CoreError::InvalidItem { .. } | CoreError::Validation(_) => {
                    ErrorCode::ValidationError
                }
            },
            CartError::Store(_) => ErrorCode::StorageError,
            CartError::Snapshot(_) => ErrorCode::SnapshotError,
            CartError::Config(_) => ErrorCode::ConfigError,
        }
    }

    /// Code plus display message.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err = CartError::from(CoreError::UnknownItem("ghost".to_string()));
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.to_string(), "No item with id ghost in cart");

        let err = CartError::from(CoreError::missing_price("a", "USD"));
        assert_eq!(err.code(), ErrorCode::MissingPrice);

        let err = CartError::from(ValidationError::Required {
            field: "id".to_string(),
        });
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[test]
    fn test_store_error_code() {
        let err = CartError::from(StoreError::PoolExhausted);
        assert_eq!(err.code(), ErrorCode::StorageError);
        assert!(err.to_string().starts_with("Failed to persist cart"));
    }

    #[test]
    fn test_body_serialization() {
        let err = CartError::from(CoreError::UnknownItem("x".to_string()));
        let json = serde_json::to_value(err.to_body()).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "No item with id x in cart");
    }

    #[test]
    fn test_config_error_code() {
        let err = CartError::from(ConfigError::Invalid("storage_key is empty".to_string()));
        assert_eq!(err.code(), ErrorCode::ConfigError);
        assert_eq!(err.to_string(), "Invalid config: storage_key is empty");
    }
}
