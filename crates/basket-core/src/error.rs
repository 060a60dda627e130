//! # Error Types
//!
//! Domain-specific error types for basket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  basket-core errors (this file)                                        │
//! │  ├── CoreError        - Cart rule violations                           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  basket-store errors (separate crate)                                  │
//! │  └── StoreError       - Snapshot storage failures                      │
//! │                                                                         │
//! │  basket errors (provider crate)                                        │
//! │  └── CartError        - What provider callers see                      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CartError → Caller                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, currency)
//! 3. Errors are enum variants, never String
//! 4. Every error is fatal for the transition that raised it

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart logic errors.
///
/// None of these are recoverable inside the core: a transition that hits one
/// returns it without producing a new state, so the caller's current state is
/// left untouched.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An item has no price entry for the display currency.
    ///
    /// ## When This Occurs
    /// - Item was added with prices in other currencies only
    /// - Display currency was changed after the snapshot was written
    /// - An update patch replaced the price list
    #[error("Item {item_id} has no price in display currency {currency}")]
    MissingPrice { item_id: String, currency: String },

    /// An update targets an id that is not in the cart.
    ///
    /// Raised by the provider before an action is built; the reducer itself
    /// passes unknown ids through untouched.
    #[error("No item with id {0} in cart")]
    UnknownItem(String),

    /// The item handed to the provider failed validation.
    #[error("Invalid item {item_id}: {source}")]
    InvalidItem {
        item_id: String,
        #[source]
        source: ValidationError,
    },

    /// A line total or the cart total does not fit in an i64.
    #[error("Amount overflow while totalling item {item_id}")]
    AmountOverflow { item_id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a MissingPrice error.
    pub fn missing_price(item_id: impl Into<String>, currency: impl Into<String>) -> Self {
        CoreError::MissingPrice {
            item_id: item_id.into(),
            currency: currency.into(),
        }
    }

    /// Creates an InvalidItem error.
    pub fn invalid_item(item_id: impl Into<String>, source: ValidationError) -> Self {
        CoreError::InvalidItem {
            item_id: item_id.into(),
            source,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before any action is dispatched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., currency code with punctuation).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// An extra attribute uses a key the item owns (`id`, `price`, ...).
    #[error("attribute {key} is reserved")]
    ReservedKey { key: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
