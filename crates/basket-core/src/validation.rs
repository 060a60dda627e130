//! # Validation Module
//!
//! Input validation for items entering the cart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Shape checks (id is a string, price is a list)                    │
//! │  └── Quantity is a non-negative integer (u32)                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Provider boundary                                            │
//! │  └── THIS MODULE: id present, prices present and well-formed           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Totals calculation                                           │
//! │  └── Display-currency price exists (MissingPrice)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use basket_core::validation::{validate_currency_code, validate_item_id};
//!
//! validate_item_id("sku-1").unwrap();
//! validate_currency_code("USD").unwrap();
//! ```

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::types::{is_reserved_key, Item, ItemPatch, PriceEntry};
use crate::{MAX_CURRENCY_CODE_LEN, MAX_ITEM_ID_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item id.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most 200 characters
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.chars().count() > MAX_ITEM_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ITEM_ID_LEN,
        });
    }

    Ok(())
}

/// Validates a currency code.
///
/// ## Rules
/// - Must not be empty
/// - At most 16 characters
/// - ASCII letters and digits only
///
/// ISO 4217 codes ("USD") pass, and so do non-ISO codes some shops use
/// ("POINTS", "BTC").
///
/// ## Example
/// ```rust
/// use basket_core::validation::validate_currency_code;
///
/// assert!(validate_currency_code("USD").is_ok());
/// assert!(validate_currency_code("").is_err());
/// assert!(validate_currency_code("U$D").is_err());
/// ```
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "currency".to_string(),
        });
    }

    if code.len() > MAX_CURRENCY_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "currency".to_string(),
            max: MAX_CURRENCY_CODE_LEN,
        });
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency".to_string(),
            reason: "must contain only ASCII letters and digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Price Validators
// =============================================================================

/// Validates a single price entry.
pub fn validate_price_entry(entry: &PriceEntry) -> ValidationResult<()> {
    validate_currency_code(&entry.currency)?;

    if entry.value.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates an item's price list.
///
/// ## Rules
/// - At least one entry
/// - Every entry well-formed
///
/// Whether an entry matches the display currency is checked later, when
/// totals are calculated.
pub fn validate_prices(prices: &[PriceEntry]) -> ValidationResult<()> {
    if prices.is_empty() {
        return Err(ValidationError::Required {
            field: "price".to_string(),
        });
    }

    prices.iter().try_for_each(validate_price_entry)
}

// =============================================================================
// Attribute Validators
// =============================================================================

/// Rejects attribute keys that collide with the item's own fields.
///
/// `Item::attributes` is flattened into the item's JSON, so a `quantity`
/// attribute would serialize a second `quantity` key and the snapshot could
/// not be read back.
pub fn validate_attributes(attributes: &Map<String, Value>) -> ValidationResult<()> {
    match attributes.keys().find(|key| is_reserved_key(key)) {
        Some(key) => Err(ValidationError::ReservedKey { key: key.clone() }),
        None => Ok(()),
    }
}

// =============================================================================
// Item Validators
// =============================================================================

/// Validates an item before it is added to a cart.
///
/// ## User Workflow
/// ```text
/// provider.add_item(item, 2)
///      │
///      ▼
/// validate_item(&item) ← THIS FUNCTION
///      │
///      ├── empty id?        → Required { field: "id" }
///      ├── no prices?       → Required { field: "price" }
///      ├── bad currency?    → InvalidFormat { field: "currency" }
///      ├── negative value?  → MustNotBeNegative { field: "price" }
///      ├── attribute "id"?  → ReservedKey { key: "id" }
///      │
///      └── OK → ADD_ITEM or UPDATE_ITEM dispatched
/// ```
pub fn validate_item(item: &Item) -> ValidationResult<()> {
    validate_item_id(&item.id)?;
    validate_prices(&item.price)?;
    validate_attributes(&item.attributes)
}

/// Validates a patch before it is merged into an item.
///
/// Same rules as [`validate_item`] for the fields the patch carries. An
/// absent price list is fine; a present one must be non-empty and valid.
pub fn validate_patch(patch: &ItemPatch) -> ValidationResult<()> {
    if let Some(price) = &patch.price {
        validate_prices(price)?;
    }
    validate_attributes(&patch.attributes)
}

// =============================================================================
// Unit Tests
// =============================================================================
