//! # basket-core: Pure Cart Logic for Basket
//!
//! This crate is the **heart** of Basket. It holds the cart state machine as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Basket Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Caller (UI binding, service)                 │   │
//! │  │   add_item ─ remove_item ─ update_item ─ clear_cart ─ in_cart  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    basket (CartProvider)                        │   │
//! │  │   validate input, pick ADD vs UPDATE, dispatch, persist         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ basket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  totals   │  │  reducer  │  │ validation│  │   │
//! │  │   │   Item    │  │ Totals-   │  │ CartAction│  │   rules   │  │   │
//! │  │   │ CartState │  │ Calculator│  │ transition│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO GLOBALS • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    basket-store (Snapshots)                     │   │
//! │  │              in-memory map or SQLite key-value table            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Item, PriceEntry, ItemPatch, CartState, CurrencyCode
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`totals`] - Totals calculator
//! - [`reducer`] - Cart actions and the transition function
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same state + action = same result
//! 2. **No I/O**: storage, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all amounts are minor units (i64)
//! 4. **Explicit Errors**: a missing display-currency price is an error, never zero
//! 5. **Explicit Currency**: the display currency is passed in, never global
//!
//! ## Example Usage
//!
//! ```rust
//! use basket_core::{CartAction, CartReducer, CartState, CurrencyCode, Item, ItemPatch, Money, PriceEntry};
//!
//! let reducer = CartReducer::new(CurrencyCode::new("USD").unwrap());
//! let mug = Item::new("mug", vec![PriceEntry::new("USD", Money::from_minor(10))]).with_quantity(2);
//!
//! let state = reducer.transition(&CartState::empty(), CartAction::add_item(mug)).unwrap();
//! let state = reducer
//!     .transition(&state, CartAction::update_item("mug", ItemPatch::quantity(3)))
//!     .unwrap();
//!
//! assert_eq!(state.get_item("mug").unwrap().item_total, Some(Money::from_minor(30)));
//! assert_eq!(state.total_items(), 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod reducer;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use reducer::{CartAction, CartReducer};
pub use totals::{CartTotals, TotalsCalculator};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of an item id, in characters.
pub const MAX_ITEM_ID_LEN: usize = 200;

/// Maximum length of a currency code.
pub const MAX_CURRENCY_CODE_LEN: usize = 16;
