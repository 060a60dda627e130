//! # Cart Reducer
//!
//! The transition function: `(state, action) → new state`.
//!
//! ## Actions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transitions                                     │
//! │                                                                         │
//! │  Action          Items change                   Totals                 │
//! │  ──────          ────────────                   ──────                 │
//! │  ADD_ITEM        items.push(item)               rebuilt                │
//! │  UPDATE_ITEM     items[id] = merge(item, patch) rebuilt                │
//! │  REMOVE_ITEM     items.retain(id != x)          rebuilt                │
//! │  CLEAR_CART      state = emptyState             copied as given        │
//! │                                                                         │
//! │  Every rebuild runs the full TotalsCalculator. Carts are small, so     │
//! │  there is no incremental bookkeeping to get wrong.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Caller Contract
//! - ADD_ITEM does not deduplicate. Callers holding an id already in the
//!   cart send UPDATE_ITEM with the summed quantity instead.
//! - UPDATE_ITEM on an unknown id changes nothing but still re-derives
//!   totals. Callers check existence first.
//!
//! The old state is only borrowed, so a failed transition leaves it exactly
//! as it was.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::totals::TotalsCalculator;
use crate::types::{merge_item, CartState, CurrencyCode, Item, ItemPatch};

// =============================================================================
// Actions
// =============================================================================

/// A discrete cart mutation.
///
/// ## Wire Format
/// ```json
/// { "type": "ADD_ITEM",    "payload": { "item": { "id": "a", "price": [...] } } }
/// { "type": "UPDATE_ITEM", "payload": { "id": "a", "patch": { "quantity": 3 } } }
/// { "type": "REMOVE_ITEM", "payload": { "id": "a" } }
/// { "type": "CLEAR_CART",  "payload": { "emptyState": { "items": [], ... } } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum CartAction {
    AddItem {
        item: Item,
    },
    UpdateItem {
        id: String,
        patch: ItemPatch,
    },
    RemoveItem {
        id: String,
    },
    ClearCart {
        #[serde(rename = "emptyState")]
        empty_state: CartState,
    },
}

impl CartAction {
    pub fn add_item(item: Item) -> Self {
        CartAction::AddItem { item }
    }

    pub fn update_item(id: impl Into<String>, patch: ItemPatch) -> Self {
        CartAction::UpdateItem {
            id: id.into(),
            patch,
        }
    }

    pub fn remove_item(id: impl Into<String>) -> Self {
        CartAction::RemoveItem { id: id.into() }
    }

    /// CLEAR_CART carrying the canonical empty state.
    pub fn clear_cart() -> Self {
        CartAction::ClearCart {
            empty_state: CartState::empty(),
        }
    }

    /// Short name used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            CartAction::AddItem { .. } => "ADD_ITEM",
            CartAction::UpdateItem { .. } => "UPDATE_ITEM",
            CartAction::RemoveItem { .. } => "REMOVE_ITEM",
            CartAction::ClearCart { .. } => "CLEAR_CART",
        }
    }
}

// =============================================================================
// Reducer
// =============================================================================

/// Applies [`CartAction`]s in one display currency.
///
/// ## Example
/// ```rust
/// use basket_core::{CartAction, CartReducer, CartState, CurrencyCode, Item, Money, PriceEntry};
///
/// let reducer = CartReducer::new(CurrencyCode::new("USD").unwrap());
/// let item = Item::new("x", vec![PriceEntry::new("USD", Money::from_minor(5))]).with_quantity(2);
///
/// let state = reducer
///     .transition(&CartState::empty(), CartAction::add_item(item))
///     .unwrap();
///
/// assert_eq!(state.total_items(), 2);
/// assert_eq!(state.total_cost(), Money::from_minor(10));
/// assert!(!state.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartReducer {
    calculator: TotalsCalculator,
}

impl CartReducer {
    pub fn new(currency: CurrencyCode) -> Self {
        CartReducer {
            calculator: TotalsCalculator::new(currency),
        }
    }

    pub fn calculator(&self) -> &TotalsCalculator {
        &self.calculator
    }

    /// Produces the state that follows `state` after `action`.
    pub fn transition(&self, state: &CartState, action: CartAction) -> CoreResult<CartState> {
        match action {
            CartAction::AddItem { item } => {
                let mut items = state.items().to_vec();
                items.push(item);
                self.calculator.build_state(items)
            }
            CartAction::UpdateItem { id, patch } => {
                let items = state
                    .items()
                    .iter()
                    .map(|item| {
                        if item.id == id {
                            merge_item(item, &patch)
                        } else {
                            item.clone()
                        }
                    })
                    .collect();
                self.calculator.build_state(items)
            }
            CartAction::RemoveItem { id } => {
                let items = state
                    .items()
                    .iter()
                    .filter(|item| item.id != id)
                    .cloned()
                    .collect();
                self.calculator.build_state(items)
            }
            CartAction::ClearCart { empty_state } => Ok(empty_state),
        }
    }

    /// Re-derives every total of `state`, e.g. after loading a snapshot
    /// written under a different display currency.
    pub fn rebuild(&self, state: CartState) -> CoreResult<CartState> {
        self.calculator.build_state(state.into_items())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
