//! # Totals Calculator
//!
//! Derives per-item and cart-level totals from a list of items.
//!
//! ## What Gets Derived
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Display currency: USD                                                  │
//! │                                                                         │
//! │  Item        price (USD)   qty     itemTotal                           │
//! │  ──────      ───────────   ───     ─────────                           │
//! │  mug             500         2        1000                              │
//! │  tote           1200         1        1200                              │
//! │  sticker          99         5         495                              │
//! │                            ───     ─────────                           │
//! │  totalItems                  8                                          │
//! │  totalUniqueItems            3                                          │
//! │  totalCost                            2695                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An item without a USD entry fails the whole calculation with
//! [`CoreError::MissingPrice`]. It is never counted as free.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartState, CurrencyCode, Item};

/// Output of a full calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct CartTotals {
    /// Input items with `item_total` filled in.
    pub items: Vec<Item>,
    pub total_items: u64,
    pub total_unique_items: usize,
    pub total_cost: Money,
}

impl From<CartTotals> for CartState {
    fn from(totals: CartTotals) -> Self {
        CartState::from_parts(
            totals.items,
            totals.total_items,
            totals.total_unique_items,
            totals.total_cost,
        )
    }
}

/// Computes totals in a single display currency.
///
/// ## Example
/// ```rust
/// use basket_core::{CurrencyCode, Item, Money, PriceEntry, TotalsCalculator};
///
/// let calculator = TotalsCalculator::new(CurrencyCode::new("USD").unwrap());
/// let items = vec![
///     Item::new("mug", vec![PriceEntry::new("USD", Money::from_minor(500))]).with_quantity(2),
/// ];
///
/// let totals = calculator.calculate(items).unwrap();
/// assert_eq!(totals.total_cost, Money::from_minor(1000));
/// assert_eq!(totals.items[0].item_total, Some(Money::from_minor(1000)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsCalculator {
    currency: CurrencyCode,
}

impl TotalsCalculator {
    pub fn new(currency: CurrencyCode) -> Self {
        TotalsCalculator { currency }
    }

    /// The display currency totals are computed in.
    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Unit price of `item` in the display currency.
    pub fn unit_price(&self, item: &Item) -> CoreResult<Money> {
        item.price_in(&self.currency)
            .map(|entry| entry.value)
            .ok_or_else(|| CoreError::missing_price(&item.id, self.currency.as_str()))
    }

    /// quantity × unit price for one item.
    pub fn item_total(&self, item: &Item) -> CoreResult<Money> {
        self.unit_price(item)?
            .checked_mul_quantity(item.effective_quantity())
            .ok_or_else(|| CoreError::AmountOverflow {
                item_id: item.id.clone(),
            })
    }

    /// Returns the items with `item_total` set on each.
    pub fn items_with_totals(&self, items: Vec<Item>) -> CoreResult<Vec<Item>> {
        items
            .into_iter()
            .map(|mut item| {
                item.item_total = Some(self.item_total(&item)?);
                Ok(item)
            })
            .collect()
    }

    /// Sum of all quantities.
    pub fn total_items(items: &[Item]) -> u64 {
        items
            .iter()
            .map(|item| u64::from(item.effective_quantity()))
            .sum()
    }

    /// Number of entries, regardless of quantity.
    pub fn total_unique_items(items: &[Item]) -> usize {
        items.len()
    }

    /// Sum of line totals in the display currency.
    pub fn total_cost(&self, items: &[Item]) -> CoreResult<Money> {
        items.iter().try_fold(Money::zero(), |total, item| {
            let line = self.item_total(item)?;
            total
                .checked_add(line)
                .ok_or_else(|| CoreError::AmountOverflow {
                    item_id: item.id.clone(),
                })
        })
    }

    /// Runs every derivation over `items`.
    ///
    /// Fails before producing anything if a single item cannot be priced.
    pub fn calculate(&self, items: Vec<Item>) -> CoreResult<CartTotals> {
        let total_cost = self.total_cost(&items)?;
        let total_items = Self::total_items(&items);
        let total_unique_items = Self::total_unique_items(&items);
        let items = self.items_with_totals(items)?;

        Ok(CartTotals {
            items,
            total_items,
            total_unique_items,
            total_cost,
        })
    }

    /// Builds a consistent [`CartState`] from `items`.
    pub fn build_state(&self, items: Vec<Item>) -> CoreResult<CartState> {
        self.calculate(items).map(CartState::from)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
