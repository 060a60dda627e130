//! # Domain Types
//!
//! Core data model of the cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  CartState                                                      │   │
//! │  │  ─────────────────────────────────────────────────────────────  │   │
//! │  │  items: [Item, Item, ...]   (insertion order, unique ids)       │   │
//! │  │  isEmpty ─────────┐                                             │   │
//! │  │  totalItems       │  derived: always rebuilt from items         │   │
//! │  │  totalUniqueItems │  by the TotalsCalculator                    │   │
//! │  │  totalCost ───────┘                                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │   PriceEntry    │   │   ItemPatch     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  currency       │   │  price?         │       │
//! │  │  price[]  ──────┼──►│  value (Money)  │   │  quantity?      │       │
//! │  │  quantity?      │   └─────────────────┘   │  attributes     │       │
//! │  │  itemTotal?     │                         └─────────────────┘       │
//! │  │  ...attributes  │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Extra Attributes
//! Callers attach arbitrary fields (name, image, color, ...) to an item.
//! They live in a side map flattened into the item's JSON object and are
//! carried through every transition untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, ValidationError};
use crate::money::Money;
use crate::validation::{validate_currency_code, ValidationResult};

/// JSON keys owned by [`Item`] itself. They can never be stored as extra
/// attributes, otherwise a snapshot would carry the same key twice.
pub const RESERVED_ITEM_KEYS: &[&str] = &["id", "price", "quantity", "itemTotal"];

/// Returns true if `key` names one of the item's own fields.
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_ITEM_KEYS.contains(&key)
}

// =============================================================================
// Currency Code
// =============================================================================

/// A validated currency code, used as the cart's display currency.
///
/// Matching against [`PriceEntry::currency`] is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a currency code after validating its format.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::CurrencyCode;
    ///
    /// assert!(CurrencyCode::new("USD").is_ok());
    /// assert!(CurrencyCode::new("").is_err());
    /// ```
    pub fn new(code: impl Into<String>) -> ValidationResult<Self> {
        let code = code.into();
        validate_currency_code(&code)?;
        Ok(CurrencyCode(code))
    }

    /// Returns the code as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CurrencyCode::new(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

// =============================================================================
// Price Entry
// =============================================================================

/// A price for an item in one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceEntry {
    /// Currency code, e.g. "USD".
    pub currency: String,

    /// Unit price in the currency's minor units.
    pub value: Money,
}

impl PriceEntry {
    pub fn new(currency: impl Into<String>, value: Money) -> Self {
        PriceEntry {
            currency: currency.into(),
            value,
        }
    }
}

// =============================================================================
// Item
// =============================================================================

/// A line item in the cart.
///
/// ## JSON Shape
/// ```json
/// {
///   "id": "sku-1",
///   "price": [{ "currency": "USD", "value": 1099 }],
///   "quantity": 2,
///   "itemTotal": 2198,
///   "name": "Tote bag"
/// }
/// ```
/// `name` above is an extra attribute; anything not listed in
/// [`RESERVED_ITEM_KEYS`] ends up in [`Item::attributes`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Item {
    /// Identifier, unique within a cart.
    pub id: String,

    /// Prices keyed by currency. One must match the display currency.
    pub price: Vec<PriceEntry>,

    /// Quantity in cart. `None` counts as 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub quantity: Option<u32>,

    /// quantity × display-currency price. Written by the calculator only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub item_total: Option<Money>,

    /// Caller-supplied fields, never interpreted by the cart.
    #[serde(flatten)]
    #[ts(skip)]
    pub attributes: Map<String, Value>,
}

impl Item {
    /// Creates an item with no quantity and no extra attributes.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::{Item, Money, PriceEntry};
    ///
    /// let item = Item::new("sku-1", vec![PriceEntry::new("USD", Money::from_minor(500))])
    ///     .with_quantity(2)
    ///     .with_attribute("name", "Tote bag");
    ///
    /// assert_eq!(item.effective_quantity(), 2);
    /// assert_eq!(item.attributes["name"], "Tote bag");
    /// ```
    pub fn new(id: impl Into<String>, price: Vec<PriceEntry>) -> Self {
        Item {
            id: id.into(),
            price,
            quantity: None,
            item_total: None,
            attributes: Map::new(),
        }
    }

    /// Sets the quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Adds an extra attribute. Reserved keys are ignored.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if !is_reserved_key(&key) {
            self.attributes.insert(key, value.into());
        }
        self
    }

    /// Quantity used for totals.
    #[inline]
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }

    /// Finds the first price entry in the given currency.
    pub fn price_in(&self, currency: &CurrencyCode) -> Option<&PriceEntry> {
        self.price.iter().find(|p| p.currency == currency.as_str())
    }
}

// =============================================================================
// Item Patch
// =============================================================================

/// A partial update for an [`Item`].
///
/// Every present field overwrites the item's field; attributes are merged
/// key by key. The id is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub price: Option<Vec<PriceEntry>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub quantity: Option<u32>,

    #[serde(flatten)]
    #[ts(skip)]
    pub attributes: Map<String, Value>,
}

impl ItemPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        ItemPatch::default()
    }

    /// A patch that only changes the quantity.
    pub fn quantity(quantity: u32) -> Self {
        ItemPatch {
            quantity: Some(quantity),
            ..ItemPatch::default()
        }
    }

    /// A patch carrying every field of `item` except its id and total.
    pub fn from_item(item: &Item) -> Self {
        ItemPatch {
            price: Some(item.price.clone()),
            quantity: item.quantity,
            attributes: item.attributes.clone(),
        }
    }

    /// Sets the price list.
    pub fn with_price(mut self, price: Vec<PriceEntry>) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Adds an attribute to merge.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Merges `patch` over `item`. Patch fields win.
///
/// ## Precedence
/// ```text
/// field        item        patch       result
/// ─────        ────        ─────       ──────
/// id           "a"         (n/a)       "a"
/// price        [USD 10]    None        [USD 10]
/// quantity     2           Some(3)     3
/// itemTotal    20          (n/a)       20 (stale until recomputed)
/// color        "red"       "blue"      "blue"
/// size         "M"         (absent)    "M"
/// ```
/// Attribute keys in the patch that collide with [`RESERVED_ITEM_KEYS`] are
/// dropped.
pub fn merge_item(item: &Item, patch: &ItemPatch) -> Item {
    let mut merged = item.clone();

    if let Some(price) = &patch.price {
        merged.price = price.clone();
    }

    if let Some(quantity) = patch.quantity {
        merged.quantity = Some(quantity);
    }

    for (key, value) in &patch.attributes {
        if !is_reserved_key(key) {
            merged.attributes.insert(key.clone(), value.clone());
        }
    }

    merged
}

// =============================================================================
// Cart State
// =============================================================================

/// Full snapshot of a cart: items plus derived aggregates.
///
/// Fields are private so the aggregates can only be produced by the
/// [`TotalsCalculator`](crate::totals::TotalsCalculator) or loaded from a
/// snapshot. `Default` is the canonical empty cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartState {
    items: Vec<Item>,
    is_empty: bool,
    total_items: u64,
    total_unique_items: usize,
    total_cost: Money,
}

impl CartState {
    /// The canonical empty cart.
    pub fn empty() -> Self {
        CartState {
            items: Vec::new(),
            is_empty: true,
            total_items: 0,
            total_unique_items: 0,
            total_cost: Money::zero(),
        }
    }

    pub(crate) fn from_parts(
        items: Vec<Item>,
        total_items: u64,
        total_unique_items: usize,
        total_cost: Money,
    ) -> Self {
        CartState {
            items,
            is_empty: total_unique_items == 0,
            total_items,
            total_unique_items,
            total_cost,
        }
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Consumes the state and returns its items.
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// Sum of all quantities.
    #[inline]
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Number of distinct items.
    #[inline]
    pub fn total_unique_items(&self) -> usize {
        self.total_unique_items
    }

    /// Sum of all line totals in the display currency.
    #[inline]
    pub fn total_cost(&self) -> Money {
        self.total_cost
    }

    /// Finds an item by id.
    pub fn get_item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Checks whether an item with `id` is in the cart.
    pub fn in_cart(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Returns an error naming `id` if it is not in the cart.
    pub fn require_item(&self, id: &str) -> Result<&Item, CoreError> {
        self.get_item(id)
            .ok_or_else(|| CoreError::UnknownItem(id.to_string()))
    }
}

impl Default for CartState {
    fn default() -> Self {
        CartState::empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn usd(value: i64) -> Vec<PriceEntry> {
        vec![PriceEntry::new("USD", Money::from_minor(value))]
    }

    #[test]
    fn test_empty_state_default() {
        let state = CartState::default();
        assert!(state.is_empty());
        assert_eq!(state.total_items(), 0);
        assert_eq!(state.total_unique_items(), 0);
        assert!(state.total_cost().is_zero());
        assert_eq!(state, CartState::empty());
    }

    #[test]
    fn test_currency_code_rejects_bad_input() {
        assert!(CurrencyCode::new("EUR").is_ok());
        assert!(CurrencyCode::new("").is_err());
        assert!(CurrencyCode::new("US D").is_err());
    }

    #[test]
    fn test_currency_code_deserialize_validates() {
        let ok: Result<CurrencyCode, _> = serde_json::from_str("\"JPY\"");
        assert_eq!(ok.unwrap().as_str(), "JPY");

        let bad: Result<CurrencyCode, _> = serde_json::from_str("\"\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_item_json_shape() {
        let item = Item::new("a", usd(10))
            .with_quantity(2)
            .with_attribute("color", "red");

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "a",
                "price": [{ "currency": "USD", "value": 10 }],
                "quantity": 2,
                "color": "red"
            })
        );
    }

    #[test]
    fn test_item_deserialize_collects_extra_attributes() {
        let item: Item = serde_json::from_value(json!({
            "id": "a",
            "price": [{ "currency": "USD", "value": 10 }],
            "name": "Mug",
            "tags": ["kitchen"]
        }))
        .unwrap();

        assert_eq!(item.quantity, None);
        assert_eq!(item.effective_quantity(), 1);
        assert_eq!(item.attributes.len(), 2);
        assert_eq!(item.attributes["name"], "Mug");
    }

    #[test]
    fn test_with_attribute_ignores_reserved_keys() {
        let item = Item::new("a", usd(10)).with_attribute("id", "b");
        assert_eq!(item.id, "a");
        assert!(item.attributes.is_empty());
    }

    #[test]
    fn test_price_in_picks_first_match() {
        let item = Item::new(
            "a",
            vec![
                PriceEntry::new("EUR", Money::from_minor(9)),
                PriceEntry::new("USD", Money::from_minor(10)),
                PriceEntry::new("USD", Money::from_minor(99)),
            ],
        );
        let usd = CurrencyCode::new("USD").unwrap();
        let gbp = CurrencyCode::new("GBP").unwrap();

        assert_eq!(item.price_in(&usd).map(|p| p.value), Some(Money::from_minor(10)));
        assert!(item.price_in(&gbp).is_none());
    }

    #[test]
    fn test_merge_patch_wins() {
        let item = Item::new("a", usd(10))
            .with_quantity(2)
            .with_attribute("color", "red")
            .with_attribute("size", "M");
        let patch = ItemPatch::quantity(3).with_attribute("color", "blue");

        let merged = merge_item(&item, &patch);

        assert_eq!(merged.id, "a");
        assert_eq!(merged.price, usd(10));
        assert_eq!(merged.quantity, Some(3));
        assert_eq!(merged.attributes["color"], "blue");
        assert_eq!(merged.attributes["size"], "M");
    }

    #[test]
    fn test_merge_drops_reserved_attribute_keys() {
        let item = Item::new("a", usd(10));
        let patch: ItemPatch = serde_json::from_value(json!({
            "id": "hijack",
            "itemTotal": 1,
            "note": "gift"
        }))
        .unwrap();

        let merged = merge_item(&item, &patch);

        assert_eq!(merged.id, "a");
        assert_eq!(merged.item_total, None);
        assert_eq!(merged.attributes.len(), 1);
        assert_eq!(merged.attributes["note"], "gift");
    }

    #[test]
    fn test_patch_from_item_skips_id_and_total() {
        let mut item = Item::new("a", usd(10)).with_quantity(4);
        item.item_total = Some(Money::from_minor(40));

        let patch = ItemPatch::from_item(&item);
        assert_eq!(patch.price, Some(usd(10)));
        assert_eq!(patch.quantity, Some(4));
    }

    #[test]
    fn test_lookup_helpers() {
        let state = CartState::from_parts(
            vec![Item::new("a", usd(10)).with_quantity(1)],
            1,
            1,
            Money::from_minor(10),
        );

        assert!(state.in_cart("a"));
        assert!(!state.in_cart("b"));
        assert_eq!(state.get_item("a").map(|i| i.id.as_str()), Some("a"));
        assert!(matches!(
            state.require_item("b"),
            Err(CoreError::UnknownItem(id)) if id == "b"
        ));
    }

    #[test]
    fn test_cart_state_json_field_names() {
        let value = serde_json::to_value(CartState::empty()).unwrap();
        assert_eq!(
            value,
            json!({
                "items": [],
                "isEmpty": true,
                "totalItems": 0,
                "totalUniqueItems": 0,
                "totalCost": 0
            })
        );
    }
}
