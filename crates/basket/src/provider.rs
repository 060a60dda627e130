//! # Cart Provider
//!
//! Owns the current cart, runs every change through the reducer and writes
//! a snapshot after each one.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Provider Operations                             │
//! │                                                                         │
//! │  Caller                       Provider                  Action          │
//! │  ──────                       ────────                  ──────          │
//! │                                                                         │
//! │  add_item(item, q) ─────────► id in cart? ──── yes ──► UPDATE_ITEM     │
//! │                                    │                   (qty = old + q)  │
//! │                                    └────────── no ───► ADD_ITEM        │
//! │                                                                         │
//! │  update_item(id, patch) ────► id in cart? ──── no ───► UnknownItem     │
//! │                                    └────────── yes ──► UPDATE_ITEM     │
//! │                                                                         │
//! │  update_item_quantity(id, 0) ────────────────────────► REMOVE_ITEM     │
//! │  update_item_quantity(id, q) ► id in cart? ─── yes ──► UPDATE_ITEM     │
//! │                                                                         │
//! │  remove_item(id) ────────────────────────────────────► REMOVE_ITEM     │
//! │  clear_cart() ───────────────────────────────────────► CLEAR_CART      │
//! │                                                                         │
//! │  NOTE: every dispatch holds the state lock until the snapshot is saved. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dispatch Order
//! ```text
//! transition(state, action) ──► serde_json::to_string ──► storage.save ──► commit
//!        │                               │                      │
//!        └── error: state untouched ─────┴──────────────────────┘
//! ```

use basket_core::validation::{validate_item, validate_patch};
use basket_core::{
    CartAction, CartReducer, CartState, CoreError, CurrencyCode, Item, ItemPatch,
};
use basket_store::CartStorage;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::CartConfig;
use crate::error::CartResult;

/// A persisted cart bound to one display currency and one storage key.
///
/// ## Usage
/// ```rust,ignore
/// let provider = CartProvider::open(&CartConfig::default(), MemoryStorage::new()).await?;
///
/// provider.add_item(mug, 2).await?;
/// provider.update_item_quantity("mug", 3).await?;
///
/// assert_eq!(provider.state().await.total_items(), 3);
/// ```
///
/// Share across tasks with `Arc<CartProvider<S>>`; dispatches are serialized.
#[derive(Debug)]
pub struct CartProvider<S> {
    reducer: CartReducer,
    storage: S,
    storage_key: String,
    state: Mutex<CartState>,
}

impl<S: CartStorage> CartProvider<S> {
    /// Opens the cart described by `config`, restoring its last snapshot.
    pub async fn open(config: &CartConfig, storage: S) -> CartResult<Self> {
        config.validate()?;
        let reducer = CartReducer::new(config.currency()?);
        Self::with_reducer(reducer, storage, config.storage_key.clone()).await
    }

    /// Opens a cart with an explicit reducer and storage key.
    ///
    /// ## Snapshot Handling
    /// - No snapshot: starts from the canonical empty cart
    /// - Snapshot present: parsed, then every total is recomputed in the
    ///   reducer's currency
    /// - Malformed snapshot: [`CartError::Snapshot`](crate::CartError::Snapshot)
    pub async fn with_reducer(
        reducer: CartReducer,
        storage: S,
        storage_key: impl Into<String>,
    ) -> CartResult<Self> {
        let storage_key = storage_key.into();

        let state = match storage.load(&storage_key).await? {
            Some(payload) => {
                let snapshot: CartState = serde_json::from_str(&payload).map_err(|e| {
                    warn!(key = %storage_key, error = %e, "Stored cart snapshot is malformed");
                    e
                })?;
                reducer.rebuild(snapshot)?
            }
            None => CartState::empty(),
        };

        info!(
            key = %storage_key,
            currency = %reducer.calculator().currency(),
            items = state.total_unique_items(),
            "Cart initialized"
        );

        Ok(CartProvider {
            reducer,
            storage,
            storage_key,
            state: Mutex::new(state),
        })
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Snapshot of the current cart.
    pub async fn state(&self) -> CartState {
        self.state.lock().await.clone()
    }

    /// Finds an item by id.
    pub async fn get_item(&self, id: &str) -> Option<Item> {
        self.state.lock().await.get_item(id).cloned()
    }

    /// Checks whether an item with `id` is in the cart.
    pub async fn in_cart(&self, id: &str) -> bool {
        self.state.lock().await.in_cart(id)
    }

    pub fn currency(&self) -> &CurrencyCode {
        self.reducer.calculator().currency()
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Adds `quantity` of `item`, merging into an existing entry with the
    /// same id.
    ///
    /// ## Behavior
    /// - `quantity == 0`: nothing happens, the current cart is returned
    /// - Invalid item: [`CoreError::InvalidItem`], nothing dispatched
    /// - Id already in cart: UPDATE_ITEM with the incoming fields and
    ///   `quantity = existing + quantity`
    /// - Otherwise: ADD_ITEM with `quantity`
    pub async fn add_item(&self, item: Item, quantity: u32) -> CartResult<CartState> {
        if quantity < 1 {
            debug!(item_id = %item.id, "Ignoring add with zero quantity");
            return Ok(self.state().await);
        }

        check_item(&item)?;

        let mut state = self.state.lock().await;

        let action = match state.get_item(&item.id) {
            Some(existing) => {
                let combined = existing
                    .effective_quantity()
                    .checked_add(quantity)
                    .ok_or_else(|| CoreError::AmountOverflow {
                        item_id: item.id.clone(),
                    })?;
                let patch = ItemPatch::from_item(&item).with_quantity(combined);
                CartAction::update_item(item.id, patch)
            }
            None => CartAction::add_item(item.with_quantity(quantity)),
        };

        self.commit(&mut state, action).await
    }

    /// Removes the item with `id`. Absent ids leave the cart unchanged.
    pub async fn remove_item(&self, id: &str) -> CartResult<CartState> {
        let mut state = self.state.lock().await;
        self.commit(&mut state, CartAction::remove_item(id)).await
    }

    /// Merges `patch` into the item with `id`.
    ///
    /// The patch is held to the same rules as [`add_item`](Self::add_item):
    /// a present price list must be valid and attributes may not use the
    /// item's own keys.
    pub async fn update_item(&self, id: &str, patch: ItemPatch) -> CartResult<CartState> {
        check_patch(id, &patch)?;

        let mut state = self.state.lock().await;
        if let Err(err) = state.require_item(id) {
            warn!(item_id = %id, "Update for item not in cart");
            return Err(err.into());
        }
        self.commit(&mut state, CartAction::update_item(id, patch))
            .await
    }

    /// Sets the quantity of the item with `id`. Zero removes it.
    pub async fn update_item_quantity(&self, id: &str, quantity: u32) -> CartResult<CartState> {
        let mut state = self.state.lock().await;

        let action = if quantity == 0 {
            CartAction::remove_item(id)
        } else {
            if let Err(err) = state.require_item(id) {
                warn!(item_id = %id, "Quantity change for item not in cart");
                return Err(err.into());
            }
            CartAction::update_item(id, ItemPatch::quantity(quantity))
        };

        self.commit(&mut state, action).await
    }

    /// Empties the cart.
    pub async fn clear_cart(&self) -> CartResult<CartState> {
        let mut state = self.state.lock().await;
        self.commit(&mut state, CartAction::clear_cart()).await
    }

    /// Applies a raw action without the existence checks of the typed
    /// operations. Item and patch contents are still validated.
    pub async fn dispatch(&self, action: CartAction) -> CartResult<CartState> {
        match &action {
            CartAction::AddItem { item } => check_item(item)?,
            CartAction::UpdateItem { id, patch } => check_patch(id, patch)?,
            CartAction::RemoveItem { .. } | CartAction::ClearCart { .. } => {}
        }

        let mut state = self.state.lock().await;
        self.commit(&mut state, action).await
    }

    /// Transitions, persists, then replaces `state`.
    async fn commit(&self, state: &mut CartState, action: CartAction) -> CartResult<CartState> {
        let kind = action.kind();
        let item_id = match &action {
            CartAction::AddItem { item } => Some(item.id.clone()),
            CartAction::UpdateItem { id, .. } | CartAction::RemoveItem { id } => Some(id.clone()),
            CartAction::ClearCart { .. } => None,
        };

        let next = self.reducer.transition(state, action)?;
        let payload = serde_json::to_string(&next)?;
        self.storage.save(&self.storage_key, &payload).await?;

        debug!(
            action = kind,
            item_id = ?item_id,
            total_items = next.total_items(),
            total_cost = %next.total_cost(),
            "Cart updated"
        );

        *state = next.clone();
        Ok(next)
    }
}

fn check_item(item: &Item) -> CartResult<()> {
    validate_item(item).map_err(|source| {
        warn!(item_id = %item.id, error = %source, "Rejected invalid item");
        CoreError::invalid_item(&item.id, source).into()
    })
}

fn check_patch(id: &str, patch: &ItemPatch) -> CartResult<()> {
    validate_patch(patch).map_err(|source| {
        warn!(item_id = %id, error = %source, "Rejected invalid patch");
        CoreError::invalid_item(id, source).into()
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CartError, ErrorCode};
    use basket_core::{Money, PriceEntry};
    use basket_store::{Database, DbConfig, MemoryStorage, StoreError, StoreResult};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    const KEY: &str = "basket-cart";

    fn priced(id: &str, usd: i64) -> Item {
        Item::new(
            id,
            vec![
                PriceEntry::new("USD", Money::from_minor(usd)),
                PriceEntry::new("EUR", Money::from_minor(usd + 1)),
            ],
        )
    }

    async fn provider(storage: MemoryStorage) -> CartProvider<MemoryStorage> {
        CartProvider::open(&CartConfig::default(), storage)
            .await
            .unwrap()
    }

    /// Memory storage whose saves can be switched to fail.
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_saves: AtomicBool,
    }

    impl CartStorage for FlakyStorage {
        async fn load(&self, key: &str) -> StoreResult<Option<String>> {
            self.inner.load(key).await
        }

        async fn save(&self, key: &str, value: &str) -> StoreResult<()> {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(StoreError::Internal("disk full".to_string()));
            }
            self.inner.save(key, value).await
        }

        async fn remove(&self, key: &str) -> StoreResult<bool> {
            self.inner.remove(key).await
        }
    }

    #[tokio::test]
    async fn test_starts_empty_without_snapshot() {
        let cart = provider(MemoryStorage::new()).await;
        assert_eq!(cart.state().await, CartState::empty());
        assert_eq!(cart.currency().as_str(), "USD");
        assert_eq!(cart.storage_key(), KEY);
    }

    #[tokio::test]
    async fn test_add_new_item() {
        let cart = provider(MemoryStorage::new()).await;

        let state = cart.add_item(priced("x", 5), 2).await.unwrap();

        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].quantity, Some(2));
        assert_eq!(state.items()[0].item_total, Some(Money::from_minor(10)));
        assert_eq!(state.total_items(), 2);
        assert_eq!(state.total_unique_items(), 1);
        assert_eq!(state.total_cost(), Money::from_minor(10));
        assert!(!state.is_empty());
    }

    #[tokio::test]
    async fn test_add_existing_item_sums_quantity() {
        let cart = provider(MemoryStorage::new()).await;
        cart.add_item(priced("a", 10), 2).await.unwrap();

        let state = cart
            .add_item(priced("a", 10).with_attribute("color", "red"), 3)
            .await
            .unwrap();

        assert_eq!(state.total_unique_items(), 1);
        let item = state.get_item("a").unwrap();
        assert_eq!(item.quantity, Some(5));
        assert_eq!(item.item_total, Some(Money::from_minor(50)));
        assert_eq!(item.attributes["color"], "red");
    }

    #[tokio::test]
    async fn test_add_with_new_price_replaces_price() {
        let cart = provider(MemoryStorage::new()).await;
        cart.add_item(priced("a", 10), 1).await.unwrap();

        let state = cart.add_item(priced("a", 20), 1).await.unwrap();
        assert_eq!(state.total_cost(), Money::from_minor(40));
    }

    #[tokio::test]
    async fn test_add_zero_quantity_is_noop() {
        let storage = MemoryStorage::new();
        let cart = provider(storage.clone()).await;

        let state = cart.add_item(priced("a", 10), 0).await.unwrap();

        assert!(state.is_empty());
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_add_invalid_item_rejected() {
        let cart = provider(MemoryStorage::new()).await;

        let err = cart.add_item(priced("", 10), 1).await.unwrap_err();
        assert!(matches!(err, CartError::Core(CoreError::InvalidItem { .. })));
        assert_eq!(err.code(), ErrorCode::ValidationError);

        let err = cart.add_item(Item::new("a", Vec::new()), 1).await.unwrap_err();
        assert!(matches!(err, CartError::Core(CoreError::InvalidItem { .. })));

        assert!(cart.state().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_display_price_leaves_cart_unchanged() {
        let storage = MemoryStorage::new();
        let cart = provider(storage.clone()).await;
        cart.add_item(priced("a", 10), 1).await.unwrap();
        let before = cart.state().await;

        let eur_only = Item::new("eu", vec![PriceEntry::new("EUR", Money::from_minor(5))]);
        let err = cart.add_item(eur_only, 1).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::MissingPrice);
        assert_eq!(cart.state().await, before);
        let stored: CartState =
            serde_json::from_str(&storage.load(KEY).await.unwrap().unwrap()).unwrap();
        assert_eq!(stored, before);
    }

    #[tokio::test]
    async fn test_update_item_merges_patch() {
        let cart = provider(MemoryStorage::new()).await;
        cart.add_item(priced("a", 10).with_attribute("size", "M"), 2)
            .await
            .unwrap();

        let state = cart
            .update_item("a", ItemPatch::quantity(3).with_attribute("color", "blue"))
            .await
            .unwrap();

        let item = state.get_item("a").unwrap();
        assert_eq!(item.quantity, Some(3));
        assert_eq!(item.item_total, Some(Money::from_minor(30)));
        assert_eq!(item.attributes["size"], "M");
        assert_eq!(item.attributes["color"], "blue");
    }

    #[tokio::test]
    async fn test_update_unknown_item_errors() {
        let cart = provider(MemoryStorage::new()).await;

        let err = cart
            .update_item("ghost", ItemPatch::quantity(1))
            .await
            .unwrap_err();
        assert!(matches!(err, CartError::Core(CoreError::UnknownItem(ref id)) if id == "ghost"));

        let err = cart.update_item_quantity("ghost", 2).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_update_quantity() {
        let cart = provider(MemoryStorage::new()).await;
        cart.add_item(priced("a", 10), 1).await.unwrap();

        let state = cart.update_item_quantity("a", 4).await.unwrap();
        assert_eq!(state.total_items(), 4);
        assert_eq!(state.total_cost(), Money::from_minor(40));
    }

    #[tokio::test]
    async fn test_update_quantity_zero_removes() {
        let cart = provider(MemoryStorage::new()).await;
        cart.add_item(priced("a", 10), 1).await.unwrap();
        cart.add_item(priced("b", 5), 1).await.unwrap();

        let state = cart.update_item_quantity("a", 0).await.unwrap();
        assert!(!state.in_cart("a"));
        assert_eq!(state.total_unique_items(), 1);

        // Zero on an unknown id is a plain removal, not an error.
        let again = cart.update_item_quantity("ghost", 0).await.unwrap();
        assert_eq!(again, state);
    }

    #[tokio::test]
    async fn test_remove_item() {
        let cart = provider(MemoryStorage::new()).await;
        let before = cart.state().await;
        cart.add_item(priced("a", 10), 2).await.unwrap();

        let after = cart.remove_item("a").await.unwrap();
        assert_eq!(after.total_items(), before.total_items());
        assert_eq!(after.total_cost(), before.total_cost());
        assert!(after.is_empty());

        let unchanged = cart.remove_item("ghost").await.unwrap();
        assert_eq!(unchanged, after);
    }

    #[tokio::test]
    async fn test_clear_cart() {
        let cart = provider(MemoryStorage::new()).await;
        cart.add_item(priced("a", 10), 2).await.unwrap();
        cart.add_item(priced("b", 3), 1).await.unwrap();

        let state = cart.clear_cart().await.unwrap();
        assert_eq!(state, CartState::empty());
        assert!(!cart.in_cart("a").await);
        assert!(cart.get_item("b").await.is_none());
    }

    #[tokio::test]
    async fn test_get_item_and_in_cart() {
        let cart = provider(MemoryStorage::new()).await;
        cart.add_item(priced("a", 10), 2).await.unwrap();

        assert!(cart.in_cart("a").await);
        assert!(!cart.in_cart("b").await);
        assert_eq!(cart.get_item("a").await.unwrap().quantity, Some(2));
    }

    #[tokio::test]
    async fn test_dispatch_raw_action() {
        let cart = provider(MemoryStorage::new()).await;

        let state = cart
            .dispatch(CartAction::add_item(priced("a", 10).with_quantity(2)))
            .await
            .unwrap();
        assert_eq!(state.total_items(), 2);

        // Raw UPDATE_ITEM on an absent id is accepted and changes nothing.
        let same = cart
            .dispatch(CartAction::update_item("ghost", ItemPatch::quantity(9)))
            .await
            .unwrap();
        assert_eq!(same, state);
    }

    #[tokio::test]
    async fn test_snapshot_written_after_each_change() {
        let storage = MemoryStorage::new();
        let cart = provider(storage.clone()).await;

        cart.add_item(priced("a", 10), 2).await.unwrap();

        let raw = storage.load(KEY).await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["totalItems"], 2);
        assert_eq!(json["totalCost"], 20);
        assert_eq!(json["isEmpty"], false);
        assert_eq!(json["items"][0]["itemTotal"], 20);
    }

    #[tokio::test]
    async fn test_state_restored_from_snapshot() {
        let storage = MemoryStorage::new();
        {
            let cart = provider(storage.clone()).await;
            cart.add_item(priced("a", 10), 2).await.unwrap();
            cart.add_item(priced("b", 5), 1).await.unwrap();
        }

        let reopened = provider(storage).await;
        let state = reopened.state().await;
        assert_eq!(state.total_unique_items(), 2);
        assert_eq!(state.total_cost(), Money::from_minor(25));
    }

    #[tokio::test]
    async fn test_snapshot_rebuilt_in_configured_currency() {
        let storage = MemoryStorage::new();
        provider(storage.clone())
            .await
            .add_item(priced("a", 10), 2)
            .await
            .unwrap();

        let config = CartConfig::default().with_display_currency("EUR");
        let cart = CartProvider::open(&config, storage).await.unwrap();

        let state = cart.state().await;
        assert_eq!(state.total_cost(), Money::from_minor(22));
        assert_eq!(state.items()[0].item_total, Some(Money::from_minor(22)));
    }

    #[tokio::test]
    async fn test_malformed_snapshot_is_error() {
        let storage = MemoryStorage::new();
        storage.save(KEY, "{not json").await.unwrap();

        let err = CartProvider::open(&CartConfig::default(), storage)
            .await
            .unwrap_err();
        assert!(matches!(err, CartError::Snapshot(_)));
        assert_eq!(err.code(), ErrorCode::SnapshotError);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let config = CartConfig::default().with_storage_key("");
        let err = CartProvider::open(&config, MemoryStorage::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CartError::Config(_)));
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_memory_state() {
        let cart = CartProvider::open(&CartConfig::default(), FlakyStorage::default())
            .await
            .unwrap();
        cart.add_item(priced("a", 10), 1).await.unwrap();
        let before = cart.state().await;

        cart.storage().fail_saves.store(true, Ordering::SeqCst);
        let err = cart.add_item(priced("b", 5), 1).await.unwrap_err();

        assert!(matches!(err, CartError::Store(_)));
        assert_eq!(cart.state().await, before);

        cart.storage().fail_saves.store(false, Ordering::SeqCst);
        let state = cart.add_item(priced("b", 5), 1).await.unwrap();
        assert_eq!(state.total_unique_items(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_serialized() {
        let cart = Arc::new(provider(MemoryStorage::new()).await);

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let cart = Arc::clone(&cart);
                tokio::spawn(async move { cart.add_item(priced("a", 1), 1).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let state = cart.state().await;
        assert_eq!(state.total_unique_items(), 1);
        assert_eq!(state.total_items(), 20);
    }

    #[tokio::test]
    async fn test_sqlite_backed_cart() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let cart = CartProvider::open(&CartConfig::default(), db.snapshots())
            .await
            .unwrap();
        cart.add_item(priced("a", 10), 3).await.unwrap();

        let reopened = CartProvider::open(&CartConfig::default(), db.snapshots())
            .await
            .unwrap();
        assert_eq!(reopened.state().await.total_cost(), Money::from_minor(30));
        assert!(db.snapshots().updated_at(KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_reserved_attribute_never_reaches_snapshot() {
        let storage = MemoryStorage::new();
        let cart = provider(storage.clone()).await;
        cart.add_item(priced("a", 10), 1).await.unwrap();

        let mut item = priced("b", 10);
        item.attributes.insert("quantity".to_string(), 7.into());
        let err = cart.add_item(item, 1).await.unwrap_err();

        assert!(matches!(
            err,
            CartError::Core(CoreError::InvalidItem { ref item_id, .. }) if item_id == "b"
        ));
        assert_eq!(err.code(), ErrorCode::ValidationError);

        let reopened = provider(storage).await;
        let state = reopened.state().await;
        assert_eq!(state.total_unique_items(), 1);
        assert!(state.in_cart("a"));
    }

    #[tokio::test]
    async fn test_reserved_attribute_rejected_on_raw_dispatch() {
        let cart = provider(MemoryStorage::new()).await;

        let mut item = priced("a", 10);
        item.attributes.insert("itemTotal".to_string(), 1.into());
        let err = cart.dispatch(CartAction::add_item(item)).await.unwrap_err();

        assert!(matches!(err, CartError::Core(CoreError::InvalidItem { .. })));
        assert!(cart.state().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_patch() {
        let storage = MemoryStorage::new();
        let cart = provider(storage.clone()).await;
        cart.add_item(priced("a", 10), 1).await.unwrap();
        let before = cart.state().await;

        let negative = ItemPatch::new().with_price(vec![PriceEntry::new(
            "USD",
            Money::from_minor(-500),
        )]);
        let err = cart.update_item("a", negative).await.unwrap_err();
        assert!(matches!(
            err,
            CartError::Core(CoreError::InvalidItem { ref item_id, .. }) if item_id == "a"
        ));

        let mut reserved = ItemPatch::quantity(2);
        reserved.attributes.insert("price".to_string(), 0.into());
        assert!(cart.update_item("a", reserved).await.is_err());

        let err = cart
            .dispatch(CartAction::update_item("a", ItemPatch::new().with_price(Vec::new())))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);

        assert_eq!(cart.state().await, before);
        assert_eq!(provider(storage).await.state().await, before);
    }
}
