//! # Storage Trait
//!
//! The key-value contract the cart provider persists snapshots through.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CartStorage                                       │
//! │            load(key) / save(key, value) / remove(key)                  │
//! │                  │                          │                           │
//! │                  ▼                          ▼                           │
//! │  ┌──────────────────────────┐  ┌──────────────────────────────────┐    │
//! │  │     MemoryStorage        │  │     SnapshotRepository           │    │
//! │  │  RwLock<HashMap>         │  │  cart_snapshots table (SQLite)   │    │
//! │  │  tests, ephemeral carts  │  │  survives restarts               │    │
//! │  └──────────────────────────┘  └──────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Maximum storage key length in bytes.
pub const MAX_KEY_LEN: usize = 255;

/// Async key-value storage for serialized carts.
///
/// Values are opaque strings; callers choose the encoding.
pub trait CartStorage: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn load(&self, key: &str) -> impl Future<Output = StoreResult<Option<String>>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> impl Future<Output = StoreResult<()>> + Send;

    /// Deletes `key`. Returns whether a value was present.
    fn remove(&self, key: &str) -> impl Future<Output = StoreResult<bool>> + Send;
}

/// Rejects empty or oversized keys.
pub fn validate_key(key: &str) -> StoreResult<()> {
    if key.trim().is_empty() {
        return Err(StoreError::InvalidKey("key is empty".to_string()));
    }
    if key.len() > MAX_KEY_LEN {
        return Err(StoreError::InvalidKey(format!(
            "key is longer than {} bytes",
            MAX_KEY_LEN
        )));
    }
    Ok(())
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-process storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl CartStorage for MemoryStorage {
    async fn load(&self, key: &str) -> StoreResult<Option<String>> {
        validate_key(key)?;
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        validate_key(key)?;
        debug!(key = %key, bytes = value.len(), "Saving snapshot in memory");
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<bool> {
        validate_key(key)?;
        Ok(self.entries.write().await.remove(key).is_some())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.load("cart").await.unwrap(), None);

        storage.save("cart", "{\"items\":[]}").await.unwrap();
        assert_eq!(
            storage.load("cart").await.unwrap().as_deref(),
            Some("{\"items\":[]}")
        );

        storage.save("cart", "v2").await.unwrap();
        assert_eq!(storage.load("cart").await.unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_remove() {
        let storage = MemoryStorage::new();
        storage.save("cart", "v1").await.unwrap();

        assert!(storage.remove("cart").await.unwrap());
        assert!(!storage.remove("cart").await.unwrap());
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.save("cart", "shared").await.unwrap();
        assert_eq!(other.load("cart").await.unwrap().as_deref(), Some("shared"));
    }

    #[tokio::test]
    async fn test_invalid_keys_rejected() {
        let storage = MemoryStorage::new();
        assert!(matches!(
            storage.save("", "v").await,
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(
            storage.load(&"k".repeat(MAX_KEY_LEN + 1)).await,
            Err(StoreError::InvalidKey(_))
        ));
    }
}
