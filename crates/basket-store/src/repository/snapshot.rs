//! # Snapshot Repository
//!
//! Key-value table holding one serialized cart per storage key.
//!
//! ## Upsert
//! ```text
//! save("basket-cart", payload)
//!      │
//!      ▼
//! INSERT INTO cart_snapshots (storage_key, payload, updated_at)
//! VALUES (?1, ?2, ?3)
//! ON CONFLICT(storage_key) DO UPDATE SET
//!     payload = excluded.payload,
//!     updated_at = excluded.updated_at
//! ```
//! A save is a single statement, so a reader sees either the previous
//! snapshot or the new one, never a mix.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;
use crate::storage::{validate_key, CartStorage};

/// Repository for cart snapshot rows.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.snapshots();
/// repo.save("basket-cart", &json).await?;
/// let json = repo.load("basket-cart").await?;
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    /// Creates a new SnapshotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    /// When the snapshot under `key` was last written.
    pub async fn updated_at(&self, key: &str) -> StoreResult<Option<DateTime<Utc>>> {
        validate_key(key)?;

        let updated_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            "SELECT updated_at FROM cart_snapshots WHERE storage_key = ?1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated_at)
    }

    /// All stored keys, sorted.
    pub async fn keys(&self) -> StoreResult<Vec<String>> {
        let keys = sqlx::query_scalar::<_, String>(
            "SELECT storage_key FROM cart_snapshots ORDER BY storage_key",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(keys)
    }
}

impl CartStorage for SnapshotRepository {
    async fn load(&self, key: &str) -> StoreResult<Option<String>> {
        validate_key(key)?;

        let payload = sqlx::query_scalar::<_, String>(
            "SELECT payload FROM cart_snapshots WHERE storage_key = ?1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        debug!(key = %key, found = payload.is_some(), "Loaded snapshot");
        Ok(payload)
    }

    async fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        validate_key(key)?;
        let now = Utc::now();

        debug!(key = %key, bytes = value.len(), "Saving snapshot");

        sqlx::query(
            r#"
            INSERT INTO cart_snapshots (storage_key, payload, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(storage_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<bool> {
        validate_key(key)?;

        let result = sqlx::query("DELETE FROM cart_snapshots WHERE storage_key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        debug!(key = %key, removed = result.rows_affected(), "Removed snapshot");
        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
