//! # Schema Migrations
//!
//! The snapshot schema ships inside the binary via `sqlx::migrate!`.
//!
//! ```text
//! migrations/sqlite/
//! └── 001_cart_snapshots.sql   cart_snapshots(storage_key PK, payload, updated_at)
//! ```
//!
//! sqlx keeps its own bookkeeping table (`_sqlx_migrations`) and skips any
//! file whose checksum is already recorded. Applied files must stay
//! byte-for-byte unchanged; schema changes go in a new numbered file.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::StoreResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// How far a database is behind the embedded schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Migrations compiled into this binary.
    pub embedded: usize,
    /// Migrations recorded as applied in the database.
    pub applied: usize,
}

impl MigrationStatus {
    /// True when nothing is pending.
    pub fn is_current(&self) -> bool {
        self.applied >= self.embedded
    }

    pub fn pending(&self) -> usize {
        self.embedded.saturating_sub(self.applied)
    }
}

/// Brings the schema up to date. Already-applied files are skipped.
pub async fn run_migrations(pool: &SqlitePool) -> StoreResult<()> {
    let before = migration_status(pool).await?;
    if before.is_current() {
        debug!(applied = before.applied, "Snapshot schema is current");
        return Ok(());
    }

    info!(pending = before.pending(), "Applying snapshot schema migrations");
    MIGRATOR.run(pool).await?;
    info!(embedded = before.embedded, "Snapshot schema migrated");

    Ok(())
}

/// Compares embedded migrations with the ones the database has recorded.
///
/// A fresh database has no bookkeeping table yet and reports zero applied.
pub async fn migration_status(pool: &SqlitePool) -> StoreResult<MigrationStatus> {
    let tables: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(pool)
    .await?;

    let applied: i64 = if tables > 0 {
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?
    } else {
        0
    };

    Ok(MigrationStatus {
        embedded: MIGRATOR.migrations.len(),
        applied: usize::try_from(applied).unwrap_or(0),
    })
}
