//! # SQLite Handle
//!
//! Opens the snapshot database and hands out repositories.
//!
//! ```text
//! DbConfig::new("basket.db") ──► Database::new ──► pool + migrations
//!                                      │
//!                                      └──► db.snapshots() : CartStorage
//! ```
//!
//! File databases use WAL journaling with `synchronous = NORMAL`. A crash
//! can drop the most recent snapshot write but never corrupts the table.
//! `:memory:` databases live as long as their single pooled connection.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::migrations::{self, MigrationStatus};
use crate::repository::snapshot::SnapshotRepository;

const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// How to open the snapshot database.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/var/lib/basket/cart.db")
///     .max_connections(2)
///     .acquire_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, created if missing, or `:memory:`.
    pub database_path: PathBuf,

    /// Pool ceiling. One cart writes at a time, so a handful is plenty.
    pub max_connections: u32,

    /// Connections kept open while idle.
    pub min_connections: u32,

    /// How long a caller waits for a free connection.
    pub acquire_timeout: Duration,

    /// Idle connections above `min_connections` close after this long.
    pub idle_timeout: Duration,

    /// Apply embedded migrations when the pool opens.
    pub run_migrations: bool,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 4,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Private in-memory database, used by tests.
    ///
    /// Every SQLite connection to `:memory:` sees its own empty database,
    /// so the pool is pinned to exactly one connection.
    pub fn in_memory() -> Self {
        DbConfig {
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            ..DbConfig::new(IN_MEMORY_PATH)
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY_PATH)
    }

    fn connect_options(&self) -> StoreResult<SqliteConnectOptions> {
        if self.is_in_memory() {
            return SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| StoreError::ConnectionFailed(e.to_string()));
        }

        Ok(SqliteConnectOptions::new()
            .filename(&self.database_path)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Open snapshot database. Clones share one pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and, unless disabled, migrates the schema.
    pub async fn new(config: DbConfig) -> StoreResult<Self> {
        let options = config.connect_options()?;
        debug!(path = %config.database_path.display(), "Opening snapshot database");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections.min(config.max_connections))
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        let db = Database { pool };
        if config.run_migrations {
            db.run_migrations().await?;
        }

        info!(
            path = %config.database_path.display(),
            max_connections = config.max_connections,
            "Snapshot database ready"
        );
        Ok(db)
    }

    pub async fn run_migrations(&self) -> StoreResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    pub async fn migration_status(&self) -> StoreResult<MigrationStatus> {
        migrations::migration_status(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Snapshot table as a [`CartStorage`](crate::storage::CartStorage).
    pub fn snapshots(&self) -> SnapshotRepository {
        SnapshotRepository::new(self.pool.clone())
    }

    /// Closes every pooled connection. Later queries fail.
    pub async fn close(&self) {
        debug!("Closing snapshot database");
        self.pool.close().await;
    }

    /// True if a trivial query succeeds.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database_is_healthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.health_check().await);
        assert!(db.migration_status().await.unwrap().is_current());
    }

    #[tokio::test]
    async fn test_closed_database_is_unhealthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        assert!(!db.health_check().await);
    }

    #[tokio::test]
    async fn test_file_database_created() {
        let dir = std::env::temp_dir().join(format!("basket-pool-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("cart.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        assert!(path.exists());
        db.close().await;

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_in_memory_config() {
        let config = DbConfig::in_memory();
        assert!(config.is_in_memory());
        assert_eq!(config.max_connections, 1);
        assert!(config.run_migrations);

        let config = DbConfig::new("/tmp/basket.db")
            .max_connections(8)
            .min_connections(2)
            .run_migrations(false);
        assert!(!config.is_in_memory());
        assert_eq!(config.max_connections, 8);
        assert_eq!(config.min_connections, 2);
        assert!(!config.run_migrations);
    }
}
