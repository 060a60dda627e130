//! # Configured Storage
//!
//! Chooses the snapshot backend from [`CartConfig::database_path`].
//!
//! ```text
//! database_path = None          → MemoryStorage (lost on exit)
//! database_path = Some("x.db")  → SQLite file, cart_snapshots table
//! ```

use basket_store::{CartStorage, Database, DbConfig, MemoryStorage, SnapshotRepository, StoreResult};
use tracing::info;

use crate::config::CartConfig;
use crate::error::CartResult;
use crate::provider::CartProvider;

/// Storage backend selected at startup.
#[derive(Debug, Clone)]
pub enum ConfiguredStorage {
    Memory(MemoryStorage),
    Sqlite {
        database: Database,
        snapshots: SnapshotRepository,
    },
}

impl ConfiguredStorage {
    /// Opens the backend named by `config`, creating the database file and
    /// running migrations when a path is set.
    pub async fn from_config(config: &CartConfig) -> CartResult<Self> {
        match &config.database_path {
            Some(path) => {
                let database = Database::new(DbConfig::new(path)).await?;
                let snapshots = database.snapshots();
                Ok(ConfiguredStorage::Sqlite {
                    database,
                    snapshots,
                })
            }
            None => {
                info!("No database path configured, cart is kept in memory");
                Ok(ConfiguredStorage::Memory(MemoryStorage::new()))
            }
        }
    }

    /// The database handle, for SQLite-backed storage.
    pub fn database(&self) -> Option<&Database> {
        match self {
            ConfiguredStorage::Memory(_) => None,
            ConfiguredStorage::Sqlite { database, .. } => Some(database),
        }
    }
}

impl CartStorage for ConfiguredStorage {
    async fn load(&self, key: &str) -> StoreResult<Option<String>> {
        match self {
            ConfiguredStorage::Memory(storage) => storage.load(key).await,
            ConfiguredStorage::Sqlite { snapshots, .. } => snapshots.load(key).await,
        }
    }

    async fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        match self {
            ConfiguredStorage::Memory(storage) => storage.save(key, value).await,
            ConfiguredStorage::Sqlite { snapshots, .. } => snapshots.save(key, value).await,
        }
    }

    async fn remove(&self, key: &str) -> StoreResult<bool> {
        match self {
            ConfiguredStorage::Memory(storage) => storage.remove(key).await,
            ConfiguredStorage::Sqlite { snapshots, .. } => snapshots.remove(key).await,
        }
    }
}

impl CartProvider<ConfiguredStorage> {
    /// Opens the cart with the backend `config` names.
    pub async fn from_config(config: &CartConfig) -> CartResult<Self> {
        config.validate()?;
        let storage = ConfiguredStorage::from_config(config).await?;
        CartProvider::open(config, storage).await
    }
}
