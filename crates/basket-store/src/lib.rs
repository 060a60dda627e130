//! # basket-store: Snapshot Storage for Basket
//!
//! Persists serialized carts under a storage key. The cart provider writes a
//! snapshot after every transition and reads it back at startup.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Basket Data Flow                                 │
//! │                                                                         │
//! │  CartProvider::add_item                                                │
//! │       │  transition → serde_json::to_string(&state)                    │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   basket-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │  CartStorage  │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │ (storage.rs)  │◄───│ (snapshot.rs)  │    │  (embedded)  │  │   │
//! │  │   │ MemoryStorage │    │ SnapshotRepo   │    │ 001_cart_... │  │   │
//! │  │   └───────────────┘    └───────┬────────┘    └──────────────┘  │   │
//! │  │                                │ Database (pool.rs)             │   │
//! │  └────────────────────────────────┼────────────────────────────────┘   │
//! │                                   ▼                                     │
//! │                        SQLite file (WAL mode)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - `CartStorage` trait and `MemoryStorage`
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`repository`] - SQLite snapshot repository
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use basket_store::{CartStorage, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./basket.db")).await?;
//! let storage = db.snapshots();
//!
//! storage.save("basket-cart", &json).await?;
//! let restored = storage.load("basket-cart").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig};
pub use repository::snapshot::SnapshotRepository;
pub use storage::{CartStorage, MemoryStorage};
