//! # basket: Cart Provider
//!
//! Wires the pure cart state machine to configuration and snapshot storage.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Basket Startup                                    │
//! │                                                                         │
//! │  1. init_tracing() ───────────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: info,basket=debug,sqlx=warn                              │
//! │                                                                         │
//! │  2. CartConfig::load() ───────────────────────────────────────────────► │
//! │     • defaults < basket.toml < BASKET_* environment                     │
//! │                                                                         │
//! │  3. ConfiguredStorage::from_config() ─────────────────────────────────► │
//! │     • database_path set → Database::new(..).snapshots()                 │
//! │     • otherwise         → MemoryStorage                                 │
//! │                                                                         │
//! │  4. CartProvider::open(&config, storage) ─────────────────────────────► │
//! │     • restore snapshot, recompute totals in the display currency        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`provider`] - `CartProvider`, the operations callers use
//! - [`config`] - `CartConfig` loading and validation
//! - [`storage`] - backend chosen from the config
//! - [`error`] - `CartError` and machine-readable `ErrorCode`
//! - [`telemetry`] - tracing subscriber setup

pub mod config;
pub mod error;
pub mod provider;
pub mod storage;
pub mod telemetry;

pub use config::CartConfig;
pub use error::{CartError, CartResult, ConfigError, ErrorBody, ErrorCode};
pub use provider::CartProvider;
pub use storage::ConfiguredStorage;
pub use telemetry::init_tracing;

// Core and storage types callers need alongside the provider.
pub use basket_core::{
    CartAction, CartState, CurrencyCode, Item, ItemPatch, Money, PriceEntry,
};
pub use basket_store::{CartStorage, Database, DbConfig, MemoryStorage, SnapshotRepository};
