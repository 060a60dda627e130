//! # Repository Module
//!
//! Database repository implementations for the snapshot store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CartProvider                                                          │
//! │       │                                                                 │
//! │       │  storage.save("basket-cart", json)                             │
//! │       ▼                                                                 │
//! │  SnapshotRepository (CartStorage)                                      │
//! │  ├── load(&self, key)                                                  │
//! │  ├── save(&self, key, payload)                                         │
//! │  ├── remove(&self, key)                                                │
//! │  └── updated_at(&self, key)                                            │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database (cart_snapshots)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SnapshotRepository`](snapshot::SnapshotRepository) - Cart snapshot key-value table

pub mod snapshot;
