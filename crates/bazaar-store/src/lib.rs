//! # bazaar-store: Durable Storage for the Bazaar Storefront
//!
//! A string key-value store with two backends: SQLite (via sqlx) for real
//! runs and an in-memory map for tests.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SessionStore / CartStore (apps/bazaar-cli)                            │
//! │       │  Arc<dyn Storage>                                               │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  bazaar-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │    Storage    │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ SqliteStorage │    │  (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │ MemoryStorage │    │ 001_kv.sql   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <data dir>/bazaar.db                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bazaar_store::{Database, SqliteStorage, Storage, StoreConfig};
//!
//! let db = Database::new(StoreConfig::new("bazaar.db")).await?;
//! let storage = SqliteStorage::new(db);
//! storage.set("token", "abc").await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod storage;

pub use error::{StoreError, StoreResult};
pub use pool::{Database, StoreConfig};
pub use storage::{MemoryStorage, SqliteStorage, Storage};

/// File name of the storage database inside the data directory.
pub const DATABASE_FILE: &str = "bazaar.db";
