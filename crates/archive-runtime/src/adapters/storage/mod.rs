//! # Production Storage Adapters
//!
//! Production-ready store façade backed by RocksDB.
//!
//! ## Usage
//!
//! Enable the `rocksdb` feature to use these adapters:
//!
//! ```toml
//! archive-runtime = { path = "...", features = ["rocksdb"] }
//! ```
//!
//! ## Architecture
//!
//! Live and archived transactions live in separate column families of one
//! database, so a relocation is a single atomic `WriteBatch`.

#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{
    RocksDbConfig, RocksDbTransactionStore, CF_ARCHIVE, CF_LIVE, COLUMN_FAMILIES,
};

// Re-export the in-memory store for development and tests
pub use sa_03_statement_generation::InMemoryTransactionStore;
