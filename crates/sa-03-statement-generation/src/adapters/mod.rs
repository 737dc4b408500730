//! # Adapters
//!
//! Store implementations that live next to the domain. The RocksDB store and
//! the worker-pool gateways live in `archive-runtime`.

pub mod memory;

pub use memory::InMemoryTransactionStore;
