//! # Runtime Adapters
//!
//! Outbound port implementations for the statement-generation subsystem:
//!
//! - `compression`: `PayloadCompressor` backed by the compression worker pools
//! - `signature`: `PayloadSigner` backed by the signer worker pool
//! - `storage`: production store backends
//! - `seed`: loading live transactions from a JSON file

pub mod compression;
pub mod seed;
pub mod signature;
pub mod storage;

pub use compression::PoolCompressor;
pub use seed::{load_seed, SeedError};
pub use signature::PoolSigner;
