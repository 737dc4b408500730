//! # Statement-Archive Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Codec, signing and end-to-end throughput
//! └── src/integration/  # Cross-crate flows over the real worker pools
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sa-tests
//!
//! # Against the RocksDB store
//! cargo test -p sa-tests --features rocksdb
//!
//! # Benchmarks
//! cargo bench -p sa-tests
//! ```

pub mod integration;
