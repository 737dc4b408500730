//! # Compression Subsystem (SA-01)
//!
//! Compresses transaction payloads before they are archived.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): The zlib/deflate codec, no I/O
//! - **Ports Layer** (`ports/`): `CompressionApi`, the inbound port
//! - **Service Layer** (`service.rs`): Two fixed-size worker pools, one per
//!   request type (compress, decompress), addressed through `shared-bus`
//!
//! ## Codec
//!
//! Best-compression deflate in a zlib container. Both directions stream
//! through a 1 KiB intermediate buffer until the codec reports stream end.
//! A malformed or truncated stream is an error; output is never truncated
//! silently.

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::codec::{compress, decompress, CHUNK_SIZE};
pub use domain::config::CompressionConfig;
pub use domain::errors::CompressionError;
pub use ports::inbound::CompressionApi;
pub use service::CompressionService;
