//! # Statement Generation Subsystem (SA-03)
//!
//! Archives a backward-linked chain of transactions under one fresh statement
//! id. Each transaction is compressed, signed and relocated from the live
//! table into the archive.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Requests, receipts, config, error taxonomy
//! - **Ports Layer** (`ports/`): `StatementGenerationApi` (inbound);
//!   `TransactionStore`, `PayloadCompressor`, `PayloadSigner` (outbound)
//! - **Pipeline** (`pipeline.rs`): Bounded queue with a permit budget of `P`
//! - **Archiver** (`archiver.rs`): Per-item compress ∥ sign → relocate
//! - **Service Layer** (`service.rs`): Chain walker and orchestrator
//! - **Adapters** (`adapters/`): In-memory store
//!
//! ## Guarantees
//!
//! | Guarantee | Enforcement |
//! |-----------|-------------|
//! | Ordinals follow pipeline input order, starting at 1 | Walker assigns them before enqueue |
//! | At most `P` items between enqueue and relocation-ack | Permit budget in `Pipeline` |
//! | `P` never exceeds store capacity | `GenerationConfig::validate` at construction |
//! | Each relocation is atomic | `TransactionStore::relocate` contract |
//! | First failure fails the run | Pipeline short-circuit + abort signal |
//!
//! ## Limitations
//!
//! A run is atomic per item only. Items relocated before a failure stay
//! relocated; no compensation is attempted.

pub mod adapters;
pub mod archiver;
pub mod domain;
pub mod pipeline;
pub mod ports;
pub mod service;

#[cfg(test)]
mod test_utils;

// Re-export public API
pub use adapters::InMemoryTransactionStore;
pub use archiver::TransactionArchiver;
pub use domain::config::{
    GenerationConfig, DEFAULT_COMPRESS_TIMEOUT, DEFAULT_ITEM_TIMEOUT, DEFAULT_PARALLELISM,
    DEFAULT_SIGN_TIMEOUT,
};
pub use domain::entities::{ArchivalRequest, PipelineReport, StatementReceipt};
pub use domain::errors::{GenerationError, StoreError, TransformError, TransformStage};
pub use pipeline::{AbortSignal, Pipeline, PipelineStage};
pub use ports::inbound::StatementGenerationApi;
pub use ports::outbound::{PayloadCompressor, PayloadSigner, TransactionStore};
pub use service::StatementGenerator;
