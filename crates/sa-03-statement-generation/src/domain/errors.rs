//! # Generation Errors
//!
//! Every failure is fail-fast and never retried. The first failure of a run
//! short-circuits it; items relocated before the failure stay relocated.

use shared_types::TransactionId;
use std::fmt;
use thiserror::Error;

/// Which transform of the archiver failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformStage {
    Compress,
    Sign,
}

impl fmt::Display for TransformStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compress => write!(f, "compress"),
            Self::Sign => write!(f, "sign"),
        }
    }
}

/// Failure reported by a transform gateway.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransformError {
    /// The worker did not answer in time.
    #[error("timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// Codec or crypto error, or the workers are gone.
    #[error("{0}")]
    Failed(String),
}

/// Failure reported by the store façade.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No live record carries this id.
    #[error("Transaction not found: {0}")]
    NotFound(TransactionId),

    /// The relocation was rolled back.
    #[error("Relocation of {transaction_id} rolled back: {message}")]
    RelocationFailed {
        transaction_id: TransactionId,
        message: String,
    },

    /// Stored bytes could not be encoded or decoded.
    #[error("Record serialization failed: {0}")]
    Serialization(String),

    /// The backend is unreachable or failed outside a relocation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors that fail a generation run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// The supplied id, or a predecessor, is not a live transaction.
    #[error("Transaction not found: {transaction_id}")]
    NotFound { transaction_id: TransactionId },

    /// A predecessor pointer leads back to a transaction already walked.
    #[error("Chain revisits transaction {transaction_id}")]
    ChainCycle { transaction_id: TransactionId },

    /// Compress or sign exceeded its timeout.
    #[error("{stage} of {transaction_id} timed out after {timeout_ms} ms")]
    TransformTimeout {
        transaction_id: TransactionId,
        stage: TransformStage,
        timeout_ms: u64,
    },

    /// Codec or crypto failure.
    #[error("{stage} of {transaction_id} failed: {message}")]
    TransformFailure {
        transaction_id: TransactionId,
        stage: TransformStage,
        message: String,
    },

    /// One item did not reach relocation-ack within the item timeout.
    #[error("Archiving {transaction_id} timed out after {timeout_ms} ms")]
    ItemTimeout {
        transaction_id: TransactionId,
        timeout_ms: u64,
    },

    /// Store access failed; a failed relocation was rolled back.
    #[error("Storage failure for {transaction_id}: {message}")]
    StorageFailure {
        transaction_id: TransactionId,
        message: String,
    },

    /// The item was cancelled because another item failed first.
    #[error("Archival aborted")]
    Aborted,

    /// The pipeline stopped accepting work.
    #[error("Pipeline closed")]
    PipelineClosed,

    /// Invalid generation configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A pipeline task panicked.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GenerationError {
    /// Map a store failure observed while handling `transaction_id`.
    pub fn from_store(transaction_id: &TransactionId, error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => Self::NotFound { transaction_id: id },
            other => Self::StorageFailure {
                transaction_id: transaction_id.clone(),
                message: other.to_string(),
            },
        }
    }
}
