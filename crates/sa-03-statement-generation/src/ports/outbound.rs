//! # Outbound Ports (Driven Ports / SPI)
//!
//! Dependencies of the generation service. Implementations must be
//! thread-safe; they are shared by every in-flight item.

use crate::domain::errors::{StoreError, TransformError};
use shared_types::{ArchivedTransaction, Transaction, TransactionId};
use std::time::Duration;

/// Store access façade.
///
/// Implementations run blocking work off the async executor.
#[async_trait::async_trait]
pub trait TransactionStore: Send + Sync {
    /// Read one live transaction by exact id.
    async fn find_by_id(&self, transaction_id: &TransactionId) -> Result<Transaction, StoreError>;

    /// Delete the live record and insert `archived` as one atomic unit.
    ///
    /// On error neither change is visible.
    async fn relocate(
        &self,
        archived: ArchivedTransaction,
        original_id: &TransactionId,
    ) -> Result<(), StoreError>;

    /// Number of operations the store serves concurrently.
    fn max_connections(&self) -> usize;
}

/// Compression gateway used by the archiver.
#[async_trait::async_trait]
pub trait PayloadCompressor: Send + Sync {
    async fn compress(&self, raw: Vec<u8>, timeout: Duration) -> Result<Vec<u8>, TransformError>;
}

/// Signing gateway used by the archiver.
#[async_trait::async_trait]
pub trait PayloadSigner: Send + Sync {
    /// Sign the original, uncompressed payload.
    async fn sign(&self, data: Vec<u8>, timeout: Duration) -> Result<Vec<u8>, TransformError>;
}
