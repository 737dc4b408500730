//! # Transaction Archiver
//!
//! Per-item stage of the pipeline. Compresses and signs the original payload
//! concurrently, each under its own timeout, then relocates the record from
//! the live table to the archive in one atomic store operation.
//!
//! The whole item, relocation included, is bounded by the item timeout.

use crate::domain::config::GenerationConfig;
use crate::domain::entities::ArchivalRequest;
use crate::domain::errors::{GenerationError, TransformError, TransformStage};
use crate::pipeline::{AbortSignal, PipelineStage};
use crate::ports::outbound::{PayloadCompressor, PayloadSigner, TransactionStore};
use shared_types::{ArchivedTransaction, TransactionId};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Compress + sign + relocate for one transaction.
pub struct TransactionArchiver {
    store: Arc<dyn TransactionStore>,
    compressor: Arc<dyn PayloadCompressor>,
    signer: Arc<dyn PayloadSigner>,
    compress_timeout: Duration,
    sign_timeout: Duration,
    item_timeout: Duration,
}

impl TransactionArchiver {
    pub fn new(
        config: &GenerationConfig,
        store: Arc<dyn TransactionStore>,
        compressor: Arc<dyn PayloadCompressor>,
        signer: Arc<dyn PayloadSigner>,
    ) -> Self {
        Self {
            store,
            compressor,
            signer,
            compress_timeout: config.compress_timeout,
            sign_timeout: config.sign_timeout,
            item_timeout: config.item_timeout,
        }
    }

    /// Archive one transaction.
    ///
    /// Relocation is skipped when `abort` was raised while the transforms ran.
    pub async fn archive(
        &self,
        request: ArchivalRequest,
        abort: &AbortSignal,
    ) -> Result<(), GenerationError> {
        let ArchivalRequest {
            statement_id,
            transaction_number,
            transaction,
        } = request;
        let transaction_id = transaction.id;

        info!(
            %statement_id,
            %transaction_id,
            transaction_number,
            payload_bytes = transaction.payload.len(),
            "Archiving transaction"
        );

        // The signature covers the original, uncompressed payload
        let (compressed_payload, signature) = tokio::try_join!(
            self.compress(&transaction_id, transaction.payload.clone()),
            self.sign(&transaction_id, transaction.payload),
        )?;

        if abort.is_raised() {
            debug!(%transaction_id, "Relocation skipped, run aborted");
            return Err(GenerationError::Aborted);
        }

        let archived = ArchivedTransaction {
            statement_id,
            transaction_id: transaction_id.clone(),
            transaction_number,
            compressed_payload,
            signature,
        };

        match self.store.relocate(archived, &transaction_id).await {
            Ok(()) => {
                info!(
                    %statement_id,
                    %transaction_id,
                    transaction_number,
                    "Transaction relocated to archive"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    %statement_id,
                    %transaction_id,
                    transaction_number,
                    error = %e,
                    "Relocation failed"
                );
                Err(GenerationError::StorageFailure {
                    transaction_id,
                    message: e.to_string(),
                })
            }
        }
    }

    async fn compress(
        &self,
        transaction_id: &TransactionId,
        raw: Vec<u8>,
    ) -> Result<Vec<u8>, GenerationError> {
        bounded(
            TransformStage::Compress,
            transaction_id,
            self.compress_timeout,
            self.compressor.compress(raw, self.compress_timeout),
        )
        .await
    }

    async fn sign(
        &self,
        transaction_id: &TransactionId,
        data: Vec<u8>,
    ) -> Result<Vec<u8>, GenerationError> {
        bounded(
            TransformStage::Sign,
            transaction_id,
            self.sign_timeout,
            self.signer.sign(data, self.sign_timeout),
        )
        .await
    }
}

#[async_trait::async_trait]
impl PipelineStage for TransactionArchiver {
    async fn process(
        &self,
        request: ArchivalRequest,
        abort: AbortSignal,
    ) -> Result<(), GenerationError> {
        let transaction_id = request.transaction.id.clone();

        match tokio::time::timeout(self.item_timeout, self.archive(request, &abort)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                let timeout_ms = self.item_timeout.as_millis() as u64;
                error!(%transaction_id, timeout_ms, "Archiving timed out");
                Err(GenerationError::ItemTimeout {
                    transaction_id,
                    timeout_ms,
                })
            }
        }
    }
}

/// Await a gateway call, enforcing `timeout` even if the gateway does not.
async fn bounded<F>(
    stage: TransformStage,
    transaction_id: &TransactionId,
    timeout: Duration,
    call: F,
) -> Result<Vec<u8>, GenerationError>
where
    F: Future<Output = Result<Vec<u8>, TransformError>>,
{
    let outcome = match tokio::time::timeout(timeout, call).await {
        Ok(outcome) => outcome,
        Err(_) => Err(TransformError::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }),
    };

    outcome.map_err(|e| {
        warn!(%transaction_id, %stage, error = %e, "Transform failed");
        match e {
            TransformError::Timeout { timeout_ms } => GenerationError::TransformTimeout {
                transaction_id: transaction_id.clone(),
                stage,
                timeout_ms,
            },
            TransformError::Failed(message) => GenerationError::TransformFailure {
                transaction_id: transaction_id.clone(),
                stage,
                message,
            },
        }
    })
}
