//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::StatementReceipt;
use crate::domain::errors::GenerationError;
use shared_types::TransactionId;

/// Statement generation API, called by the trigger boundary.
#[async_trait::async_trait]
pub trait StatementGenerationApi: Send + Sync {
    /// Archive the chain ending at `last_transaction_id` under a fresh
    /// statement id.
    ///
    /// Resolves only after the walker reached the chain head and every
    /// enqueued item was relocated.
    ///
    /// # Errors
    /// The first failure of the run. Items relocated before it remain
    /// relocated.
    async fn generate(
        &self,
        last_transaction_id: TransactionId,
    ) -> Result<StatementReceipt, GenerationError>;
}
