//! # Statement Trigger
//!
//! Request boundary in front of the generator. Parses the caller's raw
//! transaction id and bounds the whole run by the request timeout.
//!
//! On timeout the in-flight run is dropped, which aborts its pipeline.
//! Items already relocated stay relocated.

use sa_03_statement_generation::{GenerationError, StatementGenerationApi, StatementReceipt};
use shared_types::{IdentifierError, TransactionId};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

/// Errors returned to the caller of the trigger.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TriggerError {
    #[error("Invalid transaction id: {0}")]
    InvalidId(#[from] IdentifierError),

    #[error("Statement generation timed out after {0:?}")]
    TimedOut(Duration),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Runs statement generation for one externally supplied transaction id.
#[derive(Clone)]
pub struct StatementTrigger {
    generator: Arc<dyn StatementGenerationApi>,
    timeout: Duration,
}

impl StatementTrigger {
    pub fn new(generator: Arc<dyn StatementGenerationApi>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Archive the chain ending at `raw_id`.
    pub async fn trigger(&self, raw_id: &str) -> Result<StatementReceipt, TriggerError> {
        let last_transaction_id = TransactionId::parse(raw_id)?;
        info!(last_transaction_id = %last_transaction_id, "Statement generation requested");

        let outcome = tokio::time::timeout(
            self.timeout,
            self.generator.generate(last_transaction_id.clone()),
        )
        .await;

        match outcome {
            Ok(Ok(receipt)) => {
                info!(
                    statement_id = %receipt.statement_id,
                    archived = receipt.archived,
                    "Statement generated"
                );
                Ok(receipt)
            }
            Ok(Err(e)) => {
                error!(
                    last_transaction_id = %last_transaction_id,
                    error = %e,
                    "Statement generation failed"
                );
                Err(e.into())
            }
            Err(_) => {
                error!(
                    last_transaction_id = %last_transaction_id,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Statement generation timed out"
                );
                Err(TriggerError::TimedOut(self.timeout))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use shared_types::StatementId;

    /// Records requested ids and answers after `delay`.
    struct FakeGenerator {
        delay: Duration,
        outcome: Result<u32, GenerationError>,
        requested: Mutex<Vec<TransactionId>>,
    }

    impl FakeGenerator {
        fn answering(outcome: Result<u32, GenerationError>) -> Self {
            Self {
                delay: Duration::ZERO,
                outcome,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl StatementGenerationApi for FakeGenerator {
        async fn generate(
            &self,
            last_transaction_id: TransactionId,
        ) -> Result<StatementReceipt, GenerationError> {
            self.requested.lock().push(last_transaction_id);
            tokio::time::sleep(self.delay).await;
            self.outcome.clone().map(|archived| StatementReceipt {
                statement_id: StatementId::generate(),
                archived,
            })
        }
    }

    fn trigger_over(fake: &Arc<FakeGenerator>) -> StatementTrigger {
        let generator: Arc<dyn StatementGenerationApi> = fake.clone();
        StatementTrigger::new(generator, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_receipt_returned() {
        let fake = Arc::new(FakeGenerator::answering(Ok(3)));

        let receipt = trigger_over(&fake).trigger("tx-3").await.unwrap();

        assert_eq!(receipt.archived, 3);
        assert_eq!(
            *fake.requested.lock(),
            vec![TransactionId::parse("tx-3").unwrap()]
        );
    }

    #[tokio::test]
    async fn test_blank_id_rejected_before_generation() {
        let fake = Arc::new(FakeGenerator::answering(Ok(1)));

        let result = trigger_over(&fake).trigger("  ").await;

        assert_eq!(
            result,
            Err(TriggerError::InvalidId(IdentifierError::EmptyTransactionId))
        );
        assert!(fake.requested.lock().is_empty());
    }

    #[tokio::test]
    async fn test_generation_error_passed_through() {
        let missing = TransactionId::parse("gone").unwrap();
        let fake = Arc::new(FakeGenerator::answering(Err(GenerationError::NotFound {
            transaction_id: missing.clone(),
        })));

        let result = trigger_over(&fake).trigger("gone").await;

        assert_eq!(
            result,
            Err(TriggerError::Generation(GenerationError::NotFound {
                transaction_id: missing
            }))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_timeout() {
        let fake = Arc::new(FakeGenerator {
            delay: Duration::from_secs(60),
            outcome: Ok(1),
            requested: Mutex::new(Vec::new()),
        });

        let result = trigger_over(&fake).trigger("slow").await;

        assert_eq!(result, Err(TriggerError::TimedOut(Duration::from_secs(5))));
    }
}
