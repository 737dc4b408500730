//! # Statement Generator
//!
//! Orchestrates one generation run:
//!
//! 1. Generate a fresh statement id
//! 2. Walk the chain backwards from the supplied id, one store read at a time
//! 3. Enqueue every resolved transaction with its ordinal (backpressure point)
//! 4. Signal end of input at the chain head
//! 5. Await the pipeline drain
//!
//! The run succeeds only when the walker reached the chain head and every
//! enqueued item was relocated.

use crate::archiver::TransactionArchiver;
use crate::domain::config::GenerationConfig;
use crate::domain::entities::{ArchivalRequest, StatementReceipt};
use crate::domain::errors::GenerationError;
use crate::pipeline::{Pipeline, PipelineStage};
use crate::ports::inbound::StatementGenerationApi;
use crate::ports::outbound::{PayloadCompressor, PayloadSigner, TransactionStore};
use shared_types::{StatementId, TransactionId, TransactionNumber, FIRST_TRANSACTION_NUMBER};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Chain walker and pipeline orchestrator.
pub struct StatementGenerator {
    config: GenerationConfig,
    store: Arc<dyn TransactionStore>,
    archiver: Arc<TransactionArchiver>,
}

impl StatementGenerator {
    /// Build a generator.
    ///
    /// # Errors
    /// `Config` when `parallelism` exceeds the store's connection capacity.
    pub fn new(
        config: GenerationConfig,
        store: Arc<dyn TransactionStore>,
        compressor: Arc<dyn PayloadCompressor>,
        signer: Arc<dyn PayloadSigner>,
    ) -> Result<Self, GenerationError> {
        config.validate(store.max_connections())?;

        let archiver = Arc::new(TransactionArchiver::new(
            &config,
            Arc::clone(&store),
            compressor,
            signer,
        ));

        Ok(Self {
            config,
            store,
            archiver,
        })
    }

    /// Resolve the chain and feed the pipeline. Returns the number of
    /// transactions enqueued.
    async fn walk(
        &self,
        statement_id: StatementId,
        last_transaction_id: TransactionId,
        pipeline: &Pipeline,
    ) -> Result<TransactionNumber, GenerationError> {
        let mut visited = HashSet::new();
        let mut transaction_number = FIRST_TRANSACTION_NUMBER;
        let mut current = last_transaction_id;

        loop {
            // An item already failed; its error ends the run
            if pipeline.is_failed() {
                return Err(GenerationError::PipelineClosed);
            }
            if !visited.insert(current.clone()) {
                return Err(GenerationError::ChainCycle {
                    transaction_id: current,
                });
            }

            let transaction = self
                .store
                .find_by_id(&current)
                .await
                .map_err(|e| GenerationError::from_store(&current, e))?;

            debug!(
                %statement_id,
                transaction_id = %transaction.id,
                transaction_number,
                "Transaction resolved"
            );

            let previous = transaction.previous_id.clone();
            pipeline
                .enqueue(ArchivalRequest {
                    statement_id,
                    transaction_number,
                    transaction,
                })
                .await?;

            match previous {
                Some(previous_id) => {
                    current = previous_id;
                    transaction_number += 1;
                }
                None => return Ok(transaction_number),
            }
        }
    }
}

#[async_trait::async_trait]
impl StatementGenerationApi for StatementGenerator {
    async fn generate(
        &self,
        last_transaction_id: TransactionId,
    ) -> Result<StatementReceipt, GenerationError> {
        let statement_id = StatementId::generate();

        info!(
            %statement_id,
            %last_transaction_id,
            parallelism = self.config.parallelism,
            "Statement generation started"
        );

        let stage: Arc<dyn PipelineStage> = self.archiver.clone();
        let mut pipeline = Pipeline::start(self.config.parallelism, stage)?;

        let outcome = match self.walk(statement_id, last_transaction_id, &pipeline).await {
            Ok(enqueued) => {
                pipeline.complete();
                pipeline
                    .watch_completion()
                    .await
                    .map(|report| (enqueued, report))
            }
            // An item failed; surface its error rather than the closed queue
            Err(GenerationError::PipelineClosed) => match pipeline.watch_completion().await {
                Err(error) => Err(error),
                Ok(_) => Err(GenerationError::PipelineClosed),
            },
            Err(error) => {
                pipeline.abort();
                // An item that failed before the walker keeps precedence
                match pipeline.watch_completion().await {
                    Err(item_error) if item_error != GenerationError::Aborted => Err(item_error),
                    _ => Err(error),
                }
            }
        };

        match outcome {
            Ok((enqueued, report)) => {
                info!(
                    %statement_id,
                    archived = report.completed,
                    enqueued,
                    peak_in_flight = report.peak_in_flight,
                    "Statement generated"
                );
                Ok(StatementReceipt {
                    statement_id,
                    archived: report.completed,
                })
            }
            Err(error) => {
                error!(%statement_id, %error, "Statement generation failed");
                Err(error)
            }
        }
    }
}
