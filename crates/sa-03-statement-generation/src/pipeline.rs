//! # Bounded Archival Pipeline
//!
//! Single producer, one consumer stage with concurrency degree `P`.
//!
//! ```text
//! walker ──enqueue──→ [permit budget P] ──→ channel(P) ──→ driver ──spawn──→ stage × ≤P
//!                          ↑                                                    │
//!                          └──────────── permit returned on relocation-ack ─────┘
//! ```
//!
//! A permit is taken before an item enters the channel and released when the
//! stage finishes with it, so at most `P` items are in flight between enqueue
//! and relocation-acknowledged, and `enqueue` suspends the producer while `P`
//! items are outstanding.
//!
//! The first failing item aborts the pipeline: its task records the failure,
//! closes the permit budget and raises the abort signal before releasing its
//! slot. The driver then cancels running items and reports that first failure
//! through [`Pipeline::watch_completion`].

use crate::domain::entities::{ArchivalRequest, PipelineReport};
use crate::domain::errors::GenerationError;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, watch, OwnedSemaphorePermit, Semaphore};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, warn};

/// Work performed on every item that leaves the queue.
#[async_trait::async_trait]
pub trait PipelineStage: Send + Sync + 'static {
    async fn process(
        &self,
        request: ArchivalRequest,
        abort: AbortSignal,
    ) -> Result<(), GenerationError>;
}

/// Read side of the pipeline's abort flag.
#[derive(Debug, Clone)]
pub struct AbortSignal(watch::Receiver<bool>);

impl AbortSignal {
    #[cfg(test)]
    pub(crate) fn from_receiver(receiver: watch::Receiver<bool>) -> Self {
        Self(receiver)
    }

    /// True once any item failed or the run was aborted.
    pub fn is_raised(&self) -> bool {
        *self.0.borrow()
    }
}

#[derive(Debug, Default)]
struct InFlightGauge {
    current: AtomicUsize,
    peak: AtomicUsize,
}

/// One unit of the permit budget, held from enqueue until the stage is done.
struct Slot {
    _permit: OwnedSemaphorePermit,
    gauge: Arc<InFlightGauge>,
}

impl Slot {
    fn new(permit: OwnedSemaphorePermit, gauge: Arc<InFlightGauge>) -> Self {
        let now = gauge.current.fetch_add(1, Ordering::SeqCst) + 1;
        gauge.peak.fetch_max(now, Ordering::SeqCst);
        Self {
            _permit: permit,
            gauge,
        }
    }
}

impl Drop for Slot {
    fn drop(&mut self) {
        // Runs before the permit field is released
        self.gauge.current.fetch_sub(1, Ordering::SeqCst);
    }
}

type Queued = (ArchivalRequest, Slot);

/// First error reported by any item; later ones are dropped.
#[derive(Debug, Default)]
struct FirstFailure(Mutex<Option<GenerationError>>);

impl FirstFailure {
    fn record(&self, error: &GenerationError) {
        self.0.lock().get_or_insert_with(|| error.clone());
    }

    fn take(&self) -> Option<GenerationError> {
        self.0.lock().take()
    }
}

/// Handle held by the producer.
///
/// Dropping the handle before completion aborts every running item.
pub struct Pipeline {
    input: Option<mpsc::Sender<Queued>>,
    permits: Arc<Semaphore>,
    abort: Arc<watch::Sender<bool>>,
    gauge: Arc<InFlightGauge>,
    driver: JoinHandle<Result<u32, GenerationError>>,
}

impl Pipeline {
    /// Start the consumer stage. Must be called within a Tokio runtime.
    pub fn start(
        parallelism: usize,
        stage: Arc<dyn PipelineStage>,
    ) -> Result<Self, GenerationError> {
        if parallelism == 0 {
            return Err(GenerationError::Config(
                "pipeline parallelism must be at least 1".to_string(),
            ));
        }

        let (input, receiver) = mpsc::channel(parallelism);
        let permits = Arc::new(Semaphore::new(parallelism));
        let (abort, aborted) = watch::channel(false);
        let abort = Arc::new(abort);

        let driver = tokio::spawn(drive(
            receiver,
            stage,
            Arc::clone(&abort),
            aborted,
            Arc::clone(&permits),
        ));

        Ok(Self {
            input: Some(input),
            permits,
            abort,
            gauge: Arc::new(InFlightGauge::default()),
            driver,
        })
    }

    /// Push one item, suspending while `P` items are outstanding.
    ///
    /// # Errors
    /// `PipelineClosed` once the pipeline failed, was aborted or completed.
    pub async fn enqueue(&self, request: ArchivalRequest) -> Result<(), GenerationError> {
        let input = self.input.as_ref().ok_or(GenerationError::PipelineClosed)?;

        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| GenerationError::PipelineClosed)?;
        let slot = Slot::new(permit, Arc::clone(&self.gauge));

        input
            .send((request, slot))
            .await
            .map_err(|_| GenerationError::PipelineClosed)
    }

    /// Signal that no more input follows.
    pub fn complete(&mut self) {
        self.input.take();
    }

    /// Raise the abort flag; running items are cancelled.
    pub fn abort(&self) {
        self.abort.send_replace(true);
    }

    /// True once an item failed or the pipeline was aborted.
    pub fn is_failed(&self) -> bool {
        *self.abort.borrow()
    }

    /// Resolve once every enqueued item finished, or with the first failure.
    pub async fn watch_completion(mut self) -> Result<PipelineReport, GenerationError> {
        self.input.take();

        let completed = (&mut self.driver)
            .await
            .map_err(|e| GenerationError::Internal(e.to_string()))??;

        Ok(PipelineReport {
            completed,
            peak_in_flight: self.gauge.peak.load(Ordering::SeqCst),
        })
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        if !self.driver.is_finished() {
            self.abort.send_replace(true);
            self.driver.abort();
        }
    }
}

async fn drive(
    mut receiver: mpsc::Receiver<Queued>,
    stage: Arc<dyn PipelineStage>,
    abort: Arc<watch::Sender<bool>>,
    mut aborted: watch::Receiver<bool>,
    permits: Arc<Semaphore>,
) -> Result<u32, GenerationError> {
    let mut running: JoinSet<Result<(), GenerationError>> = JoinSet::new();
    let first_failure = Arc::new(FirstFailure::default());
    let mut input_open = true;
    let mut completed: u32 = 0;

    let failure = loop {
        if !input_open && running.is_empty() {
            break None;
        }

        tokio::select! {
            biased;

            // `abort` lives in this task, so `changed` never reports a closed channel
            Ok(()) = aborted.changed() => {
                if *aborted.borrow() {
                    break Some(first_failure.take().unwrap_or(GenerationError::Aborted));
                }
            }

            Some(joined) = running.join_next() => match joined {
                Ok(Ok(())) => completed += 1,
                Ok(Err(error)) => break Some(first_failure.take().unwrap_or(error)),
                Err(join_error) => break Some(GenerationError::Internal(join_error.to_string())),
            },

            next = receiver.recv(), if input_open => match next {
                Some((request, slot)) => {
                    debug!(
                        transaction_id = %request.transaction.id,
                        transaction_number = request.transaction_number,
                        "Item admitted to pipeline"
                    );
                    let stage = Arc::clone(&stage);
                    let permits = Arc::clone(&permits);
                    let abort = Arc::clone(&abort);
                    let first_failure = Arc::clone(&first_failure);
                    let signal = AbortSignal(abort.subscribe());
                    running.spawn(async move {
                        let result = stage.process(request, signal).await;
                        if let Err(error) = &result {
                            // Siblings must see the abort before this slot frees
                            first_failure.record(error);
                            permits.close();
                            abort.send_replace(true);
                        }
                        drop(slot);
                        result
                    });
                }
                None => input_open = false,
            },
        }
    };

    let Some(error) = failure else {
        return Ok(completed);
    };

    abort.send_replace(true);
    permits.close();
    receiver.close();
    running.abort_all();
    while running.join_next().await.is_some() {}

    warn!(%error, completed, "Archival pipeline failed");
    Err(error)
}
