//! # Worker Pool
//!
//! Fixed-size pool of worker threads addressed with round-robin routing.

use crate::worker::{run_worker, Envelope, Worker};
use crate::DEFAULT_MAILBOX_CAPACITY;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Errors raised while building a pool.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// A pool needs at least one worker.
    #[error("Worker pool '{pool}' must have at least one worker")]
    EmptyPool { pool: String },

    /// The OS refused to start a worker thread.
    #[error("Failed to spawn worker thread for pool '{pool}': {message}")]
    SpawnFailed { pool: String, message: String },
}

/// Errors returned by [`WorkerPool::ask`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AskError<E> {
    /// No reply arrived within the caller's timeout.
    #[error("Request to pool '{pool}' timed out after {timeout:?}")]
    Timeout { pool: String, timeout: Duration },

    /// The worker is gone (pool shut down or worker thread died).
    #[error("Worker pool '{pool}' is closed")]
    Closed { pool: String },

    /// The worker processed the request and reported a failure.
    #[error("Request rejected by worker: {0}")]
    Rejected(E),
}

/// Fixed-size pool of interchangeable workers.
///
/// All workers share one `W` value; requests are routed round-robin.
pub struct WorkerPool<W: Worker> {
    name: String,
    mailboxes: Vec<mpsc::Sender<Envelope<W>>>,
    next: AtomicUsize,
    threads: Vec<JoinHandle<()>>,
}

impl<W: Worker> WorkerPool<W> {
    /// Start `size` worker threads sharing `worker`.
    pub fn spawn(name: impl Into<String>, size: usize, worker: W) -> Result<Self, PoolError> {
        Self::spawn_shared(name, size, Arc::new(worker))
    }

    /// Start `size` worker threads sharing an already shared `worker`.
    pub fn spawn_shared(
        name: impl Into<String>,
        size: usize,
        worker: Arc<W>,
    ) -> Result<Self, PoolError> {
        let name = name.into();
        if size == 0 {
            return Err(PoolError::EmptyPool { pool: name });
        }

        let mut mailboxes = Vec::with_capacity(size);
        let mut threads = Vec::with_capacity(size);

        for index in 0..size {
            let (sender, receiver) = mpsc::channel(DEFAULT_MAILBOX_CAPACITY);
            let thread_pool = name.clone();
            let thread_worker = Arc::clone(&worker);

            let handle = std::thread::Builder::new()
                .name(format!("{name}-{index}"))
                .spawn(move || run_worker(thread_pool, index, thread_worker, receiver))
                .map_err(|e| PoolError::SpawnFailed {
                    pool: name.clone(),
                    message: e.to_string(),
                })?;

            mailboxes.push(sender);
            threads.push(handle);
        }

        info!(pool = %name, size, "Worker pool started");

        Ok(Self {
            name,
            mailboxes,
            next: AtomicUsize::new(0),
            threads,
        })
    }

    /// Pool name used in logs and errors.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of workers.
    pub fn size(&self) -> usize {
        self.mailboxes.len()
    }

    /// Send a request to the next worker and wait for its reply.
    ///
    /// The timeout covers both queueing in the worker's mailbox and the
    /// processing itself.
    pub async fn ask(
        &self,
        request: W::Request,
        timeout: Duration,
    ) -> Result<W::Response, AskError<W::Error>> {
        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.mailboxes.len();
        let mailbox = &self.mailboxes[index];
        let (reply_to, reply) = oneshot::channel();

        let exchange = async {
            if mailbox.send(Envelope { request, reply_to }).await.is_err() {
                return Err(self.closed());
            }

            match reply.await {
                Ok(Ok(response)) => Ok(response),
                Ok(Err(e)) => Err(AskError::Rejected(e)),
                Err(_) => Err(self.closed()),
            }
        };

        match tokio::time::timeout(timeout, exchange).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    pool = %self.name,
                    worker = index,
                    timeout_ms = timeout.as_millis() as u64,
                    "Worker request timed out"
                );
                Err(AskError::Timeout {
                    pool: self.name.clone(),
                    timeout,
                })
            }
        }
    }

    /// Close every mailbox and wait for the worker threads to finish.
    ///
    /// Blocks the calling thread; call from a blocking context.
    pub fn shutdown(self) {
        let Self {
            name,
            mailboxes,
            threads,
            ..
        } = self;
        drop(mailboxes);

        for handle in threads {
            if handle.join().is_err() {
                warn!(pool = %name, "Worker thread panicked");
            }
        }

        debug!(pool = %name, "Worker pool shut down");
    }

    fn closed(&self) -> AskError<W::Error> {
        AskError::Closed {
            pool: self.name.clone(),
        }
    }
}
