//! # Worker
//!
//! The request handler executed by every thread of a pool.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace};

/// A request handler shared by all workers of one pool.
///
/// `handle` runs on a dedicated OS thread, so it may block and may burn CPU
/// without starving the async executor.
pub trait Worker: Send + Sync + 'static {
    /// Request accepted by this worker.
    type Request: Send + 'static;
    /// Successful reply.
    type Response: Send + 'static;
    /// Per-request failure. A failed request never takes the worker down.
    type Error: Send + 'static;

    /// Process one request.
    fn handle(&self, request: Self::Request) -> Result<Self::Response, Self::Error>;
}

/// Reply channel carried with each request.
pub(crate) type Reply<W> =
    oneshot::Sender<Result<<W as Worker>::Response, <W as Worker>::Error>>;

/// A request together with the channel its answer goes to.
pub(crate) struct Envelope<W: Worker> {
    pub(crate) request: W::Request,
    pub(crate) reply_to: Reply<W>,
}

/// Worker thread main loop.
///
/// Drains the mailbox until every sender is gone.
pub(crate) fn run_worker<W: Worker>(
    pool: String,
    index: usize,
    worker: Arc<W>,
    mut mailbox: mpsc::Receiver<Envelope<W>>,
) {
    trace!(pool = %pool, worker = index, "Worker started");

    while let Some(envelope) = mailbox.blocking_recv() {
        let result = worker.handle(envelope.request);
        if envelope.reply_to.send(result).is_err() {
            // Requester timed out or was cancelled
            debug!(pool = %pool, worker = index, "Requester gone, response discarded");
        }
    }

    trace!(pool = %pool, worker = index, "Worker mailbox closed, exiting");
}
