//! Test doubles for the transform gateways and chain seeding.

use crate::adapters::memory::InMemoryTransactionStore;
use crate::domain::errors::TransformError;
use crate::ports::outbound::{PayloadCompressor, PayloadSigner};
use shared_types::{Transaction, TransactionId};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const COMPRESS_TAG: &[u8] = b"deflate:";
pub const SIGN_TAG: &[u8] = b"sig:";

/// Deterministic stand-in for a compressor or signer: output is
/// `tag ++ input`. Can be told to stall, fail or report a timeout for
/// specific payloads.
pub struct FakeTransform {
    tag: &'static [u8],
    delay: Duration,
    stall_on: HashSet<Vec<u8>>,
    fail_on: HashSet<Vec<u8>>,
    report_timeout: bool,
    active: AtomicUsize,
    max_active: AtomicUsize,
    calls: AtomicUsize,
}

impl FakeTransform {
    fn tagged(tag: &'static [u8]) -> Self {
        Self {
            tag,
            delay: Duration::ZERO,
            stall_on: HashSet::new(),
            fail_on: HashSet::new(),
            report_timeout: false,
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn compressor() -> Self {
        Self::tagged(COMPRESS_TAG)
    }

    pub fn signer() -> Self {
        Self::tagged(SIGN_TAG)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Never answer for `payload`.
    pub fn stalling_on(mut self, payload: &[u8]) -> Self {
        self.stall_on.insert(payload.to_vec());
        self
    }

    pub fn failing_on(mut self, payload: &[u8]) -> Self {
        self.fail_on.insert(payload.to_vec());
        self
    }

    pub fn reporting_timeout(mut self) -> Self {
        self.report_timeout = true;
        self
    }

    /// Highest number of concurrent calls observed.
    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn apply(&self, input: Vec<u8>, timeout: Duration) -> Result<Vec<u8>, TransformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);

        let result = self.respond(input, timeout).await;

        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn respond(&self, input: Vec<u8>, timeout: Duration) -> Result<Vec<u8>, TransformError> {
        if self.stall_on.contains(&input) {
            std::future::pending::<()>().await;
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail_on.contains(&input) {
            return Err(TransformError::Failed("injected transform failure".to_string()));
        }
        if self.report_timeout {
            return Err(TransformError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            });
        }
        Ok([self.tag, input.as_slice()].concat())
    }
}

#[async_trait::async_trait]
impl PayloadCompressor for FakeTransform {
    async fn compress(&self, raw: Vec<u8>, timeout: Duration) -> Result<Vec<u8>, TransformError> {
        self.apply(raw, timeout).await
    }
}

#[async_trait::async_trait]
impl PayloadSigner for FakeTransform {
    async fn sign(&self, data: Vec<u8>, timeout: Duration) -> Result<Vec<u8>, TransformError> {
        self.apply(data, timeout).await
    }
}

/// Payload stored for `id` by [`seed_chain`].
pub fn payload_of(id: &str) -> Vec<u8> {
    format!("payload-{id}").into_bytes()
}

/// Insert `ids` as a chain walked from the first entry: each record points
/// at the next one, the last is the chain head. Returns the tail id.
pub fn seed_chain(store: &InMemoryTransactionStore, ids: &[&str]) -> TransactionId {
    for (index, id) in ids.iter().enumerate() {
        let previous = ids
            .get(index + 1)
            .map(|p| TransactionId::parse(*p).expect("valid test id"));
        store.insert(Transaction::new(
            TransactionId::parse(*id).expect("valid test id"),
            previous,
            payload_of(id),
        ));
    }
    TransactionId::parse(ids[0]).expect("valid test id")
}
