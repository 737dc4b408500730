//! # Signature Service
//!
//! Implements `SignatureApi` on top of two `shared-bus` worker pools that
//! share one immutable `KeyMaterial`.

use crate::domain::config::SignatureConfig;
use crate::domain::errors::SignatureError;
use crate::domain::keys::KeyMaterial;
use crate::domain::signing;
use crate::ports::inbound::SignatureApi;
use shared_bus::{AskError, Worker, WorkerPool};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Sign worker.
pub struct Signer {
    keys: Arc<KeyMaterial>,
}

impl Worker for Signer {
    type Request = Vec<u8>;
    type Response = Vec<u8>;
    type Error = SignatureError;

    fn handle(&self, data: Vec<u8>) -> Result<Vec<u8>, SignatureError> {
        signing::sign(self.keys.signing_key(), &data)
    }
}

/// Verify worker. Request is `(original, signature)`.
pub struct Verifier {
    keys: Arc<KeyMaterial>,
}

impl Worker for Verifier {
    type Request = (Vec<u8>, Vec<u8>);
    type Response = bool;
    type Error = SignatureError;

    fn handle(&self, (data, signature): (Vec<u8>, Vec<u8>)) -> Result<bool, SignatureError> {
        Ok(signing::verify(self.keys.verifying_key(), &data, &signature))
    }
}

/// Signature service backed by fixed-size worker pools.
pub struct SignatureService {
    signers: WorkerPool<Signer>,
    verifiers: WorkerPool<Verifier>,
}

impl SignatureService {
    /// Start both worker pools with already loaded keys.
    pub fn start(config: &SignatureConfig, keys: KeyMaterial) -> Result<Self, SignatureError> {
        let keys = Arc::new(keys);

        let signers = WorkerPool::spawn(
            "signer",
            config.signer_workers,
            Signer {
                keys: Arc::clone(&keys),
            },
        )
        .map_err(|e| SignatureError::Unavailable(e.to_string()))?;
        let verifiers = WorkerPool::spawn("verifier", config.verifier_workers, Verifier { keys })
            .map_err(|e| SignatureError::Unavailable(e.to_string()))?;

        info!(
            signers = signers.size(),
            verifiers = verifiers.size(),
            algorithm = signing::SIGNATURE_ALGORITHM,
            "Signature service started"
        );

        Ok(Self { signers, verifiers })
    }

    /// Stop both pools, joining every worker thread.
    pub fn shutdown(self) {
        self.signers.shutdown();
        self.verifiers.shutdown();
    }
}

#[async_trait::async_trait]
impl SignatureApi for SignatureService {
    async fn sign(&self, data: Vec<u8>, timeout: Duration) -> Result<Vec<u8>, SignatureError> {
        self.signers
            .ask(data, timeout)
            .await
            .map_err(from_ask_error)
    }

    async fn verify(
        &self,
        data: Vec<u8>,
        signature: Vec<u8>,
        timeout: Duration,
    ) -> Result<bool, SignatureError> {
        self.verifiers
            .ask((data, signature), timeout)
            .await
            .map_err(from_ask_error)
    }
}

fn from_ask_error(error: AskError<SignatureError>) -> SignatureError {
    match error {
        AskError::Timeout { timeout, .. } => SignatureError::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        },
        AskError::Closed { pool } => SignatureError::Unavailable(pool),
        AskError::Rejected(e) => e,
    }
}
