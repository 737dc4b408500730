//! # Inbound Ports (Driving Ports / API)

use crate::domain::errors::SignatureError;
use std::time::Duration;

/// Signature API used by the transaction archiver.
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait::async_trait]
pub trait SignatureApi: Send + Sync {
    /// Sign `data` with the process-wide private key.
    async fn sign(&self, data: Vec<u8>, timeout: Duration) -> Result<Vec<u8>, SignatureError>;

    /// Check `signature` against the original `data`.
    ///
    /// A signature that does not verify is `Ok(false)`, not an error.
    async fn verify(
        &self,
        data: Vec<u8>,
        signature: Vec<u8>,
        timeout: Duration,
    ) -> Result<bool, SignatureError>;
}
