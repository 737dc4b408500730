//! # Inbound Ports (Driving Ports / API)

use crate::domain::errors::CompressionError;
use std::time::Duration;

/// Compression API used by the transaction archiver.
///
/// Every call carries its own timeout; expiry yields
/// `CompressionError::Timeout`.
#[async_trait::async_trait]
pub trait CompressionApi: Send + Sync {
    /// Compress a raw payload at the best-ratio level.
    async fn compress(&self, raw: Vec<u8>, timeout: Duration)
        -> Result<Vec<u8>, CompressionError>;

    /// Restore a payload produced by `compress`.
    async fn decompress(
        &self,
        compressed: Vec<u8>,
        timeout: Duration,
    ) -> Result<Vec<u8>, CompressionError>;
}
