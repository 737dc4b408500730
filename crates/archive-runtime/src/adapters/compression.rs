//! Compression gateway adapter.

use sa_01_compression::{CompressionApi, CompressionError};
use sa_03_statement_generation::{PayloadCompressor, TransformError};
use std::sync::Arc;
use std::time::Duration;

/// Runtime implementation of `PayloadCompressor` over `CompressionApi`.
#[derive(Clone)]
pub struct PoolCompressor {
    service: Arc<dyn CompressionApi>,
}

impl PoolCompressor {
    pub fn new(service: Arc<dyn CompressionApi>) -> Self {
        Self { service }
    }
}

#[async_trait::async_trait]
impl PayloadCompressor for PoolCompressor {
    async fn compress(&self, raw: Vec<u8>, timeout: Duration) -> Result<Vec<u8>, TransformError> {
        self.service
            .compress(raw, timeout)
            .await
            .map_err(|e| match e {
                CompressionError::Timeout { timeout_ms } => TransformError::Timeout { timeout_ms },
                other => TransformError::Failed(other.to_string()),
            })
    }
}
