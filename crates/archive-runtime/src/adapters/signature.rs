//! Signature gateway adapter.

use sa_02_signature::{SignatureApi, SignatureError};
use sa_03_statement_generation::{PayloadSigner, TransformError};
use std::sync::Arc;
use std::time::Duration;

/// Runtime implementation of `PayloadSigner` over `SignatureApi`.
#[derive(Clone)]
pub struct PoolSigner {
    service: Arc<dyn SignatureApi>,
}

impl PoolSigner {
    pub fn new(service: Arc<dyn SignatureApi>) -> Self {
        Self { service }
    }
}

#[async_trait::async_trait]
impl PayloadSigner for PoolSigner {
    async fn sign(&self, data: Vec<u8>, timeout: Duration) -> Result<Vec<u8>, TransformError> {
        self.service
            .sign(data, timeout)
            .await
            .map_err(|e| match e {
                SignatureError::Timeout { timeout_ms } => TransformError::Timeout { timeout_ms },
                other => TransformError::Failed(other.to_string()),
            })
    }
}
