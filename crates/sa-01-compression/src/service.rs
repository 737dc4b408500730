//! # Compression Service
//!
//! Implements `CompressionApi` on top of two `shared-bus` worker pools.
//! Requests are routed by type: compress requests go to the compressor pool,
//! decompress requests to the decompressor pool.

use crate::domain::codec;
use crate::domain::config::CompressionConfig;
use crate::domain::errors::CompressionError;
use crate::ports::inbound::CompressionApi;
use shared_bus::{AskError, Worker, WorkerPool};
use std::time::Duration;
use tracing::info;

/// Stateless compress worker.
pub struct Compressor;

impl Worker for Compressor {
    type Request = Vec<u8>;
    type Response = Vec<u8>;
    type Error = CompressionError;

    fn handle(&self, raw: Vec<u8>) -> Result<Vec<u8>, CompressionError> {
        codec::compress(&raw)
    }
}

/// Stateless decompress worker.
pub struct Decompressor;

impl Worker for Decompressor {
    type Request = Vec<u8>;
    type Response = Vec<u8>;
    type Error = CompressionError;

    fn handle(&self, compressed: Vec<u8>) -> Result<Vec<u8>, CompressionError> {
        codec::decompress(&compressed)
    }
}

/// Compression service backed by fixed-size worker pools.
pub struct CompressionService {
    compressors: WorkerPool<Compressor>,
    decompressors: WorkerPool<Decompressor>,
}

impl CompressionService {
    /// Start both worker pools.
    pub fn start(config: &CompressionConfig) -> Result<Self, CompressionError> {
        let compressors = WorkerPool::spawn("compressor", config.compressor_workers, Compressor)
            .map_err(|e| CompressionError::Unavailable(e.to_string()))?;
        let decompressors =
            WorkerPool::spawn("decompressor", config.decompressor_workers, Decompressor)
                .map_err(|e| CompressionError::Unavailable(e.to_string()))?;

        info!(
            compressors = compressors.size(),
            decompressors = decompressors.size(),
            "Compression service started"
        );

        Ok(Self {
            compressors,
            decompressors,
        })
    }

    /// Stop both pools, joining every worker thread.
    pub fn shutdown(self) {
        self.compressors.shutdown();
        self.decompressors.shutdown();
    }
}

#[async_trait::async_trait]
impl CompressionApi for CompressionService {
    async fn compress(
        &self,
        raw: Vec<u8>,
        timeout: Duration,
    ) -> Result<Vec<u8>, CompressionError> {
        self.compressors
            .ask(raw, timeout)
            .await
            .map_err(from_ask_error)
    }

    async fn decompress(
        &self,
        compressed: Vec<u8>,
        timeout: Duration,
    ) -> Result<Vec<u8>, CompressionError> {
        self.decompressors
            .ask(compressed, timeout)
            .await
            .map_err(from_ask_error)
    }
}

fn from_ask_error(error: AskError<CompressionError>) -> CompressionError {
    match error {
        AskError::Timeout { timeout, .. } => CompressionError::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        },
        AskError::Closed { pool } => CompressionError::Unavailable(pool),
        AskError::Rejected(e) => e,
    }
}
