//! # Compression Configuration

use shared_bus::DEFAULT_POOL_SIZE;

/// Sizing of the compression worker pools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionConfig {
    /// Workers serving compress requests.
    pub compressor_workers: usize,
    /// Workers serving decompress requests.
    pub decompressor_workers: usize,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            compressor_workers: DEFAULT_POOL_SIZE,
            decompressor_workers: DEFAULT_POOL_SIZE,
        }
    }
}

impl CompressionConfig {
    /// Same number of workers for both request types.
    pub fn with_workers(workers: usize) -> Self {
        Self {
            compressor_workers: workers,
            decompressor_workers: workers,
        }
    }
}
