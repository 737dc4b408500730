//! # Generation Configuration

use crate::domain::errors::GenerationError;
use std::time::Duration;

/// Default pipeline concurrency degree.
pub const DEFAULT_PARALLELISM: usize = 8;

/// Default compression timeout per item.
pub const DEFAULT_COMPRESS_TIMEOUT: Duration = Duration::from_secs(60);

/// Default signing timeout per item.
pub const DEFAULT_SIGN_TIMEOUT: Duration = Duration::from_secs(30);

/// Default bound on one item from admission to relocation-ack.
pub const DEFAULT_ITEM_TIMEOUT: Duration = Duration::from_secs(60);

/// Tunables of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Pipeline capacity and maximum items in flight.
    pub parallelism: usize,
    pub compress_timeout: Duration,
    pub sign_timeout: Duration,
    /// Covers compress, sign and relocate of one item together.
    pub item_timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            parallelism: DEFAULT_PARALLELISM,
            compress_timeout: DEFAULT_COMPRESS_TIMEOUT,
            sign_timeout: DEFAULT_SIGN_TIMEOUT,
            item_timeout: DEFAULT_ITEM_TIMEOUT,
        }
    }
}

impl GenerationConfig {
    /// Check the config against the store's connection capacity.
    ///
    /// Every in-flight item may hold a store connection while relocating, so
    /// `parallelism` may not exceed `store_capacity`.
    pub fn validate(&self, store_capacity: usize) -> Result<(), GenerationError> {
        if self.parallelism == 0 {
            return Err(GenerationError::Config(
                "parallelism must be at least 1".to_string(),
            ));
        }
        if self.parallelism > store_capacity {
            return Err(GenerationError::Config(format!(
                "parallelism {} exceeds store capacity {}",
                self.parallelism, store_capacity
            )));
        }
        if self.compress_timeout.is_zero() || self.sign_timeout.is_zero() {
            return Err(GenerationError::Config(
                "transform timeouts must be non-zero".to_string(),
            ));
        }
        if self.item_timeout.is_zero() {
            return Err(GenerationError::Config(
                "item timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
