//! # Archive Configuration
//!
//! Unified configuration for every subsystem and the trigger boundary.
//!
//! Defaults are overridden from `SA_*` environment variables; unparsable
//! values are logged and ignored.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `SA_PARALLELISM` | `generation.parallelism` |
//! | `SA_COMPRESS_TIMEOUT_SECS` | `generation.compress_timeout` |
//! | `SA_SIGN_TIMEOUT_SECS` | `generation.sign_timeout` |
//! | `SA_ITEM_TIMEOUT_SECS` | `generation.item_timeout` |
//! | `SA_COMPRESSION_WORKERS` | compressor and decompressor pool sizes |
//! | `SA_SIGNATURE_WORKERS` | signer and verifier pool sizes |
//! | `SA_PRIVATE_KEY_PATH` | `signature.private_key_path` |
//! | `SA_PUBLIC_KEY_PATH` | `signature.public_key_path` |
//! | `SA_DATA_DIR` | `store.data_dir` |
//! | `SA_STORE_MAX_CONNECTIONS` | `store.max_connections` |
//! | `SA_REQUEST_TIMEOUT_SECS` | `request_timeout` |

use sa_01_compression::CompressionConfig;
use sa_02_signature::SignatureConfig;
use sa_03_statement_generation::GenerationConfig;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Default request-level timeout of the trigger boundary.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    pub generation: GenerationConfig,
    pub compression: CompressionConfig,
    pub signature: SignatureConfig,
    pub store: StoreConfig,
    /// Upper bound on one `generate` call, enforced by the trigger.
    pub request_timeout: Duration,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            compression: CompressionConfig::default(),
            signature: SignatureConfig::default(),
            store: StoreConfig::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Data directory of the persistent store.
    pub data_dir: PathBuf,
    /// Operations the store serves concurrently.
    pub max_connections: usize,
    /// fsync every relocation.
    pub sync_writes: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data/archive"),
            max_connections: 10,
            sync_writes: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A worker pool was configured with no workers.
    #[error("Worker pool '{pool}' needs at least one worker")]
    EmptyPool { pool: &'static str },

    /// Pipeline degree is zero or exceeds the store capacity.
    #[error("Invalid generation settings: {0}")]
    Generation(String),

    /// The trigger timeout is zero.
    #[error("Request timeout must be non-zero")]
    ZeroRequestTimeout,
}

impl ArchiveConfig {
    /// Defaults overridden from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(parallelism) = parsed(&lookup, "SA_PARALLELISM") {
            config.generation.parallelism = parallelism;
        }
        if let Some(secs) = parsed(&lookup, "SA_COMPRESS_TIMEOUT_SECS") {
            config.generation.compress_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parsed(&lookup, "SA_SIGN_TIMEOUT_SECS") {
            config.generation.sign_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parsed(&lookup, "SA_ITEM_TIMEOUT_SECS") {
            config.generation.item_timeout = Duration::from_secs(secs);
        }
        if let Some(workers) = parsed(&lookup, "SA_COMPRESSION_WORKERS") {
            config.compression = CompressionConfig::with_workers(workers);
        }
        if let Some(workers) = parsed(&lookup, "SA_SIGNATURE_WORKERS") {
            config.signature.signer_workers = workers;
            config.signature.verifier_workers = workers;
        }
        if let Some(path) = lookup("SA_PRIVATE_KEY_PATH") {
            config.signature.private_key_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SA_PUBLIC_KEY_PATH") {
            config.signature.public_key_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("SA_DATA_DIR") {
            config.store.data_dir = PathBuf::from(dir);
        }
        if let Some(max) = parsed(&lookup, "SA_STORE_MAX_CONNECTIONS") {
            config.store.max_connections = max;
        }
        if let Some(secs) = parsed(&lookup, "SA_REQUEST_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(secs);
        }

        config
    }

    /// Check pool sizes and the parallelism/store-capacity invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pools = [
            ("compressor", self.compression.compressor_workers),
            ("decompressor", self.compression.decompressor_workers),
            ("signer", self.signature.signer_workers),
            ("verifier", self.signature.verifier_workers),
        ];
        if let Some(&(pool, _)) = pools.iter().find(|(_, size)| *size == 0) {
            return Err(ConfigError::EmptyPool { pool });
        }

        self.generation
            .validate(self.store.max_connections)
            .map_err(|e| ConfigError::Generation(e.to_string()))?;

        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroRequestTimeout);
        }

        Ok(())
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => {
            info!(key, value = %raw, "Configuration override from environment");
            Some(value)
        }
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparsable configuration value");
            None
        }
    }
}
