//! # Archive Container
//!
//! ## Initialization Order
//!
//! ```text
//! Level 0: Key material (fatal if missing or mismatched)
//! Level 1: Compression pools, Signature pools
//! Level 2: Statement generator (store + pool adapters)
//! ```
//!
//! Shutdown runs in reverse: the generator is dropped, then each pool is
//! stopped and its worker threads joined.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument, warn};

use sa_01_compression::{CompressionApi, CompressionError, CompressionService};
use sa_02_signature::{KeyError, KeyMaterial, SignatureApi, SignatureError, SignatureService};
use sa_03_statement_generation::{
    GenerationError, StatementGenerationApi, StatementGenerator, TransactionStore,
};

use crate::adapters::{PoolCompressor, PoolSigner};
use crate::container::config::{ArchiveConfig, ConfigError};
use crate::trigger::StatementTrigger;

/// Startup failures. All of them are fatal.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Key material unavailable: {0}")]
    Key(#[from] KeyError),

    #[error("Compression pools failed to start: {0}")]
    Compression(#[from] CompressionError),

    #[error("Signature pools failed to start: {0}")]
    Signature(#[from] SignatureError),

    #[error("Statement generator rejected its configuration: {0}")]
    Generation(#[from] GenerationError),
}

/// Central container holding every service instance.
pub struct ArchiveContainer {
    compression: Arc<CompressionService>,
    signature: Arc<SignatureService>,
    generator: Arc<StatementGenerator>,
    config: ArchiveConfig,
}

impl ArchiveContainer {
    /// Load the key pair named by the configuration and start every service.
    pub fn new(
        config: ArchiveConfig,
        store: Arc<dyn TransactionStore>,
    ) -> Result<Self, ContainerError> {
        config.validate()?;
        let keys = KeyMaterial::load(
            &config.signature.private_key_path,
            &config.signature.public_key_path,
        )?;
        Self::with_keys(config, store, keys)
    }

    /// Start every service with already loaded key material.
    #[instrument(name = "archive_init", skip_all)]
    pub fn with_keys(
        config: ArchiveConfig,
        store: Arc<dyn TransactionStore>,
        keys: KeyMaterial,
    ) -> Result<Self, ContainerError> {
        config.validate()?;

        info!("Phase 1: Starting worker pools");
        let compression = Arc::new(CompressionService::start(&config.compression)?);
        info!(
            compressors = config.compression.compressor_workers,
            decompressors = config.compression.decompressor_workers,
            "  [sa-01] Compression pools started"
        );
        let signature = Arc::new(SignatureService::start(&config.signature, keys)?);
        info!(
            signers = config.signature.signer_workers,
            verifiers = config.signature.verifier_workers,
            "  [sa-02] Signature pools started"
        );

        info!("Phase 2: Wiring statement generator");
        let compression_api: Arc<dyn CompressionApi> = compression.clone();
        let signature_api: Arc<dyn SignatureApi> = signature.clone();
        let generator = Arc::new(StatementGenerator::new(
            config.generation.clone(),
            store,
            Arc::new(PoolCompressor::new(compression_api)),
            Arc::new(PoolSigner::new(signature_api)),
        )?);
        info!(
            parallelism = config.generation.parallelism,
            "  [sa-03] Statement generator ready"
        );

        Ok(Self {
            compression,
            signature,
            generator,
            config,
        })
    }

    pub fn compression(&self) -> Arc<dyn CompressionApi> {
        self.compression.clone()
    }

    pub fn signature(&self) -> Arc<dyn SignatureApi> {
        self.signature.clone()
    }

    pub fn generator(&self) -> Arc<dyn StatementGenerationApi> {
        self.generator.clone()
    }

    /// Request boundary bounded by `request_timeout`.
    pub fn trigger(&self) -> StatementTrigger {
        StatementTrigger::new(self.generator(), self.config.request_timeout)
    }

    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    /// Stop the pools and join their threads.
    ///
    /// Blocks the calling thread; call it outside async context or through
    /// `spawn_blocking`. A pool still referenced elsewhere is left to stop
    /// when its last handle drops.
    pub fn shutdown(self) {
        info!("Initiating graceful shutdown...");
        drop(self.generator);

        match Arc::try_unwrap(self.compression) {
            Ok(service) => service.shutdown(),
            Err(_) => warn!("Compression pools still referenced; skipping join"),
        }
        match Arc::try_unwrap(self.signature) {
            Ok(service) => service.shutdown(),
            Err(_) => warn!("Signature pools still referenced; skipping join"),
        }

        info!("Shutdown complete");
    }
}
