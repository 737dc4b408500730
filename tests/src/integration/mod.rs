//! # Integration Tests
//!
//! End-to-end flows through `ArchiveContainer`: real deflate and RSA worker
//! pools, pipeline backpressure and atomic relocation.

pub mod flows;

#[cfg(feature = "rocksdb")]
pub mod rocksdb_flows;

#[cfg(test)]
pub(crate) mod fixtures {
    use archive_runtime::{ArchiveConfig, ArchiveContainer};
    use sa_01_compression::CompressionConfig;
    use sa_02_signature::test_utils::test_key_material;
    use sa_03_statement_generation::TransactionStore;
    use shared_types::{Transaction, TransactionId};
    use std::sync::Arc;

    pub fn id(raw: &str) -> TransactionId {
        TransactionId::parse(raw).unwrap()
    }

    /// Pools of four workers and pipeline degree `parallelism`.
    pub fn config(parallelism: usize) -> ArchiveConfig {
        let mut config = ArchiveConfig::default();
        config.compression = CompressionConfig::with_workers(4);
        config.signature.signer_workers = 4;
        config.signature.verifier_workers = 4;
        config.generation.parallelism = parallelism;
        config
    }

    pub fn start(store: Arc<dyn TransactionStore>, parallelism: usize) -> ArchiveContainer {
        ArchiveContainer::with_keys(config(parallelism), store, test_key_material()).unwrap()
    }

    pub async fn stop(container: ArchiveContainer) {
        tokio::task::spawn_blocking(move || container.shutdown())
            .await
            .unwrap();
    }

    /// Linked chain over `ids`, head first. Payload of each item is
    /// `"payload of <id>"` repeated `repeat` times.
    pub fn chain(ids: &[&str], repeat: usize) -> Vec<Transaction> {
        let mut previous: Option<TransactionId> = None;
        ids.iter()
            .map(|raw| {
                let transaction =
                    Transaction::new(id(raw), previous.take(), payload_of(raw, repeat));
                previous = Some(transaction.id.clone());
                transaction
            })
            .collect()
    }

    pub fn payload_of(raw: &str, repeat: usize) -> Vec<u8> {
        format!("payload of {raw};").repeat(repeat).into_bytes()
    }
}
