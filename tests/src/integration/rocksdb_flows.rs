//! # RocksDB Flows
//!
//! The same end-to-end run against the persistent store.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::integration::fixtures::{chain, id, payload_of, start, stop};
    use archive_runtime::adapters::storage::{RocksDbConfig, RocksDbTransactionStore};
    use sa_03_statement_generation::GenerationError;
    use tempfile::TempDir;

    fn open(temp_dir: &TempDir) -> Arc<RocksDbTransactionStore> {
        let config = RocksDbConfig::for_testing(temp_dir.path());
        Arc::new(RocksDbTransactionStore::open(config).unwrap())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_chain_archived_into_rocksdb() {
        let temp_dir = TempDir::new().unwrap();
        let store = open(&temp_dir);
        for transaction in chain(&["A", "B", "C"], 8) {
            store.insert_live(&transaction).unwrap();
        }
        let container = start(store.clone(), 3);

        let receipt = container.trigger().trigger("C").await.unwrap();

        assert_eq!(receipt.archived, 3);
        for raw in ["A", "B", "C"] {
            assert!(!store.contains_live(&id(raw)).unwrap());
        }

        let compression = container.compression();
        let records = store.archived_for(receipt.statement_id).unwrap();
        assert_eq!(records.len(), 3);
        for record in records {
            let restored = compression
                .decompress(record.compressed_payload, Duration::from_secs(10))
                .await
                .unwrap();
            assert_eq!(restored, payload_of(record.transaction_id.as_str(), 8));
        }

        stop(container).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_missing_tail_leaves_rocksdb_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let store = open(&temp_dir);
        for transaction in chain(&["A", "B"], 1) {
            store.insert_live(&transaction).unwrap();
        }
        let container = start(store.clone(), 2);

        let result = container.generator().generate(id("Z")).await;

        assert_eq!(
            result,
            Err(GenerationError::NotFound {
                transaction_id: id("Z")
            })
        );
        assert!(store.contains_live(&id("A")).unwrap());
        assert!(store.contains_live(&id("B")).unwrap());

        stop(container).await;
    }
}
