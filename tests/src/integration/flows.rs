//! # Integration Test Flows
//!
//! Tests that sa-01-compression, sa-02-signature and
//! sa-03-statement-generation work together through the runtime adapters.
//!
//! ## Flows Tested:
//!
//! 1. **Walker → Pipeline → Archiver**: A whole chain lands in the archive
//!    with ordinals in walk order
//! 2. **Archived record integrity**: Every compressed payload inflates to the
//!    original and every signature verifies against the original
//! 3. **Failure propagation**: Lookup and relocation failures fail the run

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;

    use rand::Rng;

    use crate::integration::fixtures::{chain, id, payload_of, start, stop};
    use archive_runtime::TriggerError;
    use sa_03_statement_generation::{GenerationError, InMemoryTransactionStore};
    use shared_types::{ArchivedTransaction, Transaction};

    const TIMEOUT: Duration = Duration::from_secs(10);

    fn seeded(transactions: &[Transaction]) -> Arc<InMemoryTransactionStore> {
        let store = Arc::new(InMemoryTransactionStore::new());
        for transaction in transactions {
            store.insert(transaction.clone());
        }
        store
    }

    fn by_number(mut records: Vec<ArchivedTransaction>) -> Vec<ArchivedTransaction> {
        records.sort_by_key(|record| record.transaction_number);
        records
    }

    // =========================================================================
    // HAPPY PATH
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_three_item_chain_archived_in_walk_order() {
        let store = seeded(&chain(&["A", "B", "C"], 4));
        let container = start(store.clone(), 2);

        let receipt = container.trigger().trigger("C").await.unwrap();

        assert_eq!(receipt.archived, 3);
        assert_eq!(store.live_count(), 0);

        let records = by_number(store.archived_for(receipt.statement_id));
        let order: Vec<(String, u32)> = records
            .iter()
            .map(|r| (r.transaction_id.to_string(), r.transaction_number))
            .collect();
        assert_eq!(
            order,
            vec![
                ("C".to_string(), 1),
                ("B".to_string(), 2),
                ("A".to_string(), 3)
            ]
        );

        stop(container).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_archived_records_restore_and_verify() {
        let store = seeded(&chain(&["A", "B", "C"], 50));
        let container = start(store.clone(), 3);

        let receipt = container.generator().generate(id("C")).await.unwrap();

        let compression = container.compression();
        let signature = container.signature();
        for record in store.archived_for(receipt.statement_id) {
            let original = payload_of(record.transaction_id.as_str(), 50);

            assert!(record.compressed_payload.len() < original.len());
            let restored = compression
                .decompress(record.compressed_payload.clone(), TIMEOUT)
                .await
                .unwrap();
            assert_eq!(restored, original);

            assert!(signature
                .verify(original.clone(), record.signature.clone(), TIMEOUT)
                .await
                .unwrap());
            assert!(!signature
                .verify(record.compressed_payload.clone(), record.signature.clone(), TIMEOUT)
                .await
                .unwrap());
        }

        stop(container).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_long_chain_with_random_payloads() {
        let mut rng = rand::thread_rng();
        let names: Vec<String> = (0..120).map(|i| format!("tx-{i:03}")).collect();
        let mut previous = None;
        let mut transactions = Vec::new();
        for name in &names {
            let size = rng.gen_range(0..4_096);
            let payload: Vec<u8> = (0..size).map(|_| rng.gen()).collect();
            let transaction = Transaction::new(id(name), previous.take(), payload);
            previous = Some(transaction.id.clone());
            transactions.push(transaction);
        }
        let store = seeded(&transactions);
        let container = start(store.clone(), 8);

        let receipt = container.trigger().trigger("tx-119").await.unwrap();

        assert_eq!(receipt.archived, 120);
        assert_eq!(store.live_count(), 0);

        let records = by_number(store.archived_for(receipt.statement_id));
        let numbers: Vec<u32> = records.iter().map(|r| r.transaction_number).collect();
        assert_eq!(numbers, (1..=120).collect::<Vec<u32>>());

        let compression = container.compression();
        let signature = container.signature();
        for record in records {
            let original = transactions
                .iter()
                .find(|t| t.id == record.transaction_id)
                .unwrap();
            let restored = compression
                .decompress(record.compressed_payload, TIMEOUT)
                .await
                .unwrap();
            assert_eq!(restored, original.payload);
            assert!(signature
                .verify(original.payload.clone(), record.signature, TIMEOUT)
                .await
                .unwrap());
        }

        stop(container).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_each_run_gets_fresh_statement() {
        let mut transactions = chain(&["A1", "A2"], 1);
        transactions.extend(chain(&["B1", "B2", "B3"], 1));
        let store = seeded(&transactions);
        let container = start(store.clone(), 2);
        let trigger = container.trigger();

        let first = trigger.trigger("A2").await.unwrap();
        let second = trigger.trigger("B3").await.unwrap();

        assert_ne!(first.statement_id, second.statement_id);
        assert_eq!(store.archived_for(first.statement_id).len(), 2);
        assert_eq!(store.archived_for(second.statement_id).len(), 3);

        let ids: HashSet<String> = store
            .archived()
            .into_iter()
            .map(|r| r.transaction_id.to_string())
            .collect();
        assert_eq!(ids.len(), 5);

        stop(container).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_partial_chain_archives_only_reachable_items() {
        let store = seeded(&chain(&["A", "B", "C", "D"], 1));
        let container = start(store.clone(), 2);

        let receipt = container.trigger().trigger("B").await.unwrap();

        assert_eq!(receipt.archived, 2);
        assert!(store.contains_live(&id("C")));
        assert!(store.contains_live(&id("D")));
        assert!(!store.contains_live(&id("A")));

        stop(container).await;
    }

    // =========================================================================
    // FAILURES
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_unknown_tail_archives_nothing() {
        let store = seeded(&chain(&["A", "B"], 1));
        let container = start(store.clone(), 2);

        let result = container.trigger().trigger("Z").await;

        assert_eq!(
            result,
            Err(TriggerError::Generation(GenerationError::NotFound {
                transaction_id: id("Z")
            }))
        );
        assert_eq!(store.live_count(), 2);
        assert!(store.archived().is_empty());

        stop(container).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_broken_link_fails_run() {
        // B points at A, which is not in the store
        let transactions = chain(&["A", "B", "C"], 1);
        let store = seeded(&transactions[1..]);
        let container = start(store.clone(), 1);

        let result = container.generator().generate(id("C")).await;

        assert_eq!(
            result,
            Err(GenerationError::NotFound {
                transaction_id: id("A")
            })
        );

        stop(container).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_relocation_failure_fails_run() {
        let store = seeded(&chain(&["A", "B", "C"], 1));
        store.fail_relocation_of(id("B"));
        let container = start(store.clone(), 1);

        let result = container.generator().generate(id("C")).await;

        assert!(matches!(
            result,
            Err(GenerationError::StorageFailure { ref transaction_id, .. })
                if transaction_id == &id("B")
        ));
        // Items before the failure stay relocated; the failed one stays live
        assert!(!store.contains_live(&id("C")));
        assert!(store.contains_live(&id("B")));
        assert_eq!(store.archived().len(), 1);

        stop(container).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_blank_id_rejected() {
        let store = seeded(&chain(&["A"], 1));
        let container = start(store.clone(), 1);

        let result = container.trigger().trigger("").await;

        assert!(matches!(result, Err(TriggerError::InvalidId(_))));
        assert_eq!(store.live_count(), 1);

        stop(container).await;
    }
}
