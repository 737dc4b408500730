//! # In-Memory Transaction Store
//!
//! Live and archive tables behind one mutex. A relocation takes the lock once,
//! so readers never observe the record in both tables or in neither.
//!
//! Used by tests and development runs.

use crate::domain::errors::StoreError;
use crate::ports::outbound::TransactionStore;
use parking_lot::Mutex;
use shared_types::{ArchivedTransaction, StatementId, Transaction, TransactionId};
use std::collections::{HashMap, HashSet};

/// Default number of concurrent operations the store admits.
pub const DEFAULT_MAX_CONNECTIONS: usize = 10;

#[derive(Debug, Default)]
struct Tables {
    live: HashMap<TransactionId, Transaction>,
    archive: Vec<ArchivedTransaction>,
    failing: HashSet<TransactionId>,
}

/// Store façade over in-process tables.
#[derive(Debug)]
pub struct InMemoryTransactionStore {
    tables: Mutex<Tables>,
    max_connections: usize,
}

impl Default for InMemoryTransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::with_max_connections(DEFAULT_MAX_CONNECTIONS)
    }

    pub fn with_max_connections(max_connections: usize) -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            max_connections,
        }
    }

    /// Insert or replace a live transaction.
    pub fn insert(&self, transaction: Transaction) {
        self.tables
            .lock()
            .live
            .insert(transaction.id.clone(), transaction);
    }

    pub fn live_count(&self) -> usize {
        self.tables.lock().live.len()
    }

    pub fn contains_live(&self, transaction_id: &TransactionId) -> bool {
        self.tables.lock().live.contains_key(transaction_id)
    }

    /// Every archived record, in relocation order.
    pub fn archived(&self) -> Vec<ArchivedTransaction> {
        self.tables.lock().archive.clone()
    }

    pub fn archived_for(&self, statement_id: StatementId) -> Vec<ArchivedTransaction> {
        self.tables
            .lock()
            .archive
            .iter()
            .filter(|record| record.statement_id == statement_id)
            .cloned()
            .collect()
    }

    /// Make every future relocation of `transaction_id` roll back.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn fail_relocation_of(&self, transaction_id: TransactionId) {
        self.tables.lock().failing.insert(transaction_id);
    }
}

#[async_trait::async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn find_by_id(&self, transaction_id: &TransactionId) -> Result<Transaction, StoreError> {
        self.tables
            .lock()
            .live
            .get(transaction_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(transaction_id.clone()))
    }

    async fn relocate(
        &self,
        archived: ArchivedTransaction,
        original_id: &TransactionId,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.lock();

        let rollback = |message: &str| StoreError::RelocationFailed {
            transaction_id: original_id.clone(),
            message: message.to_string(),
        };

        if tables.failing.contains(original_id) {
            return Err(rollback("injected relocation failure"));
        }
        if !tables.live.contains_key(original_id) {
            return Err(rollback("live record missing"));
        }
        let duplicate = tables.archive.iter().any(|record| {
            record.statement_id == archived.statement_id
                && record.transaction_id == archived.transaction_id
        });
        if duplicate {
            return Err(rollback("archive key already present"));
        }

        tables.live.remove(original_id);
        tables.archive.push(archived);
        Ok(())
    }

    fn max_connections(&self) -> usize {
        self.max_connections
    }
}
