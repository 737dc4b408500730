//! # RocksDB Transaction Store
//!
//! Production RocksDB implementation of the `TransactionStore` façade.
//!
//! ## Features
//!
//! - Atomic relocation (one `WriteBatch`: delete live + put archive)
//! - Column families for live and archived records
//! - Snappy compression and bloom filters
//! - A connection budget of `max_connections` concurrent operations
//! - All database work runs on the blocking thread pool
//!
//! ## Column Families
//!
//! - `live_transactions` - key: transaction id, value: bincode `Transaction`
//! - `archived_transactions` - key: statement uuid (16 bytes) ++ transaction
//!   id, value: bincode `ArchivedTransaction`

use crate::container::StoreConfig;
use parking_lot::RwLock;
use rocksdb::{
    ColumnFamily, ColumnFamilyDescriptor, Direction, IteratorMode, Options, WriteBatch, DB,
};
use sa_03_statement_generation::{StoreError, TransactionStore};
use shared_types::{ArchivedTransaction, StatementId, Transaction, TransactionId};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::debug;

/// Column family of live transactions
pub const CF_LIVE: &str = "live_transactions";
/// Column family of archived transactions
pub const CF_ARCHIVE: &str = "archived_transactions";

/// All column families used by the store
pub const COLUMN_FAMILIES: &[&str] = &[CF_LIVE, CF_ARCHIVE];

/// RocksDB configuration
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: PathBuf,
    /// Concurrent operations admitted (default: 10)
    pub max_connections: usize,
    /// Block cache size in bytes (default: 64MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 32MB)
    pub write_buffer_size: usize,
    /// Enable fsync after each write (default: true for durability)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self::from_store_config(&StoreConfig::default())
    }
}

impl RocksDbConfig {
    pub fn from_store_config(store: &StoreConfig) -> Self {
        Self {
            path: store.data_dir.clone(),
            max_connections: store.max_connections,
            block_cache_size: 64 * 1024 * 1024,  // 64MB
            write_buffer_size: 32 * 1024 * 1024, // 32MB
            sync_writes: store.sync_writes,
        }
    }

    /// Create config for testing (smaller buffers, no sync)
    pub fn for_testing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_connections: 10,
            block_cache_size: 8 * 1024 * 1024,  // 8MB
            write_buffer_size: 4 * 1024 * 1024, // 4MB
            sync_writes: false,
        }
    }
}

/// RocksDB-backed store façade.
///
/// Relocations take the write lock so the existence checks and the batch
/// write are not interleaved with another relocation.
pub struct RocksDbTransactionStore {
    db: Arc<RwLock<DB>>,
    connections: Arc<Semaphore>,
    config: RocksDbConfig,
}

impl RocksDbTransactionStore {
    /// Open or create the database.
    pub fn open(config: RocksDbConfig) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        // Bloom filter for point lookups by transaction id
        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let cf_descriptors: Vec<ColumnFamilyDescriptor> = COLUMN_FAMILIES
            .iter()
            .map(|name| {
                let mut cf_opts = Options::default();
                cf_opts.set_compression_type(rocksdb::DBCompressionType::Snappy);
                ColumnFamilyDescriptor::new(*name, cf_opts)
            })
            .collect();

        let db = DB::open_cf_descriptors(&opts, &config.path, cf_descriptors)
            .map_err(|e| StoreError::Unavailable(format!("Failed to open RocksDB: {}", e)))?;

        debug!(path = ?config.path, "RocksDB transaction store opened");

        Ok(Self {
            db: Arc::new(RwLock::new(db)),
            connections: Arc::new(Semaphore::new(config.max_connections)),
            config,
        })
    }

    /// Insert or replace a live transaction.
    pub fn insert_live(&self, transaction: &Transaction) -> Result<(), StoreError> {
        let value = encode(transaction)?;
        let db = self.db.read();
        let live = column(&db, CF_LIVE)?;
        db.put_cf(live, transaction.id.as_bytes(), value)
            .map_err(|e| StoreError::Unavailable(format!("RocksDB put failed: {}", e)))
    }

    pub fn contains_live(&self, transaction_id: &TransactionId) -> Result<bool, StoreError> {
        let db = self.db.read();
        let live = column(&db, CF_LIVE)?;
        db.get_pinned_cf(live, transaction_id.as_bytes())
            .map(|value| value.is_some())
            .map_err(|e| StoreError::Unavailable(format!("RocksDB get failed: {}", e)))
    }

    /// Archived records of one statement, ordered by transaction id.
    pub fn archived_for(
        &self,
        statement_id: StatementId,
    ) -> Result<Vec<ArchivedTransaction>, StoreError> {
        let prefix = statement_id.as_uuid().as_bytes().to_vec();
        let db = self.db.read();
        let archive = column(&db, CF_ARCHIVE)?;

        let mut records = Vec::new();
        let mode = IteratorMode::From(prefix.as_slice(), Direction::Forward);
        for item in db.iterator_cf(archive, mode) {
            let (key, value) =
                item.map_err(|e| StoreError::Unavailable(format!("RocksDB scan failed: {}", e)))?;
            if !key.starts_with(&prefix) {
                break;
            }
            records.push(decode(&value)?);
        }
        Ok(records)
    }

    async fn connection(&self) -> Result<OwnedSemaphorePermit, StoreError> {
        Arc::clone(&self.connections)
            .acquire_owned()
            .await
            .map_err(|_| StoreError::Unavailable("connection budget closed".to_string()))
    }
}

#[async_trait::async_trait]
impl TransactionStore for RocksDbTransactionStore {
    async fn find_by_id(&self, transaction_id: &TransactionId) -> Result<Transaction, StoreError> {
        let permit = self.connection().await?;
        let db = Arc::clone(&self.db);
        let transaction_id = transaction_id.clone();

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let db = db.read();
            let live = column(&db, CF_LIVE)?;
            match db.get_pinned_cf(live, transaction_id.as_bytes()) {
                Ok(Some(value)) => decode(&value),
                Ok(None) => Err(StoreError::NotFound(transaction_id)),
                Err(e) => Err(StoreError::Unavailable(format!("RocksDB get failed: {}", e))),
            }
        })
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?
    }

    async fn relocate(
        &self,
        archived: ArchivedTransaction,
        original_id: &TransactionId,
    ) -> Result<(), StoreError> {
        let permit = self.connection().await?;
        let db = Arc::clone(&self.db);
        let original_id = original_id.clone();
        let sync_writes = self.config.sync_writes;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let rollback = |message: String| StoreError::RelocationFailed {
                transaction_id: original_id.clone(),
                message,
            };

            let db = db.write();
            let live = column(&db, CF_LIVE)?;
            let archive = column(&db, CF_ARCHIVE)?;
            let archive_key = archive_key(&archived);

            let live_exists = db
                .get_pinned_cf(live, original_id.as_bytes())
                .map_err(|e| rollback(e.to_string()))?
                .is_some();
            if !live_exists {
                return Err(rollback("live record missing".to_string()));
            }
            let archived_exists = db
                .get_pinned_cf(archive, &archive_key)
                .map_err(|e| rollback(e.to_string()))?
                .is_some();
            if archived_exists {
                return Err(rollback("archive key already present".to_string()));
            }

            let mut batch = WriteBatch::default();
            batch.delete_cf(live, original_id.as_bytes());
            batch.put_cf(archive, &archive_key, encode(&archived)?);

            let mut write_opts = rocksdb::WriteOptions::default();
            write_opts.set_sync(sync_writes);

            db.write_opt(batch, &write_opts)
                .map_err(|e| rollback(format!("RocksDB batch write failed: {}", e)))
        })
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?
    }

    fn max_connections(&self) -> usize {
        self.config.max_connections
    }
}

fn column<'a>(db: &'a DB, name: &str) -> Result<&'a ColumnFamily, StoreError> {
    db.cf_handle(name)
        .ok_or_else(|| StoreError::Unavailable(format!("missing column family {}", name)))
}

fn archive_key(archived: &ArchivedTransaction) -> Vec<u8> {
    let statement = archived.statement_id.as_uuid().as_bytes();
    let transaction = archived.transaction_id.as_bytes();
    let mut key = Vec::with_capacity(statement.len() + transaction.len());
    key.extend_from_slice(statement);
    key.extend_from_slice(transaction);
    key
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    bincode::serialize(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}
