//! # Statement Archive Runtime
//!
//! Generates one statement for the chain ending at the given transaction id.
//!
//! ## Startup Sequence
//!
//! 1. Parse arguments and load configuration (defaults + `SA_*` variables)
//! 2. Open the transaction store and apply the optional seed file
//! 3. Load key material and start the worker pools
//! 4. Run the generation through the trigger
//! 5. Shut the pools down and print the statement id
//!
//! A failed generation exits non-zero.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use archive_runtime::adapters::load_seed;
use archive_runtime::container::StoreConfig;
use archive_runtime::{ArchiveConfig, ArchiveContainer};
use sa_03_statement_generation::TransactionStore;
use shared_types::Transaction;

#[derive(Parser, Debug)]
#[command(name = "archive-runtime")]
#[command(about = "Archive a transaction chain into a fresh statement", long_about = None)]
struct Args {
    /// Id of the last transaction of the chain
    last_transaction_id: String,

    /// JSON file of live transactions inserted before the run
    #[arg(long)]
    seed: Option<PathBuf>,
}

#[cfg(feature = "rocksdb")]
fn open_store(config: &StoreConfig, seed: &[Transaction]) -> Result<Arc<dyn TransactionStore>> {
    use archive_runtime::adapters::storage::{RocksDbConfig, RocksDbTransactionStore};

    let store = RocksDbTransactionStore::open(RocksDbConfig::from_store_config(config))
        .context("Failed to open RocksDB transaction store")?;
    for transaction in seed {
        store
            .insert_live(transaction)
            .with_context(|| format!("Failed to seed transaction {}", transaction.id))?;
    }
    info!(path = ?config.data_dir, seeded = seed.len(), "RocksDB transaction store ready");
    Ok(Arc::new(store))
}

#[cfg(not(feature = "rocksdb"))]
fn open_store(config: &StoreConfig, seed: &[Transaction]) -> Result<Arc<dyn TransactionStore>> {
    use archive_runtime::adapters::storage::InMemoryTransactionStore;

    tracing::warn!("Built without the rocksdb feature; using the in-memory transaction store");
    let store = InMemoryTransactionStore::with_max_connections(config.max_connections);
    for transaction in seed {
        store.insert(transaction.clone());
    }
    info!(seeded = seed.len(), "In-memory transaction store ready");
    Ok(Arc::new(store))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; stdout carries only the statement id
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ArchiveConfig::from_env();
    config.validate().context("Invalid configuration")?;

    let seed = match &args.seed {
        Some(path) => load_seed(path)?,
        None => Vec::new(),
    };
    let store = open_store(&config.store, &seed)?;

    let container =
        ArchiveContainer::new(config, store).context("Failed to start archive services")?;
    let outcome = container.trigger().trigger(&args.last_transaction_id).await;

    tokio::task::spawn_blocking(move || container.shutdown())
        .await
        .context("Shutdown task failed")?;

    let receipt = outcome?;
    println!("{}", receipt.statement_id);
    Ok(())
}
