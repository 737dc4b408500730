//! # Seed Loader
//!
//! Reads live transactions from a JSON array, e.g.
//!
//! ```json
//! [{ "id": "tx-2", "previous_id": "tx-1", "payload": [104, 105] },
//!  { "id": "tx-1", "previous_id": null, "payload": [] }]
//! ```

use shared_types::Transaction;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed seed file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Load every transaction listed in `path`.
pub fn load_seed(path: &Path) -> Result<Vec<Transaction>, SeedError> {
    let raw = std::fs::read(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let transactions: Vec<Transaction> =
        serde_json::from_slice(&raw).map_err(|source| SeedError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    info!(path = ?path, count = transactions.len(), "Seed transactions loaded");
    Ok(transactions)
}
