//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Live chain**: `Transaction`, `TransactionId`
//! - **Archive**: `ArchivedTransaction`, `StatementId`, `TransactionNumber`

use crate::errors::IdentifierError;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// =============================================================================
// CLUSTER A: THE LIVE CHAIN
// =============================================================================

/// Opaque, stable identifier of a live transaction.
///
/// Serialized as a plain string; deserialization applies the same check as
/// [`TransactionId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionId(String);

impl TransactionId {
    /// Create an identifier, rejecting the empty string.
    pub fn parse(raw: impl Into<String>) -> Result<Self, IdentifierError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(IdentifierError::EmptyTransactionId);
        }
        Ok(Self(raw))
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw identifier bytes, used as the storage key.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TransactionId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TransactionId {
    type Error = IdentifierError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl From<TransactionId> for String {
    fn from(id: TransactionId) -> Self {
        id.0
    }
}

/// A live transaction record.
///
/// `previous_id` points backwards along the chain; `None` marks the chain head.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Identity of this record.
    pub id: TransactionId,
    /// Predecessor pointer.
    pub previous_id: Option<TransactionId>,
    /// Raw payload of arbitrary length.
    #[serde_as(as = "Bytes")]
    pub payload: Vec<u8>,
}

impl Transaction {
    pub fn new(id: TransactionId, previous_id: Option<TransactionId>, payload: Vec<u8>) -> Self {
        Self {
            id,
            previous_id,
            payload,
        }
    }

    /// True when this record has no predecessor.
    pub fn is_chain_head(&self) -> bool {
        self.previous_id.is_none()
    }
}

// =============================================================================
// CLUSTER B: THE ARCHIVE
// =============================================================================

/// 1-based position of a transaction on its statement.
pub type TransactionNumber = u32;

/// Ordinal given to the first transaction entering a statement.
pub const FIRST_TRANSACTION_NUMBER: TransactionNumber = 1;

/// Grouping key shared by every archived record of one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatementId(Uuid);

impl StatementId {
    /// Generate a fresh, random statement id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for StatementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for StatementId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| IdentifierError::InvalidStatementId(e.to_string()))
    }
}

/// A transaction after compression, signing and relocation.
///
/// Keyed by `(statement_id, transaction_id)`. The signature covers the
/// original uncompressed payload.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedTransaction {
    pub statement_id: StatementId,
    pub transaction_id: TransactionId,
    pub transaction_number: TransactionNumber,
    #[serde_as(as = "Bytes")]
    pub compressed_payload: Vec<u8>,
    #[serde_as(as = "Bytes")]
    pub signature: Vec<u8>,
}
