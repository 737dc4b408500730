//! # Error Types
//!
//! Errors raised while constructing shared identifiers.

use thiserror::Error;

/// Identifier construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Transaction ids must be non-blank.
    #[error("Transaction id must not be empty")]
    EmptyTransactionId,

    /// Statement ids are UUIDs.
    #[error("Invalid statement id: {0}")]
    InvalidStatementId(String),
}
