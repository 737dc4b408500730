//! # Generation Entities

use shared_types::{StatementId, Transaction, TransactionNumber};

/// One unit of pipeline work: a resolved transaction and its ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivalRequest {
    pub statement_id: StatementId,
    /// Position in pipeline input order, starting at 1.
    pub transaction_number: TransactionNumber,
    pub transaction: Transaction,
}

/// Outcome of a successful generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementReceipt {
    pub statement_id: StatementId,
    /// Number of transactions relocated into the archive.
    pub archived: u32,
}

/// Counters collected by the pipeline while draining.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Items that finished relocation.
    pub completed: u32,
    /// Highest number of items observed between enqueue and relocation-ack.
    pub peak_in_flight: usize,
}
