//! # Shared Bus - Request/Response Worker Pools
//!
//! Message-passing layer used by the CPU-bound subsystems (compression and
//! signing). A pool owns a fixed number of worker threads; callers address the
//! pool as a whole and every request is routed round-robin to one worker's
//! mailbox. The caller awaits the reply with an explicit timeout.
//!
//! ```text
//!                    ┌─────────────┐
//!   ask(req, t) ───→ │ WorkerPool  │ ──round-robin──→ worker-0 mailbox
//!        ↑           │             │ ──────────────→ worker-1 mailbox
//!        │           └─────────────┘ ──────────────→ worker-N mailbox
//!        │                                                 │
//!        └──────────────── oneshot reply ←─────────────────┘
//! ```
//!
//! ## Semantics
//!
//! - Workers are stateless between requests; shared state (keys, codec
//!   settings) lives in the `Worker` value which all threads share by `Arc`.
//! - A timed-out request is not cancelled on the worker; its late response is
//!   discarded.
//! - Dropping the pool closes every mailbox and the threads exit once drained.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod pool;
pub mod worker;

pub use pool::{AskError, PoolError, WorkerPool};
pub use worker::Worker;

/// Default number of workers per pool.
pub const DEFAULT_POOL_SIZE: usize = 16;

/// Requests buffered per worker mailbox before `ask` waits for space.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 64;
