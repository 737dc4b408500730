//! # Shared Types Crate
//!
//! Domain records exchanged between the statement-archive crates.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: The live and archived transaction layouts
//!   are defined once and reused by every store adapter.
//! - **Opaque Identity**: Transaction ids are opaque strings; statement ids
//!   are freshly generated UUIDs, one per generation run.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
