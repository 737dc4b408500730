//! # Domain Layer
//!
//! Requests, receipts, configuration and the error taxonomy of a
//! generation run.

pub mod config;
pub mod entities;
pub mod errors;
