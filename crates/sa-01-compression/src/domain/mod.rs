//! # Domain Layer
//!
//! Pure codec logic with no I/O dependencies.

pub mod codec;
pub mod config;
pub mod errors;
