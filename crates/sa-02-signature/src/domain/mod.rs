//! # Domain Layer
//!
//! Pure cryptographic logic. Only `KeyMaterial::load` touches the filesystem.

pub mod config;
pub mod errors;
pub mod keys;
pub mod signing;
