//! # Service Container
//!
//! Holds the worker pools and the statement generator with proper lifetime
//! management and dependency injection.
//!
//! - Services are started in dependency order (pools first, generator last)
//! - The generator reaches the pools only through its outbound ports

pub mod config;
pub mod services;

pub use config::{ArchiveConfig, ConfigError, StoreConfig, DEFAULT_REQUEST_TIMEOUT};
pub use services::{ArchiveContainer, ContainerError};
