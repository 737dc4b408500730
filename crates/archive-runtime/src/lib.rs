//! # Archive Runtime Library
//!
//! This library exposes the internal modules of the archive runtime for
//! testing. The main entry point is the `main.rs` binary.
//!
//! ## Architectural Patterns
//!
//! - **Hexagonal Architecture**: Subsystems define ports, this crate plugs in
//!   the adapters (worker pools, stores)
//! - **Dependency Injection**: `ArchiveContainer` wires every service once at
//!   startup

pub mod adapters;
pub mod container;
pub mod trigger;

pub use container::{ArchiveConfig, ArchiveContainer, ConfigError, ContainerError, StoreConfig};
pub use trigger::{StatementTrigger, TriggerError};
