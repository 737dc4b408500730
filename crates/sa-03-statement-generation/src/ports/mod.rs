//! # Ports Layer
//!
//! - `inbound`: `StatementGenerationApi`, driven by the trigger boundary
//! - `outbound`: store façade and transform gateways

pub mod inbound;
pub mod outbound;
