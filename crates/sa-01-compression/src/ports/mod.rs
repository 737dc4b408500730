//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that the archiver calls

pub mod inbound;
