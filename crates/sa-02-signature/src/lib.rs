//! # Signature Subsystem (SA-02)
//!
//! Signs archived payloads with the process-wide RSA key pair and verifies
//! those signatures.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Key loading and RSASSA-PKCS1-v1_5/SHA-512
//! - **Ports Layer** (`ports/`): `SignatureApi`, the inbound port
//! - **Service Layer** (`service.rs`): Signer and verifier worker pools routed
//!   by request type
//!
//! ## Key Material
//!
//! - Private key: PKCS#8 DER, public key: X.509 SubjectPublicKeyInfo DER
//! - Loaded once at startup and shared read-only by every worker
//! - Missing, malformed or mismatched keys are fatal at startup
//!
//! ## Verification Contract
//!
//! `verify` checks a signature against the ORIGINAL payload. It never
//! verifies a signature against itself.

pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export public API
pub use domain::config::SignatureConfig;
pub use domain::errors::{KeyError, SignatureError};
pub use domain::keys::KeyMaterial;
pub use domain::signing::{sign, verify, SIGNATURE_ALGORITHM};
pub use ports::inbound::SignatureApi;
pub use service::SignatureService;
