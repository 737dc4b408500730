//! # Signature Errors
//!
//! `KeyError` is a startup failure; `SignatureError` fails a single request.

use std::path::PathBuf;
use thiserror::Error;

/// Key material could not be loaded. Fatal at process start.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    /// Key resource missing or unreadable.
    #[error("Failed to read key resource {path:?}: {message}")]
    Unreadable { path: PathBuf, message: String },

    /// Bytes are not a PKCS#8 DER RSA private key.
    #[error("Invalid RSA private key: {0}")]
    InvalidPrivateKey(String),

    /// Bytes are not an X.509 SubjectPublicKeyInfo DER RSA public key.
    #[error("Invalid RSA public key: {0}")]
    InvalidPublicKey(String),

    /// The public key does not belong to the private key.
    #[error("Public key does not match private key")]
    KeyPairMismatch,
}

/// Errors that can occur while serving a sign or verify request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The signing primitive rejected the request.
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// No worker answered within the request timeout.
    #[error("Signature request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// The worker pool is gone.
    #[error("Signature workers unavailable: {0}")]
    Unavailable(String),
}
