//! # RSA Signatures
//!
//! RSASSA-PKCS1-v1_5 with a SHA-512 digest. Deterministic for a given key.

use crate::domain::errors::SignatureError;
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use sha2::Sha512;
use tracing::debug;

/// Algorithm name recorded alongside archived signatures.
pub const SIGNATURE_ALGORITHM: &str = "SHA512withRSA";

/// Sign `data`.
pub fn sign(key: &SigningKey<Sha512>, data: &[u8]) -> Result<Vec<u8>, SignatureError> {
    let signature = key
        .try_sign(data)
        .map_err(|e| SignatureError::SigningFailed(e.to_string()))?;

    debug!(payload_bytes = data.len(), "RSA signature created");

    Ok(signature.to_vec())
}

/// Verify `signature` over the original `data`.
///
/// Malformed signature bytes simply fail verification.
pub fn verify(key: &VerifyingKey<Sha512>, data: &[u8], signature: &[u8]) -> bool {
    let Ok(signature) = Signature::try_from(signature) else {
        return false;
    };
    key.verify(data, &signature).is_ok()
}
