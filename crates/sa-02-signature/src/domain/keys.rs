//! # Key Material
//!
//! The process-wide RSA key pair. Built once during startup and shared by
//! reference with every signer and verifier worker; never mutated.

use crate::domain::errors::KeyError;
use rsa::pkcs1v15::{SigningKey, VerifyingKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::Sha512;
use std::path::Path;
use tracing::info;

/// Immutable signing and verifying keys.
#[derive(Clone)]
pub struct KeyMaterial {
    signing_key: SigningKey<Sha512>,
    verifying_key: VerifyingKey<Sha512>,
}

impl KeyMaterial {
    /// Load the key pair from DER files.
    ///
    /// # Errors
    /// Any `KeyError`; callers treat it as fatal.
    pub fn load(private_key_path: &Path, public_key_path: &Path) -> Result<Self, KeyError> {
        let private_der = read_resource(private_key_path)?;
        let public_der = read_resource(public_key_path)?;

        let material = Self::from_der(&private_der, &public_der)?;

        info!(
            private_key = ?private_key_path,
            public_key = ?public_key_path,
            "RSA key material loaded"
        );

        Ok(material)
    }

    /// Build from PKCS#8 private key DER and SubjectPublicKeyInfo DER.
    pub fn from_der(private_der: &[u8], public_der: &[u8]) -> Result<Self, KeyError> {
        let private_key = RsaPrivateKey::from_pkcs8_der(private_der)
            .map_err(|e| KeyError::InvalidPrivateKey(e.to_string()))?;
        let public_key = RsaPublicKey::from_public_key_der(public_der)
            .map_err(|e| KeyError::InvalidPublicKey(e.to_string()))?;

        Self::from_keys(private_key, public_key)
    }

    /// Build from decoded keys, rejecting a mismatched pair.
    pub fn from_keys(private_key: RsaPrivateKey, public_key: RsaPublicKey) -> Result<Self, KeyError> {
        if RsaPublicKey::from(&private_key) != public_key {
            return Err(KeyError::KeyPairMismatch);
        }

        Ok(Self {
            signing_key: SigningKey::<Sha512>::new(private_key),
            verifying_key: VerifyingKey::<Sha512>::new(public_key),
        })
    }

    pub fn signing_key(&self) -> &SigningKey<Sha512> {
        &self.signing_key
    }

    pub fn verifying_key(&self) -> &VerifyingKey<Sha512> {
        &self.verifying_key
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial").finish_non_exhaustive()
    }
}

fn read_resource(path: &Path) -> Result<Vec<u8>, KeyError> {
    std::fs::read(path).map_err(|e| KeyError::Unreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
