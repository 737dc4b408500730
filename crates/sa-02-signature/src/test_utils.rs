//! Ephemeral key material for tests.
//!
//! Generated once per test binary; 1024-bit keys keep debug builds fast.

use crate::domain::keys::KeyMaterial;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::sync::OnceLock;

const TEST_KEY_BITS: usize = 1024;

static TEST_PRIVATE_KEY: OnceLock<RsaPrivateKey> = OnceLock::new();

pub fn test_private_key() -> &'static RsaPrivateKey {
    TEST_PRIVATE_KEY.get_or_init(|| {
        RsaPrivateKey::new(&mut rand::thread_rng(), TEST_KEY_BITS).expect("generate test key")
    })
}

pub fn test_key_material() -> KeyMaterial {
    let private_key = test_private_key().clone();
    let public_key = RsaPublicKey::from(&private_key);
    KeyMaterial::from_keys(private_key, public_key).expect("matching test key pair")
}

/// `(PKCS#8 private key DER, SubjectPublicKeyInfo DER)`
pub fn test_key_der() -> (Vec<u8>, Vec<u8>) {
    let private_key = test_private_key();
    let private_der = private_key
        .to_pkcs8_der()
        .expect("encode private key")
        .as_bytes()
        .to_vec();
    let public_der = RsaPublicKey::from(private_key)
        .to_public_key_der()
        .expect("encode public key")
        .as_bytes()
        .to_vec();
    (private_der, public_der)
}
