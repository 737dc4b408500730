//! # Signature Configuration

use shared_bus::DEFAULT_POOL_SIZE;
use std::path::PathBuf;

/// Default location of the PKCS#8 DER private key.
pub const DEFAULT_PRIVATE_KEY_PATH: &str = "keys/privateKey.der";

/// Default location of the X.509 DER public key.
pub const DEFAULT_PUBLIC_KEY_PATH: &str = "keys/publicKey.der";

/// Worker sizing and key resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureConfig {
    /// Workers serving sign requests.
    pub signer_workers: usize,
    /// Workers serving verify requests.
    pub verifier_workers: usize,
    pub private_key_path: PathBuf,
    pub public_key_path: PathBuf,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            signer_workers: DEFAULT_POOL_SIZE,
            verifier_workers: DEFAULT_POOL_SIZE,
            private_key_path: PathBuf::from(DEFAULT_PRIVATE_KEY_PATH),
            public_key_path: PathBuf::from(DEFAULT_PUBLIC_KEY_PATH),
        }
    }
}
