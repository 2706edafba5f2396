//! Passphrase-based key derivation.

use crate::error::{CryptoError, CryptoResult};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of derived keys in bytes.
pub const KEY_SIZE: usize = 32;

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Lowest iteration count a deployment may configure.
pub const MIN_ITERATIONS: u32 = 100_000;

/// Deployment salt used when none is configured.
pub const DEFAULT_SALT: &str = "intake-core-salt";

/// PBKDF2 parameters.
///
/// The salt is fixed per deployment rather than stored per file, so a draft
/// can be reopened with nothing but the passphrase. Two deployments that
/// share a salt and a passphrase share a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KdfParams {
    pub iterations: u32,
    pub salt: Vec<u8>,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            salt: DEFAULT_SALT.as_bytes().to_vec(),
        }
    }
}

impl KdfParams {
    pub fn new(iterations: u32, salt: impl Into<Vec<u8>>) -> Self {
        Self {
            iterations,
            salt: salt.into(),
        }
    }

    /// Low-cost parameters for tests. Not for production use.
    #[cfg(test)]
    pub fn test() -> Self {
        Self::new(1_000, DEFAULT_SALT)
    }
}

/// A 256-bit key derived from a passphrase.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_SIZE],
}

impl DerivedKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Builds a key from a slice, checking its length.
    pub fn from_slice(bytes: &[u8]) -> CryptoResult<Self> {
        let bytes: [u8; KEY_SIZE] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: KEY_SIZE,
                    actual: bytes.len(),
                })?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derives a key from `passphrase`. Same inputs always give the same key.
pub fn derive_key(passphrase: &str, params: &KdfParams) -> CryptoResult<DerivedKey> {
    if params.iterations == 0 {
        return Err(CryptoError::KeyDerivation(
            "iteration count must be positive".to_string(),
        ));
    }
    if params.salt.is_empty() {
        return Err(CryptoError::KeyDerivation("salt must not be empty".to_string()));
    }

    let mut bytes = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), &params.salt, params.iterations, &mut bytes);
    let key = DerivedKey::from_bytes(bytes);
    bytes.zeroize();
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let a = derive_key("correct horse", &KdfParams::test()).unwrap();
        let b = derive_key("correct horse", &KdfParams::test()).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn salt_and_passphrase_both_matter() {
        let base = derive_key("pw", &KdfParams::test()).unwrap();
        let other_pw = derive_key("pw2", &KdfParams::test()).unwrap();
        let other_salt = derive_key("pw", &KdfParams::new(1_000, "another-salt")).unwrap();
        assert_ne!(base.as_bytes(), other_pw.as_bytes());
        assert_ne!(base.as_bytes(), other_salt.as_bytes());
    }

    #[test]
    fn rejects_degenerate_params() {
        assert!(derive_key("pw", &KdfParams::new(0, "salt")).is_err());
        assert!(derive_key("pw", &KdfParams::new(1_000, Vec::new())).is_err());
    }

    #[test]
    fn from_slice_checks_length() {
        assert!(DerivedKey::from_slice(&[0u8; 32]).is_ok());
        assert!(matches!(
            DerivedKey::from_slice(&[0u8; 16]),
            Err(CryptoError::InvalidKeyLength { expected: 32, actual: 16 })
        ));
    }

    #[test]
    fn debug_hides_key_material() {
        let key = DerivedKey::from_bytes([7u8; KEY_SIZE]);
        assert_eq!(format!("{key:?}"), "DerivedKey([REDACTED])");
    }
}
