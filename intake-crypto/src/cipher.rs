//! Authenticated encryption of string values into portable tokens.

use crate::error::{CryptoError, CryptoResult};
use crate::key::DerivedKey;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Nonce};
use rand::RngCore;

/// Nonce size for ChaCha20-Poly1305 (96 bits).
pub const NONCE_SIZE: usize = 12;

/// Authentication tag size (128 bits).
pub const TAG_SIZE: usize = 16;

/// Leading byte of every token.
pub const TOKEN_VERSION: u8 = 1;

/// Encrypts `plaintext` under `key`.
///
/// Returns URL-safe base64 of `version || nonce || ciphertext+tag`. A fresh
/// random nonce is drawn per call, so equal inputs give different tokens.
pub fn encrypt(key: &DerivedKey, plaintext: &str) -> CryptoResult<String> {
    let cipher = ChaCha20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::Encryption(format!("invalid key: {e}")))?;

    let mut nonce = [0u8; NONCE_SIZE];
    rand::rng().fill_bytes(&mut nonce);

    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    let mut envelope = Vec::with_capacity(1 + NONCE_SIZE + sealed.len());
    envelope.push(TOKEN_VERSION);
    envelope.extend_from_slice(&nonce);
    envelope.extend_from_slice(&sealed);
    Ok(URL_SAFE.encode(envelope))
}

/// Decrypts a token produced by [`encrypt`].
///
/// Fails with [`CryptoError::Decryption`] on a wrong key, any tampering,
/// malformed base64, a truncated envelope, an unknown version byte, or a
/// plaintext that is not UTF-8.
pub fn decrypt(key: &DerivedKey, token: &str) -> CryptoResult<String> {
    let envelope = URL_SAFE
        .decode(token.trim())
        .map_err(|e| CryptoError::Decryption(format!("malformed token: {e}")))?;

    if envelope.len() < 1 + NONCE_SIZE + TAG_SIZE {
        return Err(CryptoError::Decryption(format!(
            "token too short: {} bytes",
            envelope.len()
        )));
    }
    let (version, rest) = envelope.split_at(1);
    if version[0] != TOKEN_VERSION {
        return Err(CryptoError::Decryption(format!(
            "unsupported token version {}",
            version[0]
        )));
    }
    let (nonce, sealed) = rest.split_at(NONCE_SIZE);

    let cipher = ChaCha20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::Decryption(format!("invalid key: {e}")))?;
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| {
            CryptoError::Decryption("authentication failed (wrong key or tampered data)".to_string())
        })?;

    String::from_utf8(plaintext)
        .map_err(|_| CryptoError::Decryption("plaintext is not valid UTF-8".to_string()))
}
