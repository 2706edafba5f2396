//! Field encryption for the client intake core.
//!
//! - PBKDF2-HMAC-SHA256 derives a 256-bit key from a passphrase. The salt and
//!   iteration count come from [`KdfParams`]; the default is one fixed salt
//!   per deployment so the same passphrase always yields the same key.
//! - ChaCha20-Poly1305 seals each value under a fresh random nonce.
//! - Sealed values travel as URL-safe base64 tokens
//!   (`version || nonce || ciphertext+tag`) so they can sit inside JSON.
//! - SHA-256 hex digests give integrity checks for generated artifacts.
//!
//! Key material is zeroized on drop.

mod cipher;
mod error;
mod hash;
mod key;

pub use cipher::{decrypt, encrypt, NONCE_SIZE, TAG_SIZE, TOKEN_VERSION};
pub use error::{CryptoError, CryptoResult};
pub use hash::{content_hash, verify_content_hash};
pub use key::{
    derive_key, DerivedKey, KdfParams, DEFAULT_ITERATIONS, DEFAULT_SALT, KEY_SIZE, MIN_ITERATIONS,
};
