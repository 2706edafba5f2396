//! SHA-256 integrity digests.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `bytes`.
pub fn content_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// True when `digest` is the hex SHA-256 of `bytes` (case-insensitive).
pub fn verify_content_hash(bytes: &[u8], digest: &str) -> bool {
    content_hash(bytes).eq_ignore_ascii_case(digest.trim())
}
