//! Sensitive-field encryption and draft save/load.

use crate::error::{StorageError, StorageResult};
use crate::fs::write_atomic;
use intake_crypto::{content_hash, decrypt, derive_key, encrypt, DerivedKey, KdfParams};
use intake_types::{keys, FieldValue, FormDataSet};
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

/// Fields encrypted at rest.
pub const SENSITIVE_FIELDS: &[&str] = &[keys::SSN, keys::SPOUSE_SSN];

const FLAG_SUFFIX: &str = "_encrypted";

/// Companion flag marking `field` as holding a ciphertext token.
pub fn encrypted_flag_key(field: &str) -> String {
    format!("{field}{FLAG_SUFFIX}")
}

/// Canonical SHA-256 of a data set (hex).
///
/// The data set is key-ordered, so equal contents always hash equally.
pub fn hash_form_data(data: &FormDataSet) -> StorageResult<String> {
    let json = serde_json::to_vec(data)?;
    Ok(content_hash(&json))
}

/// Encrypts and persists drafts under a passphrase-derived key.
///
/// The store holds only the key. Decrypted data is returned to the caller
/// and never kept.
pub struct SecureStore {
    key: DerivedKey,
}

impl SecureStore {
    /// Derives the key with the default deployment parameters.
    pub fn new(passphrase: &str) -> StorageResult<Self> {
        Self::with_params(passphrase, &KdfParams::default())
    }

    pub fn with_params(passphrase: &str, params: &KdfParams) -> StorageResult<Self> {
        let key = derive_key(passphrase, params)?;
        debug!(iterations = params.iterations, "secure store key derived");
        Ok(Self { key })
    }

    pub fn from_key(key: DerivedKey) -> Self {
        Self { key }
    }

    /// Encrypts one value into a token.
    pub fn encrypt(&self, plaintext: &str) -> StorageResult<String> {
        Ok(encrypt(&self.key, plaintext)?)
    }

    /// Decrypts a token, returning the input unchanged on failure.
    ///
    /// Lets drafts written before encryption was enabled (or by another
    /// passphrase) still open; the failure is logged. Use
    /// [`SecureStore::try_decrypt`] when the distinction matters.
    pub fn decrypt(&self, token: &str) -> String {
        match decrypt(&self.key, token) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                warn!(error = %e, "decryption failed, keeping value as-is");
                token.to_string()
            }
        }
    }

    /// Strict decryption.
    pub fn try_decrypt(&self, token: &str) -> StorageResult<String> {
        Ok(decrypt(&self.key, token)?)
    }

    /// Copy of `data` with every non-empty sensitive field encrypted and
    /// flagged. Absent and empty fields are left alone.
    pub fn encrypt_sensitive_fields(&self, data: &FormDataSet) -> StorageResult<FormDataSet> {
        let mut out = data.clone();
        for field in SENSITIVE_FIELDS {
            let Some(value) = data.get(field) else {
                continue;
            };
            if value.is_blank() {
                continue;
            }
            let token = self.encrypt(&value.to_display_string())?;
            out.insert(*field, token);
            out.insert(encrypted_flag_key(field), true);
        }
        Ok(out)
    }

    /// Copy of `data` with flagged sensitive fields decrypted and their
    /// flags removed.
    ///
    /// Only a flag that is present and true triggers decryption. A `false`
    /// flag stays in place and its field is treated as plaintext.
    pub fn decrypt_sensitive_fields(&self, data: &FormDataSet) -> FormDataSet {
        let mut out = data.clone();
        for field in SENSITIVE_FIELDS {
            let flag = encrypted_flag_key(field);
            if !data.get(&flag).is_some_and(FieldValue::is_truthy) {
                continue;
            }
            if let Some(token) = data.get(field).and_then(FieldValue::as_text) {
                out.insert(*field, self.decrypt(token));
            }
            out.remove(&flag);
        }
        out
    }

    /// Encrypts sensitive fields and writes the draft atomically as pretty
    /// JSON with owner-only permissions.
    pub fn secure_save(&self, data: &FormDataSet, path: &Path) -> StorageResult<()> {
        let encrypted = self.encrypt_sensitive_fields(data)?;
        let json = serde_json::to_string_pretty(&encrypted)?;
        write_atomic(path, json.as_bytes())?;
        info!(path = %path.display(), fields = data.len(), "draft saved");
        Ok(())
    }

    /// Loads and decrypts a draft. A missing or corrupt file yields an empty
    /// data set.
    pub fn secure_load(&self, path: &Path) -> FormDataSet {
        match self.try_load(path) {
            Ok(data) => data,
            Err(StorageError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no draft to load");
                FormDataSet::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "draft unreadable, starting empty");
                FormDataSet::new()
            }
        }
    }

    /// Strict load: surfaces I/O and parse errors.
    pub fn try_load(&self, path: &Path) -> StorageResult<FormDataSet> {
        let json = std::fs::read_to_string(path)?;
        let stored: FormDataSet = serde_json::from_str(&json)?;
        let data = self.decrypt_sensitive_fields(&stored);
        info!(path = %path.display(), fields = data.len(), "draft loaded");
        Ok(data)
    }
}

impl std::fmt::Debug for SecureStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureStore").finish_non_exhaustive()
    }
}
