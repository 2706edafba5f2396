//! Secure persistence of intake drafts.
//!
//! Sensitive fields are encrypted before anything touches the disk, drafts
//! are written with temp-file-then-rename so a crash never leaves a torn
//! file, and loading is fail-soft: a missing or unreadable draft yields an
//! empty data set instead of an error.

mod delete;
mod error;
mod fs;
mod store;

pub use delete::{secure_delete, OVERWRITE_PASSES};
pub use error::{StorageError, StorageResult};
pub use fs::write_atomic;
pub use store::{encrypted_flag_key, hash_form_data, SecureStore, SENSITIVE_FIELDS};
