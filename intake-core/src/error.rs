//! Facade error types.

use thiserror::Error;

/// Result type for session operations.
pub type IntakeResult<T> = Result<T, IntakeError>;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Submission refused; carries the formatted error summary.
    #[error("form is not ready to submit\n{0}")]
    NotSubmittable(String),

    #[error("storage error: {0}")]
    Storage(#[from] intake_storage::StorageError),

    #[error("crypto error: {0}")]
    Crypto(#[from] intake_crypto::CryptoError),

    #[error("render error: {0}")]
    Render(#[from] intake_render::RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
