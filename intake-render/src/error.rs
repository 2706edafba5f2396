use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("field `{key}` has an unexpected shape (expected {expected})")]
    UnexpectedShape { key: String, expected: &'static str },

    #[error("DOCX packaging failed: {0}")]
    Docx(String),

    #[error("unusable report font: {0}")]
    Font(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
