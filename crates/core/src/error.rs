use crate::codes::Code;

/// Domain error. Every variant except `Internal` carries the catalog code
/// surfaced to the client; the variant decides the HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Not found: {0}")]
    NotFound(Code),

    #[error("Validation failed: {0}")]
    Validation(Code),

    #[error("Conflict: {0}")]
    Conflict(Code),

    #[error("Unauthorized: {0}")]
    Unauthorized(Code),

    #[error("Forbidden: {0}")]
    Forbidden(Code),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The catalog code reported to the client.
    pub fn code(&self) -> Code {
        match self {
            CoreError::NotFound(code)
            | CoreError::Validation(code)
            | CoreError::Conflict(code)
            | CoreError::Unauthorized(code)
            | CoreError::Forbidden(code) => *code,
            CoreError::Internal(_) => Code::Exception,
        }
    }
}
