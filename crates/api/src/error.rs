use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reviewniverse_core::codes::Code;
use reviewniverse_core::error::CoreError;

use crate::response::envelope_response;
use crate::storage::StorageError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the standard envelope with the
/// catalog code in both the body and the `code` header.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `reviewniverse_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An object storage failure.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A malformed request the validators never saw (bad multipart, bad JSON).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// HTTP status and catalog code reported for this error.
    pub fn status_and_code(&self) -> (StatusCode, Code) {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound(code) => (StatusCode::NOT_FOUND, *code),
                CoreError::Validation(code) => (StatusCode::BAD_REQUEST, *code),
                CoreError::Conflict(code) => (StatusCode::CONFLICT, *code),
                CoreError::Unauthorized(code) => (StatusCode::UNAUTHORIZED, *code),
                CoreError::Forbidden(code) => (StatusCode::FORBIDDEN, *code),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (StatusCode::INTERNAL_SERVER_ERROR, Code::Exception)
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Storage errors ---
            AppError::Storage(err) => {
                tracing::error!(error = %err, "Object storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, Code::Exception)
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                tracing::debug!(error = %msg, "Rejected malformed request");
                (StatusCode::BAD_REQUEST, Code::InvalidRequest)
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, Code::Exception)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        envelope_response::<()>(status, code.as_str(), code.message(), None)
    }
}

/// Classify a sqlx error into an HTTP status and catalog code.
///
/// - Unique constraint violations (constraint name starting with `uq_`) map
///   to 409, with the code picked from the constraint.
/// - Foreign key violations (a referenced row does not exist) map to 400
///   `INVALID_REQUEST`.
/// - Everything else maps to 500 `EXCEPTION`.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, Code) {
    if let sqlx::Error::Database(db_err) = err {
        // PostgreSQL unique constraint violation: error code 23505
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return (StatusCode::CONFLICT, conflict_code(constraint));
            }
        }
        // PostgreSQL foreign key violation: error code 23503
        if db_err.code().as_deref() == Some("23503") {
            tracing::debug!(constraint = db_err.constraint().unwrap_or("unknown"), "Foreign key violation");
            return (StatusCode::BAD_REQUEST, Code::InvalidRequest);
        }
    }
    tracing::error!(error = %err, "Database error");
    (StatusCode::INTERNAL_SERVER_ERROR, Code::Exception)
}

/// Catalog code for a violated unique constraint.
fn conflict_code(constraint: &str) -> Code {
    match constraint {
        "uq_users_email" => Code::EmailAlreadyExist,
        "uq_users_nickname" => Code::NicknameAlreadyExist,
        "uq_genres_name" => Code::GenreAlreadyExist,
        _ => Code::InvalidRequest,
    }
}
