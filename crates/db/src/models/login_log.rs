//! Login attempt log model.

use reviewniverse_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One row per login attempt, successful or not.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserLoginLog {
    pub id: DbId,
    /// HTTP status returned to the client.
    pub status: i32,
    pub code: String,
    pub message: String,
    pub path: String,
    /// The email the client tried to log in with.
    pub input_id: Option<String>,
    pub client_ip: Option<String>,
    pub client_host: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for recording a login attempt.
#[derive(Debug, Clone)]
pub struct CreateUserLoginLog {
    pub status: i32,
    pub code: String,
    pub message: String,
    pub path: String,
    pub input_id: Option<String>,
    pub client_ip: Option<String>,
    pub client_host: Option<String>,
    pub user_agent: Option<String>,
}
