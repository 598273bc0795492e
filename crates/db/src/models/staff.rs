//! Staff entity model and DTOs.

use reviewniverse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `staff` table (directors, writers, ...).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Staff {
    pub id: DbId,
    pub name: String,
    pub picture: Option<String>,
    pub profile: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateStaff {
    pub name: String,
    pub picture: Option<String>,
    pub profile: Option<String>,
}

/// A staff member as credited on a video.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VideoStaff {
    pub id: DbId,
    pub name: String,
    pub picture: Option<String>,
    pub profile: Option<String>,
    pub role: Option<String>,
}
