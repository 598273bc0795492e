//! Actor entity model and DTOs.

use reviewniverse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `actors` table. `picture` is an object key or absolute URL.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Actor {
    pub id: DbId,
    pub name: String,
    pub picture: Option<String>,
    pub profile: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateActor {
    pub name: String,
    pub picture: Option<String>,
    pub profile: Option<String>,
}

/// An actor as credited on a video.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VideoActor {
    pub id: DbId,
    pub name: String,
    pub picture: Option<String>,
    pub profile: Option<String>,
    /// Character name or credit line.
    pub role: Option<String>,
    pub sort_order: i32,
}
