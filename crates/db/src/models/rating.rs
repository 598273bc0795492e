//! Star rating model.

use reviewniverse_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One user's rating of one video.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VideoRating {
    pub id: DbId,
    pub video_id: DbId,
    pub user_id: DbId,
    pub rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
