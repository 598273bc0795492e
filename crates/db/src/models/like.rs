use reviewniverse_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A user's like state for a video. Toggling flips `is_like`; the row is
/// never deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VideoLike {
    pub id: DbId,
    pub video_id: DbId,
    pub user_id: DbId,
    pub video_title: String,
    pub is_like: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of a like toggle.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LikeToggle {
    pub is_like: bool,
    pub like_count: i32,
}
