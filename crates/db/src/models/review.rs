//! Video review model and DTOs.

use reviewniverse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `video_reviews`.
///
/// `user_nickname`, `user_profile_image` and `video_title` are snapshots taken
/// when the review was written.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VideoReview {
    pub id: DbId,
    pub video_id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub rating: f64,
    pub like_count: i32,
    pub is_spoiler: bool,
    pub is_expect: bool,
    pub is_private: bool,
    pub is_block: bool,
    pub user_nickname: String,
    pub user_profile_image: Option<String>,
    pub video_title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a review. Built by the handler from the request body
/// plus the author and video snapshots.
#[derive(Debug, Clone)]
pub struct CreateVideoReview {
    pub video_id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub rating: f64,
    pub is_spoiler: bool,
    pub is_expect: bool,
    pub is_private: bool,
    pub user_nickname: String,
    pub user_profile_image: Option<String>,
    pub video_title: String,
}

/// DTO for editing a review. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateVideoReview {
    pub title: Option<String>,
    pub content: Option<String>,
    pub rating: Option<f64>,
    pub is_spoiler: Option<bool>,
    pub is_expect: Option<bool>,
    pub is_private: Option<bool>,
}
