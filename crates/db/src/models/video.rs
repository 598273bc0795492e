//! Video entity model, related rows and DTOs.

use reviewniverse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::actor::VideoActor;
use super::genre::Genre;
use super::staff::VideoStaff;

/// A row from the `videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: DbId,
    pub video_type: String,
    pub title: String,
    pub synopsis: Option<String>,
    pub release: Option<String>,
    pub runtime: Option<String>,
    pub notice_age: Option<String>,
    /// Average star rating, one decimal place. `0` when unrated.
    pub rating: f64,
    pub like_count: i32,
    pub view_count: i32,
    pub review_count: i32,
    pub platform_code: Option<String>,
    pub platform_id: Option<String>,
    pub is_confirm: bool,
    pub is_delete: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Where a video can be watched.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VideoWatch {
    pub id: DbId,
    pub video_id: DbId,
    pub watch_type: String,
    pub url: String,
}

/// A thumbnail or poster image. `url` is an object key or absolute URL.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VideoThumbnail {
    pub id: DbId,
    pub video_id: DbId,
    pub thumbnail_type: String,
    pub url: String,
    pub extension: Option<String>,
    pub size: Option<i64>,
}

/// A video with every related collection loaded.
#[derive(Debug, Clone, Serialize)]
pub struct VideoDetail {
    #[serde(flatten)]
    pub video: Video,
    pub genres: Vec<Genre>,
    pub actors: Vec<VideoActor>,
    pub staff: Vec<VideoStaff>,
    pub watches: Vec<VideoWatch>,
    pub thumbnails: Vec<VideoThumbnail>,
}

/// A search result: the video row with its thumbnails.
#[derive(Debug, Clone, Serialize)]
pub struct VideoSummary {
    #[serde(flatten)]
    pub video: Video,
    pub thumbnails: Vec<VideoThumbnail>,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Actor credit supplied when creating or updating a video.
#[derive(Debug, Clone, Deserialize)]
pub struct ActorCredit {
    pub actor_id: DbId,
    pub role: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

/// Staff credit supplied when creating or updating a video.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffCredit {
    pub staff_id: DbId,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideoWatch {
    pub watch_type: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideoThumbnail {
    pub thumbnail_type: String,
    pub url: String,
    pub extension: Option<String>,
    pub size: Option<i64>,
}

/// DTO for creating a video together with its links.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideo {
    pub video_type: String,
    pub title: String,
    pub synopsis: Option<String>,
    pub release: Option<String>,
    pub runtime: Option<String>,
    pub notice_age: Option<String>,
    pub platform_code: Option<String>,
    pub platform_id: Option<String>,
    #[serde(default)]
    pub is_confirm: bool,
    #[serde(default)]
    pub genre_ids: Vec<DbId>,
    #[serde(default)]
    pub actors: Vec<ActorCredit>,
    #[serde(default)]
    pub staff: Vec<StaffCredit>,
    #[serde(default)]
    pub watches: Vec<CreateVideoWatch>,
    #[serde(default)]
    pub thumbnails: Vec<CreateVideoThumbnail>,
}

/// DTO for updating a video. Scalar fields are applied when `Some`; link
/// collections replace the existing links when `Some`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVideo {
    pub video_type: Option<String>,
    pub title: Option<String>,
    pub synopsis: Option<String>,
    pub release: Option<String>,
    pub runtime: Option<String>,
    pub notice_age: Option<String>,
    pub platform_code: Option<String>,
    pub platform_id: Option<String>,
    pub is_confirm: Option<bool>,
    pub genre_ids: Option<Vec<DbId>>,
    pub actors: Option<Vec<ActorCredit>>,
    pub staff: Option<Vec<StaffCredit>>,
    pub watches: Option<Vec<CreateVideoWatch>>,
}

/// Filters for the video search. `None` fields are not applied.
#[derive(Debug, Default)]
pub struct VideoSearch {
    /// Substring match on title.
    pub keyword: Option<String>,
    pub video_type: Option<String>,
    pub video_id: Option<DbId>,
    pub actor_id: Option<DbId>,
    pub staff_id: Option<DbId>,
    pub genre_id: Option<DbId>,
    pub platform_id: Option<String>,
}
