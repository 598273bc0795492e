//! Handlers for `/videos/{id}/ratings`.

use axum::extract::State;
use reviewniverse_core::codes::Code;
use reviewniverse_core::error::CoreError;
use reviewniverse_core::rating::validate_rating;
use reviewniverse_core::types::DbId;
use reviewniverse_db::repositories::RatingRepo;
use serde::{Deserialize, Serialize};

use super::videos::find_visible;
use crate::error::AppResult;
use crate::extract::{Json, Path};
use crate::middleware::auth::AuthUser;
use crate::response::{ApiResponse, NoContent};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub rating: f64,
}

/// The caller's rating next to the video average.
#[derive(Debug, Serialize)]
pub struct RatingState {
    /// `None` when the caller has not rated the video.
    pub rating: Option<f64>,
    pub video_rating: f64,
}

/// GET /v1/videos/{id}/ratings
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<DbId>,
) -> AppResult<ApiResponse<RatingState>> {
    let video = find_visible(&state, video_id).await?;
    let rating = RatingRepo::find(&state.pool, video_id, auth.user.id)
        .await?
        .map(|r| r.rating);

    Ok(ApiResponse::ok(
        Code::RatingReadSucc,
        RatingState {
            rating,
            video_rating: video.rating,
        },
    ))
}

/// PUT /v1/videos/{id}/ratings
///
/// Create or replace the caller's rating and return the new average.
pub async fn upsert(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<DbId>,
    Json(input): Json<RatingRequest>,
) -> AppResult<ApiResponse<RatingState>> {
    validate_rating(input.rating)?;

    let (rating, average) = RatingRepo::upsert(&state.pool, video_id, auth.user.id, input.rating)
        .await?
        .ok_or(CoreError::NotFound(Code::VideoNotFound))?;

    tracing::info!(user_id = auth.user.id, video_id, rating = rating.rating, "Rating saved");
    Ok(ApiResponse::ok(
        Code::RatingUpdateSucc,
        RatingState {
            rating: Some(rating.rating),
            video_rating: average,
        },
    ))
}

/// DELETE /v1/videos/{id}/ratings
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<DbId>,
) -> AppResult<NoContent> {
    if !RatingRepo::delete(&state.pool, video_id, auth.user.id).await? {
        return Err(CoreError::NotFound(Code::RatingNotFound).into());
    }
    tracing::info!(user_id = auth.user.id, video_id, "Rating removed");
    Ok(NoContent::new(Code::RatingDeleteSucc))
}
