//! Handlers for `/videos/{id}/reviews`.

use axum::extract::State;
use reviewniverse_core::codes::Code;
use reviewniverse_core::error::CoreError;
use reviewniverse_core::rating::validate_rating;
use reviewniverse_core::search::Paged;
use reviewniverse_core::types::DbId;
use reviewniverse_db::models::public_url;
use reviewniverse_db::models::review::{CreateVideoReview, UpdateVideoReview, VideoReview};
use reviewniverse_db::repositories::ReviewRepo;
use serde::Deserialize;

use super::videos::find_visible;
use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::{ApiResponse, NoContent};
use crate::state::AppState;

/// Request body for `POST /videos/{id}/reviews`.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub title: String,
    pub content: String,
    /// Optional star rating attached to the review. `0` when absent.
    pub rating: Option<f64>,
    #[serde(default)]
    pub is_spoiler: bool,
    #[serde(default)]
    pub is_expect: bool,
    #[serde(default)]
    pub is_private: bool,
}

/// GET /v1/videos/{id}/reviews
///
/// Public reviews, newest first. Private and blocked reviews are excluded.
pub async fn list(
    State(state): State<AppState>,
    Path(video_id): Path<DbId>,
    Query(params): Query<PageParams>,
) -> AppResult<ApiResponse<Paged<VideoReview>>> {
    let page = params.to_page(1)?;
    find_visible(&state, video_id).await?;

    let (total, reviews) = ReviewRepo::list_public(&state.pool, video_id, page).await?;
    let base_url = state.image_base_url();
    let paged = Paged::new(total, page, reviews).map(|r| with_author_image_url(r, base_url));
    Ok(ApiResponse::ok(Code::ReviewReadListSucc, paged))
}

/// POST /v1/videos/{id}/reviews
///
/// The author's nickname and image and the video title are copied onto the
/// review row.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<DbId>,
    Json(input): Json<CreateReviewRequest>,
) -> AppResult<ApiResponse<VideoReview>> {
    // 1. Validate.
    if let Some(rating) = input.rating {
        validate_rating(rating)?;
    }
    let video = find_visible(&state, video_id).await?;

    // 2. Insert with snapshots.
    let user = &auth.user;
    let review = ReviewRepo::create(
        &state.pool,
        &CreateVideoReview {
            video_id,
            user_id: user.id,
            title: input.title,
            content: input.content,
            rating: input.rating.unwrap_or(0.0),
            is_spoiler: input.is_spoiler,
            is_expect: input.is_expect,
            is_private: input.is_private,
            user_nickname: user.nickname.clone(),
            user_profile_image: user.profile_image.clone(),
            video_title: video.title,
        },
    )
    .await?
    .ok_or(CoreError::NotFound(Code::VideoNotFound))?;

    tracing::info!(user_id = user.id, video_id, review_id = review.id, "Review created");
    Ok(ApiResponse::created(
        Code::ReviewCreateSucc,
        with_author_image_url(review, state.image_base_url()),
    ))
}

/// PUT /v1/videos/{id}/reviews/{review_id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((video_id, review_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateVideoReview>,
) -> AppResult<NoContent> {
    if let Some(rating) = input.rating {
        validate_rating(rating)?;
    }
    authorize(&state, &auth, video_id, review_id).await?;

    ReviewRepo::update(&state.pool, review_id, video_id, &input)
        .await?
        .ok_or(CoreError::NotFound(Code::ReviewNotFound))?;

    tracing::info!(user_id = auth.user.id, video_id, review_id, "Review updated");
    Ok(NoContent::new(Code::ReviewUpdateSucc))
}

/// DELETE /v1/videos/{id}/reviews/{review_id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((video_id, review_id)): Path<(DbId, DbId)>,
) -> AppResult<NoContent> {
    authorize(&state, &auth, video_id, review_id).await?;

    if !ReviewRepo::delete(&state.pool, review_id, video_id, auth.user.id).await? {
        return Err(CoreError::NotFound(Code::ReviewNotFound).into());
    }

    tracing::info!(user_id = auth.user.id, video_id, review_id, "Review deleted");
    Ok(NoContent::new(Code::ReviewDeleteSucc))
}

/// The review exists, belongs to the video and was written by the caller.
async fn authorize(
    state: &AppState,
    auth: &AuthUser,
    video_id: DbId,
    review_id: DbId,
) -> AppResult<VideoReview> {
    let review = ReviewRepo::find_by_id(&state.pool, review_id)
        .await?
        .ok_or(CoreError::NotFound(Code::ReviewNotFound))?;
    if review.video_id != video_id {
        return Err(CoreError::Validation(Code::ReviewNotMatch).into());
    }
    if review.user_id != auth.user.id {
        return Err(CoreError::Unauthorized(Code::UserNotMatch).into());
    }
    Ok(review)
}

fn with_author_image_url(mut review: VideoReview, base_url: &str) -> VideoReview {
    review.user_profile_image = review
        .user_profile_image
        .as_deref()
        .map(|key| public_url(base_url, key));
    review
}
