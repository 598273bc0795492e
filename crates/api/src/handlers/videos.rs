//! Handlers for the public `/videos` resource: search, detail, views and likes.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use reviewniverse_core::codes::Code;
use reviewniverse_core::error::CoreError;
use reviewniverse_core::search::{Paged, MIN_VIDEO_PAGE_SIZE};
use reviewniverse_core::types::DbId;
use reviewniverse_db::models::like::LikeToggle;
use reviewniverse_db::models::public_url;
use reviewniverse_db::models::video::{Video, VideoDetail, VideoSummary};
use reviewniverse_db::repositories::{LikeRepo, VideoRepo, ViewLogRepo};
use serde::Serialize;

use super::with_public_urls;
use crate::error::AppResult;
use crate::extract::{Path, Query};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::request_log::ClientInfo;
use crate::query::VideoSearchParams;
use crate::response::{ApiResponse, NoContent};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ViewCount {
    pub view_count: i32,
}

#[derive(Debug, Serialize)]
pub struct LikeState {
    pub is_like: bool,
}

/// GET /v1/videos
///
/// Search confirmed, non-deleted videos. Each result carries its
/// thumbnails. An empty page answers 204 `VIDEO_NOT_FOUND`.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<VideoSearchParams>,
) -> AppResult<Response> {
    let (search, page, order) = params.to_search(MIN_VIDEO_PAGE_SIZE)?;

    let (total, videos) = VideoRepo::search(&state.pool, &search, page, order).await?;
    if videos.is_empty() {
        return Ok(NoContent::new(Code::VideoNotFound).into_response());
    }

    let ids: Vec<DbId> = videos.iter().map(|v| v.id).collect();
    let mut thumbnails = VideoRepo::list_thumbnails_for(&state.pool, &ids).await?;
    let base_url = state.image_base_url();
    for thumbnail in &mut thumbnails {
        thumbnail.url = public_url(base_url, &thumbnail.url);
    }

    let summaries = videos
        .into_iter()
        .map(|video| {
            let own = thumbnails
                .iter()
                .filter(|t| t.video_id == video.id)
                .cloned()
                .collect();
            VideoSummary {
                video,
                thumbnails: own,
            }
        })
        .collect();
    let paged: Paged<VideoSummary> = Paged::new(total, page, summaries);
    Ok(ApiResponse::ok(Code::VideoSearchSucc, paged).into_response())
}

/// GET /v1/videos/{id}
pub async fn get_detail(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<VideoDetail>> {
    let video = find_visible(&state, id).await?;
    let detail = VideoRepo::load_detail(&state.pool, video).await?;
    Ok(ApiResponse::ok(
        Code::VideoReadSucc,
        with_public_urls(detail, state.image_base_url()),
    ))
}

/// POST /v1/videos/{id}/view
///
/// Log a view at most once per client IP per day. Authentication is
/// optional; a logged-in viewer is recorded on the log row.
pub async fn record_view(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    client: ClientInfo,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<ViewCount>> {
    let view_count = ViewLogRepo::record_view(
        &state.pool,
        id,
        viewer.map(|u| u.id),
        client.ip.as_deref(),
    )
    .await?
    .ok_or(CoreError::NotFound(Code::VideoNotFound))?;

    Ok(ApiResponse::ok(
        Code::VideoViewInsertSucc,
        ViewCount { view_count },
    ))
}

/// GET /v1/videos/{id}/like
pub async fn get_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<LikeState>> {
    find_visible(&state, id).await?;
    let is_like = LikeRepo::find(&state.pool, id, auth.user.id)
        .await?
        .is_some_and(|like| like.is_like);
    Ok(ApiResponse::ok(Code::VideoLikeReadSucc, LikeState { is_like }))
}

/// POST /v1/videos/{id}/like
///
/// Toggle the caller's like and return the new state with the video's count.
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<LikeToggle>> {
    let toggle = LikeRepo::toggle(&state.pool, id, auth.user.id)
        .await?
        .ok_or(CoreError::NotFound(Code::VideoNotFound))?;

    tracing::info!(
        user_id = auth.user.id,
        video_id = id,
        is_like = toggle.is_like,
        "Like toggled"
    );
    Ok(ApiResponse::ok(Code::VideoLikeToggleSucc, toggle))
}

/// Load a video that is confirmed and not deleted, or 404 `VIDEO_NOT_FOUND`.
pub(crate) async fn find_visible(state: &AppState, id: DbId) -> AppResult<Video> {
    VideoRepo::find_visible(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::NotFound(Code::VideoNotFound).into())
}
