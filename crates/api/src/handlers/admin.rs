//! Admin handlers: catalog management and uploads.
//!
//! Every handler takes [`RequireAdmin`], so non-admin callers get 403
//! `USER_NOT_ADMIN` before any work is done.

use axum::extract::{Multipart, State};
use reviewniverse_core::codes::Code;
use reviewniverse_core::error::CoreError;
use reviewniverse_core::object_key::ObjectKind;
use reviewniverse_core::search::validate_video_type;
use reviewniverse_core::types::DbId;
use reviewniverse_db::models::actor::{Actor, CreateActor};
use reviewniverse_db::models::genre::{CreateGenre, Genre};
use reviewniverse_db::models::public_url;
use reviewniverse_db::models::staff::{CreateStaff, Staff};
use reviewniverse_db::models::video::{
    CreateVideo, CreateVideoThumbnail, UpdateVideo, Video, VideoDetail, VideoThumbnail,
};
use reviewniverse_db::repositories::{ActorRepo, GenreRepo, StaffRepo, VideoRepo};

use super::{single_file, with_presigned_thumbnails};
use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{ApiResponse, NoContent};
use crate::state::AppState;
use crate::storage::upload::{delete_replaced, upload_file, FilePart};

/// Thumbnail type recorded when the form does not name one.
const DEFAULT_THUMBNAIL_TYPE: &str = "poster";

// ---------------------------------------------------------------------------
// Videos
// ---------------------------------------------------------------------------

/// POST /v1/admin/videos
///
/// Create a video together with its genre, actor, staff, watch and
/// thumbnail links.
pub async fn create_video(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateVideo>,
) -> AppResult<ApiResponse<VideoDetail>> {
    if input.title.trim().is_empty() {
        return Err(CoreError::Validation(Code::InvalidRequest).into());
    }
    validate_video_type(&input.video_type)?;

    let video = VideoRepo::create(&state.pool, &input).await?;
    tracing::info!(user_id = admin.user.id, video_id = video.id, "Video created");

    let detail = admin_detail(&state, video).await?;
    Ok(ApiResponse::created(Code::VideoCreateSucc, detail))
}

/// GET /v1/admin/videos/{id}
///
/// Detail including unconfirmed and deleted videos. Thumbnail keys are
/// presigned.
pub async fn get_video(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<VideoDetail>> {
    let video = find_video(&state, id).await?;
    let detail = admin_detail(&state, video).await?;
    Ok(ApiResponse::ok(Code::VideoReadSucc, detail))
}

/// PUT /v1/admin/videos/{id}
pub async fn update_video(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVideo>,
) -> AppResult<ApiResponse<VideoDetail>> {
    if let Some(video_type) = &input.video_type {
        validate_video_type(video_type)?;
    }
    if input.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(CoreError::Validation(Code::InvalidRequest).into());
    }

    let video = VideoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound(Code::VideoNotFound))?;
    tracing::info!(user_id = admin.user.id, video_id = id, "Video updated");

    let detail = admin_detail(&state, video).await?;
    Ok(ApiResponse::ok(Code::VideoUpdateSucc, detail))
}

/// DELETE /v1/admin/videos/{id}
///
/// Soft delete. The row stays for reviews and logs but leaves public reads.
pub async fn delete_video(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<NoContent> {
    if !VideoRepo::soft_delete(&state.pool, id).await? {
        return Err(CoreError::NotFound(Code::VideoNotFound).into());
    }
    tracing::info!(user_id = admin.user.id, video_id = id, "Video deleted");
    Ok(NoContent::new(Code::VideoDeleteSucc))
}

/// POST /v1/admin/videos/{id}/thumbnails
///
/// Multipart form: `file` (required) and `thumbnail_type` (default `poster`).
pub async fn upload_thumbnail(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<ApiResponse<VideoThumbnail>> {
    find_video(&state, id).await?;

    // 1. Read the form.
    let mut file: Option<FilePart> = None;
    let mut thumbnail_type = DEFAULT_THUMBNAIL_TYPE.to_string();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => file = Some(FilePart::read(field).await?),
            "thumbnail_type" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !value.trim().is_empty() {
                    thumbnail_type = value.trim().to_string();
                }
            }
            _ => {}
        }
    }
    let file = file.ok_or(CoreError::Validation(Code::FileNotFound))?;

    // 2. Upload and record.
    let stored = upload_file(
        state.storage.as_ref(),
        &state.config.storage,
        ObjectKind::Video,
        &id.to_string(),
        file,
    )
    .await?;
    let mut thumbnail = VideoRepo::add_thumbnail(
        &state.pool,
        id,
        &CreateVideoThumbnail {
            thumbnail_type,
            url: stored.key,
            extension: Some(stored.extension),
            size: Some(stored.size),
        },
    )
    .await?;

    tracing::info!(
        user_id = admin.user.id,
        video_id = id,
        thumbnail_id = thumbnail.id,
        "Thumbnail uploaded"
    );
    thumbnail.url = public_url(state.image_base_url(), &thumbnail.url);
    Ok(ApiResponse::created(Code::ThumbnailCreateSucc, thumbnail))
}

// ---------------------------------------------------------------------------
// Genres, actors, staff
// ---------------------------------------------------------------------------

/// POST /v1/admin/genres
///
/// A duplicate name is rejected by `uq_genres_name` and surfaces as 409
/// `GENRE_ALREADY_EXIST`.
pub async fn create_genre(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateGenre>,
) -> AppResult<ApiResponse<Genre>> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation(Code::InvalidRequest).into());
    }
    let genre = GenreRepo::create(&state.pool, &CreateGenre { name: name.to_string() }).await?;
    Ok(ApiResponse::created(Code::GenreCreateSucc, genre))
}

/// POST /v1/admin/actors
pub async fn create_actor(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateActor>,
) -> AppResult<ApiResponse<Actor>> {
    if input.name.trim().is_empty() {
        return Err(CoreError::Validation(Code::InvalidRequest).into());
    }
    let actor = ActorRepo::create(&state.pool, &input).await?;
    Ok(ApiResponse::created(Code::ActorCreateSucc, actor))
}

/// POST /v1/admin/actors/{id}/picture
///
/// Multipart field `file`. The previous picture is removed best-effort.
pub async fn upload_actor_picture(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<ApiResponse<Actor>> {
    let actor = ActorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound(Code::ActorNotFound))?;

    let key = store_picture(&state, ObjectKind::Actor, id, multipart).await?;
    let mut updated = ActorRepo::update_picture(&state.pool, id, &key)
        .await?
        .ok_or(CoreError::NotFound(Code::ActorNotFound))?;
    delete_replaced(state.storage.as_ref(), actor.picture.as_deref()).await;

    updated.picture = updated.picture.map(|p| public_url(state.image_base_url(), &p));
    Ok(ApiResponse::ok(Code::ActorUpdateSucc, updated))
}

/// POST /v1/admin/staff
pub async fn create_staff(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateStaff>,
) -> AppResult<ApiResponse<Staff>> {
    if input.name.trim().is_empty() {
        return Err(CoreError::Validation(Code::InvalidRequest).into());
    }
    let staff = StaffRepo::create(&state.pool, &input).await?;
    Ok(ApiResponse::created(Code::StaffCreateSucc, staff))
}

/// POST /v1/admin/staff/{id}/picture
pub async fn upload_staff_picture(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<ApiResponse<Staff>> {
    let staff = StaffRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound(Code::StaffNotFound))?;

    let key = store_picture(&state, ObjectKind::Staff, id, multipart).await?;
    let mut updated = StaffRepo::update_picture(&state.pool, id, &key)
        .await?
        .ok_or(CoreError::NotFound(Code::StaffNotFound))?;
    delete_replaced(state.storage.as_ref(), staff.picture.as_deref()).await;

    updated.picture = updated.picture.map(|p| public_url(state.image_base_url(), &p));
    Ok(ApiResponse::ok(Code::StaffUpdateSucc, updated))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_video(state: &AppState, id: DbId) -> AppResult<Video> {
    VideoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::NotFound(Code::VideoNotFound).into())
}

async fn admin_detail(state: &AppState, video: Video) -> AppResult<VideoDetail> {
    let detail = VideoRepo::load_detail(&state.pool, video).await?;
    with_presigned_thumbnails(
        detail,
        state.storage.as_ref(),
        state.config.storage.presigned_url_expiry(),
    )
    .await
}

async fn store_picture(
    state: &AppState,
    kind: ObjectKind,
    id: DbId,
    multipart: Multipart,
) -> AppResult<String> {
    let part = single_file(multipart, "file").await?;
    let stored = upload_file(
        state.storage.as_ref(),
        &state.config.storage,
        kind,
        &id.to_string(),
        part,
    )
    .await?;
    Ok(stored.key)
}
