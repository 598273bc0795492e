//! HTTP handlers, one module per resource.
//!
//! Handlers validate input, call repositories, and render the envelope via
//! [`crate::response`]. Stored image keys are turned into URLs here so the
//! repositories only ever see keys.

pub mod admin;
pub mod catalog;
pub mod ratings;
pub mod reviews;
pub mod token;
pub mod users;
pub mod validation;
pub mod videos;

use axum::extract::Multipart;
use reviewniverse_core::codes::Code;
use reviewniverse_core::error::CoreError;
use reviewniverse_core::types::DbId;
use reviewniverse_db::models::public_url;
use reviewniverse_db::models::user::User;
use reviewniverse_db::models::video::VideoDetail;

use crate::error::{AppError, AppResult};
use crate::storage::upload::FilePart;
use crate::storage::ObjectStorage;

/// Reject callers acting on another user's account.
pub(crate) fn ensure_self(user: &User, id: DbId) -> Result<(), CoreError> {
    if user.id != id {
        return Err(CoreError::Unauthorized(Code::UserNotMatch));
    }
    Ok(())
}

/// Prefix every stored image key in a video detail with the public base URL.
pub(crate) fn with_public_urls(mut detail: VideoDetail, base_url: &str) -> VideoDetail {
    for thumbnail in &mut detail.thumbnails {
        thumbnail.url = public_url(base_url, &thumbnail.url);
    }
    for actor in &mut detail.actors {
        actor.picture = actor.picture.as_deref().map(|p| public_url(base_url, p));
    }
    for staff in &mut detail.staff {
        staff.picture = staff.picture.as_deref().map(|p| public_url(base_url, p));
    }
    detail
}

/// Replace stored thumbnail keys with presigned GET URLs. Absolute URLs are
/// left as they are.
pub(crate) async fn with_presigned_thumbnails(
    mut detail: VideoDetail,
    storage: &dyn ObjectStorage,
    expires_in: std::time::Duration,
) -> AppResult<VideoDetail> {
    for thumbnail in &mut detail.thumbnails {
        if !is_absolute_url(&thumbnail.url) {
            thumbnail.url = storage.presigned_get_url(&thumbnail.url, expires_in).await?;
        }
    }
    Ok(detail)
}

pub(crate) fn is_absolute_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Pull the single file field named `field_name` out of a multipart form.
pub(crate) async fn single_file(mut multipart: Multipart, field_name: &str) -> AppResult<FilePart> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some(field_name) {
            return FilePart::read(field).await;
        }
    }
    Err(CoreError::Validation(Code::FileNotFound).into())
}
