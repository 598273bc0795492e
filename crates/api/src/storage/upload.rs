//! Multipart file uploads: stage to a temp file, check, push to storage.

use std::path::Path;

use axum::body::Bytes;
use axum::extract::multipart::Field;
use reviewniverse_core::codes::Code;
use reviewniverse_core::error::CoreError;
use reviewniverse_core::object_key::{
    ensure_allowed_extension, ensure_within_size_limit, file_extension, make_object_key, ObjectKind,
};

use super::{ObjectStorage, StorageConfig, StorageError};
use crate::error::{AppError, AppResult};

/// A file read out of a multipart form.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl FilePart {
    /// Drain a multipart field into memory.
    pub async fn read(field: Field<'_>) -> AppResult<Self> {
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        Ok(Self {
            filename,
            content_type,
            data,
        })
    }
}

/// Where an uploaded file ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub extension: String,
    pub size: i64,
}

/// Store an uploaded file under `<kind>/<scope>/<uuid>.<ext>`.
///
/// The file is written to the configured temp directory first. The size
/// check and the upload both work from that staged copy, which is removed
/// whatever the outcome.
pub async fn upload_file(
    storage: &dyn ObjectStorage,
    config: &StorageConfig,
    kind: ObjectKind,
    scope: &str,
    part: FilePart,
) -> AppResult<StoredObject> {
    if part.filename.trim().is_empty() {
        return Err(CoreError::Validation(Code::FileNotFound).into());
    }
    let extension =
        file_extension(&part.filename).ok_or(CoreError::Validation(Code::FileTypeErr))?;
    ensure_allowed_extension(&extension, &config.allowed_extensions)?;

    // 1. Stage to disk.
    tokio::fs::create_dir_all(&config.upload_temp_dir)
        .await
        .map_err(StorageError::from)?;
    let temp_path = config
        .upload_temp_dir
        .join(format!("{}.upload", uuid::Uuid::new_v4()));
    tokio::fs::write(&temp_path, &part.data)
        .await
        .map_err(StorageError::from)?;

    let key = make_object_key(kind, scope, &part.filename);
    let result = match key {
        Ok(key) => store_staged(storage, config, &temp_path, key, &part).await,
        Err(e) => Err(e.into()),
    };

    // 2. Always clean up the staged copy.
    if let Err(e) = tokio::fs::remove_file(&temp_path).await {
        tracing::warn!(path = %temp_path.display(), error = %e, "Failed to remove temp upload");
    }

    result.map(|(key, size)| StoredObject {
        key,
        extension,
        size,
    })
}

async fn store_staged(
    storage: &dyn ObjectStorage,
    config: &StorageConfig,
    temp_path: &Path,
    key: String,
    part: &FilePart,
) -> AppResult<(String, i64)> {
    let size = tokio::fs::metadata(temp_path)
        .await
        .map_err(StorageError::from)?
        .len();
    ensure_within_size_limit(
        usize::try_from(size).unwrap_or(usize::MAX),
        config.max_upload_bytes,
    )?;

    let body = tokio::fs::read(temp_path).await.map_err(StorageError::from)?;
    storage
        .put_object(&key, body, part.content_type.as_deref())
        .await?;

    tracing::info!(key = %key, size, "Stored upload");
    Ok((key, size as i64))
}

/// Best-effort removal of a replaced object. Absolute URLs are left alone.
pub async fn delete_replaced(storage: &dyn ObjectStorage, old: Option<&str>) {
    let Some(key) = old.filter(|k| !k.starts_with("http://") && !k.starts_with("https://")) else {
        return;
    };
    if let Err(e) = storage.delete_object(key).await {
        tracing::warn!(key, error = %e, "Failed to delete replaced object");
    }
}
