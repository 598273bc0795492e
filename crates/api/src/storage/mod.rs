//! Object storage for uploaded images.
//!
//! Handlers talk to an [`ObjectStorage`] trait object held in
//! [`AppState`](crate::state::AppState). Production uses [`s3::S3Storage`];
//! tests use [`MemoryStorage`].

pub mod s3;
pub mod upload;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{env_list, env_parse};

/// Errors raised by an object storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Object storage request failed: {0}")]
    Request(String),

    #[error("Presigning failed: {0}")]
    Presign(String),

    #[error("Temp file error: {0}")]
    Io(#[from] std::io::Error),
}

/// A bucket-like key/value store for uploaded files.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `body` under `key`, replacing any existing object.
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), StorageError>;

    /// Remove the object at `key`. Missing objects are not an error.
    async fn delete_object(&self, key: &str) -> Result<(), StorageError>;

    /// A time-limited GET URL for the object at `key`.
    async fn presigned_get_url(&self, key: &str, expires_in: Duration)
        -> Result<String, StorageError>;
}

/// Object storage and upload configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    /// Static credentials. When unset the default AWS credential chain is used.
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Custom endpoint for S3-compatible stores (MinIO, LocalStack).
    pub endpoint: Option<String>,
    /// Prefix joined onto stored object keys when rendering public URLs.
    pub public_base_url: String,
    /// Directory uploads are staged in before they reach the bucket.
    pub upload_temp_dir: PathBuf,
    /// Lowercase file extensions accepted for uploads.
    pub allowed_extensions: Vec<String>,
    /// Maximum upload size in bytes.
    pub max_upload_bytes: usize,
    pub presigned_url_expiry_secs: u64,
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var                      | Default                      |
    /// |------------------------------|------------------------------|
    /// | `AWS_S3_BUCKET`              | `reviewniverse`              |
    /// | `AWS_REGION`                 | `ap-northeast-2`             |
    /// | `AWS_ACCESS_KEY_ID`          | --                           |
    /// | `AWS_SECRET_ACCESS_KEY`      | --                           |
    /// | `AWS_S3_ENDPOINT`            | --                           |
    /// | `THUMBNAIL_BASE_URL`         | `https://<bucket>.s3.<region>.amazonaws.com` |
    /// | `UPLOAD_TEMP_DIR`            | `<system temp>/reviewniverse-uploads` |
    /// | `FILE_UPLOAD_TYPE_ALLOWED`   | `jpg,jpeg,png,gif,webp`      |
    /// | `FILE_UPLOAD_SIZE_LIMIT`     | `5242880`                    |
    /// | `PRESIGNED_URL_EXPIRY_SECS`  | `3600`                       |
    pub fn from_env() -> Self {
        let bucket = std::env::var("AWS_S3_BUCKET").unwrap_or_else(|_| "reviewniverse".into());
        let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "ap-northeast-2".into());

        let public_base_url = std::env::var("THUMBNAIL_BASE_URL")
            .unwrap_or_else(|_| format!("https://{bucket}.s3.{region}.amazonaws.com"));

        let upload_temp_dir = std::env::var("UPLOAD_TEMP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir().join("reviewniverse-uploads"));

        let allowed_extensions = env_list("FILE_UPLOAD_TYPE_ALLOWED", "jpg,jpeg,png,gif,webp")
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .collect();

        Self {
            bucket,
            region,
            access_key_id: std::env::var("AWS_ACCESS_KEY_ID").ok(),
            secret_access_key: std::env::var("AWS_SECRET_ACCESS_KEY").ok(),
            endpoint: std::env::var("AWS_S3_ENDPOINT").ok(),
            public_base_url,
            upload_temp_dir,
            allowed_extensions,
            max_upload_bytes: env_parse("FILE_UPLOAD_SIZE_LIMIT", 5 * 1024 * 1024),
            presigned_url_expiry_secs: env_parse("PRESIGNED_URL_EXPIRY_SECS", 3600),
        }
    }

    pub fn presigned_url_expiry(&self) -> Duration {
        Duration::from_secs(self.presigned_url_expiry_secs)
    }
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// Process-local storage used by tests and local runs without a bucket.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A poisoned map is still usable: every operation is a single insert or remove.
        self.objects.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        _content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        self.lock().insert(key.to_string(), body);
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        self.lock().remove(key);
        Ok(())
    }

    async fn presigned_get_url(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        Ok(format!("memory://{key}?expires_in={}", expires_in.as_secs()))
    }
}
