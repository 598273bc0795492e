use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::ObjectStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: reviewniverse_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Object storage for uploaded images.
    pub storage: Arc<dyn ObjectStorage>,
}

impl AppState {
    /// Base URL stored image keys are rendered against.
    pub fn image_base_url(&self) -> &str {
        &self.config.storage.public_base_url
    }
}
