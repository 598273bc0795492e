//! Liveness and schema status at `GET /health`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database cannot be queried.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Newest applied migration. A deploy that skipped migrations shows up
    /// here as an older version than the binary expects.
    pub schema_version: Option<i64>,
    /// Bucket uploads are written to.
    pub storage_bucket: String,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let schema_version = match reviewniverse_db::schema_version(&state.pool).await {
        Ok(version) => Some(version),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not read schema version");
            None
        }
    };
    let db_healthy = schema_version.is_some();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        schema_version: schema_version.flatten(),
        storage_bucket: state.config.storage.bucket.clone(),
    })
}

/// Mounted at the root, outside `/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
