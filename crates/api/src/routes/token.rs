//! Route definitions for the `/token` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::token;
use crate::state::AppState;

/// ```text
/// GET /token  -> verify (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/token", get(token::verify))
}
