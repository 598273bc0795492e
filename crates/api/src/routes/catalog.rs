//! Route definitions for the public catalog reads.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// ```text
/// GET /genres        -> list_genres
/// GET /actors/{id}   -> get_actor
/// GET /staff/{id}    -> get_staff
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/genres", get(catalog::list_genres))
        .route("/actors/{id}", get(catalog::get_actor))
        .route("/staff/{id}", get(catalog::get_staff))
}
