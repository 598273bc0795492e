//! Route definitions for the public `/videos` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{ratings, reviews, videos};
use crate::state::AppState;

/// Routes mounted at `/videos`.
///
/// ```text
/// GET    /                                -> search
/// GET    /{id}                            -> get_detail
/// POST   /{id}/view                       -> record_view (optional auth)
/// GET    /{id}/like                       -> get_like (auth)
/// POST   /{id}/like                       -> toggle_like (auth)
/// GET    /{id}/reviews                    -> reviews::list
/// POST   /{id}/reviews                    -> reviews::create (auth)
/// PUT    /{id}/reviews/{review_id}        -> reviews::update (author)
/// DELETE /{id}/reviews/{review_id}        -> reviews::delete (author)
/// GET    /{id}/ratings                    -> ratings::get (auth)
/// PUT    /{id}/ratings                    -> ratings::upsert (auth)
/// DELETE /{id}/ratings                    -> ratings::delete (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(videos::search))
        .route("/{id}", get(videos::get_detail))
        .route("/{id}/view", post(videos::record_view))
        .route("/{id}/like", get(videos::get_like).post(videos::toggle_like))
        .route("/{id}/reviews", get(reviews::list).post(reviews::create))
        .route(
            "/{id}/reviews/{review_id}",
            put(reviews::update).delete(reviews::delete),
        )
        .route(
            "/{id}/ratings",
            get(ratings::get).put(ratings::upsert).delete(ratings::delete),
        )
}
