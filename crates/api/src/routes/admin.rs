//! Route definitions for `/admin`. Every handler requires `is_admin`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST   /videos                   -> create_video
/// GET    /videos/{id}              -> get_video
/// PUT    /videos/{id}              -> update_video
/// DELETE /videos/{id}              -> delete_video
/// POST   /videos/{id}/thumbnails   -> upload_thumbnail
/// POST   /genres                   -> create_genre
/// POST   /actors                   -> create_actor
/// POST   /actors/{id}/picture      -> upload_actor_picture
/// POST   /staff                    -> create_staff
/// POST   /staff/{id}/picture       -> upload_staff_picture
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/videos", post(admin::create_video))
        .route(
            "/videos/{id}",
            get(admin::get_video)
                .put(admin::update_video)
                .delete(admin::delete_video),
        )
        .route("/videos/{id}/thumbnails", post(admin::upload_thumbnail))
        .route("/genres", post(admin::create_genre))
        .route("/actors", post(admin::create_actor))
        .route("/actors/{id}/picture", post(admin::upload_actor_picture))
        .route("/staff", post(admin::create_staff))
        .route("/staff/{id}/picture", post(admin::upload_staff_picture))
}
