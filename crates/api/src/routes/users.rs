//! Route definitions for the `/users` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{users, validation};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                      -> search
/// POST   /                      -> create
/// POST   /login                 -> login
/// GET    /nickname              -> check_nickname
/// GET    /email                 -> check_email
/// GET    /{id}                  -> get_me (self)
/// PUT    /{id}                  -> update (self, multipart)
/// DELETE /{id}                  -> delete (self)
/// GET    /{id}/profile          -> get_profile
/// PATCH  /{id}/nickname         -> update_nickname (self)
/// PATCH  /{id}/password         -> update_password (self)
/// PATCH  /{id}/profile_image    -> update_profile_image (self, multipart)
/// PATCH  /{id}/profile_text     -> update_profile_text (self)
/// PATCH  /{id}/marketing        -> update_marketing (self)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::search).post(users::create))
        .route("/login", post(users::login))
        .route("/nickname", get(validation::check_nickname))
        .route("/email", get(validation::check_email))
        .route(
            "/{id}",
            get(users::get_me).put(users::update).delete(users::delete),
        )
        .route("/{id}/profile", get(users::get_profile))
        .route("/{id}/nickname", patch(users::update_nickname))
        .route("/{id}/password", patch(users::update_password))
        .route("/{id}/profile_image", patch(users::update_profile_image))
        .route("/{id}/profile_text", patch(users::update_profile_text))
        .route("/{id}/marketing", patch(users::update_marketing))
}
