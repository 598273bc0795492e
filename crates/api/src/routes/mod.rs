pub mod admin;
pub mod catalog;
pub mod health;
pub mod token;
pub mod users;
pub mod videos;

use axum::Router;

use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /token                                  verify token (auth)
///
/// /users                                  search (GET), sign up (POST)
/// /users/login                            login (POST)
/// /users/nickname                         nickname availability (GET)
/// /users/email                            email availability (GET)
/// /users/{id}                             me (GET), update (PUT, multipart), delete (self)
/// /users/{id}/profile                     profile tier (GET)
/// /users/{id}/nickname                    change nickname (PATCH, self)
/// /users/{id}/password                    change password (PATCH, self)
/// /users/{id}/profile_image               replace image (PATCH, multipart, self)
/// /users/{id}/profile_text                change bio (PATCH, self)
/// /users/{id}/marketing                   marketing consent (PATCH, self)
///
/// /videos                                 search (GET)
/// /videos/{id}                            detail (GET)
/// /videos/{id}/view                       record view (POST, optional auth)
/// /videos/{id}/like                       read (GET), toggle (POST) (auth)
/// /videos/{id}/reviews                    list (GET), create (POST, auth)
/// /videos/{id}/reviews/{review_id}        update (PUT), delete (DELETE) (author)
/// /videos/{id}/ratings                    read (GET), upsert (PUT), delete (DELETE) (auth)
///
/// /genres                                 list (GET)
/// /actors/{id}                            detail (GET)
/// /staff/{id}                             detail (GET)
///
/// /admin/videos                           create (POST)
/// /admin/videos/{id}                      detail (GET), update (PUT), soft delete (DELETE)
/// /admin/videos/{id}/thumbnails           upload (POST, multipart)
/// /admin/genres                           create (POST)
/// /admin/actors                           create (POST)
/// /admin/actors/{id}/picture              upload (POST, multipart)
/// /admin/staff                            create (POST)
/// /admin/staff/{id}/picture               upload (POST, multipart)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(token::router())
        .nest("/users", users::router())
        .nest("/videos", videos::router())
        .merge(catalog::router())
        .nest("/admin", admin::router())
}
