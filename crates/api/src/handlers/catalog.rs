//! Public catalog reads: genres, actors and staff.

use axum::extract::State;
use reviewniverse_core::codes::Code;
use reviewniverse_core::error::CoreError;
use reviewniverse_core::types::DbId;
use reviewniverse_db::models::actor::Actor;
use reviewniverse_db::models::genre::Genre;
use reviewniverse_db::models::public_url;
use reviewniverse_db::models::staff::Staff;
use reviewniverse_db::repositories::{ActorRepo, GenreRepo, StaffRepo};

use crate::error::AppResult;
use crate::extract::Path;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /v1/genres
pub async fn list_genres(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<Genre>>> {
    let genres = GenreRepo::list(&state.pool).await?;
    Ok(ApiResponse::ok(Code::GenreReadSucc, genres))
}

/// GET /v1/actors/{id}
pub async fn get_actor(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Actor>> {
    let mut actor = ActorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound(Code::ActorNotFound))?;
    actor.picture = actor.picture.map(|p| public_url(state.image_base_url(), &p));
    Ok(ApiResponse::ok(Code::ActorReadSucc, actor))
}

/// GET /v1/staff/{id}
pub async fn get_staff(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Staff>> {
    let mut staff = StaffRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound(Code::StaffNotFound))?;
    staff.picture = staff.picture.map(|p| public_url(state.image_base_url(), &p));
    Ok(ApiResponse::ok(Code::StaffReadSucc, staff))
}
