//! Handler for the `/token` resource.

use axum::extract::State;
use reviewniverse_core::codes::Code;
use reviewniverse_db::models::user::UserMe;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /v1/token
///
/// Verify the bearer token and return the caller at the "me" tier.
pub async fn verify(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<ApiResponse<UserMe>> {
    Ok(ApiResponse::ok(
        Code::AccessTokenVerify,
        UserMe::from_user(&auth.user, state.image_base_url()),
    ))
}
