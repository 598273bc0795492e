//! Admin access extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use reviewniverse_core::codes::Code;
use reviewniverse_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires an authenticated user with `is_admin`. Rejects with 403
/// `USER_NOT_ADMIN` otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<NoContent> {
///     // admin.user.is_admin is true here
///     Ok(NoContent::new(Code::VideoDeleteSucc))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        if !auth.user.is_admin {
            tracing::warn!(user_id = auth.user.id, "Non-admin user hit an admin route");
            return Err(AppError::Core(CoreError::Forbidden(Code::UserNotAdmin)));
        }
        Ok(RequireAdmin(auth))
    }
}
