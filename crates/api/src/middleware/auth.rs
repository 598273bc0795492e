//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use reviewniverse_core::codes::Code;
use reviewniverse_core::error::CoreError;
use reviewniverse_db::models::user::User;
use reviewniverse_db::repositories::UserRepo;

use crate::auth::jwt::{token_error, validate_token};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user loaded from the JWT Bearer token in the `Authorization` header.
///
/// The token's `user.id` must resolve to a stored user whose email still
/// matches `user.email`. Every failure is a 401:
///
/// | Failure                  | Code                   |
/// |--------------------------|------------------------|
/// | no header                | `ACCESS_TOKEN_REQUIRE` |
/// | bad or expired token     | `ACCESS_TOKEN_INVALID` / `ACCESS_TOKEN_EXPIRED` |
/// | user gone                | `USER_NOT_FOUND`       |
/// | email changed            | `USER_NOT_MATCH`       |
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<NoContent> {
///     tracing::info!(user_id = auth.user.id, "handling request");
///     Ok(NoContent::new(Code::UserReadSucc))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?
            .ok_or(CoreError::Unauthorized(Code::AccessTokenRequire))?;
        authenticate(token, state).await
    }
}

/// Like [`AuthUser`], but an absent or unusable token yields `None` instead
/// of a rejection.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<User>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(Some(token)) = bearer_token(parts) else {
            return Ok(MaybeAuthUser(None));
        };
        match authenticate(token, state).await {
            Ok(auth) => Ok(MaybeAuthUser(Some(auth.user))),
            Err(AppError::Core(err)) => {
                tracing::debug!(code = %err.code(), "Ignoring unusable token on optional auth route");
                Ok(MaybeAuthUser(None))
            }
            Err(other) => Err(other),
        }
    }
}

/// The token from a `Bearer` header, `None` when no header is sent.
fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(header) = parts.headers.get("authorization") else {
        return Ok(None);
    };
    let token = header
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(CoreError::Unauthorized(Code::AccessTokenInvalid))?;
    Ok(Some(token))
}

async fn authenticate(token: &str, state: &AppState) -> Result<AuthUser, AppError> {
    let claims = validate_token(token, &state.config.jwt).map_err(|e| token_error(&e))?;

    let user = UserRepo::find_by_id(&state.pool, claims.user.id)
        .await?
        .ok_or(CoreError::Unauthorized(Code::UserNotFound))?;

    if user.email != claims.user.email {
        return Err(CoreError::Unauthorized(Code::UserNotMatch).into());
    }
    Ok(AuthUser { user })
}
