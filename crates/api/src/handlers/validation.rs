//! Availability checks used by the sign-up form.

use axum::extract::State;
use reviewniverse_core::codes::Code;
use reviewniverse_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::extract::Query;
use crate::query::{EmailParams, NicknameParams};
use crate::response::NoContent;
use crate::state::AppState;

/// GET /v1/users/nickname?nickname=
///
/// Always 204. The `code` header says whether the nickname can be used.
pub async fn check_nickname(
    State(state): State<AppState>,
    Query(params): Query<NicknameParams>,
) -> AppResult<NoContent> {
    let nickname = params.nickname.trim();

    if state.config.user_policy.validate_nickname(nickname).is_err() {
        return Ok(NoContent::new(Code::ValidNickFail));
    }
    if UserRepo::nickname_exists(&state.pool, nickname, None).await? {
        return Ok(NoContent::new(Code::ValidNickExist));
    }
    Ok(NoContent::new(Code::ValidNickSucc))
}

/// GET /v1/users/email?email=
///
/// An invalid email is a 400 with the validator's code. A registered email
/// answers 204 `VALID_EMAIL_EXIST_<user_type>` so the client can point the
/// user at the right login method.
pub async fn check_email(
    State(state): State<AppState>,
    Query(params): Query<EmailParams>,
) -> AppResult<NoContent> {
    let email = params.email.trim();
    state.config.user_policy.validate_email(email)?;

    if let Some(user) = UserRepo::find_by_email(&state.pool, email).await? {
        return Ok(NoContent::raw(format!("VALID_EMAIL_EXIST_{}", user.user_type)));
    }
    Ok(NoContent::new(Code::ValidEmailSucc))
}
