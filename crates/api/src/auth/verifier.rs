//! Login verification.
//!
//! The checks run in a fixed order and stop at the first failure. Every
//! attempt, successful or not, is written to `user_login_logs`.

use axum::http::StatusCode;
use reviewniverse_core::codes::Code;
use reviewniverse_core::error::CoreError;
use reviewniverse_core::user_type::uses_password;
use reviewniverse_db::models::login_log::CreateUserLoginLog;
use reviewniverse_db::models::user::User;
use reviewniverse_db::repositories::{LoginLogRepo, UserRepo};
use serde::Deserialize;

use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::request_log::ClientInfo;
use crate::state::AppState;

/// Request body for `POST /users/login`. Fields are optional so missing
/// ones report their own code.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub user_type: Option<String>,
}

/// Run the login checklist and log the attempt.
pub async fn verify_login(
    state: &AppState,
    client: &ClientInfo,
    path: &str,
    input: &LoginRequest,
) -> AppResult<User> {
    let outcome = check(state, input).await;

    let (status, code) = match &outcome {
        Ok(_) => (StatusCode::OK, Code::UserLoginSucc),
        Err(err) => err.status_and_code(),
    };

    let log = CreateUserLoginLog {
        status: i32::from(status.as_u16()),
        code: code.as_str().to_string(),
        message: code.message().to_string(),
        path: path.to_string(),
        input_id: input.email.clone(),
        client_ip: client.ip.clone(),
        client_host: client.host.clone(),
        user_agent: client.user_agent.clone(),
    };
    if let Err(e) = LoginLogRepo::create(&state.pool, &log).await {
        tracing::error!(error = %e, "Failed to record login attempt");
    }

    match &outcome {
        Ok(user) => tracing::info!(user_id = user.id, "User logged in"),
        Err(_) => tracing::info!(code = %code, "Login rejected"),
    }
    outcome
}

async fn check(state: &AppState, input: &LoginRequest) -> AppResult<User> {
    let fail = |code: Code| -> AppError { CoreError::Unauthorized(code).into() };
    let required = |code: Code| -> AppError { CoreError::Validation(code).into() };

    // 1-3. Required fields.
    let email = present(&input.email).ok_or_else(|| required(Code::UserLoginEmailRequired))?;
    let password =
        present(&input.password).ok_or_else(|| required(Code::UserLoginPasswordRequired))?;
    let user_type =
        present(&input.user_type).ok_or_else(|| required(Code::UserLoginTypeRequired))?;

    // 4. Allowed type.
    state.config.user_policy.validate_user_type(user_type)?;

    // 5. Account lookup.
    let user = UserRepo::find_by_email_and_type(&state.pool, email, user_type)
        .await?
        .ok_or(CoreError::NotFound(Code::UserNotFound))?;

    // 6. Mandatory agreements.
    if !user.has_required_agreements() {
        return Err(fail(Code::UserLoginAgreeFail));
    }

    // 7. Type-specific checks.
    if uses_password(user_type) {
        let hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| fail(Code::UserLoginAuthFail))?;
        let matches = verify_password(password, hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
        if !matches {
            return Err(fail(Code::UserLoginAuthFail));
        }
    }
    if !user.is_active {
        return Err(CoreError::NotFound(Code::UserNotFound).into());
    }
    if user.is_block {
        return Err(CoreError::Forbidden(Code::UserBlocked).into());
    }

    Ok(user)
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
