//! Handlers for the `/users` resource.

use axum::extract::{Multipart, OriginalUri, State};
use axum::response::{IntoResponse, Response};
use chrono::Datelike;
use reviewniverse_core::codes::Code;
use reviewniverse_core::error::CoreError;
use reviewniverse_core::object_key::ObjectKind;
use reviewniverse_core::search::Paged;
use reviewniverse_core::types::DbId;
use reviewniverse_core::user_type::USER_TYPE_EMAIL;
use reviewniverse_core::validation::validate_birth_year;
use reviewniverse_db::models::user::{CreateUser, UpdateUser, User, UserMe, UserProfile, UserPublic};
use reviewniverse_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use super::{ensure_self, single_file};
use crate::auth::jwt::{generate_access_token, generate_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::verifier::{verify_login, LoginRequest};
use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::auth::AuthUser;
use crate::middleware::request_log::ClientInfo;
use crate::query::UserSearchParams;
use crate::response::{ApiResponse, NoContent};
use crate::state::AppState;
use crate::storage::upload::{delete_replaced, upload_file, FilePart};

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`. Every field is optional so a missing one
/// reports `USER_CREATE_REQUIRED_FIELDS` rather than a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    pub user_type: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub nickname: Option<String>,
    #[serde(default)]
    pub is_privacy_agree: bool,
    #[serde(default)]
    pub is_terms_agree: bool,
    #[serde(default)]
    pub is_age_agree: bool,
    #[serde(default)]
    pub is_marketing_agree: bool,
}

/// Successful login payload.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub user: UserMe,
}

#[derive(Debug, Deserialize)]
pub struct NicknameRequest {
    #[serde(default)]
    pub nickname: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordRequest {
    #[serde(default)]
    pub password_origin: String,
    #[serde(default)]
    pub password_new: String,
}

#[derive(Debug, Deserialize)]
pub struct ProfileTextRequest {
    pub profile_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MarketingRequest {
    pub is_marketing_agree: bool,
}

// ---------------------------------------------------------------------------
// Public endpoints
// ---------------------------------------------------------------------------

/// GET /v1/users
///
/// Search users. An empty page answers 204 `SEARCH_NOT_FOUND`.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<UserSearchParams>,
) -> AppResult<Response> {
    let page = params.page.to_page(1)?;
    let search = params.to_search()?;

    let (total, users) = UserRepo::search(&state.pool, &search, page).await?;
    if users.is_empty() {
        return Ok(NoContent::new(Code::SearchNotFound).into_response());
    }

    let base_url = state.image_base_url();
    let paged = Paged::new(total, page, users).map(|u| UserPublic::from_user(&u, base_url));
    Ok(ApiResponse::ok(Code::UserReadSucc, paged).into_response())
}

/// POST /v1/users
///
/// Sign up with an email account.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<ApiResponse<UserMe>> {
    let policy = &state.config.user_policy;
    let required = || AppError::from(CoreError::Validation(Code::UserCreateRequiredFields));

    // 1. Required fields.
    let email = input.email.as_deref().map(str::trim).filter(|v| !v.is_empty());
    let password = input.password.as_deref().filter(|v| !v.is_empty());
    let nickname = input.nickname.as_deref().map(str::trim).filter(|v| !v.is_empty());
    let (Some(email), Some(password), Some(nickname)) = (email, password, nickname) else {
        return Err(required());
    };
    let user_type = input
        .user_type
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(USER_TYPE_EMAIL);

    // 2. Agreements.
    if !input.is_privacy_agree {
        return Err(CoreError::Validation(Code::UserAgreePrivacyRequired).into());
    }
    if !input.is_terms_agree {
        return Err(CoreError::Validation(Code::UserAgreeTermsRequired).into());
    }
    if !input.is_age_agree {
        return Err(CoreError::Validation(Code::UserAgreeAgeRequired).into());
    }

    // 3. Field rules.
    policy.validate_email(email)?;
    policy.validate_password(password)?;
    policy.validate_nickname(nickname)?;
    policy.validate_user_type(user_type)?;

    // 4. Uniqueness.
    if UserRepo::find_by_email(&state.pool, email).await?.is_some() {
        return Err(CoreError::Conflict(Code::EmailAlreadyExist).into());
    }
    if UserRepo::nickname_exists(&state.pool, nickname, None).await? {
        return Err(CoreError::Conflict(Code::NicknameAlreadyExist).into());
    }

    // 5. Insert.
    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            user_type: user_type.to_string(),
            email: email.to_string(),
            password_hash: Some(password_hash),
            nickname: nickname.to_string(),
            is_privacy_agree: input.is_privacy_agree,
            is_terms_agree: input.is_terms_agree,
            is_age_agree: input.is_age_agree,
            is_marketing_agree: input.is_marketing_agree,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, user_type = %user.user_type, "User created");
    Ok(ApiResponse::created(
        Code::UserCreateSucc,
        UserMe::from_user(&user, state.image_base_url()),
    ))
}

/// POST /v1/users/login
///
/// Run the login checklist and issue an access/refresh token pair.
pub async fn login(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    client: ClientInfo,
    Json(input): Json<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let user = verify_login(&state, &client, uri.path(), &input).await?;

    let jwt = &state.config.jwt;
    let access_token = generate_access_token(user.id, &user.email, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let refresh_token = generate_refresh_token(user.id, &user.email, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(ApiResponse::ok(
        Code::UserLoginSucc,
        LoginResponse {
            access_token,
            refresh_token,
            token_type: "bearer",
            user: UserMe::from_user(&user, state.image_base_url()),
        },
    ))
}

/// GET /v1/users/{id}/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<UserProfile>> {
    let user = find_user(&state, id).await?;
    Ok(ApiResponse::ok(
        Code::UserReadSucc,
        UserProfile::from_user(&user, state.image_base_url()),
    ))
}

// ---------------------------------------------------------------------------
// Owner endpoints
// ---------------------------------------------------------------------------

/// GET /v1/users/{id}
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<UserMe>> {
    ensure_self(&auth.user, id)?;
    Ok(me(&state, Code::UserReadSucc, &auth.user))
}

/// PUT /v1/users/{id}
///
/// Multipart update. Only fields that are present and non-empty are applied.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<ApiResponse<UserMe>> {
    ensure_self(&auth.user, id)?;
    let policy = &state.config.user_policy;

    // 1. Collect fields.
    let text = |value: String| Some(value).filter(|v| !v.trim().is_empty());
    let mut nickname = None;
    let mut password = None;
    let mut birth_year = None;
    let mut profile_text = None;
    let mut is_marketing_agree = None;
    let mut image: Option<FilePart> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "profile_image" {
            let part = FilePart::read(field).await?;
            if !part.data.is_empty() {
                image = Some(part);
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        match name.as_str() {
            "nickname" => nickname = text(value.trim().to_string()),
            "password" => password = text(value),
            "birth_year" => birth_year = text(value),
            "profile_text" => profile_text = text(value),
            "is_marketing_agree" => is_marketing_agree = text(value),
            _ => {}
        }
    }

    // 2. Validate.
    if let Some(nickname) = &nickname {
        policy.validate_nickname(nickname)?;
        if UserRepo::nickname_exists(&state.pool, nickname, Some(id)).await? {
            return Err(CoreError::Conflict(Code::NicknameAlreadyExist).into());
        }
    }
    let password_hash = match &password {
        Some(password) => {
            policy.validate_password(password)?;
            Some(
                hash_password(password)
                    .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
            )
        }
        None => None,
    };
    let birth_year = birth_year.map(|raw| parse_birth_year(&raw)).transpose()?;
    let is_marketing_agree = is_marketing_agree
        .map(|raw| parse_flag(&raw))
        .transpose()?;

    // 3. Upload the new image, if any.
    let profile_image = match image {
        Some(part) => Some(
            upload_file(
                state.storage.as_ref(),
                &state.config.storage,
                ObjectKind::Profile,
                &id.to_string(),
                part,
            )
            .await?
            .key,
        ),
        None => None,
    };

    // 4. Apply.
    let changes = UpdateUser {
        nickname,
        password_hash,
        birth_year,
        profile_image: profile_image.clone(),
        profile_text,
        is_marketing_agree,
    };
    let user = apply_update(&state, id, &changes).await?;

    if profile_image.is_some() {
        delete_replaced(state.storage.as_ref(), auth.user.profile_image.as_deref()).await;
    }

    tracing::info!(user_id = id, "User updated");
    Ok(me(&state, Code::UserUpdateSucc, &user))
}

/// DELETE /v1/users/{id}
///
/// Hard delete. Likes, ratings and reviews go with the account and the
/// affected videos are recounted.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<NoContent> {
    ensure_self(&auth.user, id)?;

    if !UserRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound(Code::UserNotFound).into());
    }
    delete_replaced(state.storage.as_ref(), auth.user.profile_image.as_deref()).await;

    tracing::info!(user_id = id, "User deleted");
    Ok(NoContent::new(Code::UserDeleteSucc))
}

/// PATCH /v1/users/{id}/nickname
pub async fn update_nickname(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<NicknameRequest>,
) -> AppResult<ApiResponse<UserMe>> {
    ensure_self(&auth.user, id)?;
    let nickname = input.nickname.trim();

    state.config.user_policy.validate_nickname(nickname)?;
    if UserRepo::nickname_exists(&state.pool, nickname, Some(id)).await? {
        return Err(CoreError::Conflict(Code::NicknameAlreadyExist).into());
    }

    let changes = UpdateUser {
        nickname: Some(nickname.to_string()),
        ..Default::default()
    };
    let user = apply_update(&state, id, &changes).await?;
    Ok(me(&state, Code::UserUpdateNicknameSucc, &user))
}

/// PATCH /v1/users/{id}/password
pub async fn update_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<PasswordRequest>,
) -> AppResult<ApiResponse<UserMe>> {
    ensure_self(&auth.user, id)?;
    let policy = &state.config.user_policy;

    // 1. Both passwords follow the rules.
    policy.validate_password(&input.password_origin)?;
    policy.validate_password(&input.password_new)?;

    // 2. The current password matches.
    let current = auth
        .user
        .password_hash
        .as_deref()
        .ok_or(CoreError::Unauthorized(Code::UserLoginAuthFail))?;
    let matches = verify_password(&input.password_origin, current)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !matches {
        return Err(CoreError::Unauthorized(Code::UserLoginAuthFail).into());
    }

    // 3. Store the new hash.
    let hash = hash_password(&input.password_new)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    if !UserRepo::update_password(&state.pool, id, &hash).await? {
        return Err(CoreError::NotFound(Code::UserNotFound).into());
    }
    let user = find_user(&state, id).await?;

    tracing::info!(user_id = id, "Password changed");
    Ok(me(&state, Code::UserUpdatePasswordSucc, &user))
}

/// PATCH /v1/users/{id}/profile_image
pub async fn update_profile_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<ApiResponse<UserMe>> {
    ensure_self(&auth.user, id)?;

    let part = single_file(multipart, "profile_image").await?;
    let stored = upload_file(
        state.storage.as_ref(),
        &state.config.storage,
        ObjectKind::Profile,
        &id.to_string(),
        part,
    )
    .await?;

    let changes = UpdateUser {
        profile_image: Some(stored.key),
        ..Default::default()
    };
    let user = apply_update(&state, id, &changes).await?;
    delete_replaced(state.storage.as_ref(), auth.user.profile_image.as_deref()).await;

    Ok(me(&state, Code::UserUpdateProfileImageSucc, &user))
}

/// PATCH /v1/users/{id}/profile_text
pub async fn update_profile_text(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ProfileTextRequest>,
) -> AppResult<ApiResponse<UserMe>> {
    ensure_self(&auth.user, id)?;

    let changes = UpdateUser {
        profile_text: Some(input.profile_text.unwrap_or_default()),
        ..Default::default()
    };
    let user = apply_update(&state, id, &changes).await?;
    Ok(me(&state, Code::UserUpdateProfileSucc, &user))
}

/// PATCH /v1/users/{id}/marketing
pub async fn update_marketing(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<MarketingRequest>,
) -> AppResult<ApiResponse<UserMe>> {
    ensure_self(&auth.user, id)?;

    let changes = UpdateUser {
        is_marketing_agree: Some(input.is_marketing_agree),
        ..Default::default()
    };
    let user = apply_update(&state, id, &changes).await?;
    Ok(me(&state, Code::UserUpdateIsagreeSucc, &user))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_user(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::NotFound(Code::UserNotFound).into())
}

async fn apply_update(state: &AppState, id: DbId, changes: &UpdateUser) -> AppResult<User> {
    UserRepo::update(&state.pool, id, changes)
        .await?
        .ok_or_else(|| CoreError::NotFound(Code::UserNotFound).into())
}

fn me(state: &AppState, code: Code, user: &User) -> ApiResponse<UserMe> {
    ApiResponse::ok(code, UserMe::from_user(user, state.image_base_url()))
}

fn parse_birth_year(raw: &str) -> Result<i32, CoreError> {
    let year: i32 = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::Validation(Code::InvalidParamBirthYear))?;
    validate_birth_year(year, chrono::Utc::now().year())?;
    Ok(year)
}

fn parse_flag(raw: &str) -> Result<bool, CoreError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "y" => Ok(true),
        "false" | "0" | "n" => Ok(false),
        _ => Err(CoreError::Validation(Code::InvalidRequest)),
    }
}
