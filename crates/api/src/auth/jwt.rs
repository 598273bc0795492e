//! JWT access/refresh token generation and validation.
//!
//! Both token kinds are HS256-signed JWTs carrying the same [`Claims`]
//! payload; they differ only in lifetime.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use reviewniverse_core::codes::Code;
use reviewniverse_core::error::CoreError;
use reviewniverse_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::config::env_parse;

/// Identity embedded in the token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenUser {
    pub id: DbId,
    pub email: String,
}

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub user: TokenUser,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 60).
    pub access_token_expire_mins: i64,
    /// Refresh token lifetime in minutes (default: 14 days).
    pub refresh_token_expire_mins: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRE_MINS: i64 = 60;
/// Default refresh token expiry in minutes.
const DEFAULT_REFRESH_EXPIRE_MINS: i64 = 60 * 24 * 14;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                     | Required | Default |
    /// |-----------------------------|----------|---------|
    /// | `JWT_SECRET`                | **yes**  | --      |
    /// | `ACCESS_TOKEN_EXPIRE_MINS`  | no       | `60`    |
    /// | `REFRESH_TOKEN_EXPIRE_MINS` | no       | `20160` |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self {
            secret,
            access_token_expire_mins: env_parse(
                "ACCESS_TOKEN_EXPIRE_MINS",
                DEFAULT_ACCESS_EXPIRE_MINS,
            ),
            refresh_token_expire_mins: env_parse(
                "REFRESH_TOKEN_EXPIRE_MINS",
                DEFAULT_REFRESH_EXPIRE_MINS,
            ),
        }
    }
}

fn generate_token(
    user_id: DbId,
    email: &str,
    lifetime_mins: i64,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = chrono::Utc::now().timestamp() + lifetime_mins * 60;

    let claims = Claims {
        user: TokenUser {
            id: user_id,
            email: email.to_string(),
        },
        exp,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Generate an access token for the given user.
pub fn generate_access_token(
    user_id: DbId,
    email: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    generate_token(user_id, email, config.access_token_expire_mins, config)
}

/// Generate a refresh token for the given user.
pub fn generate_refresh_token(
    user_id: DbId,
    email: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    generate_token(user_id, email, config.refresh_token_expire_mins, config)
}

/// Validate and decode a token, returning the embedded [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// Map a token validation failure onto the auth error reported to clients.
pub fn token_error(err: &jsonwebtoken::errors::Error) -> CoreError {
    match err.kind() {
        ErrorKind::ExpiredSignature => CoreError::Unauthorized(Code::AccessTokenExpired),
        _ => CoreError::Unauthorized(Code::AccessTokenInvalid),
    }
}
