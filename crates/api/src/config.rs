use std::str::FromStr;

use reviewniverse_core::validation::UserPolicy;

use crate::auth::jwt::JwtConfig;
use crate::storage::StorageConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Object storage and upload limits.
    pub storage: StorageConfig,
    /// Field validation rules for user accounts.
    pub user_policy: UserPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                       |
    /// |------------------------|-----------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                     |
    /// | `PORT`                 | `8000`                                        |
    /// | `CORS_ORIGINS`         | `http://localhost,http://localhost:3000`      |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                          |
    ///
    /// See [`JwtConfig::from_env`], [`StorageConfig::from_env`] and
    /// [`user_policy_from_env`] for the nested sections.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_parse("PORT", 8000);

        let cors_origins = env_list("CORS_ORIGINS", "http://localhost,http://localhost:3000");

        let request_timeout_secs: u64 = env_parse("REQUEST_TIMEOUT_SECS", 30);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            storage: StorageConfig::from_env(),
            user_policy: user_policy_from_env(),
        }
    }
}

/// Load the user field policy from environment variables.
///
/// | Env Var                        | Default |
/// |--------------------------------|---------|
/// | `USER_EMAIL_LENGTH_MIN`        | `6`     |
/// | `USER_EMAIL_LENGTH_MAX`        | `50`    |
/// | `USER_NICKNAME_LENGTH_MIN`     | `2`     |
/// | `USER_NICKNAME_LENGTH_MAX`     | `20`    |
/// | `USER_PASSWORD_LENGTH_MIN`     | `8`     |
/// | `USER_PASSWORD_LENGTH_MAX`     | `22`    |
/// | `USER_PASSWORD_INCLUDE_SPACE`  | `true`  |
/// | `USER_PASSWORD_INCLUDE_WORD`   | `true`  |
/// | `USER_PASSWORD_INCLUDE_NUMBER` | `true`  |
/// | `USER_PASSWORD_INCLUDE_SIMBOL` | `true`  |
/// | `USER_TYPE_ALLOW`              | `10`    |
///
/// `USER_PASSWORD_INCLUDE_SPACE=true` means passwords containing spaces are
/// rejected.
pub fn user_policy_from_env() -> UserPolicy {
    let defaults = UserPolicy::default();
    UserPolicy {
        email_length_min: env_parse("USER_EMAIL_LENGTH_MIN", defaults.email_length_min),
        email_length_max: env_parse("USER_EMAIL_LENGTH_MAX", defaults.email_length_max),
        nickname_length_min: env_parse("USER_NICKNAME_LENGTH_MIN", defaults.nickname_length_min),
        nickname_length_max: env_parse("USER_NICKNAME_LENGTH_MAX", defaults.nickname_length_max),
        password_length_min: env_parse("USER_PASSWORD_LENGTH_MIN", defaults.password_length_min),
        password_length_max: env_parse("USER_PASSWORD_LENGTH_MAX", defaults.password_length_max),
        password_reject_space: env_parse(
            "USER_PASSWORD_INCLUDE_SPACE",
            defaults.password_reject_space,
        ),
        password_require_word: env_parse(
            "USER_PASSWORD_INCLUDE_WORD",
            defaults.password_require_word,
        ),
        password_require_number: env_parse(
            "USER_PASSWORD_INCLUDE_NUMBER",
            defaults.password_require_number,
        ),
        password_require_symbol: env_parse(
            "USER_PASSWORD_INCLUDE_SIMBOL",
            defaults.password_require_symbol,
        ),
        allowed_user_types: env_list("USER_TYPE_ALLOW", &defaults.allowed_user_types.join(",")),
    }
}

/// Parse an env var, falling back to `default` when it is unset.
///
/// # Panics
///
/// Panics if the variable is set but does not parse, so misconfiguration
/// fails at startup.
pub(crate) fn env_parse<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{name} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}

/// Read a comma-separated env var into a list of trimmed, non-empty items.
pub(crate) fn env_list(name: &str, default: &str) -> Vec<String> {
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
