#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use reviewniverse_api::auth::jwt::{generate_access_token, JwtConfig};
use reviewniverse_api::auth::password::hash_password;
use reviewniverse_api::config::ServerConfig;
use reviewniverse_api::router::build_app_router;
use reviewniverse_api::state::AppState;
use reviewniverse_api::storage::{MemoryStorage, StorageConfig};
use reviewniverse_core::validation::UserPolicy;
use reviewniverse_db::models::user::{CreateUser, User};
use reviewniverse_db::models::video::{CreateVideo, Video};
use reviewniverse_db::repositories::{UserRepo, VideoRepo};

/// Password every helper-created user signs in with.
pub const TEST_PASSWORD: &str = "review!pass1";

/// Base URL the test config renders stored keys against.
pub const IMAGE_BASE_URL: &str = "https://images.test";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin and a small upload limit so
/// size checks are cheap to exercise.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expire_mins: 60,
            refresh_token_expire_mins: 20160,
        },
        storage: StorageConfig {
            bucket: "reviewniverse-test".to_string(),
            region: "ap-northeast-2".to_string(),
            access_key_id: None,
            secret_access_key: None,
            endpoint: None,
            public_base_url: IMAGE_BASE_URL.to_string(),
            upload_temp_dir: std::env::temp_dir().join("reviewniverse-api-tests"),
            allowed_extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
            max_upload_bytes: 1024,
            presigned_url_expiry_secs: 600,
        },
        user_policy: UserPolicy::default(),
    }
}

/// Build the full application router over the given pool with in-memory
/// object storage.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_storage(pool).0
}

/// Same as [`build_test_app`] but also hands back the storage so tests can
/// inspect uploaded objects.
pub fn build_test_app_with_storage(pool: PgPool) -> (Router, Arc<MemoryStorage>) {
    let config = test_config();
    let storage = Arc::new(MemoryStorage::new());
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage: storage.clone(),
    };
    (build_app_router(state, &config), storage)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert an email account that has accepted every required agreement.
pub async fn create_user(pool: &PgPool, email: &str, nickname: &str) -> User {
    let hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            user_type: "10".to_string(),
            email: email.to_string(),
            password_hash: Some(hash),
            nickname: nickname.to_string(),
            is_privacy_agree: true,
            is_terms_agree: true,
            is_age_agree: true,
            is_marketing_agree: false,
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Insert a user and flip `is_admin`.
pub async fn create_admin(pool: &PgPool, email: &str, nickname: &str) -> User {
    let user = create_user(pool, email, nickname).await;
    sqlx::query("UPDATE users SET is_admin = true WHERE id = $1")
        .bind(user.id)
        .execute(pool)
        .await
        .expect("admin flag should be set");
    user
}

/// Insert a movie with no links. Unconfirmed videos stay out of public reads.
pub async fn create_video(pool: &PgPool, title: &str, is_confirm: bool) -> Video {
    VideoRepo::create(
        pool,
        &CreateVideo {
            video_type: "10".to_string(),
            title: title.to_string(),
            synopsis: None,
            release: None,
            runtime: None,
            notice_age: None,
            platform_code: None,
            platform_id: None,
            is_confirm,
            genre_ids: vec![],
            actors: vec![],
            staff: vec![],
            watches: vec![],
            thumbnails: vec![],
        },
    )
    .await
    .expect("video creation should succeed")
}

/// Access token for a user, signed with the test secret.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.email, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Value of the `code` response header.
pub fn code_header(response: &Response<Body>) -> String {
    response
        .headers()
        .get("code")
        .expect("response must carry a code header")
        .to_str()
        .expect("code header should be ASCII")
        .to_string()
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request should build")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::POST, uri, Some(token))).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::POST, uri, None)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::PATCH, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

/// One part of a multipart form.
pub enum FormPart<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

const BOUNDARY: &str = "reviewniverse-test-boundary";

/// Send a multipart form with the given method.
pub async fn multipart_auth(
    app: Router,
    method: Method,
    uri: &str,
    parts: &[FormPart<'_>],
    token: &str,
) -> Response<Body> {
    let mut body: Vec<u8> = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            FormPart::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            FormPart::File {
                name,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body))
        .expect("request should build");
    send(app, request).await
}
