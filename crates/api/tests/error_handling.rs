//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status, catalog code and message. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `AppError` values.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use reviewniverse_api::error::AppError;
use reviewniverse_core::codes::Code;
use reviewniverse_core::error::CoreError;

/// Helper: convert an `AppError` into its status, code header and JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, String, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let header = response
        .headers()
        .get("code")
        .expect("error responses carry a code header")
        .to_str()
        .unwrap()
        .to_string();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, header, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404 with its catalog code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound(Code::VideoNotFound));

    let (status, header, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(header, "VIDEO_NOT_FOUND");
    assert_eq!(json["code"], "VIDEO_NOT_FOUND");
    assert_eq!(json["message"], Code::VideoNotFound.message());
    assert!(json.get("data").is_none());
}

// ---------------------------------------------------------------------------
// Test: each CoreError kind picks its status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn core_error_kinds_map_to_statuses() {
    let cases = [
        (CoreError::Validation(Code::ValidNickLengthErr), StatusCode::BAD_REQUEST),
        (CoreError::Conflict(Code::EmailAlreadyExist), StatusCode::CONFLICT),
        (CoreError::Unauthorized(Code::AccessTokenExpired), StatusCode::UNAUTHORIZED),
        (CoreError::Forbidden(Code::UserNotAdmin), StatusCode::FORBIDDEN),
    ];

    for (err, expected) in cases {
        let code = err.code();
        let (status, header, json) = error_to_response(AppError::Core(err)).await;
        assert_eq!(status, expected);
        assert_eq!(header, code.as_str());
        assert_eq!(json["code"], code.as_str());
    }
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 INVALID_REQUEST
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("missing field `title`".into());

    let (status, header, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header, "INVALID_REQUEST");
    assert_eq!(json["message"], Code::InvalidRequest.message());
}

// ---------------------------------------------------------------------------
// Test: AppError::InternalError maps to 500 and sanitizes the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, header, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header, "EXCEPTION");
    let message = json["message"].as_str().unwrap();
    assert!(!message.contains("secret"));
}

// ---------------------------------------------------------------------------
// Test: sqlx::Error::RowNotFound is an internal error, not a 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unclassified_database_error_returns_500() {
    let err = AppError::Database(sqlx::Error::RowNotFound);

    let (status, header, _json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header, "EXCEPTION");
}
