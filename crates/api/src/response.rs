//! Shared response envelope types for API handlers.
//!
//! Every response carries its catalog code in a `code` header. Responses
//! with a body use the `{ "message", "code", "data"? }` envelope; 204
//! responses carry the header only.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reviewniverse_core::codes::Code;
use serde::Serialize;

/// Name of the header every response carries its code in.
pub const CODE_HEADER: HeaderName = HeaderName::from_static("code");

/// The `{ message, code, data? }` body.
#[derive(Debug, Serialize)]
pub struct Envelope<'a, T: Serialize> {
    pub message: &'a str,
    pub code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Render an envelope with the given status and code header.
pub fn envelope_response<T: Serialize>(
    status: StatusCode,
    code: &str,
    message: &str,
    data: Option<T>,
) -> Response {
    let body = Envelope {
        message,
        code,
        data,
    };
    let mut response = (status, Json(body)).into_response();
    set_code_header(&mut response, code);
    response
}

fn set_code_header(response: &mut Response, code: &str) {
    let value = HeaderValue::from_str(code)
        .unwrap_or_else(|_| HeaderValue::from_static(Code::Exception.as_str()));
    response.headers_mut().insert(CODE_HEADER, value);
}

/// A successful response with a JSON body.
///
/// ```ignore
/// Ok(ApiResponse::ok(Code::UserReadSucc, user))
/// ```
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub status: StatusCode,
    pub code: Code,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with data.
    pub fn ok(code: Code, data: T) -> Self {
        Self {
            status: StatusCode::OK,
            code,
            data: Some(data),
        }
    }

    /// 201 with data.
    pub fn created(code: Code, data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            code,
            data: Some(data),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        envelope_response(self.status, self.code.as_str(), self.code.message(), self.data)
    }
}

/// A 204 response: no body, only the `code` header.
#[derive(Debug, Clone)]
pub struct NoContent {
    code: String,
}

impl NoContent {
    pub fn new(code: Code) -> Self {
        Self {
            code: code.as_str().to_string(),
        }
    }

    /// A code outside the catalog, e.g. `VALID_EMAIL_EXIST_10`.
    pub fn raw(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        let mut response = StatusCode::NO_CONTENT.into_response();
        set_code_header(&mut response, &self.code);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_content_has_code_header_and_no_body() {
        let response = NoContent::new(Code::UserDeleteSucc).into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()["code"], "USER_DELETE_SUCC");
    }

    #[test]
    fn raw_codes_pass_through() {
        let response = NoContent::raw("VALID_EMAIL_EXIST_10").into_response();
        assert_eq!(response.headers()["code"], "VALID_EMAIL_EXIST_10");
    }

    #[test]
    fn envelope_omits_missing_data() {
        let body = Envelope::<()> {
            message: "m",
            code: "C",
            data: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "m", "code": "C" }));
    }
}
