//! JSON response construction.

use http::header::{HeaderValue, ALLOW, CACHE_CONTROL, CONTENT_TYPE};
use http::{Response, StatusCode};
use serde::Serialize;
use wholesale_core::RequestId;

use crate::error::ApiError;

/// Header carrying the request ID back to the caller.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Serialize `body` into a JSON response.
///
/// Encoding failures become a 500 with an error body instead of a panic.
pub fn json_response<T: Serialize>(
    status: StatusCode,
    request_id: &RequestId,
    body: &T,
) -> Response<String> {
    match serde_json::to_string(body) {
        Ok(json) => build(status, request_id, json),
        Err(e) => error_response(&ApiError::from(e), request_id),
    }
}

/// Response for an `ApiError`.
pub fn error_response(error: &ApiError, request_id: &RequestId) -> Response<String> {
    // ErrorBody is plain strings, so encoding cannot fail.
    let json = serde_json::to_string(&error.body())
        .unwrap_or_else(|_| r#"{"error":"internal error"}"#.to_string());
    let mut response = build(error.status(), request_id, json);
    if matches!(error, ApiError::MethodNotAllowed(_)) {
        response
            .headers_mut()
            .insert(ALLOW, HeaderValue::from_static("GET, HEAD"));
    }
    response
}

fn build(status: StatusCode, request_id: &RequestId, body: String) -> Response<String> {
    let mut response = Response::new(body);
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        headers.insert(REQUEST_ID_HEADER, value);
    }

    response
}
