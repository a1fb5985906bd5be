//! Assertion helpers for API responses

use axum::http::StatusCode;
use axum_test::TestResponse;
use pretty_assertions::assert_eq;

/// Assert a JSON error response `{message, status}`
pub fn assert_error(response: &TestResponse, status: StatusCode, message: &str) {
    assert_eq!(response.status_code(), status);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], message);
    assert_eq!(body["status"], status.as_u16());
}
