/**
 * Error Conversion
 *
 * Error responses are JSON:
 * ```json
 * {
 *   "message": "User not found",
 *   "status": 404
 * }
 * ```
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_internal() {
            tracing::error!("[Error] {}", self);
        } else {
            tracing::debug!("[Error] {} {}", status.as_u16(), self.message());
        }

        let body = serde_json::json!({
            "message": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
