/**
 * Image Upload Handler
 *
 * `POST /api/upload` (multipart, field `image`)
 *
 * Response:
 * ```json
 * {
 *   "imageUrl": "http://localhost:4000/uploads/image-1700000000000-3f2a….png",
 *   "filename": "image-1700000000000-3f2a….png"
 * }
 * ```
 */

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::config::ServerConfig;

/// Largest accepted image
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Request body limit for the upload route, leaving room for multipart framing
pub const UPLOAD_BODY_LIMIT: usize = MAX_IMAGE_BYTES + 1024 * 1024;

const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub image_url: String,
    pub filename: String,
}

/// File extension for an accepted image content type
pub fn image_extension(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some(".jpg"),
        "image/png" => Some(".png"),
        "image/gif" => Some(".gif"),
        "image/webp" => Some(".webp"),
        _ => None,
    }
}

/// `image-<millis>-<uuid><ext>`
pub fn stored_file_name(millis: i64, id: Uuid, extension: &str) -> String {
    format!("image-{}-{}{}", millis, id.simple(), extension)
}

pub async fn upload_image(
    State(config): State<Arc<ServerConfig>>,
    AuthUser(user): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, BackendError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let Some(extension) = image_extension(&content_type) else {
            tracing::debug!("[Upload] Rejected content type '{}' from {}", content_type, user.user_id);
            return Err(BackendError::validation("Only images are allowed (JPEG, PNG, GIF, WebP)"));
        };

        let data = field.bytes().await.map_err(multipart_error)?;
        if data.len() > MAX_IMAGE_BYTES {
            return Err(BackendError::validation("Image too large"));
        }

        let filename = stored_file_name(Utc::now().timestamp_millis(), Uuid::new_v4(), extension);
        tokio::fs::create_dir_all(&config.upload_dir).await?;
        tokio::fs::write(config.upload_dir.join(&filename), &data).await?;

        tracing::info!("[Upload] {} stored {} ({} bytes)", user.username, filename, data.len());

        return Ok(Json(UploadResponse {
            image_url: config.upload_url(&filename),
            filename,
        }));
    }

    Err(BackendError::validation("No image provided"))
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> BackendError {
    tracing::debug!("[Upload] Multipart error: {}", err);
    if err.status() == axum::http::StatusCode::PAYLOAD_TOO_LARGE {
        BackendError::validation("Image too large")
    } else {
        BackendError::validation(err.body_text())
    }
}
