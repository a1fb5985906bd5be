//! Private Messaging HTTP Handlers
//!
//! - GET   /api/private-messages/conversations/list
//! - GET   /api/private-messages/{user_id}
//! - POST  /api/private-messages/{recipient_id}
//! - PATCH /api/private-messages/{user_id}/read
//!
//! Messages sent here are stored only; they are not pushed over the socket.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::conversations;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::shared::messaging::{ConversationSummary, PrivateMessage, SendPrivateMessageRequest};

#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
    pub message: &'static str,
    pub updated: u64,
}

pub async fn list_conversations(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<ConversationSummary>>, BackendError> {
    let conversations = conversations::list_conversations(&pool, user.user_id).await?;
    Ok(Json(conversations))
}

/// The full conversation; marks the counterpart's messages read
pub async fn get_conversation(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(other): Path<Uuid>,
) -> Result<Json<Vec<PrivateMessage>>, BackendError> {
    let view = conversations::list_conversation(&pool, user.user_id, other).await?;
    Ok(Json(view.messages))
}

pub async fn send_private_message(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(recipient): Path<Uuid>,
    Json(request): Json<SendPrivateMessageRequest>,
) -> Result<(StatusCode, Json<PrivateMessage>), BackendError> {
    let content = request.content.unwrap_or_default();
    let message = conversations::send(&pool, user.user_id, recipient, &content).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn mark_conversation_read(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(other): Path<Uuid>,
) -> Result<Json<MarkReadResponse>, BackendError> {
    let updated = conversations::mark_read(&pool, user.user_id, other).await?;
    Ok(Json(MarkReadResponse {
        message: "Messages marked as read",
        updated,
    }))
}
