/**
 * Post HTTP Handlers
 *
 * - `GET    /api/posts` - Feed, newest first (public)
 * - `POST   /api/posts` - Create a post
 * - `PUT    /api/posts/{post_id}` - Edit own post
 * - `DELETE /api/posts/{post_id}` - Delete own post
 * - `POST   /api/posts/{post_id}/comments` - Comment on a post
 * - `POST   /api/posts/{post_id}/react` - Toggle own reaction
 *
 * Successful mutations are broadcast as `post *` events to every socket.
 */

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::db;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::{AuthUser, AuthenticatedUser};
use crate::backend::realtime::{broadcast_event, RealtimeEventBroadcast};
use crate::shared::messaging::normalize_content;
use crate::shared::post::{
    Comment, CreateCommentRequest, CreatePostRequest, Post, PostCommented, PostDeleted, ReactionSummary,
    UpdatePostRequest,
};
use crate::shared::ServerEvent;

const POST_NOT_FOUND: &str = "Post not found";

#[derive(Debug, Serialize)]
pub struct DeletePostResponse {
    pub message: &'static str,
}

/// Ensure the post exists and belongs to `user`
async fn require_owner(pool: &SqlitePool, post_id: Uuid, user: &AuthenticatedUser) -> Result<(), BackendError> {
    let author = db::post_author(pool, post_id)
        .await?
        .ok_or_else(|| BackendError::not_found(POST_NOT_FOUND))?;

    if author != user.user_id {
        tracing::warn!("[Posts] {} tried to modify post {} owned by {}", user.user_id, post_id, author);
        return Err(BackendError::forbidden("Unauthorized"));
    }
    Ok(())
}

pub async fn list_posts(State(pool): State<SqlitePool>) -> Result<Json<Vec<Post>>, BackendError> {
    Ok(Json(db::list_posts(&pool).await?))
}

pub async fn create_post(
    State(pool): State<SqlitePool>,
    State(realtime): State<RealtimeEventBroadcast>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreatePostRequest>,
) -> Result<Json<Post>, BackendError> {
    let content = normalize_content(&request.content)?;
    let image_url = request.image_url.as_deref().filter(|url| !url.is_empty());

    let post = db::create_post(&pool, user.user_id, &content, image_url).await?;
    tracing::info!("[Posts] {} created post {}", user.username, post.id);

    broadcast_event(&realtime, ServerEvent::PostCreated(post.clone()));
    Ok(Json(post))
}

pub async fn add_comment(
    State(pool): State<SqlitePool>,
    State(realtime): State<RealtimeEventBroadcast>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<Uuid>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<Json<Comment>, BackendError> {
    let content = normalize_content(&request.content)?;
    if db::post_author(&pool, post_id).await?.is_none() {
        return Err(BackendError::not_found(POST_NOT_FOUND));
    }

    let comment = db::create_comment(&pool, post_id, user.user_id, &content).await?;

    broadcast_event(
        &realtime,
        ServerEvent::PostCommented(PostCommented {
            post_id,
            comment: comment.clone(),
        }),
    );
    Ok(Json(comment))
}

pub async fn toggle_reaction(
    State(pool): State<SqlitePool>,
    State(realtime): State<RealtimeEventBroadcast>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<ReactionSummary>, BackendError> {
    if db::post_author(&pool, post_id).await?.is_none() {
        return Err(BackendError::not_found(POST_NOT_FOUND));
    }

    let summary = db::toggle_reaction(&pool, post_id, user.user_id).await?;

    broadcast_event(&realtime, ServerEvent::PostReacted(summary.clone()));
    Ok(Json(summary))
}

pub async fn update_post(
    State(pool): State<SqlitePool>,
    State(realtime): State<RealtimeEventBroadcast>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<Uuid>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<Post>, BackendError> {
    require_owner(&pool, post_id, &user).await?;

    let content = request
        .content
        .as_deref()
        .map(str::trim)
        .filter(|content| !content.is_empty());
    let image_url = request.image_url.as_ref().map(|url| url.as_deref());

    let post = db::update_post(&pool, post_id, content, image_url)
        .await?
        .ok_or_else(|| BackendError::not_found(POST_NOT_FOUND))?;

    broadcast_event(&realtime, ServerEvent::PostUpdated(post.clone()));
    Ok(Json(post))
}

pub async fn delete_post(
    State(pool): State<SqlitePool>,
    State(realtime): State<RealtimeEventBroadcast>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<DeletePostResponse>, BackendError> {
    require_owner(&pool, post_id, &user).await?;

    db::delete_post(&pool, post_id).await?;
    tracing::info!("[Posts] {} deleted post {}", user.username, post_id);

    broadcast_event(&realtime, ServerEvent::PostDeleted(PostDeleted { post_id }));
    Ok(Json(DeletePostResponse { message: "Post deleted" }))
}
