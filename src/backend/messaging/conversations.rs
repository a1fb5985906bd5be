//! Conversation operations
//!
//! Each operation is scoped to the calling user `me`. Reading a conversation
//! marks the counterpart's messages to `me` as read, but the returned list
//! still shows the flags as they were before the call.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::messaging::db;
use crate::shared::messaging::{normalize_content, ConversationSummary, PrivateMessage};

/// Maximum number of entries in a conversation list
pub const CONVERSATION_LIST_LIMIT: i64 = 50;

/// Result of reading a conversation
#[derive(Debug, Clone)]
pub struct ConversationView {
    /// Oldest first, read flags as they were before this read
    pub messages: Vec<PrivateMessage>,
    /// How many `other → me` messages this read marked
    pub marked_read: u64,
}

/// All messages between `me` and `other`, then mark the returned `other → me` ones read
pub async fn list_conversation(
    pool: &SqlitePool,
    me: Uuid,
    other: Uuid,
) -> Result<ConversationView, BackendError> {
    let db::ConversationRows { messages, last_seq } = db::get_messages_between(pool, me, other).await?;
    let marked_read = match last_seq {
        Some(through) => db::mark_read_through(pool, other, me, through).await?,
        None => 0,
    };

    if marked_read > 0 {
        tracing::debug!("[Messaging] {} marked {} messages from {} read", me, marked_read, other);
    }

    Ok(ConversationView { messages, marked_read })
}

/// Latest message per counterpart, newest first
pub async fn list_conversations(pool: &SqlitePool, me: Uuid) -> Result<Vec<ConversationSummary>, BackendError> {
    let latest = db::get_latest_per_counterpart(pool, me, CONVERSATION_LIST_LIMIT).await?;

    Ok(latest
        .into_iter()
        .map(|message| ConversationSummary::for_viewer(me, message))
        .collect())
}

/// Store a text message from `me` to `recipient`
///
/// 400 if the text is empty after trimming, 404 if the recipient is unknown.
pub async fn send(
    pool: &SqlitePool,
    me: Uuid,
    recipient: Uuid,
    content: &str,
) -> Result<PrivateMessage, BackendError> {
    let content = normalize_content(content)?;

    if get_user_by_id(pool, recipient).await?.is_none() {
        return Err(BackendError::not_found("User not found"));
    }

    let message = db::create_private_message(pool, me, recipient, &content, None).await?;
    tracing::info!("[Messaging] {} → {}: message {}", me, recipient, message.id);

    Ok(message)
}

/// Mark every unread `other → me` message read; idempotent
pub async fn mark_read(pool: &SqlitePool, me: Uuid, other: Uuid) -> Result<u64, BackendError> {
    Ok(db::mark_read(pool, other, me).await?)
}
