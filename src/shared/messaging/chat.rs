//! Public Chat Message
//!
//! Messages in the single public room. Anonymous messages are broadcast but
//! never stored, so they carry no ID.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display name used for unauthenticated senders and deleted authors.
pub const ANONYMOUS_DISPLAY_NAME: &str = "anon";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Present only for persisted messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Author display name
    pub user: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Message from an unauthenticated connection.
    pub fn anonymous(content: String) -> Self {
        Self {
            id: None,
            user: ANONYMOUS_DISPLAY_NAME.to_string(),
            content,
            created_at: Utc::now(),
        }
    }
}

/// Payload of a `chat message` socket event: a bare string or `{content}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ChatMessageInput {
    Text(String),
    Body {
        #[serde(default)]
        content: Option<String>,
    },
}

impl ChatMessageInput {
    /// Trimmed text, or `None` when there is nothing to send.
    pub fn normalized(&self) -> Option<String> {
        let raw = match self {
            Self::Text(text) => text.as_str(),
            Self::Body { content } => content.as_deref().unwrap_or_default(),
        };
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Response of `GET /api/messages`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatHistoryPage {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    /// Oldest first within the page
    pub messages: Vec<ChatMessage>,
}
