//! Private Message Data Structure
//!
//! Represents a direct message between two users, plus the inbound shapes a
//! client uses to send one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::user::UserSummary;

/// A stored direct message with both parties resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrivateMessage {
    /// Unique message ID
    pub id: Uuid,
    pub sender: UserSummary,
    pub recipient: UserSummary,
    /// Trimmed text; empty only for image-only messages
    pub content: String,
    pub image_url: Option<String>,
    /// Whether the recipient has read it
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl PrivateMessage {
    /// The participant that is not `user_id`.
    ///
    /// For a message a user sent to themselves this is the user.
    pub fn counterpart_of(&self, user_id: Uuid) -> &UserSummary {
        if self.sender.id == user_id {
            &self.recipient
        } else {
            &self.sender
        }
    }
}

/// Body of `POST /api/private-messages/{recipient}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendPrivateMessageRequest {
    #[serde(default)]
    pub content: Option<String>,
}

/// Payload of a `private message` socket event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrivateMessageInput {
    pub recipient_id: Uuid,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A socket-originated private message that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingPrivateMessage {
    pub recipient_id: Uuid,
    pub content: String,
    pub image_url: Option<String>,
}

impl PrivateMessageInput {
    /// Trim the text and require either text or an image.
    pub fn validate(self) -> Result<OutgoingPrivateMessage, SharedError> {
        let content = self.content.trim().to_string();
        let image_url = self
            .image_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        if content.is_empty() && image_url.is_none() {
            return Err(SharedError::validation("content", "Content required"));
        }

        Ok(OutgoingPrivateMessage {
            recipient_id: self.recipient_id,
            content,
            image_url,
        })
    }
}

/// Trim message text, rejecting text that is empty after trimming.
pub fn normalize_content(raw: &str) -> Result<String, SharedError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SharedError::validation("content", "Content required"));
    }
    Ok(trimmed.to_string())
}
