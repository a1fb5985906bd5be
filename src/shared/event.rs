//! Real-time Event System
//!
//! Every frame on the socket is a JSON envelope `{"event": <name>, "data": <payload>}`.
//! `ServerEvent` covers what the server pushes, `ClientEvent` what it accepts.
//!
//! ```text
//! {"event":"chat message","data":{"id":"…","user":"alice","content":"hi","createdAt":"…"}}
//! {"event":"user status","data":{"userId":"…","status":"online"}}
//! ```
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::messaging::{ChatMessage, ChatMessageInput, PrivateMessage, PrivateMessageInput};
use crate::shared::post::{Post, PostCommented, PostDeleted, ReactionSummary};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PresenceStatus {
    Online,
    Offline,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserStatus {
    pub user_id: Uuid,
    pub status: PresenceStatus,
}

/// Event pushed from the server to connected clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// Public chat message, broadcast to everyone
    #[serde(rename = "chat message")]
    ChatMessage(ChatMessage),
    /// Private message, delivered to the recipient's connection
    #[serde(rename = "private message")]
    PrivateMessage(PrivateMessage),
    /// Acknowledgement to the sender's own connection
    #[serde(rename = "private message sent")]
    PrivateMessageSent(PrivateMessage),
    #[serde(rename = "user status")]
    UserStatus(UserStatus),
    #[serde(rename = "post created")]
    PostCreated(Post),
    #[serde(rename = "post commented")]
    PostCommented(PostCommented),
    #[serde(rename = "post reacted")]
    PostReacted(ReactionSummary),
    #[serde(rename = "post updated")]
    PostUpdated(Post),
    #[serde(rename = "post deleted")]
    PostDeleted(PostDeleted),
}

impl ServerEvent {
    pub fn online(user_id: Uuid) -> Self {
        Self::UserStatus(UserStatus {
            user_id,
            status: PresenceStatus::Online,
        })
    }

    pub fn offline(user_id: Uuid) -> Self {
        Self::UserStatus(UserStatus {
            user_id,
            status: PresenceStatus::Offline,
        })
    }

    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChatMessage(_) => "chat message",
            Self::PrivateMessage(_) => "private message",
            Self::PrivateMessageSent(_) => "private message sent",
            Self::UserStatus(_) => "user status",
            Self::PostCreated(_) => "post created",
            Self::PostCommented(_) => "post commented",
            Self::PostReacted(_) => "post reacted",
            Self::PostUpdated(_) => "post updated",
            Self::PostDeleted(_) => "post deleted",
        }
    }

    /// Serialize into a text frame
    pub fn to_frame(&self) -> Result<String, SharedError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Event sent by a client over its socket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "chat message")]
    ChatMessage(ChatMessageInput),
    #[serde(rename = "private message")]
    PrivateMessage(PrivateMessageInput),
}

impl ClientEvent {
    /// Parse a text frame
    pub fn from_frame(frame: &str) -> Result<Self, SharedError> {
        Ok(serde_json::from_str(frame)?)
    }
}
