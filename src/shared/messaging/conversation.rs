//! Conversation Summary
//!
//! One entry of a user's conversation list: the other participant and the
//! most recent message exchanged with them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::PrivateMessage;
use crate::shared::user::UserSummary;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    /// Counterpart user ID
    pub user_id: Uuid,
    pub user: UserSummary,
    pub last_message: PrivateMessage,
}

impl ConversationSummary {
    /// Build the entry for `viewer` from the latest message of a conversation.
    pub fn for_viewer(viewer: Uuid, last_message: PrivateMessage) -> Self {
        let user = last_message.counterpart_of(viewer).clone();
        Self {
            user_id: user.id,
            user,
            last_message,
        }
    }
}
