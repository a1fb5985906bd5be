//! Messaging Module
//!
//! The REST side of private messaging.
//!
//! - **`db`** - Private message storage
//! - **`conversations`** - Conversation operations (list, send, mark read)
//! - **`handlers`** - HTTP handlers for `/api/private-messages`
//!
//! Read state only moves from unread to read, and only for messages a given
//! sender addressed to a given recipient.

pub mod conversations;
pub mod db;
pub mod handlers;

pub use handlers::{get_conversation, list_conversations, mark_conversation_read, send_private_message};
