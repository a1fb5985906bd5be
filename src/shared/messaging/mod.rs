//! Messaging Module
//!
//! Data structures for the two messaging surfaces:
//!
//! - `ChatMessage` - A message in the public room
//! - `PrivateMessage` - A direct message between two users
//! - `ConversationSummary` - Latest message per conversation partner
//!
//! ```rust,ignore
//! use plaza::shared::messaging::{ChatMessage, PrivateMessage, normalize_content};
//! ```

pub mod chat;
pub mod conversation;
pub mod message;

pub use chat::{ChatHistoryPage, ChatMessage, ChatMessageInput, ANONYMOUS_DISPLAY_NAME};
pub use conversation::ConversationSummary;
pub use message::{
    normalize_content, OutgoingPrivateMessage, PrivateMessage, PrivateMessageInput,
    SendPrivateMessageRequest,
};
