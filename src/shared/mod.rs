//! Shared Module
//!
//! Types that cross the wire, either as REST bodies or as realtime event
//! payloads. Everything here is serialized with camelCase field names.

/// Realtime event envelopes
pub mod event;

/// Shared error types
pub mod error;

/// Public chat and private messaging types
pub mod messaging;

/// Posts feed types
pub mod post;

/// User profile types
pub mod user;

pub use error::SharedError;
pub use event::{ClientEvent, PresenceStatus, ServerEvent, UserStatus};
pub use messaging::{ChatMessage, ConversationSummary, PrivateMessage};
pub use post::{Comment, Post};
pub use user::{UserProfile, UserSummary};
