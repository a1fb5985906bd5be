//! Chat Backend Module
//!
//! The public chat room: persistence of authenticated messages and the
//! paginated history endpoint. Live delivery happens over the socket (see
//! `realtime::delivery`).
//!
//! - **`db`** - Database operations for chat messages
//! - **`handlers`** - `GET /api/messages`

/// Database operations for chat messages
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use handlers::get_chat_history;
