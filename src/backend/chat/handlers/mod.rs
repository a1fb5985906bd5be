//! Chat Handlers Module
//!
//! ```text
//! handlers/
//! ├── mod.rs     - Module exports
//! └── history.rs - GET /api/messages
//! ```

/// Paginated history handler
pub mod history;

pub use history::{get_chat_history, HistoryQuery};
