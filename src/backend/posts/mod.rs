//! Posts Module
//!
//! The public feed: posts, comments and reactions. Every mutation is
//! broadcast to all socket connections after it is stored.
//!
//! - **`db`** - Post, comment and reaction storage
//! - **`handlers`** - HTTP handlers for `/api/posts`

pub mod db;
pub mod handlers;

pub use handlers::{add_comment, create_post, delete_post, list_posts, toggle_reaction, update_post};
