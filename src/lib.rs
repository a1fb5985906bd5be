//! Plaza - Main Library
//!
//! Plaza is a small social/chat backend: a public chat room, one-to-one private
//! messaging, a posts feed with comments and reactions, user profiles and image
//! uploads. Clients talk to it over a JSON REST API and a persistent WebSocket
//! connection that carries named events.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types exchanged with clients
//!   - Users, private/public messages, posts
//!   - Realtime event envelopes (`ServerEvent` / `ClientEvent`)
//!   - Validation error types
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server, routes and middleware
//!   - Presence registry and realtime delivery
//!   - SQLite persistence through sqlx
//!
//! # Usage
//!
//! ```rust,ignore
//! use plaza::backend::server::{config::ServerConfig, init::create_app};
//!
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
