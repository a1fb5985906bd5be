//! Backend Module
//!
//! All server-side code for Plaza: an Axum HTTP server with a WebSocket
//! gateway, SQLite persistence and JWT authentication.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Registration, login, profiles, JWT tokens
//! - **`middleware`** - Strict and lenient token authentication
//! - **`realtime`** - WebSocket gateway, presence and event delivery
//! - **`messaging`** - Private message storage and REST endpoints
//! - **`chat`** - Public chat storage and history
//! - **`posts`** - Feed, comments and reactions
//! - **`upload`** - Image uploads
//! - **`error`** - Backend error type and JSON error responses
//!
//! ```text
//! backend/
//! ├── mod.rs       - Module exports and documentation
//! ├── main.rs      - Server binary
//! ├── server/      - Initialization, state, configuration
//! ├── routes/      - Route configuration
//! ├── auth/        - Authentication
//! ├── middleware/  - Request authentication
//! ├── realtime/    - Socket gateway and delivery
//! ├── messaging/   - Private messages
//! ├── chat/        - Public chat
//! ├── posts/       - Feed
//! ├── upload/      - Image uploads
//! └── error/       - Error types
//! ```
//!
//! # State Management
//!
//! Handlers share one `AppState` holding the database pool, the loaded
//! configuration, the broadcast channel and the presence registry. Handlers
//! extract only the part they need through `FromRef`.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`; errors render as
//! `{"message": ..., "status": ...}`. Internal failures are logged and
//! reported to the client as "Server error".

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Real-time gateway, presence and delivery
pub mod realtime;

/// Private messaging
pub mod messaging;

/// Public chat history
pub mod chat;

/// Posts feed
pub mod posts;

/// Image uploads
pub mod upload;

pub use error::BackendError;
pub use realtime::{broadcast_event, PresenceRegistry, RealtimeEventBroadcast};
pub use server::init::create_app;
pub use server::{AppState, ServerConfig};
