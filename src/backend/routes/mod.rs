//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! - **`router`** - Main router creation, static files and layers
//! - **`api_routes`** - REST endpoints under `/api`
//!
//! ```text
//! routes/
//! ├── mod.rs        - Module exports and documentation
//! ├── router.rs     - Main router creation
//! └── api_routes.rs - API endpoint table
//! ```
//!
//! ## Top-level routes
//!
//! - `GET /health` - Liveness and online user count
//! - `GET /ws` - WebSocket gateway
//! - `GET /uploads/*` - Uploaded images
//!
//! Everything else lives under `/api` (see `api_routes`).

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

pub use router::create_router;
