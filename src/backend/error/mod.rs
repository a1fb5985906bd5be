//! Backend Error Module
//!
//! Error types used by HTTP handlers. Every variant knows its HTTP status and
//! the message a client is allowed to see.
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - `IntoResponse` implementation
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! Client errors (400/401/403/404) carry their message verbatim. Internal
//! failures are logged and reported as `"Server error"` with status 500.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;
