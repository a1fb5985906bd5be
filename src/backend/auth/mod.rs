//! Authentication Module
//!
//! User registration, login, profiles and session tokens.
//!
//! - **`users`** - User data model and database operations
//! - **`sessions`** - JWT token generation and validation
//! - **`handlers`** - HTTP handlers for `/api/auth`
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── register.rs - User registration handler
//!     ├── login.rs    - User authentication handler
//!     └── profile.rs  - Profile and user listing handlers
//! ```
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - JWT tokens (HS256) are used for stateless authentication
//! - Tokens expire after 30 days
//! - Unknown user and wrong password produce the same "Invalid credentials"

/// User data model and database operations
pub mod users;

/// JWT token management
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_profile, get_profile_by_username, list_users, login, register, update_profile};
pub use sessions::{create_token, verify_token, Claims};
pub use users::User;
