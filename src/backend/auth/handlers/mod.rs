//! Authentication Handlers Module
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── register.rs - User registration handler
//! ├── login.rs    - User authentication handler
//! └── profile.rs  - Profile read/update and user listing
//! ```
//!
//! - **`register`** - POST /api/auth/register
//! - **`login`** - POST /api/auth/login
//! - **`get_profile`** / **`update_profile`** - GET/PUT /api/auth/profile
//! - **`get_profile_by_username`** - GET /api/auth/profile/{username}
//! - **`list_users`** - GET /api/auth/users/list/all

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Profile handlers
pub mod profile;

pub use types::{AuthResponse, AuthUserResponse, LoginRequest, RegisterRequest, UpdateProfileRequest};

pub use login::login;
pub use profile::{get_profile, get_profile_by_username, list_users, update_profile};
pub use register::register;
