//! Common test utilities and helpers
//!
//! - `app` - In-memory application fixture
//! - `auth_helpers` - Registering users and authenticated requests
//! - `assertions` - Error body assertions

pub mod assertions;
pub mod auth_helpers;

pub use app::*;
pub use assertions::*;
pub use auth_helpers::*;
