//! Middleware Module
//!
//! Request processing shared by handlers.
//!
//! - **`auth`** - Bearer token authentication, with a strict policy for REST
//!   routes and a lenient one for the socket handshake

pub mod auth;

pub use auth::{authenticate_lenient, authenticate_strict, bearer_token, AuthUser, AuthenticatedUser};
