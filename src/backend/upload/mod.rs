//! Upload Module
//!
//! Image uploads for posts, messages and profile pictures. Files are written
//! to the configured upload directory and served back under `/uploads`.

pub mod handlers;

pub use handlers::upload_image;
