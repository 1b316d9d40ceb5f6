//! Middleware for the feedhub API.

pub mod auth;
pub mod cors;

pub use auth::{inject_state, ApiKeyUser};
pub use cors::create_cors_layer;
