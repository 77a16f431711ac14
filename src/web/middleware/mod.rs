//! Middleware for the web API.

pub mod auth;
pub mod cors;

pub use auth::{require_role, require_session, require_session_api, CurrentSession};
pub use cors::create_cors_layer;
