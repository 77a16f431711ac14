//! Web front of hotelier.
//!
//! Session authentication routes, the todo list pages and the JSON records
//! API under `/api`.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
