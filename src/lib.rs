//! hotelier - hotel back end.
//!
//! Session-based authentication with role gating in front of the hotel
//! records (clients, rooms, services, staff, transfers) and a shared todo
//! list, served over HTTP with axum and stored in SQLite.
//!
//! ```
//! let hash = hotelier::hash_password("correct horse battery").unwrap();
//! assert!(hotelier::verify_password("correct horse battery", &hash).is_ok());
//! ```

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod hotel;
pub mod logging;
pub mod todo;
pub mod web;

pub use auth::{
    hash_password, validate_credentials, validate_password, verify_password, AuthError,
    PasswordError, RegistrationRequest, SessionManager, ValidationError,
};
pub use config::Config;
pub use db::{Database, NewUser, Role, Session, SessionRepository, User, UserRepository};
pub use error::{HotelError, Result};
pub use web::WebServer;
