//! Authentication module for hotelier.
//!
//! This module provides password hashing, credential validation and the
//! session lifecycle (register, login, logout).

mod password;
mod session;
pub mod validation;

pub use password::{
    hash_password, validate_password, verify_dummy_password, verify_password, PasswordError,
};
pub use session::{AuthError, RegistrationRequest, SessionManager, DEFAULT_SESSION_DURATION_SECS};
pub use validation::{validate_credentials, ValidationError};
