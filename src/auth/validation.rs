//! Credential validation for hotelier.
//!
//! Runs before any store access in register and login.

use thiserror::Error;

use super::password::{validate_password, PasswordError, MAX_PASSWORD_LENGTH};

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 32;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Username or password is missing.
    #[error("Please fill in all fields")]
    MissingFields,

    /// Username is too long.
    #[error("username must be at most {MAX_USERNAME_LENGTH} characters")]
    UsernameTooLong,

    /// Username contains control characters.
    #[error("username contains invalid characters")]
    UsernameInvalidChars,

    /// Password is too long.
    #[error("password must be at most {MAX_PASSWORD_LENGTH} characters")]
    PasswordTooLong,
}

/// Validate a username.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }
    if username.chars().any(char::is_control) {
        return Err(ValidationError::UsernameInvalidChars);
    }
    Ok(())
}

/// Validate a username/password pair for registration.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), ValidationError> {
    // Either field missing reports the same message
    if username.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    validate_username(username)?;
    validate_password(password).map_err(|e| match e {
        PasswordError::TooLong => ValidationError::PasswordTooLong,
        _ => ValidationError::MissingFields,
    })
}
