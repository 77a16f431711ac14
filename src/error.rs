//! Error types for hotelier.

use thiserror::Error;

/// Common error type for hotelier.
#[derive(Error, Debug)]
pub enum HotelError {
    /// Database error.
    ///
    /// Database errors from sqlx are automatically converted, except for
    /// constraint violations which map to `Conflict` and `Validation`.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// A unique value is already taken.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for HotelError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                return HotelError::Conflict(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return HotelError::Validation("referenced record does not exist".to_string());
            }
        }
        HotelError::Database(e.to_string())
    }
}

/// Result type alias for hotelier operations.
pub type Result<T> = std::result::Result<T, HotelError>;
