//! Password hashing and validation for hotelier.
//!
//! Uses Argon2id for password hashing. Stored hashes are PHC strings that
//! carry their own salt and parameters.

use std::sync::OnceLock;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use rand_core::OsRng;
use thiserror::Error;
use tracing::warn;

/// Maximum password length.
pub const MAX_PASSWORD_LENGTH: usize = 128;

const DUMMY_PASSWORD: &str = "dummy-password-for-timing";

/// Hash verified against for unknown usernames, built on first use.
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Password is empty.
    #[error("password must not be empty")]
    Empty,

    /// Password is too long.
    #[error("password must be at most {MAX_PASSWORD_LENGTH} characters")]
    TooLong,

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// Password hash is invalid.
    #[error("invalid password hash format")]
    InvalidHash,

    /// Password verification failed (wrong password).
    #[error("password verification failed")]
    VerificationFailed,
}

/// Create the Argon2id hasher.
///
/// Parameters:
/// - Memory cost: 19 MiB (19456 KiB)
/// - Time cost: 2 iterations
/// - Parallelism: 1 lane
fn create_argon2() -> Result<Argon2<'static>, PasswordError> {
    let params =
        Params::new(19456, 2, 1, None).map_err(|e| PasswordError::HashError(e.to_string()))?;
    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}

/// Hash a password using Argon2id.
///
/// # Examples
///
/// ```
/// use hotelier::hash_password;
///
/// let hash = hash_password("pw1").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    validate_password(password)?;

    let salt = SaltString::generate(&mut OsRng);
    let hash = create_argon2()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
///
/// The parameters come from the parsed hash and the final comparison is
/// constant-time.
///
/// # Examples
///
/// ```
/// use hotelier::{hash_password, verify_password};
///
/// let hash = hash_password("pw1").unwrap();
/// assert!(verify_password("pw1", &hash).is_ok());
/// assert!(verify_password("wrong", &hash).is_err());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| PasswordError::VerificationFailed)
}

/// Burn the same amount of work as a real verification.
///
/// Called when the username does not exist so that response timing does not
/// reveal which half of the credentials was wrong.
pub fn verify_dummy_password(password: &str) {
    let hash = match DUMMY_HASH.get() {
        Some(hash) => hash,
        None => match hash_password(DUMMY_PASSWORD) {
            Ok(hash) => DUMMY_HASH.get_or_init(|| hash),
            // Not cached; the next call tries again
            Err(e) => {
                warn!(error = %e, "Dummy password hash unavailable");
                return;
            }
        },
    };
    let _ = verify_password(password, hash);
}

/// Validate password requirements.
///
/// Checks:
/// - Not empty
/// - Maximum length: 128 characters
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::Empty);
    }
    if password.chars().count() > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::TooLong);
    }
    Ok(())
}
