//! Authentication session management for hotelier.
//!
//! Registration, login and logout against the credential store and the
//! session store.

use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_dummy_password, verify_password, PasswordError};
use crate::auth::validation::{validate_credentials, ValidationError};
use crate::db::{
    DbPool, NewSession, NewUser, Role, Session, SessionRepository, User, UserRepository,
    TIMESTAMP_FORMAT,
};
use crate::HotelError;

/// Default session lifetime (1 hour).
pub const DEFAULT_SESSION_DURATION_SECS: u64 = 60 * 60;

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Username already exists.
    #[error("Username is already taken")]
    UsernameTaken,

    /// Unknown username or wrong password. Deliberately does not say which.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Password hashing failed.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Store failure.
    #[error("database error: {0}")]
    Database(String),
}

impl From<HotelError> for AuthError {
    fn from(e: HotelError) -> Self {
        match e {
            HotelError::Conflict(_) => AuthError::UsernameTaken,
            other => AuthError::Database(other.to_string()),
        }
    }
}

/// Registration request data.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Desired username.
    pub username: String,
    /// Plaintext password; hashed before it reaches the store.
    pub password: String,
    /// Requested role; the lowest privilege when omitted.
    pub role: Option<Role>,
}

impl RegistrationRequest {
    /// Create a new registration request with the default role.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: None,
        }
    }

    /// Set the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}

/// Session manager binding the credential store to the session store.
pub struct SessionManager<'a> {
    pool: &'a DbPool,
    ttl: Duration,
}

impl<'a> SessionManager<'a> {
    /// Create a session manager issuing sessions that live for `ttl`.
    pub fn new(pool: &'a DbPool, ttl: Duration) -> Self {
        Self { pool, ttl }
    }

    /// Register a new user and open a session for it.
    ///
    /// This function:
    /// 1. Validates the credentials
    /// 2. Checks if the username already exists
    /// 3. Hashes the password
    /// 4. Creates the user and a session bound to it
    pub async fn register(&self, request: RegistrationRequest) -> Result<Session, AuthError> {
        validate_credentials(&request.username, &request.password)?;

        let users = UserRepository::new(self.pool);
        if users.username_exists(&request.username).await? {
            warn!(username = %request.username, "Registration rejected: username taken");
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = hash_blocking(request.password).await?;
        let role = request.role.unwrap_or_default();

        // The unique index still guards against a concurrent registration
        let user = users
            .create(&NewUser::new(&request.username, password_hash).with_role(role))
            .await?;

        info!(
            username = %user.username,
            user_id = user.id,
            role = %user.role,
            "New user registered"
        );

        self.open_session(&user).await
    }

    /// Log a user in.
    ///
    /// An unknown username and a wrong password both yield
    /// [`AuthError::InvalidCredentials`] after the same amount of hashing work.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let user = UserRepository::new(self.pool)
            .get_by_username(username)
            .await?;

        let password = password.to_string();
        let user = match user {
            Some(user) => {
                let hash = user.password.clone();
                let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
                    .await
                    .map_err(|e| PasswordError::HashError(e.to_string()))?;
                if verified.is_err() {
                    warn!(username = %username, "Login failed: wrong password");
                    return Err(AuthError::InvalidCredentials);
                }
                user
            }
            None => {
                tokio::task::spawn_blocking(move || verify_dummy_password(&password))
                    .await
                    .map_err(|e| PasswordError::HashError(e.to_string()))?;
                warn!(username = %username, "Login failed: user not found");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let session = self.open_session(&user).await?;
        info!(
            username = %user.username,
            user_id = user.id,
            "Login successful"
        );
        Ok(session)
    }

    /// Destroy a session.
    ///
    /// Idempotent: a missing or already destroyed session is not an error.
    pub async fn logout(&self, token: Option<&str>) -> Result<(), AuthError> {
        let Some(token) = token else {
            debug!("Logout without session cookie");
            return Ok(());
        };

        if SessionRepository::new(self.pool).delete(token).await? {
            info!("Session logged out");
        } else {
            debug!("Logout: session not found");
        }
        Ok(())
    }

    /// Resolve a cookie token to a live session.
    ///
    /// Unknown and expired tokens both resolve to `None`.
    pub async fn resolve(&self, token: &str) -> Result<Option<Session>, AuthError> {
        Ok(SessionRepository::new(self.pool).get_valid(token).await?)
    }

    /// Create a session for a user, snapshotting its role.
    async fn open_session(&self, user: &User) -> Result<Session, AuthError> {
        let now = Utc::now();
        let expires_at = chrono::Duration::from_std(self.ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AuthError::Database(format!("session lifetime out of range: {:?}", self.ttl))
            })?;

        let new_session = NewSession {
            token: Uuid::new_v4().to_string(),
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
            created_at: now.format(TIMESTAMP_FORMAT).to_string(),
            expires_at: expires_at.format(TIMESTAMP_FORMAT).to_string(),
        };

        let session = SessionRepository::new(self.pool)
            .create(&new_session)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?;

        debug!(user_id = user.id, expires_at = %session.expires_at, "Session created");
        Ok(session)
    }
}

/// Hash a password off the async runtime.
async fn hash_blocking(password: String) -> Result<String, AuthError> {
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| PasswordError::HashError(e.to_string()))??;
    Ok(hash)
}
