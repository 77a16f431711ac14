//! API handlers for hotelier.

pub mod auth;
pub mod client;
pub mod room;
pub mod service;
pub mod session;
pub mod staff;
pub mod todo;
pub mod transfer;

pub use auth::*;
pub use client::*;
pub use room::*;
pub use service::*;
pub use session::*;
pub use staff::*;
pub use todo::*;
pub use transfer::*;

use std::time::Duration;

use axum::extract::FromRef;
use axum_extra::extract::cookie::{Cookie, Key, SameSite};

use crate::auth::SessionManager;
use crate::config::{SessionConfig, MAX_SESSION_TTL_SECS, MIN_SESSION_SECRET_LENGTH};
use crate::{Database, HotelError, Result};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Key signing the session cookie.
    pub cookie_key: Key,
    /// Session lifetime.
    pub session_ttl: Duration,
    /// Name of the session cookie.
    pub cookie_name: String,
    /// Whether the session cookie is marked `Secure`.
    pub secure_cookie: bool,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The cookie key is derived from the configured secret, which must be at
    /// least 32 bytes long. The session TTL must lie within
    /// `1..=MAX_SESSION_TTL_SECS`.
    pub fn new(db: Database, config: &SessionConfig) -> Result<Self> {
        if config.secret.len() < MIN_SESSION_SECRET_LENGTH {
            return Err(HotelError::Config(format!(
                "session secret must be at least {MIN_SESSION_SECRET_LENGTH} bytes"
            )));
        }
        if config.ttl_secs == 0 || config.ttl_secs > MAX_SESSION_TTL_SECS {
            return Err(HotelError::Config(format!(
                "session ttl_secs must be between 1 and {MAX_SESSION_TTL_SECS}"
            )));
        }

        Ok(Self {
            db,
            cookie_key: Key::derive_from(config.secret.as_bytes()),
            session_ttl: Duration::from_secs(config.ttl_secs),
            cookie_name: config.cookie_name.clone(),
            secure_cookie: config.secure_cookie,
        })
    }

    /// Session manager over this state's database.
    pub fn session_manager(&self) -> SessionManager<'_> {
        SessionManager::new(self.db.pool(), self.session_ttl)
    }

    /// Build the session cookie carrying `token`.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookie)
            .build()
    }

    /// Cookie used to clear the session cookie.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build(self.cookie_name.clone()).path("/").build()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
