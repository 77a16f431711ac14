//! Response DTOs for the web API.

use serde::Serialize;

use crate::db::{Role, Session};

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Current session snapshot (for `GET /api/session`).
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// User ID.
    pub user_id: i64,
    /// Username at login time.
    pub username: String,
    /// Role snapshot.
    pub role: Role,
    /// Expiration timestamp (UTC).
    pub expires_at: String,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            user_id: session.user_id,
            username: session.username.clone(),
            role: session.role,
            expires_at: session.expires_at.clone(),
        }
    }
}
