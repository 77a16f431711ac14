//! Session introspection handler.

use axum::Json;

use crate::web::dto::{ApiResponse, SessionResponse};
use crate::web::middleware::CurrentSession;

/// GET /api/session - Describe the caller's session.
pub async fn current_session(
    CurrentSession(session): CurrentSession,
) -> Json<ApiResponse<SessionResponse>> {
    Json(ApiResponse::new(SessionResponse::from(&session)))
}
