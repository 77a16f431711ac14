//! Authentication handlers.
//!
//! Register, login and logout. Success answers with a redirect and a fresh
//! signed session cookie.

use axum::{extract::State, response::Redirect};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::debug;

use crate::auth::{RegistrationRequest, SessionManager};
use crate::web::dto::{LoginRequest, RegisterRequest, Validated};
use crate::web::error::ApiError;

use super::AppState;

/// POST /login - Log in and start a session.
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Validated(req): Validated<LoginRequest>,
) -> Result<(SignedCookieJar, Redirect), ApiError> {
    let manager = state.session_manager();
    let session = manager.login(&req.username, &req.password).await?;

    let jar = end_previous_session(&manager, jar, &state.cookie_name).await?;
    Ok((jar.add(state.session_cookie(session.token)), Redirect::to("/")))
}

/// POST /register - Create an account and start a session.
pub async fn register(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Validated(req): Validated<RegisterRequest>,
) -> Result<(SignedCookieJar, Redirect), ApiError> {
    let role = req.role()?;
    let mut request = RegistrationRequest::new(req.username, req.password);
    request.role = role;

    let manager = state.session_manager();
    let session = manager.register(request).await?;

    let jar = end_previous_session(&manager, jar, &state.cookie_name).await?;
    Ok((jar.add(state.session_cookie(session.token)), Redirect::to("/")))
}

/// GET /logout - Destroy the session and return to the login page.
///
/// Succeeds whether or not a session exists.
pub async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Redirect), ApiError> {
    let token = jar.get(&state.cookie_name).map(|c| c.value().to_string());
    state.session_manager().logout(token.as_deref()).await?;

    Ok((jar.remove(state.removal_cookie()), Redirect::to("/login")))
}

/// Destroy the session referenced by the incoming cookie, if any.
async fn end_previous_session(
    manager: &SessionManager<'_>,
    jar: SignedCookieJar,
    cookie_name: &str,
) -> Result<SignedCookieJar, ApiError> {
    if let Some(cookie) = jar.get(cookie_name) {
        debug!("Replacing previous session");
        manager.logout(Some(cookie.value())).await?;
    }
    Ok(jar)
}
