//! Session authentication middleware.
//!
//! `require_session` gates pages (redirect to `/login`), `require_session_api`
//! gates JSON routes (401). Both put the resolved session into the request
//! extensions, where `require_role` and the [`CurrentSession`] extractor find
//! it. The role gate must be layered inside an authentication gate.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::{debug, warn};

use crate::db::{Role, Session};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Session of the authenticated caller.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentSession>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

/// Resolve the signed session cookie to a live session.
///
/// A missing, tampered, unknown or expired cookie resolves to `None`.
async fn resolve_session(
    state: &AppState,
    jar: &SignedCookieJar,
) -> Result<Option<Session>, ApiError> {
    let Some(cookie) = jar.get(&state.cookie_name) else {
        return Ok(None);
    };
    Ok(state.session_manager().resolve(cookie.value()).await?)
}

/// Authentication gate for pages: redirects anonymous requests to `/login`.
pub async fn require_session(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match resolve_session(&state, &jar).await {
        Ok(Some(session)) => {
            request.extensions_mut().insert(CurrentSession(session));
            next.run(request).await
        }
        Ok(None) => {
            debug!(path = %request.uri().path(), "No session, redirecting to login");
            Redirect::to("/login").into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Authentication gate for API routes: answers anonymous requests with 401.
pub async fn require_session_api(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = resolve_session(&state, &jar)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    request.extensions_mut().insert(CurrentSession(session));
    Ok(next.run(request).await)
}

/// Role gate: lets the request through only if the session role is `expected`.
///
/// Compares against the role snapshot in the session; the credential store
/// is not consulted. A request without a session is forbidden outright.
pub async fn require_role(expected: Role, request: Request, next: Next) -> Response {
    match request.extensions().get::<CurrentSession>() {
        Some(CurrentSession(session)) if session.role == expected => next.run(request).await,
        Some(CurrentSession(session)) => {
            warn!(
                username = %session.username,
                role = %session.role,
                required = %expected,
                "Access denied"
            );
            ApiError::forbidden("Access denied").into_response()
        }
        None => ApiError::forbidden("Access denied").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn session(role: Role) -> Session {
        Session {
            id: 1,
            token: "t".to_string(),
            user_id: 1,
            username: "alice".to_string(),
            role,
            created_at: "2024-01-01 00:00:00".to_string(),
            expires_at: "2099-01-01 00:00:00".to_string(),
        }
    }

    fn manager_only(inject: Option<Role>) -> Router {
        let router = Router::new()
            .route("/", get(|| async { "ok" }))
            .route_layer(middleware::from_fn(|req: Request, next: Next| {
                require_role(Role::Manager, req, next)
            }));

        match inject {
            Some(role) => router.layer(middleware::from_fn(
                move |mut req: Request, next: Next| async move {
                    req.extensions_mut().insert(CurrentSession(session(role)));
                    next.run(req).await
                },
            )),
            None => router,
        }
    }

    async fn status_of(router: Router) -> StatusCode {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        router.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_require_role_matching() {
        assert_eq!(status_of(manager_only(Some(Role::Manager))).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_require_role_mismatch() {
        assert_eq!(
            status_of(manager_only(Some(Role::Staff))).await,
            StatusCode::FORBIDDEN
        );
    }

    #[tokio::test]
    async fn test_require_role_anonymous() {
        assert_eq!(status_of(manager_only(None)).await, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_current_session_extractor_without_session() {
        let router = Router::new().route(
            "/",
            get(|CurrentSession(s): CurrentSession| async move { s.username }),
        );
        assert_eq!(status_of(router).await, StatusCode::UNAUTHORIZED);
    }
}
