//! Test helpers for the web API tests.
//!
//! Builds an in-process server over an in-memory database and provides
//! helpers to obtain session cookies.

#![allow(dead_code)]

use axum::http::StatusCode;
use axum_extra::extract::cookie::Cookie;
use axum_test::TestServer;
use serde_json::json;

use hotelier::config::SessionConfig;
use hotelier::web::router::{create_health_router, create_router};
use hotelier::web::AppState;
use hotelier::Database;

/// Session cookie name used by the default configuration.
pub const SESSION_COOKIE: &str = "hotelier_session";

/// Secret long enough to derive a signing key.
pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Password used by the helpers.
pub const PASSWORD: &str = "password123";

/// Create a test session configuration.
pub fn session_config() -> SessionConfig {
    SessionConfig {
        secret: TEST_SECRET.to_string(),
        ..Default::default()
    }
}

/// Create a test server with an in-memory database.
pub async fn create_test_server() -> (TestServer, Database) {
    create_test_server_with(session_config()).await
}

/// Create a test server with a custom session configuration.
pub async fn create_test_server_with(config: SessionConfig) -> (TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let state = AppState::new(db.clone(), &config).expect("Failed to create app state");

    let router = create_router(state, &[]).merge(create_health_router());
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, db)
}

/// Register a user and return the session cookie.
pub async fn register(server: &TestServer, username: &str, role: &str) -> Cookie<'static> {
    let response = server
        .post("/register")
        .json(&json!({
            "username": username,
            "password": PASSWORD,
            "role": role
        }))
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    response.cookie(SESSION_COOKIE)
}

/// Register a manager and return the session cookie.
pub async fn register_manager(server: &TestServer, username: &str) -> Cookie<'static> {
    register(server, username, "manager").await
}

/// Register a staff member and return the session cookie.
pub async fn register_staff(server: &TestServer, username: &str) -> Cookie<'static> {
    register(server, username, "staff").await
}

/// Log in and return the session cookie.
pub async fn login(server: &TestServer, username: &str, password: &str) -> Cookie<'static> {
    let response = server
        .post("/login")
        .json(&json!({
            "username": username,
            "password": password
        }))
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    response.cookie(SESSION_COOKIE)
}
