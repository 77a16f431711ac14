//! Web API Authentication Tests
//!
//! Integration tests for register, login and logout.

mod common;

use axum::http::StatusCode;
use axum_extra::extract::cookie::Cookie;
use axum_test::TestServer;
use serde_json::{json, Value};

use common::{
    create_test_server, login, register_manager, register_staff, PASSWORD, SESSION_COOKIE,
};
use hotelier::{SessionRepository, UserRepository};

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_register_success() {
    let (server, db) = create_test_server().await;

    let response = server
        .post("/register")
        .json(&json!({
            "username": "alice",
            "password": PASSWORD
        }))
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/");

    let cookie = response.cookie(SESSION_COOKIE);
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));

    let user = UserRepository::new(db.pool())
        .get_by_username("alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.role.as_str(), "staff");
    assert_ne!(user.password, PASSWORD);

    // The cookie opens the session
    let body: Value = server
        .get("/api/session")
        .add_cookie(cookie)
        .await
        .json();
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["role"], "staff");
}

#[tokio::test]
async fn test_register_form_body() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/register")
        .form(&[("username", "bob"), ("password", PASSWORD), ("role", "manager")])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    let body: Value = server
        .get("/api/session")
        .add_cookie(response.cookie(SESSION_COOKIE))
        .await
        .json();
    assert_eq!(body["data"]["role"], "manager");
}

#[tokio::test]
async fn test_register_empty_role_is_default() {
    let (server, db) = create_test_server().await;

    server
        .post("/register")
        .json(&json!({"username": "carol", "password": PASSWORD, "role": ""}))
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let user = UserRepository::new(db.pool())
        .get_by_username("carol")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.role.as_str(), "staff");
}

#[tokio::test]
async fn test_register_unknown_role() {
    let (server, db) = create_test_server().await;

    let response = server
        .post("/register")
        .json(&json!({"username": "dave", "password": PASSWORD, "role": "owner"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(!UserRepository::new(db.pool())
        .username_exists("dave")
        .await
        .unwrap());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let (server, db) = create_test_server().await;
    register_staff(&server, "alice").await;

    let response = server
        .post("/register")
        .json(&json!({"username": "alice", "password": "other-password"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "CONFLICT");
    assert_eq!(body["error"]["message"], "Username is already taken");

    // Only the first registration opened a session
    assert_eq!(SessionRepository::new(db.pool()).count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_register_missing_fields() {
    let (server, db) = create_test_server().await;

    for body in [
        json!({"username": "", "password": PASSWORD}),
        json!({"username": "alice", "password": ""}),
        json!({}),
    ] {
        let response = server.post("/register").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"]["message"], "Please fill in all fields");
    }

    assert_eq!(SessionRepository::new(db.pool()).count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_register_malformed_json() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/register")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let (server, db) = create_test_server().await;
    register_manager(&server, "alice").await;

    let response = server
        .post("/login")
        .json(&json!({"username": "alice", "password": PASSWORD}))
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/");

    let body: Value = server
        .get("/api/session")
        .add_cookie(response.cookie(SESSION_COOKIE))
        .await
        .json();
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["role"], "manager");

    // Registration session plus login session
    assert_eq!(SessionRepository::new(db.pool()).count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_login_replaces_presented_session() {
    let (server, db) = create_test_server().await;
    let first = register_staff(&server, "alice").await;

    let response = server
        .post("/login")
        .add_cookie(first.clone())
        .json(&json!({"username": "alice", "password": PASSWORD}))
        .await;
    response.assert_status(StatusCode::SEE_OTHER);

    assert_eq!(SessionRepository::new(db.pool()).count().await.unwrap(), 1);
    server
        .get("/api/session")
        .add_cookie(first)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (server, db) = create_test_server().await;
    register_staff(&server, "alice").await;

    let response = server
        .post("/login")
        .json(&json!({"username": "alice", "password": "wrong-password"}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    assert_eq!(body["error"]["message"], "Invalid credentials");
    assert_eq!(SessionRepository::new(db.pool()).count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_login_unknown_user_same_error() {
    let (server, _db) = create_test_server().await;
    register_staff(&server, "alice").await;

    let wrong_password: Value = server
        .post("/login")
        .json(&json!({"username": "alice", "password": "wrong-password"}))
        .await
        .json();

    let response = server
        .post("/login")
        .json(&json!({"username": "nobody", "password": PASSWORD}))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let unknown_user: Value = response.json();
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn test_login_form_body() {
    let (server, _db) = create_test_server().await;
    register_staff(&server, "alice").await;

    server
        .post("/login")
        .form(&[("username", "alice"), ("password", PASSWORD)])
        .await
        .assert_status(StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_login_empty_credentials() {
    let (server, _db) = create_test_server().await;

    server
        .post("/login")
        .json(&json!({"username": "", "password": ""}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_oversized_password_is_invalid_credentials() {
    let (server, db) = create_test_server().await;
    register_staff(&server, "alice").await;

    let response = server
        .post("/login")
        .json(&json!({"username": "alice", "password": "x".repeat(129)}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Invalid credentials");
    assert_eq!(SessionRepository::new(db.pool()).count().await.unwrap(), 1);
}

// ============================================================================
// Logout Tests
// ============================================================================

#[tokio::test]
async fn test_logout_destroys_session() {
    let (server, db) = create_test_server().await;
    let cookie = login_after_register(&server).await;

    let response = server.get("/logout").add_cookie(cookie.clone()).await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/login");

    server
        .get("/api/session")
        .add_cookie(cookie)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(SessionRepository::new(db.pool()).count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let (server, _db) = create_test_server().await;
    let cookie = register_staff(&server, "alice").await;

    server
        .get("/logout")
        .add_cookie(cookie.clone())
        .await
        .assert_status(StatusCode::SEE_OTHER);
    server
        .get("/logout")
        .add_cookie(cookie)
        .await
        .assert_status(StatusCode::SEE_OTHER);
    server.get("/logout").await.assert_status(StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_tampered_cookie_is_anonymous() {
    let (server, _db) = create_test_server().await;
    let mut cookie = register_staff(&server, "alice").await;
    cookie.set_value(format!("{}x", cookie.value()));

    server
        .get("/api/session")
        .add_cookie(cookie)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

async fn login_after_register(server: &TestServer) -> Cookie<'static> {
    register_staff(server, "alice").await;
    login(server, "alice", PASSWORD).await
}
