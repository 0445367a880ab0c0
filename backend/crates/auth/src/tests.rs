//! Router-level tests for the auth endpoints and bearer guard.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::AuthConfig;
use crate::infra::memory::{MemoryAuthRepository, MemoryTokenStore};
use crate::presentation::handlers::AuthAppState;
use crate::presentation::router::auth_router;

type TestState = AuthAppState<MemoryAuthRepository, MemoryTokenStore>;

fn test_state() -> TestState {
    AuthAppState::new(
        MemoryAuthRepository::new(),
        MemoryTokenStore::new(),
        AuthConfig::development(),
    )
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn with_auth(method: &str, uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

async fn register_and_login(app: &Router, username: &str) -> String {
    let (status, _) = send(
        app,
        post_json(
            "/register",
            json!({"username": username, "password": "correct-horse"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        app,
        post_json(
            "/login",
            json!({"username": username, "password": "correct-horse"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_register_returns_public_view() {
    let app = auth_router(test_state());

    let (status, body) = send(
        &app,
        post_json(
            "/register",
            json!({"username": "alice", "password": "correct-horse", "role": "admin"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "username": "alice", "role": "admin"}));
}

#[tokio::test]
async fn test_register_duplicate_is_bad_request() {
    let app = auth_router(test_state());
    let req = || post_json("/register", json!({"username": "alice", "password": "correct-horse"}));

    send(&app, req()).await;
    let (status, body) = send(&app, req()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Username already taken");
    assert_eq!(body["code"], "username_taken");
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = auth_router(test_state());
    let (status, body) = send(
        &app,
        post_json("/register", json!({"username": "alice", "password": "short"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_login_issues_bearer_token() {
    let app = auth_router(test_state());
    let token = register_and_login(&app, "alice").await;
    assert_eq!(token.len(), 32);

    let (_, body) = send(
        &app,
        post_json("/login", json!({"username": "alice", "password": "correct-horse"})),
    )
    .await;
    assert_eq!(body["token_type"], "bearer");
    // Each login mints a new token
    assert_ne!(body["access_token"], token.as_str());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = auth_router(test_state());
    register_and_login(&app, "alice").await;

    let (wrong_pw_status, wrong_pw) = send(
        &app,
        post_json("/login", json!({"username": "alice", "password": "wrong-horse"})),
    )
    .await;
    let (no_user_status, no_user) = send(
        &app,
        post_json("/login", json!({"username": "nobody", "password": "correct-horse"})),
    )
    .await;

    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(no_user_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw, no_user);
    assert_eq!(wrong_pw["detail"], "Invalid username or password");
}

#[tokio::test]
async fn test_guard_accepts_live_token() {
    let app = auth_router(test_state());
    let token = register_and_login(&app, "alice").await;

    let (status, body) = send(
        &app,
        with_auth("GET", "/me", Some(&format!("Bearer {token}"))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn test_guard_rejections() {
    let app = auth_router(test_state());
    register_and_login(&app, "alice").await;

    let cases = [
        (None, "Missing or invalid token"),
        (Some("Basic abc"), "Missing or invalid token"),
        (Some("bearer abc"), "Missing or invalid token"),
        (Some("Bearer "), "Invalid or expired token"),
        (Some("Bearer  abc"), "Invalid or expired token"),
        (Some("Bearer not-a-real-token"), "Invalid or expired token"),
    ];

    for (authorization, detail) in cases {
        let (status, body) = send(&app, with_auth("GET", "/me", authorization)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{authorization:?}");
        assert_eq!(body["detail"], detail, "{authorization:?}");
    }
}

#[tokio::test]
async fn test_guard_rejects_token_of_vanished_user() {
    let state = test_state();
    let users = state.users.clone();
    let app = auth_router(state);
    let token = register_and_login(&app, "alice").await;

    users.remove(kernel::id::UserId::from_i64(1)).await.unwrap();

    let (status, body) = send(
        &app,
        with_auth("GET", "/me", Some(&format!("Bearer {token}"))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "User not found");
}

#[tokio::test]
async fn test_logout_revokes_only_presented_token() {
    let app = auth_router(test_state());
    let first = register_and_login(&app, "alice").await;
    let second = register_and_login(&app, "bob").await;

    let (status, body) = send(
        &app,
        with_auth("POST", "/logout", Some(&format!("Bearer {first}"))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Successfully logged out"}));

    let (status, _) = send(
        &app,
        with_auth("GET", "/me", Some(&format!("Bearer {first}"))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        with_auth("GET", "/me", Some(&format!("Bearer {second}"))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_requires_header_but_not_live_token() {
    let app = auth_router(test_state());

    let (status, body) = send(&app, with_auth("POST", "/logout", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "missing_token");

    let (status, _) = send(
        &app,
        with_auth("POST", "/logout", Some("Bearer never-issued")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
