//! End-to-end flows through the composed router on in-memory storage.

use api::{AppConfig, build_app};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use platform::cache::SelectedCache;
use platform::password::HashCost;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

fn app(cache_enabled: bool) -> (Router, TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let config = AppConfig {
        hash_cost: HashCost::Fast,
        contact_storage_dir: tmp.path().to_path_buf(),
        ..AppConfig::default()
    };
    let router = build_app(&config, None, SelectedCache::from_enabled(cache_enabled));
    (router, tmp)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn register_and_login(app: &Router, username: &str) -> String {
    let credentials = json!({"username": username, "password": "s3cret-pass"});

    let (status, _) = send(app, Method::POST, "/auth/register", None, Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(app, Method::POST, "/auth/login", None, Some(credentials)).await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_register_login_use_logout() {
    let (app, _tmp) = app(true);
    let token = register_and_login(&app, "registrar").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/student/create?name=Anna&faculty=Physics&course=Optics&grade=81",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/student/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Anna");
    assert_eq!(body["grade"], 81.0);

    let (status, _) = send(&app, Method::POST, "/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, &format!("/student/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "invalid_token");
}

#[tokio::test]
async fn test_tokens_from_auth_routes_unlock_student_routes_only() {
    let (app, _tmp) = app(true);

    let (status, body) = send(&app, Method::GET, "/student/unique_courses", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);

    // Tool routes are public
    let (status, body) = send(&app, Method::GET, "/calculator/multiply?a=6&b=7", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], 42.0);

    let token = register_and_login(&app, "reader").await;
    let (status, body) = send(&app, Method::GET, "/student/unique_courses", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(&app, Method::GET, "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "reader");
}

#[tokio::test]
async fn test_disabled_cache_serves_fresh_views() {
    let (app, _tmp) = app(false);
    let token = register_and_login(&app, "registrar").await;

    let (_, body) = send(
        &app,
        Method::POST,
        "/student/create?name=Boris&faculty=Math&course=Algebra&grade=45",
        Some(&token),
        None,
    )
    .await;
    let id = body["id"].as_i64().unwrap();

    let (_, body) = send(&app, Method::GET, "/student/by_faculty?faculty=Math", Some(&token), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::DELETE, &format!("/student/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/student/by_faculty?faculty=Math", Some(&token), None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_contact_written_to_configured_directory() {
    let (app, tmp) = app(true);

    let (status, body) = send(
        &app,
        Method::POST,
        "/contact/basic",
        None,
        Some(json!({
            "last_name": "Смирнова",
            "first_name": "Анна",
            "date_of_birth": "1999-01-02",
            "phone": "+74951234567",
            "email": "anna@example.com"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let filename = body["filename"].as_str().unwrap();
    assert!(filename.starts_with(tmp.path().to_str().unwrap()));
    assert!(std::path::Path::new(filename).exists());
}
