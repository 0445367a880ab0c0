//! Router-level tests for calculator, expression, and contact endpoints.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::infra::contact_store::JsonFileContactStore;
use crate::presentation::handlers::{SESSION_HEADER, ToolsAppState};
use crate::presentation::router::tools_router;

fn test_app() -> (Router, TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let state = ToolsAppState::new(JsonFileContactStore::new(tmp.path().join("storage")));
    (tools_router(state), tmp)
}

async fn call(
    router: &Router,
    method: Method,
    uri: &str,
    session: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(session) = session {
        req = req.header(SESSION_HEADER, session);
    }
    let body = match body {
        Some(json) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let res = router.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn contact_json() -> Value {
    json!({
        "last_name": "Петров",
        "first_name": "Пётр",
        "date_of_birth": "2001-09-30",
        "phone": "89001234567",
        "email": "petr@example.org"
    })
}

// ============================================================================
// Calculator
// ============================================================================

#[tokio::test]
async fn test_calculator_operations() {
    let (app, _tmp) = test_app();

    for (path, expected) in [
        ("add", 8.0),
        ("subtract", 2.0),
        ("multiply", 15.0),
        ("divide", 5.0 / 3.0),
    ] {
        let (status, body) = call(
            &app,
            Method::GET,
            &format!("/calculator/{path}?a=5&b=3"),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{path}");
        assert_eq!(body["result"].as_f64().unwrap(), expected, "{path}");
    }
}

#[tokio::test]
async fn test_calculator_divide_by_zero() {
    let (app, _tmp) = test_app();

    let (status, body) = call(&app, Method::GET, "/calculator/divide?a=1&b=0", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "zero_division");
    assert_eq!(body["detail"], "Division by zero");
}

#[tokio::test]
async fn test_calculator_rejects_non_numeric_input() {
    let (app, _tmp) = test_app();

    let (status, _) = call(&app, Method::GET, "/calculator/add?a=one&b=2", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Expression
// ============================================================================

#[tokio::test]
async fn test_expression_component_flow() {
    let (app, _tmp) = test_app();

    let (status, body) = call(&app, Method::GET, "/expression/get", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"expression": null, "message": "Expression is not set"}));

    let (status, body) = call(
        &app,
        Method::POST,
        "/expression/component",
        None,
        Some(json!({"a": 2, "op": "*", "b": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"expression": "(2.0 * 3.0)"}));

    let (_, body) = call(
        &app,
        Method::POST,
        "/expression/component",
        None,
        Some(json!({"a": 10, "op": "/", "b": 4, "join_op": "-"})),
    )
    .await;
    assert_eq!(body["expression"], "((2.0 * 3.0)) - (10.0 / 4.0)");

    let (status, body) = call(&app, Method::POST, "/expression/evaluate", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["expression"], "((2.0 * 3.0)) - (10.0 / 4.0)");
    assert_eq!(body["result"], 3.5);
}

#[tokio::test]
async fn test_expression_rejects_unknown_operator() {
    let (app, _tmp) = test_app();

    let (status, body) = call(
        &app,
        Method::POST,
        "/expression/component",
        None,
        Some(json!({"a": 1, "op": "^", "b": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_operator");

    let (status, body) = call(
        &app,
        Method::POST,
        "/expression/component",
        None,
        Some(json!({"a": 1, "op": "+", "b": 2, "join_op": "%"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_operator");

    // Nothing was stored by the rejected requests
    let (_, body) = call(&app, Method::GET, "/expression/get", None, None).await;
    assert_eq!(body["expression"], Value::Null);
}

#[tokio::test]
async fn test_full_expression_replaces_and_evaluates() {
    let (app, _tmp) = test_app();

    call(
        &app,
        Method::POST,
        "/expression/component",
        None,
        Some(json!({"a": 1, "op": "+", "b": 1})),
    )
    .await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/expression/full",
        None,
        Some(json!({"expr": "-(2 + 4) / 4"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"expression": "-(2 + 4) / 4", "result": -1.5}));

    let (status, body) = call(
        &app,
        Method::POST,
        "/expression/full",
        None,
        Some(json!({"expr": "(1 + 2"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "evaluation_failed");

    let (status, body) = call(
        &app,
        Method::POST,
        "/expression/full",
        None,
        Some(json!({"expr": "5 / (2 - 2)"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "zero_division");
}

#[tokio::test]
async fn test_evaluate_without_expression() {
    let (app, _tmp) = test_app();

    let (status, body) = call(&app, Method::POST, "/expression/evaluate", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "expression_not_set");
}

#[tokio::test]
async fn test_sessions_are_isolated_by_header() {
    let (app, _tmp) = test_app();

    call(
        &app,
        Method::POST,
        "/expression/full",
        Some("alice"),
        Some(json!({"expr": "1 + 1"})),
    )
    .await;

    let (_, body) = call(&app, Method::GET, "/expression/get", Some("alice"), None).await;
    assert_eq!(body["expression"], "1 + 1");

    let (_, body) = call(&app, Method::GET, "/expression/get", Some("bob"), None).await;
    assert_eq!(body["expression"], Value::Null);

    let (_, body) = call(&app, Method::GET, "/expression/get", None, None).await;
    assert_eq!(body["expression"], Value::Null);
}

// ============================================================================
// Contact
// ============================================================================

#[tokio::test]
async fn test_contact_basic_is_stored() {
    let (app, tmp) = test_app();

    let (status, body) = call(
        &app,
        Method::POST,
        "/contact/basic",
        None,
        Some(contact_json()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Данные успешно сохранены");

    let filename = body["filename"].as_str().unwrap();
    assert!(filename.starts_with(tmp.path().join("storage").to_str().unwrap()));

    let stored: Value = serde_json::from_slice(&std::fs::read(filename).unwrap()).unwrap();
    assert_eq!(stored, contact_json());
}

#[tokio::test]
async fn test_contact_multiple_reasons() {
    let (app, _tmp) = test_app();

    let mut form = contact_json();
    form["reasons"] = json!(["нет доступа к сети", "не приходят письма"]);
    form["detected_at"] = json!("2024-11-05T08:00:00+03:00");

    let (status, body) = call(&app, Method::POST, "/contact/multiple", None, Some(form)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        body["filename"]
            .as_str()
            .unwrap()
            .contains("contact_multiple_")
    );
}

#[tokio::test]
async fn test_invalid_contact_reports_every_problem() {
    let (app, tmp) = test_app();

    let mut form = contact_json();
    form["phone"] = json!("12345");
    form["reason"] = json!("просто так");
    form["detected_at"] = json!("2024-11-05T08:00:00");

    let (status, body) = call(&app, Method::POST, "/contact/extended", None, Some(form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "invalid_contact");

    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("phone"));
    assert!(detail.contains("reason"));

    assert!(!tmp.path().join("storage").exists());
}

#[tokio::test]
async fn test_contact_missing_field_is_rejected() {
    let (app, _tmp) = test_app();

    let mut form = contact_json();
    form.as_object_mut().unwrap().remove("email");

    let (status, _) = call(&app, Method::POST, "/contact/basic", None, Some(form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_over_long_expression_is_rejected() {
    let (app, _tmp) = test_app();

    let expr = "1+".repeat(5000) + "1";
    let (status, body) = call(
        &app,
        Method::POST,
        "/expression/full",
        Some("flood"),
        Some(json!({ "expr": expr })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "expression_too_long");

    let (_, body) = call(&app, Method::GET, "/expression/get", Some("flood"), None).await;
    assert_eq!(body["expression"], Value::Null);
}
