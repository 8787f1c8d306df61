//! Integration tests for the public quote API and pages.

use axum::http::StatusCode;
use deposit_integration_tests::TestApp;

// =============================================================================
// POST /calcular_precio
// =============================================================================

#[tokio::test]
async fn test_quote_for_numeric_volume() {
    let app = TestApp::new();

    let response = app.post_json("/calcular_precio", r#"{"volumen": 2.0}"#).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["precio"], 17000);
    assert_eq!(body["caja_recomendada"], "large box");
}

#[tokio::test]
async fn test_quote_accepts_numeric_string() {
    let app = TestApp::new();

    let response = app.post_json("/calcular_precio", r#"{"volumen": "0.5"}"#).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["precio"], 8000);
    assert_eq!(body["caja_recomendada"], "small box");
}

#[tokio::test]
async fn test_quote_tier_boundaries() {
    let app = TestApp::new();
    let cases = [
        ("0.0", 0, "small box"),
        ("1.5", 14000, "medium box"),
        ("3.0", 23000, "large box"),
        ("4.0", 29000, "special container"),
    ];

    for (volume, price, label) in cases {
        let response = app
            .post_json("/calcular_precio", &format!(r#"{{"volumen": {volume}}}"#))
            .await;
        assert_eq!(response.status, StatusCode::OK, "volume {volume}");
        let body = response.json();
        assert_eq!(body["precio"], price, "volume {volume}");
        assert_eq!(body["caja_recomendada"], label, "volume {volume}");
    }
}

#[tokio::test]
async fn test_negative_volume_quotes_zero() {
    let app = TestApp::new();

    let response = app.post_json("/calcular_precio", r#"{"volumen": -2}"#).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["precio"], 0);
}

#[tokio::test]
async fn test_missing_volume_is_bad_request() {
    let app = TestApp::new();

    let response = app.post_json("/calcular_precio", "{}").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["error"].is_string());
}

#[tokio::test]
async fn test_non_numeric_volume_is_bad_request() {
    let app = TestApp::new();

    let response = app.post_json("/calcular_precio", r#"{"volumen": "abc"}"#).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["error"].is_string());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();

    let response = app.post_json("/calcular_precio", "not json").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_quote_does_not_persist_anything() {
    let app = TestApp::new();

    app.post_json("/calcular_precio", r#"{"volumen": 1}"#).await;

    assert!(app.intakes.is_empty().await);
}

// =============================================================================
// Pages and health
// =============================================================================

#[tokio::test]
async fn test_root_redirects_to_calculator() {
    let app = TestApp::new();

    let response = app.get("/").await;

    assert!(response.status.is_redirection());
    assert_eq!(response.location.as_deref(), Some("/calculadora"));
}

#[tokio::test]
async fn test_calculator_page_renders_form() {
    let app = TestApp::new();

    let response = app.get("/calculadora").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("/registrar_producto"));
    assert!(response.body.contains("caja_recomendada"));
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new();

    let live = app.get("/health").await;
    assert_eq!(live.status, StatusCode::OK);
    assert_eq!(live.body, "ok");

    let ready = app.get("/health/ready").await;
    assert_eq!(ready.status, StatusCode::OK);
}
