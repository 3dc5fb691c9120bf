//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, get};
use tower::ServiceExt;

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = build_test_app().await;
    let response = get(app.router(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

#[tokio::test]
async fn health_check_reports_degraded_when_pool_closed() {
    let app = build_test_app().await;
    app.store.pool().close().await;

    let json = body_json(get(app.router(), "/health").await).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_test_app().await;
    let response = get(app.router(), "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = build_test_app().await;
    let response = get(app.router(), "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn unsupported_method_returns_405() {
    let app = build_test_app().await;
    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/todos/")
        .body(Body::empty())
        .unwrap();
    let response = app.router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let app = build_test_app().await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/todos/")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "PATCH")
        .body(Body::empty())
        .unwrap();
    let response = app.router().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );
}
