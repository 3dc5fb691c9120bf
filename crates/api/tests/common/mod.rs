#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use todolist_api::config::ServerConfig;
use todolist_api::router::build_app_router;
use todolist_api::state::AppState;
use todolist_db::Store;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".parse().unwrap()],
        request_timeout_secs: 30,
    }
}

/// A router backed by a fresh SQLite file.
///
/// Keep the returned `TempDir` alive for the duration of the test; dropping
/// it deletes the database.
pub struct TestApp {
    pub dir: TempDir,
    pub store: Store,
    pub router: Router,
}

impl TestApp {
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// over a temporary database.
pub async fn build_test_app() -> TestApp {
    let dir = TempDir::new().unwrap();
    let store = Store::initialize(dir.path().join("todolist.db"))
        .await
        .unwrap();
    let state = AppState {
        store: store.clone(),
    };
    let router = build_app_router(state, &test_config());
    TestApp { dir, store, router }
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// POST a to-do and return the created JSON, asserting 201.
pub async fn create_todo(app: Router, body: Value) -> Value {
    let response = post_json(app, "/todos/", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
