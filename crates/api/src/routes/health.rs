use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`. `status` is `"degraded"` when the to-do store
/// cannot answer a query.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match state.store.health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
