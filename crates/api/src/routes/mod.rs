pub mod health;
pub mod todo;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// ```text
/// /health                 service and database health
///
/// /todos, /todos/         list (GET), create (POST)
/// /todos/{id}             get, update (PATCH, PUT), delete
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(todo::router())
}
