//! Route definitions for to-dos.

use axum::routing::get;
use axum::Router;

use crate::handlers::todo;
use crate::state::AppState;

/// Routes for the `/todos` collection.
///
/// The collection answers with and without the trailing slash.
///
/// ```text
/// GET    /todos/       -> list
/// POST   /todos/       -> create
/// GET    /todos/{id}   -> get_by_id
/// PATCH  /todos/{id}   -> update
/// PUT    /todos/{id}   -> update
/// DELETE /todos/{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/todos", get(todo::list).post(todo::create))
        .route("/todos/", get(todo::list).post(todo::create))
        .route(
            "/todos/{id}",
            get(todo::get_by_id)
                .patch(todo::update)
                .put(todo::update)
                .delete(todo::delete),
        )
}
