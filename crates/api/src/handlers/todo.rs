//! Handlers for the `/todos` resource.
//!
//! Every handler validates its input before opening a store session, so a
//! rejected request never touches the database. The session is dropped (and
//! its connection returned to the pool) when the handler returns, on success
//! and error alike.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sqlx::Connection;
use todolist_core::error::CoreError;
use todolist_core::todo::{self, Page};
use todolist_core::types::DbId;
use todolist_db::models::todo::{CreateTodo, UpdateTodo};
use todolist_db::repositories::TodoRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::PaginationParams;
use crate::state::AppState;

/// Response header carrying the total number of stored to-dos.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: todo::ENTITY,
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /todos/?offset=0&limit=100
///
/// List to-dos in creation order. `limit` above 100 is rejected with 422.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = Page::new(params.offset, params.limit)?;

    // One read transaction so the count and the page see the same snapshot.
    let mut session = state.store.session().await?;
    let mut tx = session.begin().await?;
    let total = TodoRepo::count(&mut tx).await?;
    let todos = TodoRepo::list(&mut tx, page).await?;
    tx.commit().await?;

    Ok(([(TOTAL_COUNT_HEADER, total.to_string())], Json(todos)))
}

/// POST /todos/
///
/// Create a to-do. The server assigns `id`, `created_at` and `updated_at`.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTodo>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let mut session = state.store.session().await?;
    let todo = TodoRepo::create(&mut session, &input).await?;

    tracing::info!(todo_id = %todo.id, "ToDo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// GET /todos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut session = state.store.session().await?;
    let todo = TodoRepo::find_by_id(&mut session, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(todo))
}

/// PATCH /todos/{id} (also PUT)
///
/// Apply the fields present in the payload and refresh `updated_at`.
/// An empty payload only refreshes `updated_at`.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateTodo>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let mut session = state.store.session().await?;
    let todo = TodoRepo::update(&mut session, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(todo_id = %id, is_completed = todo.is_completed, "ToDo updated");
    Ok(Json(todo))
}

/// DELETE /todos/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut session = state.store.session().await?;
    if !TodoRepo::delete(&mut session, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(todo_id = %id, "ToDo deleted");
    Ok(StatusCode::NO_CONTENT)
}
