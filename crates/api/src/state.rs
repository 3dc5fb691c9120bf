use todolist_db::Store;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: [`Store`] wraps a reference-counted pool.
#[derive(Clone)]
pub struct AppState {
    /// Relational store; handlers open one session per request from it.
    pub store: Store,
}
