//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Pagination parameters (`?offset=&limit=`).
///
/// Bounds are checked by `todolist_core::todo::Page::new`; out-of-range
/// values are rejected rather than clamped.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}
