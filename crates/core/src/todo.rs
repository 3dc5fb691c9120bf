//! To-do item rules: field limits and pagination bounds.
//!
//! The HTTP layer checks these before a store session is opened, so an
//! out-of-range request never reaches the database.

use validator::Validate;

use crate::error::CoreError;

/// Entity name used in `NotFound` errors and log fields.
pub const ENTITY: &str = "ToDo";

/// Maximum length of `item`, counted in characters.
pub const MAX_ITEM_LEN: u64 = 200;

/// Page size used when the caller does not pass `limit`.
pub const DEFAULT_PAGE_LIMIT: i64 = 100;

/// Largest accepted `limit`. Larger values are rejected, not clamped.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// A validated `offset`/`limit` window over the to-do list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct Page {
    #[validate(range(min = 0))]
    pub offset: i64,
    #[validate(range(min = 0, max = MAX_PAGE_LIMIT))]
    pub limit: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Page {
    /// Build a page from optional query values, applying defaults and
    /// rejecting anything outside `offset >= 0`, `0 <= limit <= 100`.
    pub fn new(offset: Option<i64>, limit: Option<i64>) -> Result<Self, CoreError> {
        let page = Self {
            offset: offset.unwrap_or(0),
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        };
        page.validate()?;
        Ok(page)
    }
}
