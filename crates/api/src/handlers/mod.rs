//! Request handlers.
//!
//! Each submodule provides async handler functions for a single entity type.
//! Handlers validate input, open a store session and delegate to the
//! corresponding repository in `todolist_db`, mapping errors via
//! [`AppError`](crate::error::AppError).

pub mod todo;
