//! Extractors whose rejections render through [`AppError`].
//!
//! axum's stock `Json`, `Query` and `Path` answer a bad request with a
//! plain-text body. These wrappers convert the rejection so every client
//! error uses the `{ "error", "code", "details" }` JSON shape.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// URL path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
