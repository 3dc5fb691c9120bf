use std::collections::BTreeMap;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Map, Value};
use todolist_core::error::CoreError;
use validator::ValidationErrors;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`sqlx::Error`] for storage
/// failures. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `todolist_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request input that parsed but does not fit the expected shape
    /// (missing field, wrong type, unparsable id). `field` names the
    /// offending field and the rule it broke, when known.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        message: String,
        field: Option<(String, &'static str)>,
    },

    /// A request rejected before its input could be read, e.g. malformed
    /// JSON or a missing content type.
    #[error("Rejected request: {message}")]
    Rejected { status: StatusCode, message: String },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Core(CoreError::InvalidInput(errors))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => AppError::invalid_request(err.body_text()),
            other => AppError::Rejected {
                status: other.status(),
                message: other.body_text(),
            },
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        match rejection {
            QueryRejection::FailedToDeserializeQueryString(err) => {
                AppError::invalid_request(err.body_text())
            }
            other => AppError::Rejected {
                status: other.status(),
                message: other.body_text(),
            },
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err)
                if err.status().is_client_error() =>
            {
                AppError::InvalidRequest {
                    message: err.body_text(),
                    field: None,
                }
            }
            other => AppError::Rejected {
                status: other.status(),
                message: other.body_text(),
            },
        }
    }
}

impl AppError {
    fn invalid_request(message: String) -> Self {
        let field = field_from_serde_message(&message);
        AppError::InvalidRequest { message, field }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                    None,
                ),
                CoreError::InvalidInput(errors) => {
                    let details = field_details(errors);
                    let fields = details.keys().cloned().collect::<Vec<_>>().join(", ");
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "VALIDATION_ERROR",
                        format!("Invalid value for: {fields}"),
                        Some(Value::Object(details)),
                    )
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::InvalidRequest { message, field } => {
                let details = field.as_ref().map(|(name, rule)| {
                    let mut details = Map::new();
                    details.insert(name.clone(), json!([rule]));
                    Value::Object(details)
                });
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_ERROR",
                    message.clone(),
                    details,
                )
            }

            AppError::Rejected { status, message } => {
                if status.is_server_error() {
                    tracing::error!(error = %message, "Extractor failed");
                    internal_error()
                } else {
                    (*status, rejection_code(*status), message.clone(), None)
                }
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(details) = details {
            body["details"] = details;
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Flatten `validator` errors into `{ "field": ["rule", ...] }`, sorted by
/// field name.
fn field_details(errors: &ValidationErrors) -> Map<String, Value> {
    let fields: BTreeMap<String, Value> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let codes = errs
                .iter()
                .map(|e| Value::String(e.code.to_string()))
                .collect();
            (field.to_string(), Value::Array(codes))
        })
        .collect();
    fields.into_iter().collect()
}

/// Pull the offending field out of a deserialization message.
///
/// axum formats these as `<context>: <path>: <serde message>`, dropping the
/// path segment for root-level errors. Serde reports an absent field as
/// ``missing field `name` ``; any other error carries the path.
fn field_from_serde_message(message: &str) -> Option<(String, &'static str)> {
    let (_, detail) = message.split_once(": ")?;
    if let Some(rest) = detail.strip_prefix("missing field `") {
        let (name, _) = rest.split_once('`')?;
        return Some((name.to_string(), "required"));
    }
    let (path, _) = detail.split_once(": ")?;
    let is_path = !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
    is_path.then(|| (path.to_string(), "invalid_type"))
}

fn rejection_code(status: StatusCode) -> &'static str {
    match status {
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
        _ => "BAD_REQUEST",
    }
}

fn internal_error() -> (StatusCode, &'static str, String, Option<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
        None,
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - SQLite `CHECK` constraint failures map to 422.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String, Option<Value>) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
            None,
        ),
        sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
            tracing::warn!(error = %db_err, "Check constraint rejected a write");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                "Value violates a storage constraint".to_string(),
                None,
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal_error()
        }
    }
}
