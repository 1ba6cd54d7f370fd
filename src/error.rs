use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, error};
use derive_more::Display;
use serde_json::json;

pub const INVALID_EMPLOYEE_ID: &str = "Invalid Employee ID format";
pub const ALREADY_PUNCHED_IN: &str = "Already punched in for today";
pub const SHIFT_COMPLETED: &str = "Shift already completed today";
pub const NO_ACTIVE_PUNCH_IN: &str = "No active punch-in found";

/// Every failure a handler can return. Rendered as `{ "error": "..." }`.
#[derive(Debug, Display)]
pub enum ApiError {
    /// Malformed or missing input.
    #[display(fmt = "{}", _0)]
    InvalidInput(String),

    /// Business-rule violation on an otherwise valid request.
    #[display(fmt = "{}", _0)]
    Conflict(&'static str),

    /// Backend failure. The cause is logged, never returned.
    #[display(fmt = "Server error")]
    Server(sqlx::Error),
}

impl ApiError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::InvalidInput(message.into())
    }

    /// Logs the error against the named operation. Server faults go out at
    /// error level with the underlying cause.
    pub fn trace(&self, operation: &'static str) {
        match self {
            ApiError::Server(e) => tracing::error!(error = %e, operation, "Request failed"),
            other => tracing::info!(reason = %other, operation, "Request rejected"),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Server(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

/// Turns JSON body extraction failures into the `{ "error": ... }` shape.
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected JSON payload");
    ApiError::invalid(INVALID_EMPLOYEE_ID).into()
}

/// Turns query string extraction failures into the `{ "error": ... }` shape.
pub fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected query string");
    ApiError::invalid("Invalid query parameters").into()
}
