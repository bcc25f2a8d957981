//! Error translation between domain errors and HTTP responses.
//!
//! Handlers return [`AppError`]; its `IntoResponse` impl is the single place
//! failures become JSON bodies, so end users see a uniform error shape and
//! never a raw internal error.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use souq_basket::BasketError;
use souq_catalog::CatalogError;
use std::fmt;

/// Application error for web handlers.
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code.
    status: StatusCode,
    /// User-facing message.
    message: String,
    /// Internal error, logged but never exposed to the client.
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create an error with an explicit status.
    #[must_use]
    pub const fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            message,
            source: None,
        }
    }

    /// Attach the underlying error for logging.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// 400 Bad Request.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message.into())
    }

    /// 404 Not Found.
    #[must_use]
    pub fn not_found(resource: impl fmt::Display, id: impl fmt::Display) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("{resource} with id {id} was not found"),
        )
    }

    /// 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message.into())
    }

    /// HTTP status of this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    /// HTTP status code, repeated in the body for API clients.
    status: u16,
    /// Human-readable message.
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            match &self.source {
                Some(source) => tracing::error!(
                    status = %self.status,
                    message = %self.message,
                    error = %source,
                    "request failed"
                ),
                None => tracing::error!(
                    status = %self.status,
                    message = %self.message,
                    "request failed"
                ),
            }
        }

        let body = ErrorBody {
            status: self.status.as_u16(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        Self::internal("catalog store is unavailable").with_source(err.into())
    }
}

impl From<BasketError> for AppError {
    fn from(err: BasketError) -> Self {
        Self::internal("basket cache is unavailable").with_source(err.into())
    }
}
