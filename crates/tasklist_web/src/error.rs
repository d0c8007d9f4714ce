//! Error responses for handlers.
//!
//! Domain failures (validation, not found) are answered by the handlers
//! themselves. `AppError` covers what is left: storage failures and worker
//! crashes, which become a generic 500 without leaking details.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde::Serialize;
use std::fmt::{self, Display};
use tasklist_core::StoreError;

/// How the error body is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorFormat {
    /// `{"error": "..."}`.
    Json,
    /// Plain text, for browser routes.
    Text,
}

/// Handler error carrying status and a client-safe message.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    format: ErrorFormat,
    /// Logged, never sent to the client.
    detail: Option<String>,
}

/// JSON error body used by the API routes.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>, format: ErrorFormat) -> Self {
        Self {
            status,
            message: message.into(),
            format,
            detail: None,
        }
    }

    /// Generic 500; `detail` goes to the log only.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                ErrorFormat::Text,
            )
        }
    }

    /// Switches the body format, keeping status and message.
    pub fn as_json(mut self) -> Self {
        self.format = ErrorFormat::Json;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::internal(value.to_string())
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(
                "event=http_error module=web status={} error={}",
                self.status.as_u16(),
                self.detail.as_deref().unwrap_or(self.message.as_str())
            );
        }

        match self.format {
            ErrorFormat::Json => (
                self.status,
                Json(ErrorBody {
                    error: self.message,
                }),
            )
                .into_response(),
            ErrorFormat::Text => (self.status, self.message).into_response(),
        }
    }
}
