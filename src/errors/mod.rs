//! Error handling module for the draftpad backend.
//!
//! Centralized error type with mapping to HTTP status codes. Every failure
//! leaves the handler as a structured `{ "error": string }` body; status
//! codes are the only control signal clients see.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Missing or invalid principal
    Unauthorized(String),
    /// Server misconfiguration (token or repository not set)
    Config(String),
    /// Missing required request parameters
    Validation(String),
    /// The remote manifest is not valid JSON
    ManifestParse(String),
    /// Upstream GitHub call failed (any non-2xx, including sha conflicts)
    Remote(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::ManifestParse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Remote(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        match self {
            AppError::Unauthorized(msg)
            | AppError::Config(msg)
            | AppError::Validation(msg)
            | AppError::ManifestParse(msg)
            | AppError::Remote(msg) => msg,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status_code(), self.message())
    }
}

impl std::error::Error for AppError {}

/// Wire body for every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::debug!(%status, error = self.message(), "request failed");

        let body = ErrorBody {
            error: self.message().to_string(),
        };

        (status, Json(body)).into_response()
    }
}
