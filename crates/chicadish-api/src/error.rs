//! Maps domain `AppError` to HTTP responses.

use std::collections::BTreeMap;

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use chicadish_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// An `AppError` on its way out of a handler, with optional field details.
#[derive(Debug)]
pub struct ApiError {
    /// The underlying domain error.
    pub error: AppError,
    /// Extra JSON attached as `details`.
    pub details: Option<serde_json::Value>,
    /// Transport-level status that replaces the one implied by the kind.
    status: Option<StatusCode>,
}

/// Result alias for handlers and middleware.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// A request rejected before its body could be read, e.g. 413 or 415.
    pub fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            error: AppError::validation(message),
            details: None,
            status: Some(status),
        }
    }

    fn status_and_code(&self) -> (StatusCode, String) {
        if let Some(status) = self.status {
            let code = status
                .canonical_reason()
                .unwrap_or("BAD_REQUEST")
                .to_ascii_uppercase()
                .replace(' ', "_");
            return (status, code);
        }

        let (status, code) = match self.error.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::Internal
            | ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };
        (status, code.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = if self.error.kind.is_server_fault() {
            tracing::error!(kind = %self.error.kind, error = %self.error, "Internal server error");
            "An internal error occurred".to_string()
        } else {
            self.error.message.clone()
        };

        let body = ApiErrorResponse {
            error: code,
            message,
            details: self.details,
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self {
            error,
            details: None,
            status: None,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let fields: BTreeMap<String, Vec<String>> = errors
            .field_errors()
            .iter()
            .map(|(field, errors)| {
                let messages = errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("{field} is invalid"))
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        let summary = fields
            .values()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            error: AppError::validation(summary),
            details: serde_json::to_value(fields).ok(),
            status: None,
        }
    }
}
