//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::DomainError;
use crate::store::StoreError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Business / validation errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Server errors (5xx)
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // The wire contract for a missing account is a bare "0" body, the
        // zero-balance signal, not a JSON error.
        if let AppError::Domain(DomainError::AccountMissing) = self {
            return (StatusCode::NOT_FOUND, "0").into_response();
        }

        let (status, error_code, details) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }

            AppError::Domain(domain_err) => match domain_err {
                DomainError::MissingParam(param) => (
                    StatusCode::BAD_REQUEST,
                    "missing_parameter",
                    Some((*param).to_string()),
                ),
                DomainError::UnknownEventType(kind) => (
                    StatusCode::BAD_REQUEST,
                    "unknown_event_type",
                    Some(kind.clone()),
                ),
                DomainError::InvalidAmount(msg) => {
                    (StatusCode::BAD_REQUEST, "invalid_amount", Some(msg.clone()))
                }
                DomainError::InsufficientFunds => {
                    (StatusCode::BAD_REQUEST, "insufficient_funds", None)
                }
                DomainError::SameAccountTransfer => {
                    (StatusCode::BAD_REQUEST, "same_account_transfer", None)
                }
                // Handled above; unreachable here.
                DomainError::AccountMissing => {
                    (StatusCode::NOT_FOUND, "account_not_found", None)
                }
            },

            // 500 Internal Server Error
            AppError::Store(e) => {
                tracing::error!("Store error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "store_error", None)
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_account_responds_with_zero_body() {
        let response = AppError::from(DomainError::AccountMissing).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn insufficient_funds_is_bad_request() {
        let response = AppError::from(DomainError::InsufficientFunds).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failure_is_internal() {
        let response = AppError::from(StoreError::TooMuchContention(8)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
