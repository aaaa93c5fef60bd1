//! Error handling utilities for API responses.
//!
//! Converts service-layer errors into HTTP responses. Every error body has the
//! same shape:
//! - `error`: human-readable message that is safe to show the caller
//! - `error_type`: machine-readable error category
//!
//! Internal details (store failures, which token check failed, whether a
//! username exists) are logged here and never copied into the body.

use crate::errors::ServiceError;
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

/// Standard error body for all endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
}

/// What a failing handler returns.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

impl ErrorResponse {
    pub fn new(error: impl Into<String>, error_type: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            error_type: error_type.into(),
        }
    }
}

fn api_error(status: StatusCode, message: &str, error_type: &str) -> ApiError {
    (status, Json(ErrorResponse::new(message, error_type)))
}

/// Converts ServiceError to appropriate HTTP response with standard format
pub fn service_error_to_http(error: ServiceError) -> ApiError {
    match error {
        ServiceError::Validation { message } => {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(message, "validation_error")),
            )
        }
        ServiceError::DuplicateUsername { .. } => api_error(
            StatusCode::BAD_REQUEST,
            "Username already exists",
            "duplicate_username",
        ),
        ServiceError::InvalidCredentials => api_error(
            StatusCode::UNAUTHORIZED,
            "Invalid username or password",
            "invalid_credentials",
        ),
        ServiceError::MissingToken => api_error(
            StatusCode::BAD_REQUEST,
            "Authorization token required",
            "missing_token",
        ),
        error @ (ServiceError::InvalidToken { .. } | ServiceError::AccountNotFound { .. }) => {
            tracing::debug!("Token rejected: {}", error);
            api_error(
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token",
                "invalid_token",
            )
        }
        ServiceError::StoreUnavailable { source } => {
            tracing::error!("Store error: {:#}", source);
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                "internal_error",
            )
        }
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                "internal_error",
            )
        }
    }
}

/// Converts an auth gate failure into the gate's single generic rejection.
///
/// Infrastructure failures still surface as 500 so they are not mistaken for
/// bad credentials.
pub fn gate_rejection(error: ServiceError) -> ApiError {
    match error {
        ServiceError::StoreUnavailable { .. } | ServiceError::InternalError { .. } => {
            service_error_to_http(error)
        }
        other => {
            tracing::debug!("Request rejected by auth gate: {}", other);
            api_error(
                StatusCode::UNAUTHORIZED,
                "Request is not authorized",
                "unauthorized",
            )
        }
    }
}
