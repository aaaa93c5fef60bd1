//! Global application error types.
//!
//! This module defines the service-level error taxonomy used across the
//! backend. Variants carry internal detail for logging; the HTTP layer in
//! `api::common` decides what the caller is allowed to see.

use crate::repositories::user_repository::StoreError;
use crate::utils::jwt::TokenError;
use thiserror::Error;

/// Generic service error that can be used across all entities
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Username already exists: {username}")]
    DuplicateUsername { username: String },

    /// Unknown username and wrong password both end up here.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Missing or malformed authorization header")]
    MissingToken,

    #[error("Invalid token: {source}")]
    InvalidToken {
        #[from]
        source: TokenError,
    },

    #[error("Token subject has no account: {identifier}")]
    AccountNotFound { identifier: String },

    #[error("Store unavailable: {source}")]
    StoreUnavailable { source: anyhow::Error },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn duplicate_username(username: impl Into<String>) -> Self {
        Self::DuplicateUsername {
            username: username.into(),
        }
    }

    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::AccountNotFound {
            identifier: identifier.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Flattens `validator` errors into a single "field: message" string.
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let mut error_messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    format!(
                        "{}: {}",
                        field,
                        error.message.as_ref().unwrap_or(&"Invalid value".into())
                    )
                })
            })
            .collect();
        // field_errors() iterates a HashMap
        error_messages.sort();
        Self::validation(error_messages.join(", "))
    }
}

impl From<StoreError> for ServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::DuplicateUsername(username) => Self::duplicate_username(username),
            StoreError::Unavailable(source) => Self::StoreUnavailable {
                source: source.into(),
            },
        }
    }
}
