//! Middleware for protecting authenticated routes.
//!
//! The gate reads `Authorization: Bearer <token>`, verifies the token, loads
//! the account it names and attaches it to the request as `CurrentUser`. Any
//! failure ends the request with the same generic 401.

use crate::api::common::{ApiError, gate_rejection};
use crate::auth::models::CurrentUser;
use crate::auth::service::AuthService;
use crate::errors::{ServiceError, ServiceResult};
use crate::state::AppState;
use axum::{
    extract::{Extension, Request},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the token from an `Authorization` header value.
///
/// Returns `None` unless the scheme is exactly `Bearer` followed by a single
/// space and a non-empty token.
pub fn parse_bearer(header_value: &str) -> Option<&str> {
    let token = header_value.strip_prefix(BEARER_PREFIX)?;
    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }
    Some(token)
}

/// Pulls the bearer token out of the request headers.
pub fn bearer_token(headers: &HeaderMap) -> ServiceResult<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(parse_bearer)
        .ok_or(ServiceError::MissingToken)
}

/// JWT authentication middleware
pub async fn require_auth(
    Extension(state): Extension<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).map_err(gate_rejection)?;

    let user = AuthService::new(&state)
        .resolve_token(token)
        .await
        .map_err(gate_rejection)?;

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}
