//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for signup, login, token
//! verification and the protected user listing, and delegate to
//! `auth::service` for the business logic.

use crate::api::common::{ApiError, service_error_to_http};
use crate::auth::middleware::bearer_token;
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::database::models::{NewUser, UserProfile};
use crate::errors::ServiceError;
use crate::state::AppState;
use axum::{
    extract::{Extension, Json, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::Json as ResponseJson,
};
use tracing::debug;

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        service_error_to_http(ServiceError::validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    })
}

/// Handle user signup request
#[axum::debug_handler]
pub async fn signup(
    Extension(state): Extension<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, ResponseJson<AuthResponse>), ApiError> {
    let new_user = json_body(payload)?;

    match AuthService::new(&state).signup(new_user).await {
        Ok(response) => Ok((StatusCode::CREATED, ResponseJson(response))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(state): Extension<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ResponseJson<AuthResponse>, ApiError> {
    let login_request = json_body(payload)?;

    match AuthService::new(&state).login(login_request).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle token verification request.
///
/// Unlike the auth gate, an absent or malformed header is a 400 here.
#[axum::debug_handler]
pub async fn verify(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<ResponseJson<VerifyResponse>, ApiError> {
    let token = bearer_token(&headers).map_err(service_error_to_http)?;

    match AuthService::new(&state).resolve_token(token).await {
        Ok(user) => Ok(ResponseJson(VerifyResponse { user })),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// List all users. Mounted behind `require_auth`.
#[axum::debug_handler]
pub async fn list_users(
    Extension(state): Extension<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<ResponseJson<Vec<UserProfile>>, ApiError> {
    debug!(
        "User {} ({}) listing users",
        current_user.username(),
        current_user.id()
    );

    match AuthService::new(&state).list_users().await {
        Ok(users) => Ok(ResponseJson(users)),
        Err(error) => Err(service_error_to_http(error)),
    }
}
