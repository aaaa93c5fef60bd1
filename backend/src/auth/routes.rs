//! Defines the HTTP routes for user authentication.
//!
//! Signup, login and verify are public; listing users goes through the auth
//! gate. The router is mounted under `/api/users` by `api::app_router`.

use crate::auth::handlers::*;
use crate::auth::middleware::require_auth;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the user router with all auth-related routes
pub fn user_router() -> Router {
    Router::new()
        .route("/", get(list_users).layer(middleware::from_fn(require_auth)))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/verify", get(verify))
}
