//! Data structures for authentication-related entities.
//!
//! Request and response payloads for signup, login and token verification,
//! plus the identity the auth gate attaches to an authorized request.

use crate::database::models::UserProfile;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request payload
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Signup and login response: the account (without digest) and a fresh token
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
}

/// Token verification response
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub user: UserProfile,
}

/// Account resolved by the auth gate, available to downstream handlers
/// through `Extension<CurrentUser>`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserProfile);

impl CurrentUser {
    pub fn id(&self) -> &str {
        &self.0.id
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }
}
