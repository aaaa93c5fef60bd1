//! Core business logic for the authentication system.
//!
//! Signup and login mint tokens; `resolve_token` turns a presented token back
//! into an account and is shared by the auth gate and the verify endpoint.

use crate::auth::models::*;
use crate::database::models::{CreateUser, NewUser, UserProfile};
use crate::errors::{ServiceError, ServiceResult};
use crate::state::AppState;
use tracing::{debug, error, info, warn};
use validator::Validate;

/// Authentication service for handling signup, login and token resolution
pub struct AuthService<'a> {
    state: &'a AppState,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(state: &'a AppState) -> Self {
        AuthService { state }
    }

    /// Register a new account and issue its first token.
    ///
    /// # Errors
    /// - `Validation` when a required field is missing or malformed
    /// - `DuplicateUsername` when the username is taken, including when a
    ///   concurrent signup wins the insert after this call's pre-check
    /// - `StoreUnavailable` / `InternalError` on infrastructure failures
    pub async fn signup(&self, new_user: NewUser) -> ServiceResult<AuthResponse> {
        if let Err(validation_errors) = new_user.validate() {
            return Err(ServiceError::from_validation_errors(validation_errors));
        }

        // Fast path only; the unique index decides races.
        if self
            .state
            .store
            .find_by_username(&new_user.username)
            .await?
            .is_some()
        {
            return Err(ServiceError::duplicate_username(&new_user.username));
        }

        let password_hash = self.state.hasher.hash(&new_user.password).await?;
        let user = self
            .state
            .store
            .create(CreateUser::from_new_user(new_user, password_hash))
            .await?;

        let token = self.issue_token(&user.id)?;
        info!("Registered user {} ({})", user.username, user.id);

        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }

    /// Authenticate a username/password pair and issue a token.
    ///
    /// Unknown username and wrong password both yield `InvalidCredentials`.
    pub async fn login(&self, login_request: LoginRequest) -> ServiceResult<AuthResponse> {
        if let Err(validation_errors) = login_request.validate() {
            return Err(ServiceError::from_validation_errors(validation_errors));
        }

        let Some(user) = self
            .state
            .store
            .find_by_username(&login_request.username)
            .await?
        else {
            debug!("Login failed: unknown username");
            return Err(ServiceError::InvalidCredentials);
        };

        if !self
            .state
            .hasher
            .verify(&login_request.password, &user.password_hash)
            .await?
        {
            warn!("Login failed: wrong password for user {}", user.id);
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.issue_token(&user.id)?;
        info!("User {} logged in", user.id);

        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }

    /// Verify a bearer token and load the account it names.
    ///
    /// # Errors
    /// - `InvalidToken` for malformed, forged or expired tokens
    /// - `AccountNotFound` when the subject no longer exists
    pub async fn resolve_token(&self, token: &str) -> ServiceResult<UserProfile> {
        let claims = self.state.tokens.verify(token)?;

        let user = self
            .state
            .store
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| ServiceError::account_not_found(claims.user_id()))?;

        Ok(user.into())
    }

    fn issue_token(&self, user_id: &str) -> ServiceResult<String> {
        self.state.tokens.issue(user_id).map_err(|e| {
            error!("Token generation failed for user {}: {}", user_id, e);
            ServiceError::internal_error(format!("Token generation failed: {}", e))
        })
    }

    /// List every account, digests stripped, newest first.
    pub async fn list_users(&self) -> ServiceResult<Vec<UserProfile>> {
        let users = self.state.store.list().await?;
        Ok(users.into_iter().map(UserProfile::from).collect())
    }
}
