//! Shared application state handed to every handler and to the auth gate.
//!
//! Built once at startup from `Config`; nothing in here is mutated afterwards.

use crate::config::Config;
use crate::repositories::user_repository::{CredentialStore, UserRepository};
use crate::utils::jwt::TokenCodec;
use crate::utils::password::PasswordHasher;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CredentialStore>,
    pub tokens: TokenCodec,
    pub hasher: PasswordHasher,
}

impl AppState {
    pub fn new(store: Arc<dyn CredentialStore>, tokens: TokenCodec, hasher: PasswordHasher) -> Self {
        Self {
            store,
            tokens,
            hasher,
        }
    }

    /// State backed by the SQLite user repository.
    pub fn from_config(config: &Config, pool: SqlitePool) -> anyhow::Result<Self> {
        Ok(Self::new(
            Arc::new(UserRepository::new(pool)),
            TokenCodec::from_config(config)?,
            PasswordHasher::new(config.bcrypt_cost),
        ))
    }
}
