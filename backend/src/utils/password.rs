//! Password hashing with bcrypt.
//!
//! bcrypt embeds a fresh random salt and the cost factor in every digest and
//! compares digests in constant time. Both operations are CPU-bound, so they
//! run on tokio's blocking pool instead of an async worker thread.
//!
//! bcrypt ignores input past 72 bytes, so the non-truncating variants are
//! used: longer secrets are refused instead of silently shortened.

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{BcryptError, non_truncating_hash, non_truncating_verify};
use tracing::error;

/// One-way, salted password hasher with a fixed cost factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes a plaintext password.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if the password exceeds 72 bytes, and
    /// `ServiceError::InternalError` if bcrypt fails or the blocking task is
    /// cancelled.
    pub async fn hash(&self, password: &str) -> ServiceResult<String> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || non_truncating_hash(password, cost))
            .await
            .map_err(|e| {
                error!("Password hashing task failed: {}", e);
                ServiceError::internal_error(format!("Task join error: {}", e))
            })?
            .map_err(|e| match e {
                BcryptError::Truncation(_) => {
                    ServiceError::validation("password: Password must be at most 72 bytes")
                }
                e => {
                    error!("Password hashing failed: {}", e);
                    ServiceError::internal_error(format!("Password hashing failed: {}", e))
                }
            })
    }

    /// Verifies a plaintext password against a stored digest.
    ///
    /// # Returns
    /// `true` if the password matches, `false` otherwise (including any
    /// password longer than 72 bytes, which could never have been stored)
    ///
    /// # Errors
    /// Returns `ServiceError::InternalError` if the stored digest is malformed.
    pub async fn verify(&self, password: &str, digest: &str) -> ServiceResult<bool> {
        let password = password.to_string();
        let digest = digest.to_string();

        match tokio::task::spawn_blocking(move || non_truncating_verify(password, &digest))
            .await
            .map_err(|e| {
                error!("Password verification task failed: {}", e);
                ServiceError::internal_error(format!("Task join error: {}", e))
            })? {
            Ok(matches) => Ok(matches),
            Err(BcryptError::Truncation(_)) => Ok(false),
            Err(e) => {
                error!("Password verification failed: {}", e);
                Err(ServiceError::internal_error(format!(
                    "Password verification failed: {}",
                    e
                )))
            }
        }
    }
}
