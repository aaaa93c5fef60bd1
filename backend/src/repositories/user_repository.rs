//! Database repository for user credential records.
//!
//! Defines the `CredentialStore` contract consumed by the auth flows and the
//! auth gate, and its SQLite implementation `UserRepository`.

use crate::database::models::{CreateUser, User};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;

/// Failures a credential store can report.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable mapping from account identity to stored credential record.
///
/// `create` must reject a duplicate username atomically: two concurrent
/// callers with the same username can never both succeed.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>>;

    async fn create(&self, user: CreateUser) -> StoreResult<User>;

    /// All accounts, newest first.
    async fn list(&self) -> StoreResult<Vec<User>>;
}

/// Repository for user database operations.
///
/// Username uniqueness is delegated to the unique index on `users.username`,
/// so the insert itself is the check.
#[derive(Clone)]
pub struct UserRepository {
    /// Shared SQLite connection pool
    pool: SqlitePool,
}

const USER_COLUMNS: &str = "id, username, password_hash, name, phone_number, gender, \
     date_of_birth, membership_status, bio, address, profile_picture, created_at, updated_at";

impl UserRepository {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - SQLite connection pool (cheaply cloned)
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for UserRepository {
    /// Retrieves a user by their username (case-sensitive).
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = ?",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Retrieves a user by their unique identifier.
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = ?",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Inserts a new user, mapping a unique-index violation to
    /// `StoreError::DuplicateUsername`.
    async fn create(&self, user: CreateUser) -> StoreResult<User> {
        let now = Utc::now();

        let result = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, username, password_hash, name, phone_number, gender,
                date_of_birth, membership_status, bio, address, profile_picture,
                created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.phone_number)
        .bind(&user.gender)
        .bind(&user.date_of_birth)
        .bind(&user.membership_status)
        .bind(&user.bio)
        .bind(&user.address)
        .bind(&user.profile_picture)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(created) => Ok(created),
            Err(sqlx::Error::Database(db_error)) if db_error.is_unique_violation() => {
                Err(StoreError::DuplicateUsername(user.username))
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC, id DESC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}

#[cfg(test)]
impl UserRepository {
    /// Removes a user, standing in for the admin deletion the auth flows never do.
    pub async fn delete_user(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
