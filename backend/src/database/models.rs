//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. `User` carries the credential digest and never leaves the
//! server; `UserProfile` is the view handed to API callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// bcrypt only reads this many bytes of input.
pub const MAX_PASSWORD_BYTES: usize = 72;

fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_too_long")
            .with_message(Cow::Borrowed("Password must be at most 72 bytes")));
    }
    Ok(())
}

/// A stored account, including its password digest.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub phone_number: String,
    pub gender: String,
    pub date_of_birth: String,
    pub membership_status: String,
    pub bio: Option<String>,
    pub address: Option<String>,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account as exposed to clients. Has no digest field, so it cannot leak one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub name: String,
    pub phone_number: String,
    pub gender: String,
    pub date_of_birth: String,
    pub membership_status: String,
    pub bio: Option<String>,
    pub address: Option<String>,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            username: user.username,
            name: user.name,
            phone_number: user.phone_number,
            gender: user.gender,
            date_of_birth: user.date_of_birth,
            membership_status: user.membership_status,
            bio: user.bio,
            address: user.address,
            profile_picture: user.profile_picture,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Signup payload. Missing fields deserialize as empty and are caught by validation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NewUser {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Username must be between 1-255 characters"
    ))]
    pub username: String,

    #[validate(
        length(min = 8, message = "Password must be at least 8 characters"),
        custom(function = "validate_password_bytes")
    )]
    pub password: String,

    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 32, message = "Phone number is required"))]
    pub phone_number: String,

    #[validate(length(min = 1, message = "Gender is required"))]
    pub gender: String,

    #[validate(length(min = 1, message = "Date of birth is required"))]
    pub date_of_birth: String,

    #[validate(length(min = 1, message = "Membership status is required"))]
    pub membership_status: String,

    pub bio: Option<String>,
    pub address: Option<String>,
    pub profile_picture: Option<String>,
}

/// Draft handed to the credential store: the secret is already digested.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub phone_number: String,
    pub gender: String,
    pub date_of_birth: String,
    pub membership_status: String,
    pub bio: Option<String>,
    pub address: Option<String>,
    pub profile_picture: Option<String>,
}

impl CreateUser {
    /// Builds a store draft from a validated signup payload and its digest.
    pub fn from_new_user(new_user: NewUser, password_hash: String) -> Self {
        CreateUser {
            id: uuid::Uuid::now_v7().to_string(),
            username: new_user.username,
            password_hash,
            name: new_user.name,
            phone_number: new_user.phone_number,
            gender: new_user.gender,
            date_of_birth: new_user.date_of_birth,
            membership_status: new_user.membership_status,
            bio: new_user.bio,
            address: new_user.address,
            profile_picture: new_user.profile_picture,
        }
    }
}
