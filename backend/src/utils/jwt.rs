//! JWT token utilities for authentication.
//!
//! Signs an account id into an HS256 bearer token with an expiry and verifies
//! it again. The signature is always checked before any claim is read; expiry
//! is then checked here against an explicit clock so it can be tested.

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Account ID
    pub sub: String,
    /// Token issued at timestamp (seconds)
    pub iat: i64,
    /// Token expiration timestamp (seconds)
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    /// Check if token has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }
}

/// Reasons a token can be refused or fail to mint.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature does not match")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

/// Issues and verifies bearer tokens with a single process-wide secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec for `secret`, issuing tokens valid for `ttl`.
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `verify_at`, after the signature.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        TokenCodec {
            encoding_key,
            decoding_key,
            validation,
            ttl,
        }
    }

    /// Codec for the configured secret and lifetime.
    ///
    /// # Errors
    /// Fails if the lifetime does not fit a `chrono::Duration`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let ttl = i64::try_from(config.jwt_expires_in_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .with_context(|| {
                format!(
                    "JWT_EXPIRES_IN_SECONDS out of range: {}",
                    config.jwt_expires_in_seconds
                )
            })?;
        Ok(Self::new(&config.jwt_secret, ttl))
    }

    /// Lifetime of tokens minted by `issue`.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Generate a token for `subject` valid from now for the configured ttl.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_at(subject, self.ttl, Utc::now())
    }

    /// Generate a token for `subject` issued at `issued_at`, valid for `ttl`.
    pub fn issue_at(
        &self,
        subject: &str,
        ttl: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Encoding(format!("expiry out of range for ttl {}", ttl)))?;

        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Validate and decode a token against the current time.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Validate and decode a token as of `now`.
    ///
    /// The MAC comparison inside `jsonwebtoken` is constant-time.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })?;

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
