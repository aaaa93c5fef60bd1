//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, token signing secret and hashing cost.
//! Configuration is read once at startup and passed down explicitly.

use anyhow::{Context, Result, bail};
use std::env;

/// Default token lifetime: 7 days.
const DEFAULT_JWT_EXPIRES_IN_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Longest accepted token lifetime: 365 days.
pub const MAX_JWT_EXPIRES_IN_SECONDS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expires_in_seconds: u64,
    pub bcrypt_cost: u32,
    pub server_port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://jobboard.db?mode=rwc".to_string());

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let jwt_expires_in_seconds = parse_jwt_expires_in(
            &env::var("JWT_EXPIRES_IN_SECONDS")
                .unwrap_or_else(|_| DEFAULT_JWT_EXPIRES_IN_SECONDS.to_string()),
        )?;

        let bcrypt_cost = env::var("BCRYPT_COST")
            .unwrap_or_else(|_| bcrypt::DEFAULT_COST.to_string())
            .parse::<u32>()
            .context("BCRYPT_COST must be a valid number")?;
        if !(4..=31).contains(&bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31, got {}", bcrypt_cost);
        }

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "4000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_expires_in_seconds,
            bcrypt_cost,
            server_port,
        })
    }
}

/// Parses a token lifetime in seconds, bounded to `1..=MAX_JWT_EXPIRES_IN_SECONDS`.
fn parse_jwt_expires_in(raw: &str) -> Result<u64> {
    let seconds = raw
        .parse::<u64>()
        .context("JWT_EXPIRES_IN_SECONDS must be a valid number")?;
    if !(1..=MAX_JWT_EXPIRES_IN_SECONDS).contains(&seconds) {
        bail!(
            "JWT_EXPIRES_IN_SECONDS must be between 1 and {}, got {}",
            MAX_JWT_EXPIRES_IN_SECONDS,
            seconds
        );
    }
    Ok(seconds)
}
