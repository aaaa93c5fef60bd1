//! Main entry point for the Jobboard backend.
//!
//! This file initializes tracing, loads configuration, sets up the database
//! connection and serves the Axum application.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod state;
mod utils;

use anyhow::{Context, Result};
use config::Config;
use database::Database;
use state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;
    let state = AppState::from_config(&config, db.pool().clone())?;

    info!(
        "Issuing tokens valid for {} seconds",
        state.tokens.ttl().num_seconds()
    );
    let app = api::app_router(state);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    info!("Starting Jobboard server on port {}", config.server_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
