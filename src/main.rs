// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Usage Dashboard API Server
//!
//! Serves profile, user-table and usage-statistics endpoints backed by an
//! identity provider's management API.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use usage_dashboard::{
    config::Config,
    services::{JwtSessionProvider, ManagementClient},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Usage Dashboard API");

    let directory = ManagementClient::new(config.management())?;
    let sessions = JwtSessionProvider::new(&config.session_signing_key);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        directory: Arc::new(directory),
        sessions: Arc::new(sessions),
    });

    // Build router
    let app = usage_dashboard::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("usage_dashboard=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
