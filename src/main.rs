//! Tusk Engine - Backend API for user stories and their tasks
//!
//! The Engine is the backend server that:
//! - Validates and stores user stories with their tasks
//! - Serves story lists and details over a REST API
//! - Publishes domain events when stories are added

mod application;
mod domain;
mod infrastructure;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::event_bus::run_event_logger;
use crate::infrastructure::http;
use crate::infrastructure::seed::seed_demo_data;
use crate::infrastructure::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tusk_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Tusk Engine");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Store: {:?} ({})", config.store, config.database_url);
    tracing::info!("  Priority policy: {:?}", config.priority_policy);

    // Initialize application state
    let state = AppState::new(config).await?;
    let state = Arc::new(state);
    tracing::info!("Application state initialized");

    if state.config.seed_demo_data {
        seed_demo_data(state.store.repository().as_ref()).await?;
    }

    // Domain event logger
    let event_logger = {
        let receiver = state.event_bus.subscribe();
        tokio::spawn(async move {
            tracing::info!("Starting event logger");
            run_event_logger(receiver).await;
        })
    };

    // Build the router
    let app = http::create_app(state.clone())?;

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run server with graceful shutdown
    let server = axum::serve(listener, app);

    // Wait for shutdown signal (Ctrl+C)
    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received, stopping...");
            state.shutdown.cancel();
            event_logger.abort();
            tracing::info!("Event logger stopped");
        }
    }

    Ok(())
}
