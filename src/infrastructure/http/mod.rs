//! HTTP REST API routes

mod error;
mod health_routes;
mod story_routes;

use anyhow::{Context, Result};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Story routes
        .route("/api/stories", get(story_routes::list_stories))
        .route("/api/stories", post(story_routes::create_story))
        .route("/api/stories/{id}", get(story_routes::get_story))
}

/// CORS for the configured origin, or any origin when none is configured
pub fn cors_layer(config: &AppConfig) -> Result<CorsLayer> {
    let origin = match &config.cors_allowed_origin {
        Some(origin) => AllowOrigin::exact(
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid CORS_ALLOWED_ORIGIN: {}", origin))?,
        ),
        None => AllowOrigin::from(Any),
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// The full application: health check, API routes and middleware
pub fn create_app(state: Arc<AppState>) -> Result<Router> {
    let cors = cors_layer(&state.config)?;

    Ok(Router::new()
        .route("/health", get(health_routes::health_check))
        .merge(create_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
