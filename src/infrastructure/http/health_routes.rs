//! Health check

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthEntry {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl HealthEntry {
    fn healthy() -> Self {
        Self {
            status: "Healthy",
            description: None,
        }
    }

    fn unhealthy(description: String) -> Self {
        Self {
            status: "Unhealthy",
            description: Some(description),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResults {
    pub api: HealthEntry,
    pub database: HealthEntry,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: &'static str,
    pub results: HealthResults,
}

/// Report the API and the story store
pub async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.store.ping().await {
        Ok(()) => HealthEntry::healthy(),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            HealthEntry::unhealthy(e.to_string())
        }
    };

    let healthy = database.description.is_none();
    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: if healthy { "Healthy" } else { "Unhealthy" },
            store: state.store.name(),
            results: HealthResults {
                api: HealthEntry::healthy(),
                database,
            },
        }),
    )
}
