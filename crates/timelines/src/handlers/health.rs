//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Cache stats

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::{handlers::AppError, state::AppState};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub healthy: bool,
    /// Live (non-expired) cache entries.
    pub cache_entries: usize,
}

/// GET /livez - Basic liveness probe.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Cache stats.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Result<Json<HealthStatus>, AppError> {
    let keys = state.cache.keys().await?;

    Ok(Json(HealthStatus {
        healthy: true,
        cache_entries: keys.len(),
    }))
}
