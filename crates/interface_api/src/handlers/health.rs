//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use core_kernel::StoreError;

use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy"))
}

/// Readiness check
///
/// Every configured store must reach its backend. A server without stores
/// reports `degraded`.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    if state.is_degraded() {
        return Ok(Json(HealthResponse::new("degraded")));
    }

    if let Some(store) = state.employees.as_ref() {
        store.health_check().await.map_err(|e| unavailable("employees", e))?;
    }
    if let Some(store) = state.products.as_ref() {
        store.health_check().await.map_err(|e| unavailable("products", e))?;
    }

    Ok(Json(HealthResponse::new("ready")))
}

fn unavailable(store: &str, error: StoreError) -> StatusCode {
    warn!(store, error = %error, "Readiness check failed");
    StatusCode::SERVICE_UNAVAILABLE
}
