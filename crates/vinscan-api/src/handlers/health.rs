//! Health check endpoint for monitoring

use crate::state::AppState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use vinscan_core::navigation::PRODUCT_NAME;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Product name
    pub service: String,
    /// Service version
    pub version: String,
    /// Timestamp of the check
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Seconds since startup
    pub uptime_seconds: u64,
    /// Active collaborators
    pub collaborators: Collaborators,
}

/// Names of the configured collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collaborators {
    /// Submission sink
    pub submission_sink: String,
    /// VIN decoder
    pub vin_decoder: String,
    /// Camera device
    pub camera: String,
}

/// Basic health check endpoint for load balancers and monitoring systems
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: PRODUCT_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        uptime_seconds: state.uptime_seconds(),
        collaborators: Collaborators {
            submission_sink: state.sink.name().to_string(),
            vin_decoder: state.decoder.name().to_string(),
            camera: state.camera.name().to_string(),
        },
    };

    debug!(uptime = response.uptime_seconds, "Health check completed");
    Json(response)
}
