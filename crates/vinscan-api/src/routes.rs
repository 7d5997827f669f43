//! Route definitions

use crate::error::api_error;
use crate::{handlers, state::AppState};
use axum::{
    Router,
    http::{StatusCode, Uri},
    response::Json,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tracing::debug;
use vinscan_core::types::ErrorResponse;

/// The seven page routes
pub fn page_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::landing::landing))
        .route("/dashboard", get(handlers::dashboard::dashboard))
        .route("/inventory", get(handlers::inventory::inventory))
        .route("/reports", get(handlers::reports::reports))
        .route("/pricing", get(handlers::pricing::pricing))
        .route(
            "/contact",
            get(handlers::contact::contact_form).post(handlers::contact::submit_contact),
        )
        .route("/scanner", get(handlers::scanner::scanner_page))
}

/// Page actions: scanner operations and exports
pub fn action_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/scanner/decode", post(handlers::scanner::decode_vin))
        .route("/scanner/simulate", post(handlers::scanner::simulate_scan))
        .route("/scanner/camera", post(handlers::scanner::start_camera))
        .route(
            "/api/inventory/export",
            post(handlers::inventory::export_inventory),
        )
        .route("/api/reports/export", post(handlers::reports::export_report))
        .layer(CompressionLayer::new())
}

/// Build health check routes
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Combine all routes into a single router
pub fn build_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(page_routes())
        .merge(action_routes())
        .merge(health_routes())
        // Fallback handler for unknown routes
        .fallback(not_found_handler)
}

/// Handle 404 Not Found errors
async fn not_found_handler(uri: Uri) -> (StatusCode, Json<ErrorResponse>) {
    debug!(path = %uri.path(), "Unknown route");
    api_error(
        StatusCode::NOT_FOUND,
        format!("No page at {}", uri.path()),
        "ROUTE_NOT_FOUND",
    )
}
