//! `VINScan Pro` API server library
//!
//! Serves every page of the demo as a JSON view model built from the fixture
//! data, plus the scanner, contact and export actions.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::unused_async
)]

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use state::AppState;

use axum::Router;
use axum::http::{HeaderValue, Method};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use vinscan_core::Config;
use vinscan_core::config::ApiConfig;
use vinscan_core::context_error::Result;

/// Build the API router with all routes and middleware
///
/// # Errors
///
/// Returns an error if the configuration fails validation.
pub fn build_router(config: Config) -> Result<Router> {
    build_router_with_state(AppState::new(config))
}

/// Build the router around prepared state, e.g. with mock collaborators
///
/// # Errors
///
/// Returns an error if the application state validation fails.
pub fn build_router_with_state(state: AppState) -> Result<Router> {
    state.validate()?;

    let timeout = Duration::from_secs(state.config.security.request_timeout);
    let cors = cors_layer(&state.config.api);
    let state = Arc::new(state);

    let mut app = routes::build_router()
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(timeout)),
        );
    if let Some(cors) = cors {
        app = app.layer(cors);
    }

    Ok(app)
}

/// CORS layer for the configured origins, `None` when disabled
pub fn cors_layer(api: &ApiConfig) -> Option<CorsLayer> {
    if !api.enable_cors {
        return None;
    }

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if api.cors_origins.iter().any(|origin| origin == "*") {
        Some(layer.allow_origin(Any))
    } else {
        let origins: Vec<HeaderValue> = api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        Some(layer.allow_origin(AllowOrigin::list(origins)))
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_disabled() {
        let api = ApiConfig {
            enable_cors: false,
            ..ApiConfig::default()
        };
        assert!(cors_layer(&api).is_none());
    }

    #[test]
    fn test_cors_enabled_by_default() {
        assert!(cors_layer(&ApiConfig::default()).is_some());

        let api = ApiConfig {
            enable_cors: true,
            cors_origins: vec!["https://dealer.example".to_string()],
        };
        assert!(cors_layer(&api).is_some());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(build_router(config).is_err());
    }
}
