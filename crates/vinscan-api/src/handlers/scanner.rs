//! VIN scanner actions

use crate::error::{ApiResult, form_error};
use crate::state::AppState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use vinscan_core::fixtures::SAMPLE_VIN;
use vinscan_core::navigation::{Navigation, Route};
use vinscan_core::types::ApiResponse;
use vinscan_core::utils::VIN_LENGTH;
use vinscan_forms::{DecodedVehicle, ScanMode, ScannerState};

/// Scanner page payload
#[derive(Debug, Clone, Serialize)]
pub struct ScannerPage {
    /// Header
    pub navigation: Navigation,
    /// Initial scanner state
    pub scanner: ScannerState,
    /// "0/17"
    pub progress: String,
    /// Required VIN length
    pub vin_length: usize,
    /// VIN used by the simulate action
    pub sample_vin: &'static str,
}

/// Body of a decode request
#[derive(Debug, Clone, Deserialize)]
pub struct DecodeRequest {
    /// VIN as typed
    pub vin: String,
}

/// Outcome of a decode
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// Decoded details
    pub vehicle: DecodedVehicle,
    /// Input progress after the scan
    pub progress: String,
}

/// Outcome of a camera request
#[derive(Debug, Clone, Serialize)]
pub struct CameraStatus {
    /// Scanner mode after the request
    pub mode: ScanMode,
    /// Whether the camera was acquired
    pub camera_active: bool,
    /// Device that answered
    pub device: String,
}

/// `GET /scanner`
pub async fn scanner_page(State(state): State<Arc<AppState>>) -> Json<ScannerPage> {
    let scanner = state.scanner().state();

    Json(ScannerPage {
        navigation: Navigation::for_route(Route::Scanner),
        progress: scanner.progress(),
        scanner,
        vin_length: VIN_LENGTH,
        sample_vin: SAMPLE_VIN,
    })
}

/// `POST /scanner/decode`
pub async fn decode_vin(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DecodeRequest>,
) -> ApiResult<ApiResponse<ScanResult>> {
    let scanner = state.scanner();
    let vehicle = scanner
        .decode_vin(&request.vin)
        .await
        .map_err(|err| form_error(&err))?;

    info!(vin = %vehicle.vin, valid = vehicle.is_valid, "VIN decode served");
    Ok(Json(ApiResponse::success(ScanResult {
        vehicle,
        progress: scanner.progress(),
    })))
}

/// `POST /scanner/simulate`
pub async fn simulate_scan(
    State(state): State<Arc<AppState>>,
) -> ApiResult<ApiResponse<ScanResult>> {
    let scanner = state.scanner();
    let vehicle = scanner
        .simulate_scan()
        .await
        .map_err(|err| form_error(&err))?;

    Ok(Json(ApiResponse::success(ScanResult {
        vehicle,
        progress: scanner.progress(),
    })))
}

/// `POST /scanner/camera`
///
/// Acquires the camera and releases it when the request ends. A refusal is
/// a 403 carrying the scanner alert.
pub async fn start_camera(
    State(state): State<Arc<AppState>>,
) -> ApiResult<ApiResponse<CameraStatus>> {
    let scanner = state.scanner();
    scanner
        .start_camera()
        .await
        .map_err(|err| form_error(&err))?;

    let snapshot = scanner.state();
    scanner.release_camera();

    Ok(Json(ApiResponse::success(CameraStatus {
        mode: snapshot.mode,
        camera_active: snapshot.camera_active,
        device: state.camera.name().to_string(),
    })))
}
