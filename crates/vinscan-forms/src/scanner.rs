//! VIN scanner: manual entry, camera mode and the simulated decode

use crate::camera::{CameraDevice, CameraStream, FacingMode};
use crate::decoder::{DecodedVehicle, VinDecoder};
use crate::error::{FormError, FormResult};
use crate::task::{AbandonGuard, bounded, cancellable_delay};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use vinscan_core::config::FormsConfig;
use vinscan_core::fixtures::SAMPLE_VIN;
use vinscan_core::utils::{VIN_LENGTH, is_decodable_vin, normalize_vin_input, vin_progress};

/// Confirmation once a decoded vehicle is added
pub const ADDED_TO_INVENTORY: &str = "Vehicle added to inventory successfully!";

/// Operation name carried by decode timeouts and cancellations
pub const DECODE_OPERATION: &str = "VIN decode";

/// How the VIN is captured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Typed in
    #[default]
    Manual,
    /// Read through the camera
    Camera,
}

/// Everything the scanner view renders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerState {
    /// Capture mode
    pub mode: ScanMode,
    /// Normalized VIN input
    pub vin_input: String,
    /// Decode in progress
    pub is_scanning: bool,
    /// Whether a camera is held
    pub camera_active: bool,
    /// Last decode result
    pub decoded: Option<DecodedVehicle>,
    /// Blocking alert text
    pub alert: Option<String>,
}

impl ScannerState {
    /// "n/17"
    pub fn progress(&self) -> String {
        vin_progress(&self.vin_input)
    }

    /// Whether the decode control is enabled
    pub fn can_decode(&self) -> bool {
        !self.is_scanning && is_decodable_vin(&self.vin_input)
    }
}

/// Drives one mounted scanner view
#[derive(Debug)]
pub struct ScannerController {
    state: watch::Sender<ScannerState>,
    decoder: Arc<dyn VinDecoder>,
    camera: Arc<dyn CameraDevice>,
    config: FormsConfig,
    token: CancellationToken,
    stream: Mutex<Option<CameraStream>>,
}

impl ScannerController {
    /// Mount a scanner backed by `decoder` and `camera`
    pub fn new(
        decoder: Arc<dyn VinDecoder>,
        camera: Arc<dyn CameraDevice>,
        config: FormsConfig,
    ) -> Self {
        let (state, _) = watch::channel(ScannerState::default());
        Self {
            state,
            decoder,
            camera,
            config,
            token: CancellationToken::new(),
            stream: Mutex::new(None),
        }
    }

    /// Watch state changes
    pub fn subscribe(&self) -> watch::Receiver<ScannerState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ScannerState {
        self.state.borrow().clone()
    }

    /// Current input progress, "n/17"
    pub fn progress(&self) -> String {
        self.state.borrow().progress()
    }

    /// Replace the VIN input; returns the normalized value
    pub fn set_vin_input(&self, input: &str) -> String {
        let vin = normalize_vin_input(input);
        self.state.send_modify(|state| state.vin_input.clone_from(&vin));
        vin
    }

    /// Switch capture mode. Leaving camera mode releases the camera.
    pub fn set_mode(&self, mode: ScanMode) {
        if mode == ScanMode::Manual {
            self.release_camera();
        }
        self.state.send_modify(|state| state.mode = mode);
    }

    /// Decode the current input
    ///
    /// Only runs when the input is exactly 17 characters. Waits
    /// `decode_delay_ms` before asking the decoder. Dropping the returned
    /// future mid-flight clears the scanning flag.
    pub async fn decode(&self) -> FormResult<DecodedVehicle> {
        let vin = self.claim_decode()?;
        let mut in_flight = AbandonGuard::new(&self.token, || {
            warn!(vin = %vin, "VIN decode abandoned mid-flight");
            self.state.send_modify(|state| state.is_scanning = false);
        });

        let result = self.run_decode(&vin).await;
        match &result {
            Err(FormError::Cancelled { .. }) => {}
            Ok(vehicle) => {
                in_flight.disarm();
                info!(vin = %vehicle.vin, decoder = self.decoder.name(), "VIN decoded");
                self.state.send_modify(|state| {
                    state.is_scanning = false;
                    state.decoded = Some(vehicle.clone());
                });
            }
            Err(err) => {
                in_flight.disarm();
                warn!(vin = %vin, error = %err, "VIN decode failed");
                self.state.send_modify(|state| {
                    state.is_scanning = false;
                    state.alert = Some(err.to_string());
                });
            }
        }
        result
    }

    /// Check the gate and mark the scanner busy in one state update
    fn claim_decode(&self) -> FormResult<String> {
        let mut claimed = Err(FormError::already_in_flight(DECODE_OPERATION));
        self.state.send_if_modified(|state| {
            if state.is_scanning {
                return false;
            }
            if !is_decodable_vin(&state.vin_input) {
                claimed = Err(FormError::InvalidVinLength {
                    expected: VIN_LENGTH,
                    actual: state.vin_input.chars().count(),
                });
                return false;
            }
            state.is_scanning = true;
            state.alert = None;
            claimed = Ok(state.vin_input.clone());
            true
        });
        claimed
    }

    async fn run_decode(&self, vin: &str) -> FormResult<DecodedVehicle> {
        cancellable_delay(&self.token, self.config.decode_delay(), DECODE_OPERATION).await?;
        bounded(
            &self.token,
            self.config.delivery_timeout(),
            DECODE_OPERATION,
            self.decoder.decode(vin),
        )
        .await
    }

    /// Enter `vin` as typed and decode it
    ///
    /// Unlike [`Self::set_vin_input`], input longer than 17 characters is
    /// rejected instead of truncated.
    pub async fn decode_vin(&self, vin: &str) -> FormResult<DecodedVehicle> {
        let actual = vin.trim().chars().count();
        if actual != VIN_LENGTH {
            return Err(FormError::InvalidVinLength {
                expected: VIN_LENGTH,
                actual,
            });
        }
        self.set_vin_input(vin.trim());
        self.decode().await
    }

    /// Fill in the sample VIN and decode it
    pub async fn simulate_scan(&self) -> FormResult<DecodedVehicle> {
        self.set_vin_input(SAMPLE_VIN);
        self.decode().await
    }

    /// Switch to camera mode and acquire the rear camera
    ///
    /// A refusal is shown as the scanner alert and returned as
    /// [`FormError::PermissionDenied`].
    pub async fn start_camera(&self) -> FormResult<()> {
        if self.token.is_cancelled() {
            return Err(FormError::cancelled("camera start"));
        }
        self.state.send_modify(|state| state.mode = ScanMode::Camera);

        match self.camera.acquire(FacingMode::Environment).await {
            Ok(stream) => {
                info!(device = stream.device(), "Camera started");
                *self.stream_slot() = Some(stream);
                self.state.send_modify(|state| {
                    state.camera_active = true;
                    state.alert = None;
                });
                Ok(())
            }
            Err(err) => {
                warn!(device = self.camera.name(), error = %err, "Camera start failed");
                self.state.send_modify(|state| {
                    state.camera_active = false;
                    state.alert = Some(err.to_string());
                });
                Err(err)
            }
        }
    }

    /// Release the camera if held
    pub fn release_camera(&self) {
        if self.stream_slot().take().is_some() {
            info!(device = self.camera.name(), "Camera released");
        }
        self.state.send_modify(|state| state.camera_active = false);
    }

    /// Dismiss the alert
    pub fn dismiss_alert(&self) {
        self.state.send_modify(|state| state.alert = None);
    }

    /// Add the decoded vehicle to inventory and clear the scanner
    pub fn add_to_inventory(&self) -> FormResult<&'static str> {
        let Some(vehicle) = self.state.borrow().decoded.clone() else {
            return Err(FormError::not_ready("add to inventory before a VIN is decoded"));
        };

        info!(
            vin = %vehicle.vin,
            make = %vehicle.make,
            model = %vehicle.model,
            year = vehicle.year,
            "Vehicle added to inventory"
        );
        self.state.send_modify(|state| {
            state.decoded = None;
            state.vin_input.clear();
        });
        Ok(ADDED_TO_INVENTORY)
    }

    /// Cancel any pending decode and release the camera
    pub fn unmount(&self) {
        self.token.cancel();
        self.release_camera();
    }

    fn stream_slot(&self) -> MutexGuard<'_, Option<CameraStream>> {
        self.stream.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for ScannerController {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::SimulatedCamera;
    use crate::decoder::MockVinDecoder;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::time::Duration;

    fn scanner() -> ScannerController {
        ScannerController::new(
            Arc::new(MockVinDecoder::new()),
            Arc::new(SimulatedCamera::granted()),
            FormsConfig::default(),
        )
    }

    #[rstest]
    #[case("", "0/17")]
    #[case("1hgbh", "5/17")]
    #[case("1HGBH41JXMN109186EXTRA", "17/17")]
    fn test_input_is_normalized(#[case] input: &str, #[case] progress: &str) {
        let scanner = scanner();
        let vin = scanner.set_vin_input(input);

        assert!(vin.chars().all(|c| !c.is_ascii_lowercase()));
        assert_eq!(scanner.progress(), progress);
    }

    #[tokio::test]
    async fn test_decode_requires_seventeen_characters() {
        let scanner = scanner();
        scanner.set_vin_input("1HGBH41");

        assert!(!scanner.state().can_decode());
        assert_eq!(
            scanner.decode().await.unwrap_err(),
            FormError::InvalidVinLength {
                expected: 17,
                actual: 7
            }
        );
        assert!(!scanner.state().is_scanning);
    }

    #[tokio::test(start_paused = true)]
    async fn test_decode_after_delay() {
        let scanner = scanner();
        scanner.set_vin_input("wbxht910x0ww12345");
        let start = tokio::time::Instant::now();

        let vehicle = scanner.decode().await.unwrap();

        assert!(start.elapsed() >= Duration::from_secs(2));
        assert_eq!(vehicle.vin, "WBXHT910X0WW12345");
        assert_eq!(vehicle.make, "Honda");
        assert!(vehicle.is_valid);

        let state = scanner.state();
        assert!(!state.is_scanning);
        assert_eq!(state.decoded, Some(vehicle));
    }

    #[tokio::test(start_paused = true)]
    async fn test_decode_vin_rejects_long_input() {
        let scanner = scanner();
        let err = scanner.decode_vin("1HGBH41JXMN109186XX").await.unwrap_err();

        assert_eq!(
            err,
            FormError::InvalidVinLength {
                expected: 17,
                actual: 19
            }
        );
        assert!(scanner.decode_vin(SAMPLE_VIN).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_decode_failure_sets_alert() {
        let scanner = ScannerController::new(
            Arc::new(MockVinDecoder::new().with_failure("lookup offline")),
            Arc::new(SimulatedCamera::granted()),
            FormsConfig::default(),
        );

        let err = scanner.simulate_scan().await.unwrap_err();
        assert_eq!(err, FormError::decoder("lookup offline"));

        let state = scanner.state();
        assert!(!state.is_scanning);
        assert_eq!(state.decoded, None);
        assert_eq!(
            state.alert.as_deref(),
            Some("VIN decoding failed: lookup offline")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_cancels_decode() {
        let scanner = Arc::new(scanner());
        let decoding = Arc::clone(&scanner);
        let pending = tokio::spawn(async move { decoding.simulate_scan().await });

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(scanner.state().is_scanning);
        scanner.unmount();

        let err = pending.await.unwrap().unwrap_err();
        assert_eq!(err, FormError::cancelled("VIN decode"));
        assert_eq!(scanner.state().decoded, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_decode_frees_scanner() {
        let scanner = scanner();

        let abandoned =
            tokio::time::timeout(Duration::from_millis(500), scanner.simulate_scan()).await;
        assert!(abandoned.is_err());

        let state = scanner.state();
        assert!(!state.is_scanning);
        assert_eq!(state.decoded, None);
        assert!(state.can_decode());

        let vehicle = scanner.decode().await.unwrap();
        assert_eq!(vehicle.vin, SAMPLE_VIN);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_decode_rejected_while_scanning() {
        let scanner = scanner();
        scanner.set_vin_input(SAMPLE_VIN);

        let (first, second) = tokio::join!(scanner.decode(), scanner.decode());

        assert_eq!(first.unwrap().vin, SAMPLE_VIN);
        assert_eq!(
            second.unwrap_err(),
            FormError::already_in_flight(DECODE_OPERATION)
        );
        assert!(!scanner.state().is_scanning);
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_to_inventory_clears_scanner() {
        let scanner = scanner();
        assert!(matches!(
            scanner.add_to_inventory().unwrap_err(),
            FormError::NotReady { .. }
        ));

        scanner.simulate_scan().await.unwrap();
        assert_eq!(scanner.add_to_inventory().unwrap(), ADDED_TO_INVENTORY);

        let state = scanner.state();
        assert_eq!(state.decoded, None);
        assert_eq!(state.vin_input, "");
    }

    #[tokio::test]
    async fn test_camera_denied_shows_alert() {
        let scanner = ScannerController::new(
            Arc::new(MockVinDecoder::new()),
            Arc::new(SimulatedCamera::denied()),
            FormsConfig::default(),
        );

        let err = scanner.start_camera().await.unwrap_err();
        assert_eq!(err, FormError::PermissionDenied);

        let state = scanner.state();
        assert_eq!(state.mode, ScanMode::Camera);
        assert!(!state.camera_active);
        assert_eq!(
            state.alert.as_deref(),
            Some("Camera access is required for VIN scanning")
        );
    }

    #[tokio::test]
    async fn test_camera_released_on_manual_mode() {
        let camera = Arc::new(SimulatedCamera::granted());
        let scanner = ScannerController::new(
            Arc::new(MockVinDecoder::new()),
            Arc::clone(&camera) as Arc<dyn CameraDevice>,
            FormsConfig::default(),
        );

        scanner.start_camera().await.unwrap();
        assert!(scanner.state().camera_active);
        assert!(camera.acquire(FacingMode::User).await.is_err());

        scanner.set_mode(ScanMode::Manual);
        assert!(!scanner.state().camera_active);
        assert!(camera.acquire(FacingMode::User).await.is_ok());
    }
}
