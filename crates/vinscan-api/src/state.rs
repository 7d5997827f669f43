//! Application state management

use std::sync::Arc;
use std::time::Instant;
use vinscan_core::{Config, context_error::Result};
use vinscan_forms::{
    CameraDevice, ContactFormController, LoggingSink, MockVinDecoder, ScannerController,
    SimulatedCamera, SubmissionSink, VinDecoder,
};

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Where contact submissions are delivered
    pub sink: Arc<dyn SubmissionSink>,
    /// VIN decoder used by the scanner
    pub decoder: Arc<dyn VinDecoder>,
    /// Camera used in camera scan mode
    pub camera: Arc<dyn CameraDevice>,
    /// When the server started
    pub started_at: Instant,
}

impl AppState {
    /// Create state with the default collaborators: a logging sink, the mock
    /// decoder and a simulated camera that grants access
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sink: Arc::new(LoggingSink),
            decoder: Arc::new(MockVinDecoder::new()),
            camera: Arc::new(SimulatedCamera::granted()),
            started_at: Instant::now(),
        }
    }

    /// Replace the submission sink
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn SubmissionSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the VIN decoder
    #[must_use]
    pub fn with_decoder(mut self, decoder: Arc<dyn VinDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Replace the camera
    #[must_use]
    pub fn with_camera(mut self, camera: Arc<dyn CameraDevice>) -> Self {
        self.camera = camera;
        self
    }

    /// Mount a contact form for one request
    pub fn contact_form(&self) -> ContactFormController {
        ContactFormController::new(Arc::clone(&self.sink), self.config.forms.clone())
    }

    /// Mount a scanner for one request
    pub fn scanner(&self) -> ScannerController {
        ScannerController::new(
            Arc::clone(&self.decoder),
            Arc::clone(&self.camera),
            self.config.forms.clone(),
        )
    }

    /// Seconds since the server started
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Check if the application is properly configured
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vinscan_forms::{FormPhase, RecordingSink, ScanMode};

    #[test]
    fn test_appstate_defaults() {
        let state = AppState::new(Config::default());

        assert_eq!(state.sink.name(), "log");
        assert_eq!(state.decoder.name(), "mock");
        assert_eq!(state.camera.name(), "simulated-camera");
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(AppState::new(config).validate().is_err());
    }

    #[test]
    fn test_controllers_start_fresh() {
        let state = AppState::new(Config::default())
            .with_sink(Arc::new(RecordingSink::new()))
            .with_camera(Arc::new(SimulatedCamera::denied()));

        assert_eq!(state.sink.name(), "recording");
        assert_eq!(state.contact_form().state().phase, FormPhase::Editing);
        assert_eq!(state.scanner().state().mode, ScanMode::Manual);
    }
}
