//! Camera device collaborator for camera scan mode

use crate::error::{FormError, FormResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{info, warn};

/// Which way the camera faces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// Rear camera, pointed at the windshield
    #[default]
    Environment,
    /// Front camera
    User,
}

/// An acquired camera. The device stays reserved until this is dropped.
#[derive(Debug)]
pub struct CameraStream {
    device: String,
    facing: FacingMode,
    acquired_at: DateTime<Utc>,
    _permit: Option<OwnedSemaphorePermit>,
}

impl CameraStream {
    /// Wrap an acquired device
    pub fn new(device: impl Into<String>, facing: FacingMode) -> Self {
        Self {
            device: device.into(),
            facing,
            acquired_at: Utc::now(),
            _permit: None,
        }
    }

    fn with_permit(mut self, permit: OwnedSemaphorePermit) -> Self {
        self._permit = Some(permit);
        self
    }

    /// Device name
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Facing mode the stream was opened with
    pub const fn facing(&self) -> FacingMode {
        self.facing
    }

    /// When the device was acquired
    pub const fn acquired_at(&self) -> DateTime<Utc> {
        self.acquired_at
    }
}

/// Grants exclusive access to a camera
#[async_trait]
pub trait CameraDevice: Send + Sync + fmt::Debug {
    /// Acquire the camera facing `facing`
    async fn acquire(&self, facing: FacingMode) -> FormResult<CameraStream>;

    /// Device name for logs
    fn name(&self) -> &str;
}

/// How a [`SimulatedCamera`] answers acquisition requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraPermission {
    /// The user allows access
    Granted,
    /// The user refuses access
    Denied,
}

/// In-process camera with a single exclusive slot
#[derive(Debug, Clone)]
pub struct SimulatedCamera {
    permission: CameraPermission,
    slot: Arc<Semaphore>,
}

impl SimulatedCamera {
    /// Camera the user has allowed
    pub fn granted() -> Self {
        Self::with_permission(CameraPermission::Granted)
    }

    /// Camera the user has refused
    pub fn denied() -> Self {
        Self::with_permission(CameraPermission::Denied)
    }

    /// Camera with an explicit permission answer
    pub fn with_permission(permission: CameraPermission) -> Self {
        Self {
            permission,
            slot: Arc::new(Semaphore::new(1)),
        }
    }
}

impl Default for SimulatedCamera {
    fn default() -> Self {
        Self::granted()
    }
}

#[async_trait]
impl CameraDevice for SimulatedCamera {
    async fn acquire(&self, facing: FacingMode) -> FormResult<CameraStream> {
        if self.permission == CameraPermission::Denied {
            warn!(device = self.name(), "Camera access denied");
            return Err(FormError::PermissionDenied);
        }

        let permit = Arc::clone(&self.slot)
            .try_acquire_owned()
            .map_err(|_| FormError::device_unavailable("camera is already in use"))?;

        info!(device = self.name(), ?facing, "Camera acquired");
        Ok(CameraStream::new(self.name(), facing).with_permit(permit))
    }

    fn name(&self) -> &str {
        "simulated-camera"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_granted_camera() {
        let camera = SimulatedCamera::granted();
        let stream = camera.acquire(FacingMode::Environment).await.unwrap();

        assert_eq!(stream.device(), "simulated-camera");
        assert_eq!(stream.facing(), FacingMode::Environment);
    }

    #[tokio::test]
    async fn test_denied_camera() {
        let err = SimulatedCamera::denied()
            .acquire(FacingMode::Environment)
            .await
            .unwrap_err();
        assert_eq!(err, FormError::PermissionDenied);
    }

    #[tokio::test]
    async fn test_camera_is_exclusive() {
        let camera = SimulatedCamera::granted();
        let first = camera.acquire(FacingMode::Environment).await.unwrap();

        let err = camera.acquire(FacingMode::User).await.unwrap_err();
        assert!(matches!(err, FormError::DeviceUnavailable { .. }));

        drop(first);
        assert!(camera.acquire(FacingMode::User).await.is_ok());
    }
}
