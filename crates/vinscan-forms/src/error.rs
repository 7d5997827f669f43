//! Error types for the form and scanner controllers

use thiserror::Error;

/// Result type alias for form operations
pub type FormResult<T> = Result<T, FormError>;

/// Errors that can occur while editing, submitting or decoding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A required field is empty
    #[error("{field} is required")]
    MissingField {
        /// Field name
        field: String,
    },

    /// A field holds a value of the wrong shape
    #[error("Invalid {field}: {message}")]
    InvalidField {
        /// Field name
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// Fields cannot change outside the editing phase
    #[error("Form is read-only while {phase}")]
    ReadOnly {
        /// Current phase
        phase: String,
    },

    /// A submission or decode is already running
    #[error("{operation} is already in progress")]
    AlreadyInFlight {
        /// Operation name
        operation: String,
    },

    /// VIN is not exactly 17 characters
    #[error("VIN must be exactly {expected} characters, got {actual}")]
    InvalidVinLength {
        /// Required length
        expected: usize,
        /// Length entered
        actual: usize,
    },

    /// An action was requested before its precondition holds
    #[error("Cannot {action} yet")]
    NotReady {
        /// Requested action
        action: String,
    },

    /// The user refused camera access
    #[error("Camera access is required for VIN scanning")]
    PermissionDenied,

    /// No usable camera
    #[error("Camera unavailable: {message}")]
    DeviceUnavailable {
        /// Device error
        message: String,
    },

    /// The submission sink rejected the record
    #[error("Delivery to {sink} failed: {message}")]
    Delivery {
        /// Sink name
        sink: String,
        /// Failure reason
        message: String,
    },

    /// The VIN decoder failed
    #[error("VIN decoding failed: {message}")]
    Decoder {
        /// Failure reason
        message: String,
    },

    /// An operation did not finish in time
    #[error("{operation} timed out after {millis}ms")]
    Timeout {
        /// Operation name
        operation: String,
        /// Time allowed
        millis: u64,
    },

    /// The controller was unmounted while the operation was pending
    #[error("{operation} was cancelled")]
    Cancelled {
        /// Operation name
        operation: String,
    },

    /// A background task panicked or was aborted
    #[error("Background task failed: {message}")]
    Task {
        /// Join error
        message: String,
    },
}

impl FormError {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid field error
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a read-only error
    pub fn read_only(phase: impl Into<String>) -> Self {
        Self::ReadOnly {
            phase: phase.into(),
        }
    }

    /// Create an already-in-flight error
    pub fn already_in_flight(operation: impl Into<String>) -> Self {
        Self::AlreadyInFlight {
            operation: operation.into(),
        }
    }

    /// Create a not-ready error
    pub fn not_ready(action: impl Into<String>) -> Self {
        Self::NotReady {
            action: action.into(),
        }
    }

    /// Create a device unavailable error
    pub fn device_unavailable(message: impl Into<String>) -> Self {
        Self::DeviceUnavailable {
            message: message.into(),
        }
    }

    /// Create a delivery error
    pub fn delivery(sink: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Delivery {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a decoder error
    pub fn decoder(message: impl Into<String>) -> Self {
        Self::Decoder {
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, millis: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            millis,
        }
    }

    /// Create a cancellation error
    pub fn cancelled(operation: impl Into<String>) -> Self {
        Self::Cancelled {
            operation: operation.into(),
        }
    }

    /// Create a task error
    pub fn task(message: impl Into<String>) -> Self {
        Self::Task {
            message: message.into(),
        }
    }

    /// Whether the error was caused by what the user entered or did
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::InvalidField { .. }
                | Self::InvalidVinLength { .. }
                | Self::PermissionDenied
        )
    }

    /// Whether the error came from a simulated external collaborator
    pub const fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            Self::Delivery { .. } | Self::Decoder { .. } | Self::Timeout { .. }
        )
    }
}

impl From<tokio::task::JoinError> for FormError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_cancelled() {
            Self::cancelled("background task")
        } else {
            Self::task(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FormError::missing_field("email").to_string(),
            "email is required"
        );
        assert_eq!(
            FormError::InvalidVinLength {
                expected: 17,
                actual: 9
            }
            .to_string(),
            "VIN must be exactly 17 characters, got 9"
        );
        assert_eq!(
            FormError::PermissionDenied.to_string(),
            "Camera access is required for VIN scanning"
        );
        assert_eq!(
            FormError::timeout("delivery", 10_000).to_string(),
            "delivery timed out after 10000ms"
        );
        assert_eq!(
            FormError::cancelled("contact submission").to_string(),
            "contact submission was cancelled"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(FormError::missing_field("phone").is_user_error());
        assert!(FormError::PermissionDenied.is_user_error());
        assert!(!FormError::delivery("log", "down").is_user_error());

        assert!(FormError::delivery("log", "down").is_collaborator_failure());
        assert!(FormError::decoder("bad").is_collaborator_failure());
        assert!(!FormError::cancelled("x").is_collaborator_failure());
    }

    #[tokio::test]
    async fn test_join_error_conversion() {
        let handle = tokio::spawn(async {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
        });
        handle.abort();
        let err: FormError = handle.await.unwrap_err().into();
        assert!(matches!(err, FormError::Cancelled { .. }));
    }
}
