//! Error types for VINScan Pro

use std::{error::Error as StdError, fmt};

/// Main error type for VINScan Pro
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(std::io::Error),

    /// Configuration error
    Configuration {
        /// Error message
        message: String,
    },

    /// Validation error
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Unknown value for a query parameter
    InvalidQuery {
        /// Query parameter name
        parameter: String,
        /// Rejected value
        value: String,
    },

    /// Not found error
    NotFound {
        /// Resource that was not found
        resource: String,
    },

    /// Export collaborator failure
    Export {
        /// Requested document format
        format: String,
        /// Failure description
        message: String,
    },

    /// Serialization error
    Serialization(serde_json::Error),

    /// Other error
    Other(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an export error
    pub fn export(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Export {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Whether the error was caused by caller input
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::InvalidQuery { .. } | Self::NotFound { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Validation { field, message } => {
                write!(f, "Validation error: {field} - {message}")
            }
            Self::InvalidQuery { parameter, value } => {
                write!(f, "Invalid value '{value}' for parameter '{parameter}'")
            }
            Self::NotFound { resource } => write!(f, "Resource not found: {resource}"),
            Self::Export { format, message } => write!(f, "Export to {format} failed: {message}"),
            Self::Serialization(err) => write!(f, "Serialization error: {err}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::export("csv", err.to_string())
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::missing_panics_doc,
    clippy::uninlined_format_args,
    clippy::match_same_arms
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let app_error = Error::from(io_error);

        match app_error {
            Error::Io(_) => {}
            _ => panic!("Expected Io error variant"),
        }

        assert!(format!("{}", app_error).contains("I/O error"));
        assert!(app_error.source().is_some());
    }

    #[test]
    fn test_configuration_error() {
        let error = Error::Configuration {
            message: "invalid port".to_string(),
        };

        assert_eq!(format!("{}", error), "Configuration error: invalid port");
    }

    #[test]
    fn test_validation_error() {
        let error = Error::Validation {
            field: "email".to_string(),
            message: "Email is required".to_string(),
        };

        assert_eq!(
            format!("{}", error),
            "Validation error: email - Email is required"
        );
        assert!(error.is_client_error());
    }

    #[test]
    fn test_invalid_query_error() {
        let error = Error::InvalidQuery {
            parameter: "sort".to_string(),
            value: "horsepower".to_string(),
        };

        assert_eq!(
            format!("{}", error),
            "Invalid value 'horsepower' for parameter 'sort'"
        );
        assert!(error.is_client_error());
        assert!(error.source().is_none());
    }

    #[test]
    fn test_export_error() {
        let error = Error::export("pdf", "renderer unavailable");
        assert_eq!(format!("{}", error), "Export to pdf failed: renderer unavailable");
        assert!(!error.is_client_error());
    }

    #[test]
    fn test_not_found_error() {
        let error = Error::NotFound {
            resource: "vehicle 42".to_string(),
        };
        assert_eq!(format!("{}", error), "Resource not found: vehicle 42");
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let error = Error::from(json_error);

        assert!(matches!(error, Error::Serialization(_)));
        assert!(format!("{}", error).starts_with("Serialization error"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_other_error() {
        let error = Error::Other("something odd".to_string());
        assert_eq!(format!("{}", error), "something odd");
    }
}
