//! Configuration management for VINScan Pro

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Form controller timing and delivery
    pub forms: FormsConfig,

    /// API configuration
    pub api: ApiConfig,

    /// Security configuration
    pub security: SecurityConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Form controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormsConfig {
    /// Simulated submission delay in milliseconds
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,

    /// How long the success message stays before the form resets
    #[serde(default = "default_reset_after_ms")]
    pub reset_after_ms: u64,

    /// Simulated VIN decode delay in milliseconds
    #[serde(default = "default_decode_delay_ms")]
    pub decode_delay_ms: u64,

    /// Upper bound on a single delivery to the submission sink
    #[serde(default = "default_delivery_timeout_ms")]
    pub delivery_timeout_ms: u64,

    /// Address contact submissions are addressed to (logged only)
    #[serde(default = "default_destination")]
    pub destination: String,
}

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Enable CORS
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    /// CORS allowed origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Log to file
    #[serde(default)]
    pub file: Option<PathBuf>,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZero::get)
        .unwrap_or(4)
}

const fn default_submit_delay_ms() -> u64 {
    2_000
}

const fn default_reset_after_ms() -> u64 {
    5_000
}

const fn default_decode_delay_ms() -> u64 {
    2_000
}

const fn default_delivery_timeout_ms() -> u64 {
    10_000
}

fn default_destination() -> String {
    "marinomarketing@mail.com".to_string()
}

const fn default_enable_cors() -> bool {
    true
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

const fn default_request_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
            reset_after_ms: default_reset_after_ms(),
            decode_delay_ms: default_decode_delay_ms(),
            delivery_timeout_ms: default_delivery_timeout_ms(),
            destination: default_destination(),
        }
    }
}

impl FormsConfig {
    /// Submission delay as a [`Duration`]
    #[must_use]
    pub const fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    /// Reset window as a [`Duration`]
    #[must_use]
    pub const fn reset_after(&self) -> Duration {
        Duration::from_millis(self.reset_after_ms)
    }

    /// Decode delay as a [`Duration`]
    #[must_use]
    pub const fn decode_delay(&self) -> Duration {
        Duration::from_millis(self.decode_delay_ms)
    }

    /// Delivery timeout as a [`Duration`]
    #[must_use]
    pub const fn delivery_timeout(&self) -> Duration {
        Duration::from_millis(self.delivery_timeout_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enable_cors: default_enable_cors(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from `config.*` in the working directory and
    /// `VINSCAN_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load configuration from an explicit file, still honouring environment
    /// overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be parsed.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> crate::Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("VINSCAN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Check value ranges that serde cannot express
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first offending setting.
    pub fn validate(&self) -> crate::Result<()> {
        if self.server.port == 0 {
            return Err(crate::Error::Configuration {
                message: "server.port must be non-zero".to_string(),
            });
        }
        if self.forms.delivery_timeout_ms == 0 {
            return Err(crate::Error::Configuration {
                message: "forms.delivery_timeout_ms must be non-zero".to_string(),
            });
        }
        if !matches!(self.logging.format.as_str(), "json" | "text") {
            return Err(crate::Error::Configuration {
                message: format!("unknown logging.format '{}'", self.logging.format),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::missing_panics_doc,
    clippy::unwrap_used,
    clippy::field_reassign_with_default,
    clippy::uninlined_format_args
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.server.workers > 0);

        assert_eq!(config.forms.submit_delay_ms, 2_000);
        assert_eq!(config.forms.reset_after_ms, 5_000);
        assert_eq!(config.forms.decode_delay_ms, 2_000);
        assert_eq!(config.forms.delivery_timeout_ms, 10_000);
        assert_eq!(config.forms.destination, "marinomarketing@mail.com");

        assert!(config.api.enable_cors);
        assert_eq!(config.api.cors_origins, vec!["*"]);
        assert_eq!(config.security.request_timeout, 30);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_forms_durations() {
        let forms = FormsConfig::default();
        assert_eq!(forms.submit_delay(), Duration::from_secs(2));
        assert_eq!(forms.reset_after(), Duration::from_secs(5));
        assert_eq!(forms.decode_delay(), Duration::from_secs(2));
        assert_eq!(forms.delivery_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"server": {"port": 9090}, "forms": {"submit_delay_ms": 10}}"#)
                .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.forms.submit_delay_ms, 10);
        assert_eq!(config.forms.reset_after_ms, 5_000);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.forms.destination, config.forms.destination);
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 3000\n\n[forms]\nsubmit_delay_ms = 50\ndestination = \"sales@example.com\"\n\n[logging]\nformat = \"text\""
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.forms.submit_delay_ms, 50);
        assert_eq!(config.forms.destination, "sales@example.com");
        assert_eq!(config.forms.reset_after_ms, 5_000);
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(crate::Error::Configuration { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.forms.delivery_timeout_ms = 0;
        assert!(config.validate().is_err());

        assert!(Config::default().validate().is_ok());
    }
}
