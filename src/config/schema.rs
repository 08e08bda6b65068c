//! Configuration schema definitions.
//!
//! This module defines the complete settings structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root settings for the API service.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Service name, reported in every log record and on `/`.
    pub app_name: String,

    /// Service version, reported in every log record.
    pub app_version: String,

    /// Development mode flag.
    pub debug: bool,

    /// Deployment environment name (e.g., "development", "production").
    pub environment: String,

    /// Bind host.
    pub host: String,

    /// Bind port.
    pub port: u16,

    /// Log output encoding.
    pub log_format: LogFormat,

    /// Minimum log level (trace, debug, info, warning, error, critical).
    pub log_level: String,

    /// Paths the request logger never reports.
    pub log_exclude_paths: Vec<String>,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Maximum accepted request body size.
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "FastAPI Expert API".to_string(),
            app_version: "1.0.0".to_string(),
            debug: true,
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_format: LogFormat::Json,
            log_level: "INFO".to_string(),
            log_exclude_paths: vec!["/health".to_string(), "/metrics".to_string()],
            request_timeout_secs: 30,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl Settings {
    /// Socket address string the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Normalized `tracing` level directive for the configured level.
    ///
    /// Returns `None` for names no level maps to.
    pub fn level_directive(&self) -> Option<&'static str> {
        match self.log_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some("trace"),
            "debug" => Some("debug"),
            "info" => Some("info"),
            "warn" | "warning" => Some("warn"),
            "error" | "critical" => Some("error"),
            _ => None,
        }
    }
}

/// Log record encoding.
///
/// `json` (any casing) selects JSON; every other value selects text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

impl From<&str> for LogFormat {
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

impl From<String> for LogFormat {
    fn from(value: String) -> Self {
        LogFormat::from(value.as_str())
    }
}

impl From<LogFormat> for String {
    fn from(value: LogFormat) -> Self {
        match value {
            LogFormat::Json => "json".to_string(),
            LogFormat::Text => "text".to_string(),
        }
    }
}
