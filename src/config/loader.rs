//! Settings loading from disk and the process environment.
//!
//! Precedence, later wins: built-in defaults, TOML file, environment.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::config::schema::{LogFormat, Settings};
use crate::config::validation::{validate_settings, ValidationError};

/// Error type for settings loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {name}: '{value}'")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate settings from an optional TOML file and the given
/// environment variables.
pub fn load_settings<I>(path: Option<&Path>, vars: I) -> Result<Settings, ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut settings = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => Settings::default(),
    };

    apply_env(&mut settings, vars)?;
    validate_settings(&settings).map_err(ConfigError::Validation)?;

    Ok(settings)
}

/// Load settings using the real process environment.
pub fn load_from_env(path: Option<&Path>) -> Result<Settings, ConfigError> {
    load_settings(path, std::env::vars())
}

fn apply_env<I>(settings: &mut Settings, vars: I) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let vars: HashMap<String, String> = vars.into_iter().collect();

    if let Some(v) = vars.get("APP_NAME") {
        settings.app_name = v.clone();
    }
    if let Some(v) = vars.get("APP_VERSION") {
        settings.app_version = v.clone();
    }
    if let Some(v) = vars.get("DEBUG") {
        settings.debug = parse_bool("DEBUG", v)?;
    }
    if let Some(v) = vars.get("ENVIRONMENT") {
        settings.environment = v.clone();
    }
    if let Some(v) = vars.get("HOST") {
        settings.host = v.clone();
    }
    if let Some(v) = vars.get("PORT") {
        settings.port = parse_num("PORT", v)?;
    }
    if let Some(v) = vars.get("LOG_FORMAT") {
        settings.log_format = LogFormat::from(v.as_str());
    }
    if let Some(v) = vars.get("LOG_LEVEL") {
        settings.log_level = v.clone();
    }
    if let Some(v) = vars.get("LOG_EXCLUDE_PATHS") {
        settings.log_exclude_paths = v
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();
    }
    if let Some(v) = vars.get("REQUEST_TIMEOUT_SECS") {
        settings.request_timeout_secs = parse_num("REQUEST_TIMEOUT_SECS", v)?;
    }
    if let Some(v) = vars.get("MAX_BODY_BYTES") {
        settings.max_body_bytes = parse_num("MAX_BODY_BYTES", v)?;
    }

    Ok(())
}

fn parse_num<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        name,
        value: value.to_string(),
    })
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            name,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_env_overrides_defaults() {
        let settings = load_settings(
            None,
            vars(&[
                ("APP_NAME", "orders"),
                ("APP_VERSION", "2.3.4"),
                ("ENVIRONMENT", "production"),
                ("DEBUG", "false"),
                ("PORT", "9000"),
                ("LOG_FORMAT", "text"),
                ("LOG_LEVEL", "warning"),
                ("LOG_EXCLUDE_PATHS", "/health, /ready,"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.app_name, "orders");
        assert_eq!(settings.app_version, "2.3.4");
        assert_eq!(settings.environment, "production");
        assert!(!settings.debug);
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.log_format, LogFormat::Text);
        assert_eq!(settings.level_directive(), Some("warn"));
        assert_eq!(settings.log_exclude_paths, vec!["/health", "/ready"]);
    }

    #[test]
    fn test_unrelated_vars_ignored() {
        let settings = load_settings(None, vars(&[("PATH", "/usr/bin")])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_malformed_port_is_fatal() {
        let err = load_settings(None, vars(&[("PORT", "abc")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { name: "PORT", .. }));
        assert_eq!(err.to_string(), "Invalid value for PORT: 'abc'");
    }

    #[test]
    fn test_malformed_bool_is_fatal() {
        let err = load_settings(None, vars(&[("DEBUG", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { name: "DEBUG", .. }));
    }

    #[test]
    fn test_validation_failure_reported() {
        let err = load_settings(None, vars(&[("LOG_LEVEL", "chatty")])).unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors, vec![ValidationError::UnknownLogLevel("chatty".into())]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_file_then_env() {
        let path = std::env::temp_dir().join(format!("expert-api-{}.toml", uuid::Uuid::new_v4()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "app_name = \"from-file\"\nport = 7000").unwrap();

        let settings = load_settings(Some(&path), vars(&[("PORT", "7001")])).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(settings.app_name, "from-file");
        assert_eq!(settings.port, 7001);
    }

    #[test]
    fn test_missing_file() {
        let err = load_settings(Some(Path::new("/nonexistent/expert-api.toml")), Vec::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
