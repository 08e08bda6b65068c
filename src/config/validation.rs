//! Settings validation.
//!
//! Serde handles the syntactic side; this checks values that parse but make
//! no sense. Returns every failure, not just the first.

use thiserror::Error;

use crate::config::schema::Settings;

/// A single semantic problem with loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("app_name must not be empty")]
    EmptyAppName,

    #[error("app_version must not be empty")]
    EmptyAppVersion,

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),

    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("excluded path '{0}' must start with '/'")]
    RelativeExcludePath(String),
}

/// Validate loaded settings.
pub fn validate_settings(settings: &Settings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if settings.app_name.trim().is_empty() {
        errors.push(ValidationError::EmptyAppName);
    }
    if settings.app_version.trim().is_empty() {
        errors.push(ValidationError::EmptyAppVersion);
    }
    if settings.level_directive().is_none() {
        errors.push(ValidationError::UnknownLogLevel(settings.log_level.clone()));
    }
    if settings.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if settings.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    for path in &settings.log_exclude_paths {
        if !path.starts_with('/') {
            errors.push(ValidationError::RelativeExcludePath(path.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
