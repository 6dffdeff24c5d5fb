//! Error types for the settings crate.
//!
//! This module provides structured error types for loading, saving and
//! validating persisted settings.

use std::io;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// The settings file extension is neither `.json` nor `.toml`.
    #[error("Unsupported settings format: {0}")]
    UnsupportedFormat(String),

    /// The configuration directory could not be found or created.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// The stored parameters do not form a valid run configuration.
    #[error("Invalid settings: {0}")]
    Invalid(#[from] afeedkit_core::Error),
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use afeedkit_core::TaperError;

    #[test]
    fn test_settings_error_display() {
        let err = SettingsError::UnsupportedFormat("yaml".to_string());
        assert_eq!(err.to_string(), "Unsupported settings format: yaml");

        let err = SettingsError::ConfigDirectory("no home directory".to_string());
        assert_eq!(err.to_string(), "Config directory error: no home directory");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let settings_err: SettingsError = io_err.into();
        assert!(matches!(settings_err, SettingsError::Io(_)));

        let core_err: afeedkit_core::Error = TaperError::Incomplete.into();
        let settings_err: SettingsError = core_err.into();
        assert!(matches!(settings_err, SettingsError::Invalid(_)));
        assert!(settings_err.to_string().starts_with("Invalid settings: Taper requires"));
    }
}
