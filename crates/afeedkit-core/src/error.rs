//! Error handling for AFeedKit
//!
//! Provides error types for every layer of a processing run:
//! - Parameter errors (feed tiers, non-numeric input)
//! - Taper errors (incomplete or inconsistent taper geometry)
//! - File access errors (reading the input, writing the output)
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Parameter error type
///
/// Raised when a threshold or feed rate is unusable. Always detected before
/// any file is opened.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// Parameter is NaN or infinite
    #[error("Invalid parameter '{name}': {value} is not a finite number")]
    NotFinite {
        /// The parameter name.
        name: String,
        /// The offending value.
        value: f64,
    },

    /// Textual input could not be parsed as a number
    #[error("Invalid parameter '{name}': '{input}' is not a number")]
    NotANumber {
        /// The parameter name.
        name: String,
        /// The text that failed to parse.
        input: String,
    },

    /// Feed rate must be greater than zero
    #[error("Invalid parameter '{name}': {value} must be greater than zero")]
    NonPositive {
        /// The parameter name.
        name: String,
        /// The offending value.
        value: f64,
    },

    /// Tier 2 threshold is not below the tier 1 threshold
    #[error("Tier 2 threshold ({threshold2}) must be less than tier 1 threshold ({threshold1})")]
    ThresholdOrder {
        /// The tier 1 threshold.
        threshold1: f64,
        /// The tier 2 threshold.
        threshold2: f64,
    },
}

/// Taper error type
///
/// Raised when the taper geometry violates its all-or-nothing, positivity or
/// ordering rules.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaperError {
    /// Only some of the three taper values were supplied
    #[error("Taper requires large diameter, small diameter and length together")]
    Incomplete,

    /// A taper value is zero or negative
    #[error("Taper value '{name}' must be positive, got {value}")]
    NonPositive {
        /// The taper field name.
        name: String,
        /// The offending value.
        value: f64,
    },

    /// Small diameter is not below the large diameter
    #[error("Small diameter ({small}) must be less than large diameter ({large})")]
    DiameterOrder {
        /// The small-end diameter.
        small: f64,
        /// The large-end diameter.
        large: f64,
    },
}

/// Main error type for AFeedKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Parameter error
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// Taper error
    #[error(transparent)]
    Taper(#[from] TaperError),

    /// Input unreadable or output unwritable
    #[error("Cannot access {}: {source}", path.display())]
    FileAccess {
        /// The file that could not be read or written.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Wrap an I/O failure on `path`
    pub fn file_access(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::FileAccess {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Check if this error rejects the run's parameters (including taper)
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Error::Parameter(_) | Error::Taper(_))
    }

    /// Check if this is a file access error
    pub fn is_file_access(&self) -> bool {
        matches!(self, Error::FileAccess { .. })
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::ThresholdOrder {
            threshold1: 0.5,
            threshold2: 1.5,
        };
        assert_eq!(
            err.to_string(),
            "Tier 2 threshold (1.5) must be less than tier 1 threshold (0.5)"
        );

        let err = ParameterError::NotANumber {
            name: "feed_rate1".to_string(),
            input: "fast".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'feed_rate1': 'fast' is not a number"
        );
    }

    #[test]
    fn test_taper_error_display() {
        let err = TaperError::DiameterOrder {
            small: 3.0,
            large: 2.0,
        };
        assert_eq!(
            err.to_string(),
            "Small diameter (3) must be less than large diameter (2)"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = ParameterError::NonPositive {
            name: "default_feed_rate".to_string(),
            value: 0.0,
        }
        .into();
        assert!(err.is_invalid_parameter());
        assert!(!err.is_file_access());

        let err: Error = TaperError::Incomplete.into();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_file_access_keeps_path_and_cause() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err = Error::file_access("/tmp/part.tap", io_err);
        assert!(err.is_file_access());
        assert_eq!(err.to_string(), "Cannot access /tmp/part.tap: no such file");
        assert!(std::error::Error::source(&err).is_some());
    }
}
