//! Persisted settings for AFeedKit
//!
//! Stores the parameters of the last run so the next one can start from them.
//! Supports JSON and TOML file formats; the default location is a JSON file
//! in the platform-specific configuration directory.

use afeedkit_core::params::{
    DEFAULT_FEED_RATE, DEFAULT_FEED_RATE1, DEFAULT_FEED_RATE2, DEFAULT_THRESHOLD1,
    DEFAULT_THRESHOLD2,
};
use afeedkit_core::{FeedTiers, ProcessingParameters, TaperParameters};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{SettingsError, SettingsResult};

/// Directory name under the platform config directory
pub const APP_DIR_NAME: &str = "afeedkit";
/// Settings file name inside [`APP_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Feed tiers and taper as stored on disk
///
/// Taper fields are stored individually so a half-filled taper survives a
/// round trip and is reported when the settings are turned into parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingSettings {
    /// Feed for large angular changes
    pub default_feed_rate: f64,
    /// Upper bound of tier 1
    pub threshold1: f64,
    /// Tier 1 feed
    pub feed_rate1: f64,
    /// Upper bound of tier 2
    pub threshold2: f64,
    /// Tier 2 feed
    pub feed_rate2: f64,
    /// Taper diameter at `x = length`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_diameter: Option<f64>,
    /// Taper diameter at `x = 0`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_diameter: Option<f64>,
    /// Taper length along X
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self {
            default_feed_rate: DEFAULT_FEED_RATE,
            threshold1: DEFAULT_THRESHOLD1,
            feed_rate1: DEFAULT_FEED_RATE1,
            threshold2: DEFAULT_THRESHOLD2,
            feed_rate2: DEFAULT_FEED_RATE2,
            large_diameter: None,
            small_diameter: None,
            length: None,
        }
    }
}

impl ProcessingSettings {
    /// Capture the parameters of a run
    pub fn from_parameters(params: &ProcessingParameters) -> Self {
        let tiers = &params.tiers;
        Self {
            default_feed_rate: tiers.default_feed_rate,
            threshold1: tiers.threshold1,
            feed_rate1: tiers.feed_rate1,
            threshold2: tiers.threshold2,
            feed_rate2: tiers.feed_rate2,
            large_diameter: params.taper.map(|t| t.large_diameter()),
            small_diameter: params.taper.map(|t| t.small_diameter()),
            length: params.taper.map(|t| t.length()),
        }
    }

    /// Feed tiers without validation
    pub fn tiers(&self) -> FeedTiers {
        FeedTiers {
            threshold1: self.threshold1,
            feed_rate1: self.feed_rate1,
            threshold2: self.threshold2,
            feed_rate2: self.feed_rate2,
            default_feed_rate: self.default_feed_rate,
        }
    }

    /// Validate into run parameters
    pub fn to_parameters(&self) -> afeedkit_core::Result<ProcessingParameters> {
        let tiers = self.tiers();
        tiers.validate()?;
        let taper =
            TaperParameters::from_optional(self.large_diameter, self.small_diameter, self.length)?;
        Ok(ProcessingParameters::new(tiers, taper))
    }
}

/// Complete persisted configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Last processed input file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_input: Option<PathBuf>,
    /// Processing parameters
    pub processing: ProcessingSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default settings file: `<config dir>/afeedkit/config.json`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no platform config directory".to_string())
        })?;
        Ok(dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating the parent directory
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = Format::from_path(path)?;

        let content = match format {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content)?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Load settings, falling back to defaults if the file is missing or unusable
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Ignoring settings file {}: {}; using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.processing.to_parameters()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Format::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
