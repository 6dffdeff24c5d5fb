//! AFeedKit Settings Crate
//!
//! Remembers the last used processing parameters between runs.

pub mod config;
pub mod error;

pub use config::{Config, ProcessingSettings};
pub use error::{SettingsError, SettingsResult};
