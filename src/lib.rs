//! # AFeedKit
//!
//! A G-code post-processor for 4-axis programs that wrap a toolpath around a
//! rotating A axis:
//! - Throttles the feed rate on moves with small A-axis changes (three tiers)
//! - Optionally superimposes a linear Z taper along X
//! - Remembers the last used parameters between runs
//!
//! ## Architecture
//!
//! AFeedKit is organized as a workspace with multiple crates:
//!
//! 1. **afeedkit-core** - Error and parameter types
//! 2. **afeedkit-gcode** - Line tokenizing and modal motion tracking
//! 3. **afeedkit-camtools** - Classification, rewriting and file processing
//! 4. **afeedkit-settings** - Persisted settings (JSON/TOML)
//! 5. **afeedkit** - Command line binary that integrates all crates

pub mod cli;

pub use afeedkit_camtools::{
    output_path_for, process_file, process_file_to, FeedAdjuster, ProcessedProgram,
    ProcessingReport, ProcessingStats, Tier,
};
pub use afeedkit_core::{
    Error, FeedTiers, ParameterError, ProcessingParameters, Result, TaperError, TaperParameters,
};
pub use afeedkit_settings::{Config, ProcessingSettings, SettingsError};

/// Version string shown by `--version`: crate version plus build date
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Log filter directive for a `-v` count
pub fn verbosity_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing on stderr; `RUST_LOG` overrides the verbosity level
pub fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_filter(verbosity)));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .with_level(true)
        .with_line_number(verbosity > 2);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
