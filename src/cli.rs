use afeedkit_core::{parse_parameter, ParameterError};
use afeedkit_settings::ProcessingSettings;
use clap::Parser;
use std::path::PathBuf;

fn parse_number(input: &str) -> Result<f64, ParameterError> {
    parse_parameter("value", input)
}

#[derive(Parser, Debug)]
#[command(name = "afeedkit")]
#[command(
    about = "Throttle feed rate on small A-axis moves and apply a linear Z taper",
    long_about = None
)]
#[command(version = crate::VERSION)]
pub struct Cli {
    /// G-code file to process
    pub input: PathBuf,

    /// Output file (defaults to <input stem>_modified<ext> beside the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Feed rate for A-axis changes above threshold 1
    #[arg(long = "default-feed", value_parser = parse_number)]
    pub default_feed: Option<f64>,

    /// Upper bound of the tier 1 A-axis change
    #[arg(long, value_parser = parse_number)]
    pub threshold1: Option<f64>,

    /// Feed rate for tier 1
    #[arg(long, value_parser = parse_number)]
    pub feed1: Option<f64>,

    /// Upper bound of the tier 2 A-axis change
    #[arg(long, value_parser = parse_number)]
    pub threshold2: Option<f64>,

    /// Feed rate for tier 2
    #[arg(long, value_parser = parse_number)]
    pub feed2: Option<f64>,

    /// Taper diameter at X = length
    #[arg(long = "large-diameter", value_parser = parse_number)]
    pub large_diameter: Option<f64>,

    /// Taper diameter at X = 0
    #[arg(long = "small-diameter", value_parser = parse_number)]
    pub small_diameter: Option<f64>,

    /// Taper length along X
    #[arg(long, value_parser = parse_number)]
    pub length: Option<f64>,

    /// Disable a taper stored in the settings file
    #[arg(long = "no-taper", conflicts_with_all = ["large_diameter", "small_diameter", "length"])]
    pub no_taper: bool,

    /// Settings file (.json or .toml); defaults to the platform config directory
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Store the parameters of this run in the settings file
    #[arg(long = "save-settings")]
    pub save_settings: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    /// Whether any taper flag was given
    pub fn has_taper_flags(&self) -> bool {
        self.large_diameter.is_some() || self.small_diameter.is_some() || self.length.is_some()
    }

    /// Apply the flags on top of stored settings
    ///
    /// Taper flags replace the stored taper as a group, so a partial set is
    /// reported rather than mixed with stored values.
    pub fn merge_settings(&self, stored: &ProcessingSettings) -> ProcessingSettings {
        let mut merged = stored.clone();
        if let Some(value) = self.default_feed {
            merged.default_feed_rate = value;
        }
        if let Some(value) = self.threshold1 {
            merged.threshold1 = value;
        }
        if let Some(value) = self.feed1 {
            merged.feed_rate1 = value;
        }
        if let Some(value) = self.threshold2 {
            merged.threshold2 = value;
        }
        if let Some(value) = self.feed2 {
            merged.feed_rate2 = value;
        }
        if self.no_taper || self.has_taper_flags() {
            merged.large_diameter = self.large_diameter;
            merged.small_diameter = self.small_diameter;
            merged.length = self.length;
        }
        merged
    }
}
