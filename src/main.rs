use afeedkit::cli::Cli;
use afeedkit::{init_logging, process_file, process_file_to, Config, ProcessingSettings};
use clap::Parser;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity)?;

    let settings_path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => Config::default_path()
            .map_err(|e| warn!("Settings disabled: {}", e))
            .ok(),
    };
    let mut config = settings_path
        .as_deref()
        .map(Config::load_or_default)
        .unwrap_or_default();

    let params = cli.merge_settings(&config.processing).to_parameters()?;

    let report = match &cli.output {
        Some(output) => process_file_to(&cli.input, output, &params)?,
        None => process_file(&cli.input, &params)?,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }

    if cli.save_settings {
        match settings_path {
            Some(path) => {
                config.processing = ProcessingSettings::from_parameters(&params);
                config.last_input = Some(cli.input.clone());
                config.save_to_file(&path)?;
                info!("Saved settings to {}", path.display());
            }
            None => warn!("No settings location available; settings not saved"),
        }
    }

    Ok(())
}
