//! File-level processing
//!
//! Reads a whole program, runs the [`FeedAdjuster`] over it and writes the
//! result next to the input as `<stem>_modified<ext>`. Parameters are checked
//! before any file is touched.

use afeedkit_core::{Error, ProcessingParameters, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::feed_adjuster::FeedAdjuster;
use crate::stats::ProcessingReport;

/// Suffix appended to the input's file stem
pub const OUTPUT_SUFFIX: &str = "_modified";

/// Output path for `input`: same directory, stem + `_modified`, same extension
///
/// `part.tap` becomes `part_modified.tap`; `part` becomes `part_modified`.
pub fn output_path_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, OUTPUT_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, OUTPUT_SUFFIX),
    };
    input.with_file_name(file_name)
}

/// Process `input` into its `_modified` sibling
pub fn process_file(input: &Path, params: &ProcessingParameters) -> Result<ProcessingReport> {
    process_file_to(input, &output_path_for(input), params)
}

/// Process `input` and write the result to `output`
///
/// On a failed write any partially written output is removed.
pub fn process_file_to(
    input: &Path,
    output: &Path,
    params: &ProcessingParameters,
) -> Result<ProcessingReport> {
    let adjuster = FeedAdjuster::new(*params)?;

    info!("Processing {}", input.display());
    let text = fs::read_to_string(input).map_err(|e| Error::file_access(input, e))?;
    let program = adjuster.process_text(&text);

    if let Err(e) = fs::write(output, program.to_text()) {
        if output.exists() {
            if let Err(remove_err) = fs::remove_file(output) {
                warn!(
                    "Failed to remove partial output {}: {}",
                    output.display(),
                    remove_err
                );
            }
        }
        return Err(Error::file_access(output, e));
    }
    info!("Wrote {}", output.display());

    Ok(ProcessingReport {
        input_path: input.to_path_buf(),
        output_path: output.to_path_buf(),
        parameters: *params,
        stats: program.stats,
    })
}
