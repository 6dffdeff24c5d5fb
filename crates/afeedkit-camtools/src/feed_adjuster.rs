//! A-axis feed adjuster
//!
//! Runs the two passes over an in-memory program:
//!
//! 1. Parse every line, resolving the modal motion mode.
//! 2. Walk the parsed lines once, carrying the previous A value and the
//!    modal depth, classifying and rewriting each line.
//!
//! The forward A-value lookup needs the complete pass-1 array, so the whole
//! program is held in memory for the duration of a run.

use afeedkit_core::{ParameterError, ProcessingParameters};
use afeedkit_gcode::parse_program;
use tracing::info;

use crate::classifier::{ComparisonState, DeltaClassifier};
use crate::rewriter::Rewriter;
use crate::stats::ProcessingStats;

/// Rewritten program and its counters
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedProgram {
    /// Output lines, one per input line, without terminators
    pub lines: Vec<String>,
    /// Counters for the run
    pub stats: ProcessingStats,
}

impl ProcessedProgram {
    /// Join the lines, each terminated by exactly one `\n`
    pub fn to_text(&self) -> String {
        let capacity = self.lines.iter().map(|line| line.len() + 1).sum();
        let mut text = String::with_capacity(capacity);
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

/// Throttles feed on small A-axis changes and applies the optional taper
#[derive(Debug, Clone)]
pub struct FeedAdjuster {
    params: ProcessingParameters,
}

impl FeedAdjuster {
    /// Create an adjuster, validating the parameters first
    pub fn new(params: ProcessingParameters) -> Result<Self, ParameterError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Parameters in use
    pub fn parameters(&self) -> &ProcessingParameters {
        &self.params
    }

    /// Process a program given as lines without terminators
    ///
    /// All modal and comparison state is created fresh for every call.
    pub fn process_lines<S: AsRef<str>>(&self, lines: &[S]) -> ProcessedProgram {
        let entries = parse_program(lines);
        let classifier = DeltaClassifier::new(&entries);
        let rewriter = Rewriter::new(&self.params);
        let mut state = ComparisonState::new();
        let mut stats = ProcessingStats::new(entries.len());
        let mut output = Vec::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            if let Some(record) = &entry.record {
                state.observe_depth(record);
            }
            let delta = classifier.classify(index, &mut state);
            let rewritten = rewriter.rewrite(entry, delta.as_ref(), &state);
            stats.record(index + 1, &entry.text, delta.as_ref(), &rewritten);
            output.push(rewritten.text);
        }

        info!(
            lines = stats.total_lines,
            tier1 = stats.tier1_lines,
            tier2 = stats.tier2_lines,
            default = stats.default_lines,
            taper = stats.taper_adjusted,
            "processed program"
        );

        ProcessedProgram {
            lines: output,
            stats,
        }
    }

    /// Process a whole program text (`\n` or `\r\n` terminated lines)
    pub fn process_text(&self, text: &str) -> ProcessedProgram {
        let lines: Vec<&str> = text.lines().collect();
        self.process_lines(&lines)
    }
}
