//! Run statistics and summary report

use afeedkit_core::ProcessingParameters;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::classifier::{AngularDelta, Tier};
use crate::rewriter::RewrittenLine;
use crate::taper;

/// Number of feed changes kept as examples in the report
pub const MAX_DETAILS: usize = 10;

/// One example feed change shown in the summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModificationDetail {
    /// 1-based line number
    pub line_number: usize,
    /// Angular delta that selected the tier
    pub delta: f64,
    /// Tier applied
    pub tier: Tier,
    /// Feed rate written
    pub feed_rate: f64,
    /// Line before rewriting
    pub original: String,
    /// Line after rewriting
    pub modified: String,
}

/// Aggregate counters for one run
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProcessingStats {
    /// Lines read from the input
    pub total_lines: usize,
    /// Lines rewritten to the tier 1 feed
    pub tier1_lines: usize,
    /// Lines rewritten to the tier 2 feed
    pub tier2_lines: usize,
    /// Lines rewritten to the default feed
    pub default_lines: usize,
    /// Moves whose depth was adjusted by the taper
    pub taper_adjusted: usize,
    /// First few tier 1/tier 2 changes
    pub details: Vec<ModificationDetail>,
}

impl ProcessingStats {
    /// Create empty counters for a program of `total_lines`
    pub fn new(total_lines: usize) -> Self {
        Self {
            total_lines,
            ..Self::default()
        }
    }

    /// Count a rewritten line
    pub fn record(
        &mut self,
        line_number: usize,
        original: &str,
        delta: Option<&AngularDelta>,
        line: &RewrittenLine,
    ) {
        if line.is_tapered() {
            self.taper_adjusted += 1;
        }

        let Some(tier) = line.tier else {
            return;
        };
        match tier {
            Tier::Tier2 => self.tier2_lines += 1,
            Tier::Tier1 => self.tier1_lines += 1,
            Tier::Default => self.default_lines += 1,
        }

        if tier.is_feed_change() && self.feed_changes() <= MAX_DETAILS {
            if let (Some(delta), Some(feed_rate)) = (delta, line.feed_rate) {
                self.details.push(ModificationDetail {
                    line_number,
                    delta: delta.delta,
                    tier,
                    feed_rate,
                    original: original.to_string(),
                    modified: line.text.clone(),
                });
            }
        }
    }

    /// Lines slowed to tier 1 or tier 2
    pub fn feed_changes(&self) -> usize {
        self.tier1_lines + self.tier2_lines
    }

    /// Lines whose feed word was rewritten at all
    pub fn feed_rewrites(&self) -> usize {
        self.feed_changes() + self.default_lines
    }
}

/// Summary handed back to the front end after a file run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingReport {
    /// File that was read
    pub input_path: PathBuf,
    /// File that was written
    pub output_path: PathBuf,
    /// Parameters used for the run
    pub parameters: ProcessingParameters,
    /// Counters
    pub stats: ProcessingStats,
}

impl fmt::Display for ProcessingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tiers = &self.parameters.tiers;
        let stats = &self.stats;

        writeln!(f, "Input file: {}", self.input_path.display())?;
        writeln!(f, "Total lines processed: {}", stats.total_lines)?;
        writeln!(f)?;
        writeln!(f, "Feedrate modifications:")?;
        writeln!(
            f,
            "  Tier 2 (<= {}): {} lines -> F{}",
            tiers.threshold2, stats.tier2_lines, tiers.feed_rate2
        )?;
        writeln!(
            f,
            "  Tier 1 (<= {}): {} lines -> F{}",
            tiers.threshold1, stats.tier1_lines, tiers.feed_rate1
        )?;
        writeln!(
            f,
            "  Default (> {}): {} lines -> F{}",
            tiers.threshold1, stats.default_lines, tiers.default_feed_rate
        )?;
        writeln!(f, "  Total feedrate changes: {}", stats.feed_changes())?;

        if let Some(taper) = &self.parameters.taper {
            writeln!(f)?;
            writeln!(
                f,
                "Taper: {} -> {} over length {} (Z {:.6} per X unit)",
                taper.large_diameter(),
                taper.small_diameter(),
                taper.length(),
                taper::rate_per_unit(taper)
            )?;
            writeln!(f, "  {} X-axis moves adjusted", stats.taper_adjusted)?;
        }

        writeln!(f)?;
        writeln!(f, "Output file: {}", self.output_path.display())?;

        if !stats.details.is_empty() {
            writeln!(f)?;
            writeln!(f, "First {} modifications:", stats.details.len())?;
            for detail in &stats.details {
                writeln!(
                    f,
                    "Line {}: A-change = {:.4} ({}) -> F{}",
                    detail.line_number, detail.delta, detail.tier, detail.feed_rate
                )?;
                writeln!(f, "  Before: {}", detail.original)?;
                writeln!(f, "  After:  {}", detail.modified)?;
            }
        }
        Ok(())
    }
}
