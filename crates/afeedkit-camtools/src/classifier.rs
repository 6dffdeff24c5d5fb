//! Angular delta classification
//!
//! Decides, for every line with an explicit A value, which A value it is
//! compared against and how large the change is:
//!
//! - A line that itself declares `G1` looks forward to the next A value in
//!   the program (the tool has not reached it yet).
//! - A modal continuation line looks back at the previous A value.
//!
//! The delta then selects one of three feed-rate tiers.

use afeedkit_core::FeedTiers;
use afeedkit_gcode::{LineEntry, MoveRecord};
use serde::{Deserialize, Serialize};

/// State carried across pass 2
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComparisonState {
    /// A value of the most recent line that carried one
    pub previous_angular_value: Option<f64>,
    /// Modal cutting depth set by the last depth-only move
    pub current_modal_depth: f64,
}

impl ComparisonState {
    /// Create the initial state (no previous A, depth 0.0)
    pub fn new() -> Self {
        Self::default()
    }

    /// Track the machine's persistent depth: a Z-only move sets a new modal depth
    pub fn observe_depth(&mut self, record: &MoveRecord) {
        if record.is_depth_only() {
            if let Some(z) = record.z {
                self.current_modal_depth = z;
            }
        }
    }
}

/// Which neighbouring A value a line was compared against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "direction", rename_all = "lowercase")]
pub enum Comparison {
    /// Next A value further down the program
    Forward {
        /// The upcoming A value
        target: f64,
    },
    /// A value of the previous line that carried one
    Backward {
        /// The previous A value
        previous: f64,
    },
}

impl Comparison {
    /// The A value compared against
    pub fn value(&self) -> f64 {
        match *self {
            Comparison::Forward { target } => target,
            Comparison::Backward { previous } => previous,
        }
    }
}

/// Result of a successful comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularDelta {
    /// A value on the current line
    pub current: f64,
    /// What it was compared against
    pub comparison: Comparison,
    /// Absolute difference
    pub delta: f64,
}

/// Feed-rate tier selected by an angular delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Smallest changes, slowest feed (`delta <= threshold2`)
    Tier2,
    /// Medium changes (`threshold2 < delta <= threshold1`)
    Tier1,
    /// Large changes (`delta > threshold1`)
    Default,
}

impl Tier {
    /// Select the tier for `delta`; boundaries belong to the lower tier
    pub fn classify(delta: f64, tiers: &FeedTiers) -> Self {
        if delta <= tiers.threshold2 {
            Tier::Tier2
        } else if delta <= tiers.threshold1 {
            Tier::Tier1
        } else {
            Tier::Default
        }
    }

    /// Feed rate written for this tier
    pub fn feed_rate(self, tiers: &FeedTiers) -> f64 {
        match self {
            Tier::Tier2 => tiers.feed_rate2,
            Tier::Tier1 => tiers.feed_rate1,
            Tier::Default => tiers.default_feed_rate,
        }
    }

    /// Whether this tier slows the feed (default-tier rewrites are not counted as changes)
    pub fn is_feed_change(self) -> bool {
        !matches!(self, Tier::Default)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tier2 => write!(f, "Tier 2"),
            Self::Tier1 => write!(f, "Tier 1"),
            Self::Default => write!(f, "Default"),
        }
    }
}

/// Forward/backward A-value comparison over a parsed program
///
/// Holds a precomputed "next A value" table so forward lookups are O(1)
/// instead of rescanning the rest of the program for every `G1` line.
#[derive(Debug)]
pub struct DeltaClassifier<'a> {
    entries: &'a [LineEntry],
    next_angular: Vec<Option<f64>>,
}

impl<'a> DeltaClassifier<'a> {
    /// Build the classifier for a completed pass-1 array
    pub fn new(entries: &'a [LineEntry]) -> Self {
        let mut next_angular = vec![None; entries.len()];
        let mut upcoming = None;
        for (index, entry) in entries.iter().enumerate().rev() {
            next_angular[index] = upcoming;
            if let Some(a) = entry.angular_value() {
                upcoming = Some(a);
            }
        }
        Self {
            entries,
            next_angular,
        }
    }

    /// First A value after `index`, if any
    pub fn next_angular_value(&self, index: usize) -> Option<f64> {
        self.next_angular.get(index).copied().flatten()
    }

    /// Classify the entry at `index`
    ///
    /// Returns `None` when the line has no A value or no comparison value
    /// exists. Any line with an A value becomes the new previous value,
    /// whichever branch it took.
    pub fn classify(&self, index: usize, state: &mut ComparisonState) -> Option<AngularDelta> {
        let entry = self.entries.get(index)?;
        let current = entry.angular_value()?;

        let comparison = if entry.declares_linear_mode {
            self.next_angular_value(index)
                .map(|target| Comparison::Forward { target })
        } else {
            state
                .previous_angular_value
                .map(|previous| Comparison::Backward { previous })
        };
        state.previous_angular_value = Some(current);

        comparison.map(|comparison| AngularDelta {
            current,
            comparison,
            delta: (current - comparison.value()).abs(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use afeedkit_gcode::parse_program;

    #[test]
    fn test_tier_boundaries_are_inclusive_on_lower_tier() {
        let tiers = FeedTiers::default();
        assert_eq!(Tier::classify(0.0, &tiers), Tier::Tier2);
        assert_eq!(Tier::classify(0.5, &tiers), Tier::Tier2);
        assert_eq!(Tier::classify(0.51, &tiers), Tier::Tier1);
        assert_eq!(Tier::classify(1.5, &tiers), Tier::Tier1);
        assert_eq!(Tier::classify(1.5001, &tiers), Tier::Default);
        assert_eq!(Tier::Tier1.feed_rate(&tiers), 100.0);
        assert!(!Tier::Default.is_feed_change());
    }

    #[test]
    fn test_declared_line_looks_forward() {
        let entries = parse_program(&["G1 X10 A2.0 F200", "G1 X11 A2.3 F200"]);
        let classifier = DeltaClassifier::new(&entries);
        let mut state = ComparisonState::new();

        let first = classifier.classify(0, &mut state).unwrap();
        assert_eq!(first.comparison, Comparison::Forward { target: 2.3 });
        assert!((first.delta - 0.3).abs() < 1e-9);
        assert_eq!(state.previous_angular_value, Some(2.0));

        // last declared line has nothing ahead of it
        assert_eq!(classifier.classify(1, &mut state), None);
        assert_eq!(state.previous_angular_value, Some(2.3));
    }

    #[test]
    fn test_modal_line_looks_backward() {
        let entries = parse_program(&["G1 X4", "X5 A1.0"]);
        let classifier = DeltaClassifier::new(&entries);
        let mut state = ComparisonState {
            previous_angular_value: Some(1.8),
            ..ComparisonState::default()
        };

        assert_eq!(classifier.classify(0, &mut state), None);
        let result = classifier.classify(1, &mut state).unwrap();
        assert_eq!(result.comparison, Comparison::Backward { previous: 1.8 });
        assert!((result.delta - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_modal_line_without_previous_is_unclassified() {
        let entries = parse_program(&["G1 X1", "X2 A3"]);
        let classifier = DeltaClassifier::new(&entries);
        let mut state = ComparisonState::new();
        assert_eq!(classifier.classify(1, &mut state), None);
        assert_eq!(state.previous_angular_value, Some(3.0));
    }

    #[test]
    fn test_forward_lookup_skips_lines_without_a() {
        let entries = parse_program(&["G1 A1", "X2", "G0 A9", "G1 X3", "X4 A1.2"]);
        let classifier = DeltaClassifier::new(&entries);
        assert_eq!(classifier.next_angular_value(0), Some(1.2));
        assert_eq!(classifier.next_angular_value(4), None);
        assert_eq!(classifier.next_angular_value(99), None);
    }

    #[test]
    fn test_observe_depth_only_tracks_z_only_moves() {
        let entries = parse_program(&["G1 Z-0.25", "X1 Z-3", "Y1 Z-4"]);
        let mut state = ComparisonState::new();
        for entry in &entries {
            state.observe_depth(entry.record.as_ref().unwrap());
        }
        assert_eq!(state.current_modal_depth, -0.25);
    }
}
