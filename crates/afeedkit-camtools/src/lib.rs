//! # AFeedKit CAM Tools
//!
//! Post-processing for 4-axis lathe-style programs where the work turns on
//! the A axis while the tool traverses X.
//!
//! ## Processing
//!
//! - **Classifier**: forward/backward A-value comparison and tier selection
//! - **Taper**: linear Z offset along X that turns a cylinder into a cone
//! - **Rewriter**: feed and depth word replacement on a single line
//! - **Feed Adjuster**: the two-pass driver over a whole program
//! - **File Processor**: file in, `_modified` sibling out, with a report
//! - **Statistics**: per-tier counters and the printable summary

pub mod classifier;
pub mod feed_adjuster;
pub mod file_processor;
pub mod rewriter;
pub mod stats;
pub mod taper;

// Re-export commonly used items
pub use classifier::{AngularDelta, Comparison, ComparisonState, DeltaClassifier, Tier};
pub use feed_adjuster::{FeedAdjuster, ProcessedProgram};
pub use file_processor::{output_path_for, process_file, process_file_to};
pub use rewriter::{format_feed, RewrittenLine, Rewriter};
pub use stats::{ModificationDetail, ProcessingReport, ProcessingStats, MAX_DETAILS};
