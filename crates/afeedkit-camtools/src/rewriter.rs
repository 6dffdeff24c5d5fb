//! Line rewriting
//!
//! Turns a classified line into its output text: replaces the feed word
//! according to the tier and applies the taper to the depth word. Both
//! rewrites are independent; a line may get either, both or neither.

use afeedkit_core::{FeedTiers, ProcessingParameters, TaperParameters};
use afeedkit_gcode::{LineEntry, Word};
use tracing::debug;

use crate::classifier::{AngularDelta, ComparisonState, Tier};
use crate::taper;

/// Format a feed rate without a trailing `.0` (`50`, `12.5`)
pub fn format_feed(feed: f64) -> String {
    feed.to_string()
}

/// Output of rewriting one line
#[derive(Debug, Clone, PartialEq)]
pub struct RewrittenLine {
    /// Final line text, without terminator
    pub text: String,
    /// Tier applied to the feed word, if any
    pub tier: Option<Tier>,
    /// Feed rate written for that tier
    pub feed_rate: Option<f64>,
    /// Depth written by the taper, if it applied
    pub taper_depth: Option<f64>,
}

impl RewrittenLine {
    fn unchanged(entry: &LineEntry) -> Self {
        Self {
            text: entry.text.clone(),
            tier: None,
            feed_rate: None,
            taper_depth: None,
        }
    }

    /// Whether the taper rewrote this line
    pub fn is_tapered(&self) -> bool {
        self.taper_depth.is_some()
    }
}

/// Applies feed tiers and taper to classified lines
#[derive(Debug, Clone, Copy)]
pub struct Rewriter {
    tiers: FeedTiers,
    taper: Option<TaperParameters>,
}

impl Rewriter {
    /// Create a rewriter for one run's parameters
    pub fn new(params: &ProcessingParameters) -> Self {
        Self {
            tiers: params.tiers,
            taper: params.taper,
        }
    }

    /// Rewrite one line
    ///
    /// `delta` is the classifier's result for this line; `state` supplies the
    /// modal depth used when a tapered line has no Z word of its own. Lines
    /// without a move record are returned untouched.
    pub fn rewrite(
        &self,
        entry: &LineEntry,
        delta: Option<&AngularDelta>,
        state: &ComparisonState,
    ) -> RewrittenLine {
        let Some(record) = entry.record.as_ref() else {
            return RewrittenLine::unchanged(entry);
        };

        let mut tokens = entry.tokens.clone();
        let mut tier = None;
        let mut feed_rate = None;
        let mut taper_depth = None;

        if let Some(delta) = delta {
            let selected = Tier::classify(delta.delta, &self.tiers);
            let feed = selected.feed_rate(&self.tiers);
            tokens.remove_words('F');
            tokens.trim();
            tokens.push_word(Word::with_text('F', feed, format_feed(feed)));
            tier = Some(selected);
            feed_rate = Some(feed);
        }

        if let (Some(taper), Some(x)) = (self.taper.as_ref(), record.x) {
            let adjustment = taper::z_adjustment(taper, x);
            match record.z {
                Some(z) => {
                    let depth = z + adjustment;
                    tokens.replace_word(Word::with_text('Z', depth, taper::format_depth(depth)));
                    taper_depth = Some(depth);
                }
                None => {
                    let depth = state.current_modal_depth + adjustment;
                    tokens.insert_after(
                        'X',
                        Word::with_text('Z', depth, taper::format_depth(depth)),
                    );
                    taper_depth = Some(depth);
                }
            }
        }

        if tier.is_none() && taper_depth.is_none() {
            return RewrittenLine::unchanged(entry);
        }

        let text = tokens.render();
        debug!(before = %entry.text, after = %text, ?tier, "rewrote line");
        RewrittenLine {
            text,
            tier,
            feed_rate,
            taper_depth,
        }
    }
}
