//! Processing parameters
//!
//! Feed-rate tiers and optional taper geometry supplied by the front end for a
//! single run. Every constructor or `validate` call enforces the invariants, so a
//! validated `ProcessingParameters` can be handed to the rewriter as-is.

use serde::{Deserialize, Serialize};

use crate::error::{ParameterError, TaperError};

/// Default feed rate for large angular changes
pub const DEFAULT_FEED_RATE: f64 = 380.0;
/// Default tier 1 threshold in degrees
pub const DEFAULT_THRESHOLD1: f64 = 1.5;
/// Default tier 1 feed rate
pub const DEFAULT_FEED_RATE1: f64 = 100.0;
/// Default tier 2 threshold in degrees
pub const DEFAULT_THRESHOLD2: f64 = 0.5;
/// Default tier 2 feed rate
pub const DEFAULT_FEED_RATE2: f64 = 50.0;

/// Parse a textual parameter value, as typed by a user or read from settings
pub fn parse_parameter(name: &str, input: &str) -> Result<f64, ParameterError> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| ParameterError::NotANumber {
            name: name.to_string(),
            input: input.to_string(),
        })
}

/// Three-tier feed-rate selection parameters
///
/// An angular delta `<= threshold2` selects `feed_rate2`, a delta in
/// `(threshold2, threshold1]` selects `feed_rate1`, anything larger selects
/// `default_feed_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedTiers {
    /// Tier 1 angular threshold
    pub threshold1: f64,
    /// Tier 1 feed rate
    pub feed_rate1: f64,
    /// Tier 2 angular threshold (must be below `threshold1`)
    pub threshold2: f64,
    /// Tier 2 feed rate
    pub feed_rate2: f64,
    /// Feed rate for deltas above `threshold1`
    pub default_feed_rate: f64,
}

impl Default for FeedTiers {
    fn default() -> Self {
        Self {
            threshold1: DEFAULT_THRESHOLD1,
            feed_rate1: DEFAULT_FEED_RATE1,
            threshold2: DEFAULT_THRESHOLD2,
            feed_rate2: DEFAULT_FEED_RATE2,
            default_feed_rate: DEFAULT_FEED_RATE,
        }
    }
}

impl FeedTiers {
    /// Check finiteness, positive feed rates and threshold ordering
    pub fn validate(&self) -> Result<(), ParameterError> {
        let fields = [
            ("threshold1", self.threshold1),
            ("feed_rate1", self.feed_rate1),
            ("threshold2", self.threshold2),
            ("feed_rate2", self.feed_rate2),
            ("default_feed_rate", self.default_feed_rate),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ParameterError::NotFinite {
                    name: name.to_string(),
                    value,
                });
            }
        }

        let feeds = [
            ("feed_rate1", self.feed_rate1),
            ("feed_rate2", self.feed_rate2),
            ("default_feed_rate", self.default_feed_rate),
        ];
        for (name, value) in feeds {
            if value <= 0.0 {
                return Err(ParameterError::NonPositive {
                    name: name.to_string(),
                    value,
                });
            }
        }

        if self.threshold2 >= self.threshold1 {
            return Err(ParameterError::ThresholdOrder {
                threshold1: self.threshold1,
                threshold2: self.threshold2,
            });
        }

        Ok(())
    }
}

/// Linear taper geometry along the X axis
///
/// Fields are private so a value can only exist once it passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTaper", into = "RawTaper")]
pub struct TaperParameters {
    large_diameter: f64,
    small_diameter: f64,
    length: f64,
}

impl TaperParameters {
    /// Create taper parameters, enforcing positivity and `small < large`
    pub fn new(large_diameter: f64, small_diameter: f64, length: f64) -> Result<Self, TaperError> {
        for (name, value) in [
            ("large_diameter", large_diameter),
            ("small_diameter", small_diameter),
            ("length", length),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TaperError::NonPositive {
                    name: name.to_string(),
                    value,
                });
            }
        }

        if small_diameter >= large_diameter {
            return Err(TaperError::DiameterOrder {
                small: small_diameter,
                large: large_diameter,
            });
        }

        Ok(Self {
            large_diameter,
            small_diameter,
            length,
        })
    }

    /// Build from optional inputs: all absent means no taper, a partial set is an error
    pub fn from_optional(
        large_diameter: Option<f64>,
        small_diameter: Option<f64>,
        length: Option<f64>,
    ) -> Result<Option<Self>, TaperError> {
        match (large_diameter, small_diameter, length) {
            (None, None, None) => Ok(None),
            (Some(large), Some(small), Some(length)) => Self::new(large, small, length).map(Some),
            _ => Err(TaperError::Incomplete),
        }
    }

    /// Diameter at X = length
    pub fn large_diameter(&self) -> f64 {
        self.large_diameter
    }

    /// Diameter at X = 0
    pub fn small_diameter(&self) -> f64 {
        self.small_diameter
    }

    /// Taper length along X
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Radial depth difference between the two ends
    pub fn radius_difference(&self) -> f64 {
        (self.large_diameter - self.small_diameter) / 2.0
    }
}

#[derive(Serialize, Deserialize)]
struct RawTaper {
    large_diameter: f64,
    small_diameter: f64,
    length: f64,
}

impl TryFrom<RawTaper> for TaperParameters {
    type Error = TaperError;

    fn try_from(raw: RawTaper) -> Result<Self, Self::Error> {
        Self::new(raw.large_diameter, raw.small_diameter, raw.length)
    }
}

impl From<TaperParameters> for RawTaper {
    fn from(taper: TaperParameters) -> Self {
        Self {
            large_diameter: taper.large_diameter,
            small_diameter: taper.small_diameter,
            length: taper.length,
        }
    }
}

/// Everything the rewriter needs for one run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessingParameters {
    /// Feed-rate tiers
    pub tiers: FeedTiers,
    /// Optional taper; `None` disables depth rewriting
    pub taper: Option<TaperParameters>,
}

impl ProcessingParameters {
    /// Create parameters from tiers and an optional taper
    pub fn new(tiers: FeedTiers, taper: Option<TaperParameters>) -> Self {
        Self { tiers, taper }
    }

    /// Validate the tiers (taper values are validated on construction)
    pub fn validate(&self) -> Result<(), ParameterError> {
        self.tiers.validate()
    }
}
