//! # AFeedKit Core
//!
//! Core error and parameter types shared by the AFeedKit crates.

pub mod error;
pub mod params;

pub use error::{Error, ParameterError, Result, TaperError};
pub use params::{parse_parameter, FeedTiers, ProcessingParameters, TaperParameters};
