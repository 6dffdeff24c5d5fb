//! G-Code tokenizing and modal state
//!
//! This module provides:
//! - A lossless line token model (words, comments, raw text)
//! - Motion command detection (G0/G1)
//! - Modal motion-mode tracking
//! - Move record extraction (pass 1)

pub mod parser;
pub mod word;

pub use parser::*;
pub use word::*;
