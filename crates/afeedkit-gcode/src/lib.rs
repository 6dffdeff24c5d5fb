//! # AFeedKit G-Code
//!
//! Line-level G-code handling for AFeedKit: a token model that renders back
//! to the exact input text, and the pass-1 parser that resolves the modal
//! motion mode and extracts X/Y/Z/A/F values from linear moves.

pub mod gcode;

pub use gcode::{
    parse_move, parse_program, LineEntry, LineParser, LineTokens, ModalState, MotionCommand,
    MotionMode, MoveRecord, Segment, Word,
};
