//! G-Code line parser and modal motion tracking
//!
//! Pass 1 of a processing run: every input line is tokenized and, while the
//! program is in linear-interpolation mode, turned into a [`MoveRecord`]. The
//! motion mode is modal, so it is carried from line to line in a [`ModalState`]
//! that the caller owns and threads through explicitly.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::word::{LineTokens, Word};

/// Active motion mode (modal group 1, restricted to G0/G1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionMode {
    /// No motion command seen yet
    #[default]
    None,
    /// Rapid positioning (G0)
    Rapid,
    /// Linear interpolation (G1)
    Linear,
}

impl std::fmt::Display for MotionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Rapid => write!(f, "Rapid positioning (G0)"),
            Self::Linear => write!(f, "Linear interpolation (G1)"),
        }
    }
}

/// Motion command a line opens with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionCommand {
    /// `G0`, `G00`, ...
    Rapid,
    /// `G1`, `G01`, ...
    Linear,
}

impl MotionCommand {
    /// Detect a motion command at the start of the comment-stripped line
    ///
    /// Codes are matched by prefix: a `G` followed by two or more zeros, or a
    /// single zero not followed by `1`-`9`, is rapid (`G0`, `G00`, `G001`);
    /// otherwise zeros followed by `1` is linear (`G1`, `G01`, `G17`, `G10`).
    pub fn detect(tokens: &LineTokens) -> Option<Self> {
        let word = tokens.leading_word()?;
        if word.letter() != 'G' {
            return None;
        }
        Self::from_code(word)
    }

    /// Whether the raw line itself opens with a linear code
    ///
    /// Unlike [`MotionCommand::detect`], a comment before the code hides it.
    pub fn declares_linear(tokens: &LineTokens) -> bool {
        tokens
            .first_word()
            .is_some_and(|word| word.letter() == 'G' && opens_linear(word.number_text()))
    }

    fn from_code(word: &Word) -> Option<Self> {
        let digits = word.number_text();
        if opens_rapid(digits) {
            Some(Self::Rapid)
        } else if opens_linear(digits) {
            Some(Self::Linear)
        } else {
            None
        }
    }
}

fn leading_zeros(digits: &str) -> usize {
    digits.len() - digits.trim_start_matches('0').len()
}

fn opens_rapid(digits: &str) -> bool {
    match leading_zeros(digits) {
        0 => false,
        1 => !digits[1..].starts_with(|c: char| matches!(c, '1'..='9')),
        _ => true,
    }
}

fn opens_linear(digits: &str) -> bool {
    digits[leading_zeros(digits)..].starts_with('1')
}

/// Modal state carried across pass 1
///
/// Always starts at [`MotionMode::None`]; a fresh value is created for every
/// program so nothing leaks between files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModalState {
    /// Current motion mode
    pub motion_mode: MotionMode,
}

impl ModalState {
    /// Create a modal state with no motion mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the line's motion command, if any, and return it
    pub fn update(&mut self, tokens: &LineTokens) -> Option<MotionCommand> {
        let command = MotionCommand::detect(tokens)?;
        self.motion_mode = match command {
            MotionCommand::Rapid => MotionMode::Rapid,
            MotionCommand::Linear => MotionMode::Linear,
        };
        Some(command)
    }

    /// Whether moves are currently linear interpolation
    pub fn is_linear(&self) -> bool {
        self.motion_mode == MotionMode::Linear
    }
}

/// Axis values of one linear move
///
/// Only produced for lines in linear mode that carry at least one of X, Y, Z, A.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// X (traverse) value
    pub x: Option<f64>,
    /// Y value
    pub y: Option<f64>,
    /// Z (depth) value
    pub z: Option<f64>,
    /// A (angular) value
    pub a: Option<f64>,
    /// Feed rate
    pub f: Option<f64>,
    /// Line text with comments stripped
    pub original_text: String,
}

impl MoveRecord {
    /// Build a record from a tokenized line, or `None` if it moves no axis
    pub fn from_tokens(tokens: &LineTokens) -> Option<Self> {
        let x = tokens.value('X');
        let y = tokens.value('Y');
        let z = tokens.value('Z');
        let a = tokens.value('A');
        if x.is_none() && y.is_none() && z.is_none() && a.is_none() {
            return None;
        }
        Some(Self {
            x,
            y,
            z,
            a,
            f: tokens.value('F'),
            original_text: tokens.without_comments(),
        })
    }

    /// Depth set without either planar axis, i.e. a new modal cutting depth
    pub fn is_depth_only(&self) -> bool {
        self.z.is_some() && self.x.is_none() && self.y.is_none()
    }
}

/// Parse one tokenized line against the carried modal state
///
/// Rapid moves never yield a record; neither does anything outside linear mode
/// or a line without axis words.
pub fn parse_move(tokens: &LineTokens, modal: &mut ModalState) -> Option<MoveRecord> {
    if modal.update(tokens) == Some(MotionCommand::Rapid) {
        return None;
    }
    if !modal.is_linear() {
        return None;
    }
    MoveRecord::from_tokens(tokens)
}

/// One input line with its pass-1 results
#[derive(Debug, Clone, PartialEq)]
pub struct LineEntry {
    /// Raw input line, without terminator
    pub text: String,
    /// Tokenized form of `text`
    pub tokens: LineTokens,
    /// Move record, if the line is a linear move
    pub record: Option<MoveRecord>,
    /// Whether the raw line opens with a linear-interpolation code, comments included
    pub declares_linear_mode: bool,
}

impl LineEntry {
    /// Angular value of the line's move record
    pub fn angular_value(&self) -> Option<f64> {
        self.record.as_ref().and_then(|record| record.a)
    }
}

/// Stateful line parser wrapping a [`ModalState`]
#[derive(Debug, Default)]
pub struct LineParser {
    modal: ModalState,
}

impl LineParser {
    /// Create a parser with no motion mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw line, updating the modal state
    pub fn parse_line(&mut self, line: &str) -> Option<MoveRecord> {
        parse_move(&LineTokens::parse(line), &mut self.modal)
    }

    /// Parse a raw line into a full [`LineEntry`]
    pub fn parse_entry(&mut self, line: &str) -> LineEntry {
        let tokens = LineTokens::parse(line);
        let declares_linear_mode = MotionCommand::declares_linear(&tokens);
        let record = parse_move(&tokens, &mut self.modal);
        trace!(
            line,
            mode = %self.modal.motion_mode,
            has_record = record.is_some(),
            "parsed line"
        );
        LineEntry {
            text: line.to_string(),
            tokens,
            record,
            declares_linear_mode,
        }
    }

    /// Current modal state
    pub fn modal_state(&self) -> ModalState {
        self.modal
    }
}

/// Run pass 1 over a whole program with a fresh modal state
pub fn parse_program<S: AsRef<str>>(lines: &[S]) -> Vec<LineEntry> {
    let mut parser = LineParser::new();
    let entries: Vec<LineEntry> = lines
        .iter()
        .map(|line| parser.parse_entry(line.as_ref()))
        .collect();
    debug!(
        lines = entries.len(),
        moves = entries.iter().filter(|e| e.record.is_some()).count(),
        "pass 1 complete"
    );
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(line: &str) -> Option<MotionCommand> {
        MotionCommand::detect(&LineTokens::parse(line))
    }

    #[test]
    fn test_motion_command_detection() {
        assert_eq!(detect("G0 X1"), Some(MotionCommand::Rapid));
        assert_eq!(detect("g00x1"), Some(MotionCommand::Rapid));
        assert_eq!(detect("G001X1"), Some(MotionCommand::Rapid));
        assert_eq!(detect("G0.5"), Some(MotionCommand::Rapid));
        assert_eq!(detect("G1 X1"), Some(MotionCommand::Linear));
        assert_eq!(detect("G010 X1"), Some(MotionCommand::Linear));
        assert_eq!(detect("(op 2) G01 X1"), Some(MotionCommand::Linear));
        assert_eq!(detect("G02 X1"), None);
        assert_eq!(detect("G28"), None);
        assert_eq!(detect("X1 G1"), None);
        assert_eq!(detect("N5 G1 X1"), None);
    }

    #[test]
    fn test_plane_and_offset_codes_select_linear_mode() {
        assert_eq!(detect("G17"), Some(MotionCommand::Linear));
        assert_eq!(detect("g18"), Some(MotionCommand::Linear));
        assert_eq!(detect("G10 L2"), Some(MotionCommand::Linear));

        let mut parser = LineParser::new();
        assert!(parser.parse_line("G17").is_none());
        assert!(parser.modal_state().is_linear());
        assert_eq!(parser.parse_line("X2 A1.2").unwrap().a, Some(1.2));
    }

    #[test]
    fn test_leading_comment_hides_declaration() {
        let declares = |line: &str| MotionCommand::declares_linear(&LineTokens::parse(line));
        assert!(declares("G1 X1"));
        assert!(declares("  g01x1"));
        assert!(declares("G17"));
        assert!(!declares("(c) G1 X1 A1.0"));
        assert!(!declares("X1 G1"));
        assert!(!declares("G0 X1"));

        let entries = parse_program(&["(c) G1 X1 A1.0"]);
        assert!(!entries[0].declares_linear_mode);
        // the mode still switches on the comment-stripped text
        assert_eq!(entries[0].angular_value(), Some(1.0));
    }

    #[test]
    fn test_no_record_before_linear_mode() {
        let mut parser = LineParser::new();
        assert_eq!(parser.parse_line("X1 A2"), None);
        assert_eq!(parser.modal_state().motion_mode, MotionMode::None);
    }

    #[test]
    fn test_rapid_line_never_yields_record() {
        let mut parser = LineParser::new();
        assert!(parser.parse_line("G1 X1").is_some());
        assert_eq!(parser.parse_line("G0 X5 A3"), None);
        assert_eq!(parser.modal_state().motion_mode, MotionMode::Rapid);
        // modal rapid continues to suppress records
        assert_eq!(parser.parse_line("X6 A4"), None);
    }

    #[test]
    fn test_linear_mode_is_modal() {
        let mut parser = LineParser::new();
        let first = parser.parse_line("G1 X10 A2.0 F200").unwrap();
        assert_eq!(first.x, Some(10.0));
        assert_eq!(first.a, Some(2.0));
        assert_eq!(first.f, Some(200.0));

        let next = parser.parse_line("X11 (note) A2.3").unwrap();
        assert_eq!(next.a, Some(2.3));
        assert_eq!(next.y, None);
        assert_eq!(next.original_text, "X11  A2.3");
    }

    #[test]
    fn test_feed_only_line_has_no_record() {
        let mut parser = LineParser::new();
        parser.parse_line("G1 X1");
        assert_eq!(parser.parse_line("F300"), None);
        assert_eq!(parser.parse_line("(comment only)"), None);
        assert!(parser.modal_state().is_linear());
    }

    #[test]
    fn test_depth_only_record() {
        let mut parser = LineParser::new();
        let record = parser.parse_line("G1Z-0.0071").unwrap();
        assert!(record.is_depth_only());
        let record = parser.parse_line("X1 Z-1").unwrap();
        assert!(!record.is_depth_only());
    }

    #[test]
    fn test_parse_program_flags_declared_lines() {
        let entries = parse_program(&["G1 X1 A1", "X2 A2", "G0 Z5", "G01 A3"]);
        let declared: Vec<bool> = entries.iter().map(|e| e.declares_linear_mode).collect();
        assert_eq!(declared, vec![true, false, false, true]);
        assert_eq!(entries[1].angular_value(), Some(2.0));
        assert!(entries[2].record.is_none());
        assert_eq!(entries[3].text, "G01 A3");
    }

    #[test]
    fn test_parse_program_starts_fresh_each_call() {
        let first = parse_program(&["G1 X1"]);
        assert!(first[0].record.is_some());
        let second = parse_program(&["X1 A1"]);
        assert!(second[0].record.is_none());
    }
}
