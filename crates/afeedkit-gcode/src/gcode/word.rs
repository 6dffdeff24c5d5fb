//! G-Code line token model
//!
//! A line is held as an ordered list of segments: address words (`X10`, `F200`),
//! parenthesised comments and the raw text in between. Rendering the segments
//! back reproduces the input exactly, so a rewrite only touches the words it
//! changes and leaves spacing, comments and unrecognised text alone.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

fn comment_regex() -> &'static Regex {
    static COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();
    COMMENT_REGEX.get_or_init(|| Regex::new(r"\([^)]*\)").expect("invalid regex pattern"))
}

fn word_regex() -> &'static Regex {
    static WORD_REGEX: OnceLock<Regex> = OnceLock::new();
    WORD_REGEX.get_or_init(|| {
        Regex::new(r"[A-Za-z][+-]?[0-9]+(?:\.[0-9]*)?").expect("invalid regex pattern")
    })
}

/// A letter/number pair such as `X-1.5` or `g01`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    letter: char,
    text: String,
    value: f64,
}

impl Word {
    /// Create a word from its letter, numeric value and the text used to write the value
    pub fn with_text(letter: char, value: f64, value_text: impl AsRef<str>) -> Self {
        let letter = letter.to_ascii_uppercase();
        Self {
            letter,
            text: format!("{}{}", letter, value_text.as_ref()),
            value,
        }
    }

    fn from_match(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let letter = chars.next()?.to_ascii_uppercase();
        let value = chars.as_str().parse::<f64>().ok()?;
        Some(Self {
            letter,
            text: text.to_string(),
            value,
        })
    }

    /// Upper-case address letter
    pub fn letter(&self) -> char {
        self.letter
    }

    /// Parsed numeric value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Word exactly as written, letter included
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number part as written (`"01"` for `G01`)
    pub fn number_text(&self) -> &str {
        &self.text[self.letter.len_utf8()..]
    }
}

/// One piece of a tokenized line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    /// Address word
    Word(Word),
    /// Parenthesised comment, parentheses included
    Comment(String),
    /// Whitespace or anything not recognised as a word
    Text(String),
}

impl Segment {
    /// Text this segment contributes to the rendered line
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Word(word) => word.text(),
            Segment::Comment(text) | Segment::Text(text) => text,
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Segment::Text(text) if text.trim().is_empty())
    }
}

/// Tokenized G-Code line
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineTokens {
    segments: Vec<Segment>,
}

impl LineTokens {
    /// Tokenize a single line (without its terminator)
    pub fn parse(line: &str) -> Self {
        let mut segments = Vec::new();
        let mut last = 0;
        for comment in comment_regex().find_iter(line) {
            push_code(&line[last..comment.start()], &mut segments);
            segments.push(Segment::Comment(comment.as_str().to_string()));
            last = comment.end();
        }
        push_code(&line[last..], &mut segments);
        Self { segments }
    }

    /// All segments in line order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Address words in line order, comments excluded
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Word(word) => Some(word),
            _ => None,
        })
    }

    /// Value of the first word for `letter` (case-insensitive)
    pub fn value(&self, letter: char) -> Option<f64> {
        self.find(letter).map(Word::value)
    }

    /// First word for `letter` (case-insensitive)
    pub fn find(&self, letter: char) -> Option<&Word> {
        let letter = letter.to_ascii_uppercase();
        self.words().find(|word| word.letter == letter)
    }

    /// The word the line starts with once comments and surrounding whitespace are ignored
    pub fn leading_word(&self) -> Option<&Word> {
        self.segments
            .iter()
            .find(|segment| !segment.is_blank() && !matches!(segment, Segment::Comment(_)))
            .and_then(|segment| match segment {
                Segment::Word(word) => Some(word),
                _ => None,
            })
    }

    /// The word the raw line starts with; a leading comment means there is none
    pub fn first_word(&self) -> Option<&Word> {
        match self.segments.iter().find(|segment| !segment.is_blank())? {
            Segment::Word(word) => Some(word),
            _ => None,
        }
    }

    /// Line text with comments removed and surrounding whitespace trimmed
    pub fn without_comments(&self) -> String {
        self.segments
            .iter()
            .filter(|segment| !matches!(segment, Segment::Comment(_)))
            .map(Segment::as_str)
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Render the line back to text
    pub fn render(&self) -> String {
        self.segments.iter().map(Segment::as_str).collect()
    }

    /// Remove every word for `letter` along with one neighbouring whitespace run
    ///
    /// The run before the word goes if there is one; a word at the start of the
    /// line takes the run after it. A word glued to its left neighbour leaves
    /// the following run in place. Returns the number of words removed.
    pub fn remove_words(&mut self, letter: char) -> usize {
        let letter = letter.to_ascii_uppercase();
        let mut removed = 0;
        let mut kept: Vec<Segment> = Vec::with_capacity(self.segments.len());
        let mut trim_next = false;

        for segment in self.segments.drain(..) {
            match segment {
                Segment::Word(ref word) if word.letter == letter => {
                    removed += 1;
                    match kept.last_mut() {
                        Some(Segment::Text(prev)) if prev.ends_with(char::is_whitespace) => {
                            prev.truncate(prev.trim_end().len());
                        }
                        Some(_) => {}
                        None => trim_next = true,
                    }
                }
                Segment::Text(text) if trim_next => {
                    trim_next = false;
                    kept.push(Segment::Text(text.trim_start().to_string()));
                }
                other => {
                    trim_next = false;
                    kept.push(other);
                }
            }
        }

        kept.retain(|segment| !matches!(segment, Segment::Text(text) if text.is_empty()));
        self.segments = kept;
        removed
    }

    /// Trim leading and trailing whitespace from the line
    pub fn trim(&mut self) {
        if let Some(Segment::Text(first)) = self.segments.first_mut() {
            *first = first.trim_start().to_string();
        }
        if let Some(Segment::Text(last)) = self.segments.last_mut() {
            last.truncate(last.trim_end().len());
        }
        self.segments
            .retain(|segment| !matches!(segment, Segment::Text(text) if text.is_empty()));
    }

    /// Append a word at the end of the line, separated by a single space
    pub fn push_word(&mut self, word: Word) {
        let needs_space = self
            .segments
            .last()
            .map(|segment| !segment.as_str().ends_with(char::is_whitespace))
            .unwrap_or(false);
        if needs_space {
            self.segments.push(Segment::Text(" ".to_string()));
        }
        self.segments.push(Segment::Word(word));
    }

    /// Replace the first word for the same letter as `word`
    ///
    /// Returns `false` if the line has no such word.
    pub fn replace_word(&mut self, word: Word) -> bool {
        match self.position(word.letter) {
            Some(index) => {
                self.segments[index] = Segment::Word(word);
                true
            }
            None => false,
        }
    }

    /// Insert `word` directly after the first word for `anchor`
    ///
    /// Returns `false` if the line has no anchor word.
    pub fn insert_after(&mut self, anchor: char, word: Word) -> bool {
        match self.position(anchor.to_ascii_uppercase()) {
            Some(index) => {
                self.segments.insert(index + 1, Segment::Word(word));
                true
            }
            None => false,
        }
    }

    fn position(&self, letter: char) -> Option<usize> {
        self.segments
            .iter()
            .position(|segment| matches!(segment, Segment::Word(w) if w.letter == letter))
    }
}

impl fmt::Display for LineTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            f.write_str(segment.as_str())?;
        }
        Ok(())
    }
}

fn push_code(chunk: &str, segments: &mut Vec<Segment>) {
    let mut last = 0;
    for found in word_regex().find_iter(chunk) {
        let Some(word) = Word::from_match(found.as_str()) else {
            continue;
        };
        push_text(&chunk[last..found.start()], segments);
        segments.push(Segment::Word(word));
        last = found.end();
    }
    push_text(&chunk[last..], segments);
}

fn push_text(text: &str, segments: &mut Vec<Segment>) {
    if text.is_empty() {
        return;
    }
    // merge with a preceding text segment so skipped matches stay contiguous
    if let Some(Segment::Text(prev)) = segments.last_mut() {
        prev.push_str(text);
    } else {
        segments.push(Segment::Text(text.to_string()));
    }
}
