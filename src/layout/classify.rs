//! Per-line formatting decisions.
//!
//! Receipts carry a handful of boilerplate lines (store header, address,
//! footer, column captions) that read better centered. They are recognised
//! by case-insensitive substring match against a phrase set; every other
//! line is word-wrapped to the paper width.

use serde::{Deserialize, Serialize};

use super::wrap::{center, wrap_and_indent};

/// Phrases centered by default.
pub const DEFAULT_CENTER_PHRASES: &[&str] = &[
    "TEST STORE",
    "SAMPLE STORE",
    "THANK YOU FOR YOUR BUSINESS",
    "TERMS & CONDITIONS APPLY",
    "VISIT US AGAIN SOON",
    "123 MAIN STREET",
    "PH: (555) 123-4567",
    "ITEM QTY RATE AMOUNT",
    "ITEM QTY PRICE TOTAL",
];

/// Set of phrases whose lines are centered.
///
/// Phrases are stored uppercased; matching uppercases the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CenterPhrases {
    phrases: Vec<String>,
}

impl CenterPhrases {
    /// An empty set: nothing is centered.
    pub fn empty() -> Self {
        Self {
            phrases: Vec::new(),
        }
    }

    /// Add a phrase to the set.
    pub fn with_phrase(mut self, phrase: &str) -> Self {
        self.insert(phrase);
        self
    }

    /// Add a phrase to the set.
    pub fn insert(&mut self, phrase: &str) {
        let phrase = phrase.to_uppercase();
        if !phrase.is_empty() && !self.phrases.contains(&phrase) {
            self.phrases.push(phrase);
        }
    }

    /// Whether `line` contains any phrase of the set.
    pub fn matches(&self, line: &str) -> bool {
        let upper = line.to_uppercase();
        self.phrases.iter().any(|phrase| upper.contains(phrase.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }
}

impl Default for CenterPhrases {
    fn default() -> Self {
        DEFAULT_CENTER_PHRASES.iter().copied().collect()
    }
}

impl<'a> FromIterator<&'a str> for CenterPhrases {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::empty();
        for phrase in iter {
            set.insert(phrase);
        }
        set
    }
}

impl From<Vec<String>> for CenterPhrases {
    fn from(phrases: Vec<String>) -> Self {
        phrases.iter().map(String::as_str).collect()
    }
}

impl From<CenterPhrases> for Vec<String> {
    fn from(set: CenterPhrases) -> Self {
        set.phrases
    }
}

/// How a line of flowing text is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty line, emitted as is
    Blank,
    /// Boilerplate line, centered
    Centered,
    /// Anything else, word-wrapped
    Wrapped,
}

/// Decide how `line` is laid out.
pub fn classify(line: &str, phrases: &CenterPhrases) -> LineKind {
    if line.is_empty() {
        LineKind::Blank
    } else if phrases.matches(line) {
        LineKind::Centered
    } else {
        LineKind::Wrapped
    }
}

/// Lay out one trimmed line of text at `width`.
///
/// Centered lines wider than the paper are wrapped instead.
pub fn format_line(line: &str, width: usize, phrases: &CenterPhrases) -> Vec<String> {
    match classify(line, phrases) {
        LineKind::Blank => vec![String::new()],
        LineKind::Centered => match center(line, width) {
            Some(centered) => vec![centered],
            None => wrap_and_indent(line, width, ""),
        },
        LineKind::Wrapped => wrap_and_indent(line, width, ""),
    }
}
