//! # Markup to Printer Text
//!
//! The [`Converter`] turns receipt markup into plain text for a monospace
//! thermal printer.
//!
//! ## Pipeline
//!
//! ```text
//! markup ──parse──▶ tree ──substitute──▶ tree with blocks
//!        ──flatten──▶ text pieces ──lines──▶ normalized lines
//!        ──classify/wrap/center──▶ text + feed
//! ```
//!
//! 1. Tables and totals containers are replaced by pre-formatted blocks.
//! 2. Structural tags become whitespace (`br`, `hr`, headings, paragraphs).
//! 3. Leftover entities are decoded, whitespace collapsed, blank-line runs
//!    squeezed and the document trimmed. Block lines keep their spacing.
//! 4. Every line is centered, wrapped or left blank, and padded to the
//!    paper width. Four newlines are appended for the cutter.
//!
//! ## Example
//!
//! ```
//! use thermaltext::Converter;
//!
//! let converter = Converter::default();
//! let text = converter.convert("<h1>Test Store</h1><p>Order #42</p>");
//! let lines: Vec<&str> = text.lines().collect();
//! assert_eq!(lines[0].trim(), "Test Store");
//! assert_eq!(lines[0].len(), 48);
//! assert!(text.ends_with("\n\n\n\n"));
//! ```

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ThermaltextError;
use crate::layout::classify::{self, CenterPhrases};
use crate::layout::table::TableLayout;
use crate::layout::totals;
use crate::layout::wrap::wrap_and_indent;
use crate::markup::{self, Node, decode_entities};
use crate::printer::PaperProfile;

/// Appended after the last line so the cutter clears the print.
pub const FEED: &str = "\n\n\n\n";

/// Character used for `hr` rules.
const RULE_CHAR: char = '-';

/// Horizontal whitespace (anything but a newline).
static HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("valid regex"));

/// Converter configuration, loadable from JSON.
///
/// ```json
/// {
///   "paper": { "paper_width_mm": 72, "dots_per_mm": 8, "font_width_chars": 12 },
///   "table": { "item_indent": 2 },
///   "center_phrases": ["Test Store", "Thank you for your business"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub paper: PaperProfile,
    pub table: TableLayout,
    pub center_phrases: CenterPhrases,
}

impl ConverterConfig {
    /// Read a configuration file.
    pub fn load(path: &Path) -> Result<Self, ThermaltextError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ThermaltextError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&json).map_err(|e| {
            ThermaltextError::Config(format!("Invalid config {}: {}", path.display(), e))
        })
    }
}

/// Receipt markup to printer text converter.
///
/// Immutable once built; share it freely between threads.
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConverterConfig,
    width: usize,
}

impl Converter {
    /// Build a converter, checking that table rows fit on the paper.
    pub fn new(config: ConverterConfig) -> Result<Self, ThermaltextError> {
        let width = config.paper.paper_width_chars();
        let table = &config.table;

        if table.columns.is_empty() {
            return Err(ThermaltextError::Layout(
                "Table layout needs at least one column".to_string(),
            ));
        }
        if table.columns.iter().any(|c| c.width == 0) {
            return Err(ThermaltextError::Layout(
                "Table columns must be at least one character wide".to_string(),
            ));
        }
        if table.row_width() > width {
            return Err(ThermaltextError::Layout(format!(
                "Table rows are {} characters wide but the paper fits {}",
                table.row_width(),
                width
            )));
        }

        tracing::debug!(width, row_width = table.row_width(), "converter ready");
        Ok(Self { config, width })
    }

    /// Converter for the given paper with default table layout and phrases.
    pub fn with_profile(paper: PaperProfile) -> Result<Self, ThermaltextError> {
        Self::new(ConverterConfig {
            paper,
            ..Default::default()
        })
    }

    /// Characters per printed line.
    pub fn paper_width_chars(&self) -> usize {
        self.width
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert receipt markup to printer text.
    ///
    /// Never fails: malformed markup degrades to its text content. Every
    /// non-blank line is exactly [`paper_width_chars`](Self::paper_width_chars)
    /// wide and the result ends with [`FEED`].
    pub fn convert(&self, markup_text: &str) -> String {
        let mut root = markup::parse(markup_text);
        self.substitute_blocks(&mut root);

        let mut pieces = Vec::new();
        self.flatten(&root, &mut pieces);

        let lines = normalize(split_lines(pieces));
        let mut out = Vec::with_capacity(lines.len());
        for line in &lines {
            match line {
                Line::Flow(text) => {
                    out.extend(classify::format_line(text, self.width, &self.config.center_phrases))
                }
                Line::Preformatted(text) => out.extend(wrap_and_indent(text, self.width, "")),
            }
        }

        tracing::debug!(
            input_bytes = markup_text.len(),
            lines = out.len(),
            "converted markup"
        );

        let mut text = out.join("\n");
        text.push_str(FEED);
        text
    }

    /// Replace tables and totals containers with their formatted blocks.
    ///
    /// Walks top-down and does not enter a replaced element, so a table
    /// nested in another table's cell is read as text of that cell.
    fn substitute_blocks(&self, node: &mut Node) {
        let Node::Element { children, .. } = node else {
            return;
        };
        for child in children.iter_mut() {
            if child.is("table") {
                *child = Node::Block(self.config.table.format_table(child));
            } else if totals::is_totals(child) {
                *child = Node::Block(totals::format_totals(child, self.width));
            } else {
                self.substitute_blocks(child);
            }
        }
    }

    /// Flatten a subtree into text pieces, turning tags into whitespace.
    fn flatten(&self, node: &Node, out: &mut Vec<Piece>) {
        match node {
            Node::Text(text) => push_text(out, text),
            Node::Block(lines) => out.push(Piece::Block(lines.clone())),
            Node::Element { tag, children, .. } => match tag.as_str() {
                "br" => push_text(out, "\n"),
                "hr" => {
                    let rule: String = std::iter::repeat_n(RULE_CHAR, self.width).collect();
                    push_text(out, &format!("\n{}\n", rule));
                }
                "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                    push_text(out, "\n");
                    self.flatten_trimmed(children, out);
                    push_text(out, "\n");
                }
                "p" => {
                    self.flatten_trimmed(children, out);
                    push_text(out, "\n");
                }
                "strong" | "b" => self.flatten_trimmed(children, out),
                _ => {
                    for child in children {
                        self.flatten(child, out);
                    }
                }
            },
        }
    }

    /// Flatten `children` with surrounding whitespace removed.
    fn flatten_trimmed(&self, children: &[Node], out: &mut Vec<Piece>) {
        let mut inner = Vec::new();
        for child in children {
            self.flatten(child, &mut inner);
        }
        trim_pieces(&mut inner);
        for piece in inner {
            match piece {
                Piece::Text(text) => push_text(out, &text),
                block => out.push(block),
            }
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        let config = ConverterConfig::default();
        let width = config.paper.paper_width_chars();
        Self { config, width }
    }
}

/// Flattened document content.
#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Text(String),
    Block(Vec<String>),
}

fn push_text(out: &mut Vec<Piece>, text: &str) {
    if let Some(Piece::Text(last)) = out.last_mut() {
        last.push_str(text);
    } else {
        out.push(Piece::Text(text.to_string()));
    }
}

fn trim_pieces(pieces: &mut Vec<Piece>) {
    while let Some(Piece::Text(first)) = pieces.first_mut() {
        let trimmed = first.trim_start();
        if trimmed.is_empty() {
            pieces.remove(0);
        } else {
            *first = trimmed.to_string();
            break;
        }
    }
    while let Some(Piece::Text(last)) = pieces.last_mut() {
        let trimmed = last.trim_end();
        if trimmed.is_empty() {
            pieces.pop();
        } else {
            *last = trimmed.to_string();
            break;
        }
    }
}

/// One line of the document before final layout.
#[derive(Debug, Clone, PartialEq)]
enum Line {
    /// Free text, subject to whitespace collapsing and centering
    Flow(String),
    /// A table or totals line, spacing preserved
    Preformatted(String),
}

impl Line {
    fn is_blank(&self) -> bool {
        match self {
            Line::Flow(text) | Line::Preformatted(text) => text.trim().is_empty(),
        }
    }
}

/// Split pieces into lines. A block always starts on a line of its own
/// and the text after it starts a fresh line.
fn split_lines(pieces: Vec<Piece>) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for piece in pieces {
        match piece {
            Piece::Text(text) => {
                let mut segments = text.split('\n');
                if let Some(first) = segments.next() {
                    current.push_str(first);
                }
                for segment in segments {
                    lines.push(Line::Flow(std::mem::take(&mut current)));
                    current.push_str(segment);
                }
            }
            Piece::Block(block) => {
                lines.push(Line::Flow(std::mem::take(&mut current)));
                if block.is_empty() {
                    lines.push(Line::Flow(String::new()));
                }
                lines.extend(block.into_iter().map(Line::Preformatted));
            }
        }
    }
    lines.push(Line::Flow(current));
    lines
}

/// Decode entities and collapse whitespace in free text, squeeze runs of
/// blank lines to one and drop leading and trailing blank lines.
fn normalize(lines: Vec<Line>) -> Vec<Line> {
    let mut out: Vec<Line> = Vec::with_capacity(lines.len());
    for line in lines {
        let line = match line {
            Line::Flow(text) => {
                let decoded = decode_entities(&text);
                Line::Flow(HORIZONTAL_SPACE.replace_all(&decoded, " ").trim().to_string())
            }
            pre if pre.is_blank() => Line::Flow(String::new()),
            pre => pre,
        };
        let previous_blank = out.last().is_none_or(Line::is_blank);
        if line.is_blank() && previous_blank {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(Line::is_blank) {
        out.pop();
    }
    out
}
