//! Canonical attribute text and line diffs.
//!
//! Attribute trees are laid out as HCL-like text with sorted keys and one
//! attribute per line, then compared line by line. Identical trees always
//! produce identical text, so an empty diff means nothing changed.

use similar::{ChangeTag, TextDiff};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ShapeError;

use super::style::{ADDITION_MARKER, CONTEXT_MARKER, REMOVAL_MARKER};
use super::value::{Scalar, Value};

/// Default number of spaces per nesting level.
pub const DEFAULT_INDENT: usize = 2;

/// Serializes attribute trees and diffs them.
#[derive(Debug, Clone, Copy)]
pub struct TreeDiffer {
    /// Spaces per nesting level.
    indent: usize,
    /// Unchanged lines kept around each change; `None` keeps every line.
    context: Option<usize>,
}

/// Line diff between two attribute trees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeDiff {
    lines: Vec<DiffLine>,
}

/// A single line of a [`TreeDiff`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// How the line changed.
    pub kind: LineKind,
    /// Line text without marker or trailing newline.
    pub text: String,
}

/// Kind of a diff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Present only after the change.
    Added,
    /// Present only before the change.
    Removed,
    /// Present on both sides.
    Unchanged,
    /// Unchanged lines left out between hunks.
    Elided,
}

impl Default for TreeDiffer {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT, None)
    }
}

impl TreeDiffer {
    /// Creates a differ with the given indent width and context radius.
    #[must_use]
    pub const fn new(indent: usize, context: Option<usize>) -> Self {
        Self { indent, context }
    }

    /// Lays out the attributes of a resource state, one line per entry.
    ///
    /// Top-level attributes sit one indent step deep so the lines nest inside
    /// a `resource "type" "name" { ... }` wrapper. A null root is an empty
    /// state.
    ///
    /// # Errors
    ///
    /// Returns a shape error if the root is neither a mapping nor null.
    pub fn canonical_lines(
        &self,
        value: &Value,
        side: &'static str,
    ) -> Result<Vec<String>, ShapeError> {
        let mut out = Vec::new();
        match value {
            Value::Null => {}
            Value::Mapping(entries) => self.write_entries(entries, 1, &mut out),
            other => {
                return Err(ShapeError::RootNotMapping {
                    side,
                    found: other.kind(),
                });
            }
        }
        Ok(out)
    }

    /// Lays out a resource state as newline-terminated text.
    ///
    /// # Errors
    ///
    /// Returns a shape error if the root is neither a mapping nor null.
    pub fn canonical_text(&self, value: &Value, side: &'static str) -> Result<String, ShapeError> {
        let lines = self.canonical_lines(value, side)?;
        let mut text = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
        for line in lines {
            text.push_str(&line);
            text.push('\n');
        }
        Ok(text)
    }

    /// Diffs two sanitized resource states.
    ///
    /// The result is empty exactly when both states lay out to the same text.
    ///
    /// # Errors
    ///
    /// Returns a shape error if either root is neither a mapping nor null.
    pub fn diff(&self, before: &Value, after: &Value) -> Result<TreeDiff, ShapeError> {
        let before_text = self.canonical_text(before, "before")?;
        let after_text = self.canonical_text(after, "after")?;

        if before_text == after_text {
            return Ok(TreeDiff::default());
        }

        let text_diff = TextDiff::from_lines(before_text.as_str(), after_text.as_str());
        let mut lines = Vec::new();

        match self.context {
            None => {
                for change in text_diff.iter_all_changes() {
                    lines.push(DiffLine::new(change.tag(), change.value()));
                }
            }
            Some(radius) => {
                for (i, group) in text_diff.grouped_ops(radius).iter().enumerate() {
                    if i > 0 {
                        lines.push(DiffLine {
                            kind: LineKind::Elided,
                            text: String::from("..."),
                        });
                    }
                    for op in group {
                        for change in text_diff.iter_changes(op) {
                            lines.push(DiffLine::new(change.tag(), change.value()));
                        }
                    }
                }
            }
        }

        Ok(TreeDiff { lines })
    }

    fn write_entries(
        &self,
        entries: &BTreeMap<String, Value>,
        depth: usize,
        out: &mut Vec<String>,
    ) {
        for (key, value) in entries {
            let lead = format!("{} = ", format_key(key));
            self.write_value(&lead, value, depth, "", out);
        }
    }

    fn write_value(
        &self,
        lead: &str,
        value: &Value,
        depth: usize,
        trail: &str,
        out: &mut Vec<String>,
    ) {
        let pad = " ".repeat(self.indent * depth);
        match value {
            Value::Null => out.push(format!("{pad}{lead}null{trail}")),
            Value::Scalar(scalar) => {
                out.push(format!("{pad}{lead}{}{trail}", format_scalar(scalar)));
            }
            Value::Mapping(entries) if entries.is_empty() => {
                out.push(format!("{pad}{lead}{{}}{trail}"));
            }
            Value::Mapping(entries) => {
                out.push(format!("{pad}{lead}{{"));
                self.write_entries(entries, depth + 1, out);
                out.push(format!("{pad}}}{trail}"));
            }
            Value::Sequence(items) if items.is_empty() => out.push(format!("{pad}{lead}[]{trail}")),
            Value::Sequence(items) => {
                out.push(format!("{pad}{lead}["));
                for item in items {
                    self.write_value("", item, depth + 1, ",", out);
                }
                out.push(format!("{pad}]{trail}"));
            }
        }
    }
}

/// Keys that are plain identifiers are written bare, anything else quoted.
fn format_key(key: &str) -> String {
    let mut chars = key.chars();
    let bare = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if bare { key.to_string() } else { quote(key) }
}

fn format_scalar(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Bool(b) => b.to_string(),
        Scalar::Number(n) => n.to_string(),
        Scalar::String(s) => quote(s),
    }
}

/// JSON string escaping, so embedded newlines stay on one line.
fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("{s:?}"))
}

impl DiffLine {
    fn new(tag: ChangeTag, value: &str) -> Self {
        let kind = match tag {
            ChangeTag::Insert => LineKind::Added,
            ChangeTag::Delete => LineKind::Removed,
            ChangeTag::Equal => LineKind::Unchanged,
        };
        Self {
            kind,
            text: value.trim_end_matches('\n').to_string(),
        }
    }
}

impl TreeDiff {
    /// Returns true if the two states were identical.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines of the diff in order.
    #[must_use]
    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }

    /// Number of added lines.
    #[must_use]
    pub fn additions(&self) -> usize {
        self.lines.iter().filter(|l| l.kind == LineKind::Added).count()
    }

    /// Number of removed lines.
    #[must_use]
    pub fn removals(&self) -> usize {
        self.lines.iter().filter(|l| l.kind == LineKind::Removed).count()
    }
}

impl fmt::Display for TreeDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            let marker = match line.kind {
                LineKind::Added => ADDITION_MARKER,
                LineKind::Removed => REMOVAL_MARKER,
                LineKind::Unchanged | LineKind::Elided => CONTEXT_MARKER,
            };
            writeln!(f, "{marker}{}", line.text)?;
        }
        Ok(())
    }
}
