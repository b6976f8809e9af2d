//! Per-resource block rendering.
//!
//! Each rendered block starts with a `# <address> <verb>` header and is
//! self-contained, so blocks can be joined in any order or read on their own.

use tracing::debug;

use crate::error::{SerializationWarning, ShapeError};
use crate::plan::ResourceChange;

use super::action::Action;
use super::differ::{LineKind, TreeDiffer};
use super::style::{PlainStyle, Style};
use super::value::Value;

/// Body line of an update whose states are identical.
const NO_CHANGES_LINE: &str = "    (no attribute changes)";

/// Renders single resource changes into text blocks.
#[derive(Debug)]
pub struct ResourceRenderer {
    /// Serializer and differ for attribute trees.
    differ: TreeDiffer,
    /// Presentation strategy.
    style: Box<dyn Style>,
}

/// The rendered block of one resource change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResource {
    /// Address of the resource.
    pub address: String,
    /// Classified action.
    pub action: Action,
    /// Address the resource was moved from, if any.
    pub moved_from: Option<String>,
    /// Rendered block text.
    pub text: String,
    /// Set when the attributes could not be rendered and `text` is a placeholder.
    pub warning: Option<SerializationWarning>,
}

impl Default for ResourceRenderer {
    fn default() -> Self {
        Self::new(TreeDiffer::default(), Box::new(PlainStyle))
    }
}

impl ResourceRenderer {
    /// Creates a renderer from a differ and a style.
    #[must_use]
    pub fn new(differ: TreeDiffer, style: Box<dyn Style>) -> Self {
        Self { differ, style }
    }

    /// Renders a classified resource change.
    ///
    /// Never fails: a state that cannot be laid out yields a placeholder
    /// block and a warning.
    #[must_use]
    pub fn render(&self, change: &ResourceChange, action: Action) -> RenderedResource {
        let moved_from = change.moved_from().map(String::from);
        let mut lines = self.header_lines(&change.address, action, moved_from.as_deref());

        let warning = match self.body_lines(change, action) {
            Ok(body) => {
                lines.extend(body);
                None
            }
            Err(reason) => {
                lines.push(
                    self.style
                        .failure(&format!("failed to render attributes: {reason}")),
                );
                Some(SerializationWarning {
                    address: change.address.clone(),
                    reason,
                })
            }
        };

        debug!("Rendered {} ({action}) in {} lines", change.address, lines.len());

        RenderedResource {
            address: change.address.clone(),
            action,
            moved_from,
            text: lines.join("\n"),
            warning,
        }
    }

    fn header_lines(&self, address: &str, action: Action, moved_from: Option<&str>) -> Vec<String> {
        let header = match action {
            Action::Replace(order) => format!("{address} {} ({})", action.verb(), order.note()),
            _ => format!("{address} {}", action.verb()),
        };

        let mut lines = vec![self.style.header(&header)];
        if let Some(previous) = moved_from {
            lines.push(self.style.note(&format!("(moved from {previous})")));
        }
        lines
    }

    fn body_lines(
        &self,
        change: &ResourceChange,
        action: Action,
    ) -> Result<Vec<String>, ShapeError> {
        let opening = format!(
            "{} \"{}\" \"{}\" {{",
            change.mode, change.resource_type, change.name
        );

        match action {
            Action::Create => {
                let after = Value::from(&change.change.after).sanitize();
                let attributes = self.differ.canonical_lines(&after, "after")?;
                Ok(self.wrap_uniform(&opening, attributes, |s, t| s.addition(t)))
            }
            Action::Delete => {
                let before = Value::from(&change.change.before).sanitize();
                let attributes = self.differ.canonical_lines(&before, "before")?;
                Ok(self.wrap_uniform(&opening, attributes, |s, t| s.removal(t)))
            }
            Action::Update | Action::Replace(_) => {
                let before = Value::from(&change.change.before).sanitize();
                let after = Value::from(&change.change.after).sanitize();
                let diff = self.differ.diff(&before, &after)?;

                let mut lines = vec![self.style.change(&format!("{} {opening}", action.symbol()))];
                if diff.is_empty() {
                    lines.push(self.style.context(NO_CHANGES_LINE));
                }
                for line in diff.lines() {
                    lines.push(match line.kind {
                        LineKind::Added => self.style.addition(&line.text),
                        LineKind::Removed => self.style.removal(&line.text),
                        LineKind::Unchanged | LineKind::Elided => self.style.context(&line.text),
                    });
                }
                lines.push(self.style.context("}"));
                Ok(lines)
            }
            Action::NoOp | Action::Read => Ok(Vec::new()),
        }
    }

    /// Wraps attribute lines in the resource braces, styling every line alike.
    fn wrap_uniform(
        &self,
        opening: &str,
        attributes: Vec<String>,
        mark: impl Fn(&dyn Style, &str) -> String,
    ) -> Vec<String> {
        let style = self.style.as_ref();
        let mut lines = Vec::with_capacity(attributes.len() + 2);
        lines.push(mark(style, opening));
        lines.extend(attributes.iter().map(|line| mark(style, line)));
        lines.push(mark(style, "}"));
        lines
    }
}
