//! Presentation strategies for rendered blocks.
//!
//! The renderer decides which lines a block has and what kind each line is;
//! a [`Style`] decides how each kind looks. [`PlainStyle`] emits bare text and
//! [`ColorStyle`] adds ANSI colors.

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

/// Marker prefixed to added lines.
pub const ADDITION_MARKER: &str = "+ ";
/// Marker prefixed to removed lines.
pub const REMOVAL_MARKER: &str = "- ";
/// Prefix for unchanged lines, aligned with the markers.
pub const CONTEXT_MARKER: &str = "  ";

/// Formatting strategy the renderer calls into for every line it emits.
pub trait Style: std::fmt::Debug {
    /// Formats a block header (`# <address> <verb>`).
    fn header(&self, text: &str) -> String;
    /// Formats a secondary header note.
    fn note(&self, text: &str) -> String;
    /// Formats an added line; `text` excludes the marker.
    fn addition(&self, text: &str) -> String;
    /// Formats a removed line; `text` excludes the marker.
    fn removal(&self, text: &str) -> String;
    /// Formats a line whose symbol describes an in-place change.
    fn change(&self, text: &str) -> String;
    /// Formats an unchanged line; `text` excludes the marker.
    fn context(&self, text: &str) -> String;
    /// Formats a rendering failure line.
    fn failure(&self, text: &str) -> String;
}

/// Style without any escape sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyle;

/// Style with ANSI colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorStyle;

/// When to color output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl Style for PlainStyle {
    fn header(&self, text: &str) -> String {
        format!("# {text}")
    }

    fn note(&self, text: &str) -> String {
        format!("# {text}")
    }

    fn addition(&self, text: &str) -> String {
        format!("{ADDITION_MARKER}{text}")
    }

    fn removal(&self, text: &str) -> String {
        format!("{REMOVAL_MARKER}{text}")
    }

    fn change(&self, text: &str) -> String {
        text.to_string()
    }

    fn context(&self, text: &str) -> String {
        format!("{CONTEXT_MARKER}{text}")
    }

    fn failure(&self, text: &str) -> String {
        format!("! {text}")
    }
}

impl Style for ColorStyle {
    fn header(&self, text: &str) -> String {
        PlainStyle.header(text).bold().to_string()
    }

    fn note(&self, text: &str) -> String {
        PlainStyle.note(text).dimmed().to_string()
    }

    fn addition(&self, text: &str) -> String {
        PlainStyle.addition(text).green().to_string()
    }

    fn removal(&self, text: &str) -> String {
        PlainStyle.removal(text).red().to_string()
    }

    fn change(&self, text: &str) -> String {
        text.yellow().to_string()
    }

    fn context(&self, text: &str) -> String {
        PlainStyle.context(text)
    }

    fn failure(&self, text: &str) -> String {
        PlainStyle.failure(text).red().bold().to_string()
    }
}

impl ColorMode {
    /// Decides whether output is colorized, given whether stdout is a terminal.
    #[must_use]
    pub const fn colorize(self, stdout_is_terminal: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => stdout_is_terminal,
        }
    }

    /// Picks the style for this mode.
    ///
    /// This does not touch `colored`'s global switch; with `Always`, callers
    /// that want escapes even under `NO_COLOR` set the override themselves.
    #[must_use]
    pub fn style(self) -> Box<dyn Style> {
        if self.colorize(std::io::stdout().is_terminal()) {
            Box::new(ColorStyle)
        } else {
            Box::new(PlainStyle)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_markers() {
        let style = PlainStyle;
        assert_eq!(style.header("a.b will be created"), "# a.b will be created");
        assert_eq!(style.addition("id = 1"), "+ id = 1");
        assert_eq!(style.removal("id = 1"), "- id = 1");
        assert_eq!(style.context("}"), "  }");
        assert_eq!(style.failure("oops"), "! oops");
    }

    #[test]
    fn test_color_style_keeps_text() {
        let style = ColorStyle;
        assert!(style.addition("id = 1").contains("+ id = 1"));
        assert!(style.removal("id = 1").contains("- id = 1"));
        assert!(style.header("x").contains("# x"));
    }

    #[test]
    fn test_never_mode_is_plain() {
        let style = ColorMode::Never.style();
        assert_eq!(style.addition("x"), "+ x");
    }

    #[test]
    fn test_colorize_decision() {
        assert!(ColorMode::Always.colorize(false));
        assert!(!ColorMode::Never.colorize(true));
        assert!(ColorMode::Auto.colorize(true));
        assert!(!ColorMode::Auto.colorize(false));
    }

    #[test]
    fn test_always_mode_picks_color_style() {
        assert_eq!(format!("{:?}", ColorMode::Always.style()), "ColorStyle");
        assert_eq!(format!("{:?}", ColorMode::Never.style()), "PlainStyle");
    }
}
