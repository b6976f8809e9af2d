//! Configuration types.
//!
//! This module defines the struct that maps to `prettyplan.yaml`. Every field
//! has a default, so an empty file (or no file) is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::render::{ColorMode, DEFAULT_INDENT, ReportFormatter, ResourceRenderer, TreeDiffer};

/// Rendering options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Print the preamble line before the first block.
    #[serde(default = "default_true")]
    pub preamble: bool,
    /// Print the `Plan: ...` summary line after the last block.
    #[serde(default = "default_true")]
    pub summary: bool,
    /// When to color output.
    #[serde(default)]
    pub color: ColorMode,
    /// Spaces per nesting level in attribute text.
    #[serde(default = "default_indent")]
    pub indent: usize,
    /// Unchanged lines shown around each change; unset shows every line.
    #[serde(default)]
    pub context: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            preamble: true,
            summary: true,
            color: ColorMode::default(),
            indent: DEFAULT_INDENT,
            context: None,
        }
    }
}

impl RenderConfig {
    /// Builds the resource renderer these options describe.
    #[must_use]
    pub fn renderer(&self) -> ResourceRenderer {
        ResourceRenderer::new(TreeDiffer::new(self.indent, self.context), self.color.style())
    }

    /// Builds the report formatter these options describe.
    #[must_use]
    pub const fn formatter(&self) -> ReportFormatter {
        ReportFormatter::new()
            .with_preamble(self.preamble)
            .with_summary(self.summary)
    }
}

const fn default_true() -> bool {
    true
}

const fn default_indent() -> usize {
    DEFAULT_INDENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_is_default() {
        let config: RenderConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn test_parse_all_fields() {
        let yaml = r"
preamble: false
summary: false
color: never
indent: 4
context: 3
";
        let config: RenderConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.preamble);
        assert!(!config.summary);
        assert_eq!(config.color, ColorMode::Never);
        assert_eq!(config.indent, 4);
        assert_eq!(config.context, Some(3));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(serde_yaml::from_str::<RenderConfig>("colour: never").is_err());
    }
}
