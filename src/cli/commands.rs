//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::RenderConfig;
use crate::render::ColorMode;

/// prettyplan - readable reports for Terraform JSON plans.
#[derive(Parser, Debug)]
#[command(name = "prettyplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true, env = "PRETTYPLAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log line format.
    #[arg(long, global = true, default_value = "text")]
    pub log_format: LogFormat,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// When to color text output.
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Omit the preamble line.
    #[arg(long, global = true)]
    pub no_preamble: bool,

    /// Omit the summary line.
    #[arg(long, global = true)]
    pub no_summary: bool,

    /// Unchanged lines to show around each change in diffs.
    #[arg(long, global = true)]
    pub context: Option<usize>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the full change report.
    Show {
        /// Plan JSON file; reads standard input when omitted or `-`.
        file: Option<PathBuf>,
    },

    /// List changed resources in a table.
    Summary {
        /// Plan JSON file; reads standard input when omitted or `-`.
        file: Option<PathBuf>,
    },
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// Log format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable log lines.
    #[default]
    Text,
    /// One JSON object per log line.
    Json,
}

impl Cli {
    /// Applies command-line flags on top of file and environment settings.
    pub fn apply_overrides(&self, config: &mut RenderConfig) {
        if let Some(color) = self.color {
            config.color = color;
        }
        if self.no_preamble {
            config.preamble = false;
        }
        if self.no_summary {
            config.summary = false;
        }
        if let Some(context) = self.context {
            config.context = Some(context);
        }
        if self.output == OutputFormat::Json {
            config.color = ColorMode::Never;
        }
    }
}

impl Commands {
    /// Plan file to read, or `None` for standard input.
    #[must_use]
    pub fn input(&self) -> Option<&Path> {
        let (Self::Show { file } | Self::Summary { file }) = self;
        file.as_deref().filter(|path| *path != Path::new("-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_with_flags() {
        let cli = Cli::try_parse_from([
            "prettyplan",
            "--color",
            "always",
            "--no-preamble",
            "--context",
            "2",
            "show",
            "plan.json",
        ])
        .unwrap();

        assert_eq!(cli.command.input(), Some(Path::new("plan.json")));

        let mut config = RenderConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.color, ColorMode::Always);
        assert!(!config.preamble);
        assert!(config.summary);
        assert_eq!(config.context, Some(2));
    }

    #[test]
    fn test_dash_reads_stdin() {
        let cli = Cli::try_parse_from(["prettyplan", "summary", "-"]).unwrap();
        assert_eq!(cli.command.input(), None);

        let cli = Cli::try_parse_from(["prettyplan", "show"]).unwrap();
        assert_eq!(cli.command.input(), None);
    }

    #[test]
    fn test_json_output_disables_color() {
        let cli = Cli::try_parse_from([
            "prettyplan", "--output", "json", "--color", "always", "show",
        ])
        .unwrap();
        let mut config = RenderConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.color, ColorMode::Never);
    }
}
