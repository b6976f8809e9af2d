//! CLI module for prettyplan.
//!
//! This module provides the command-line interface for rendering plans.

mod commands;
mod output;

pub use commands::{Cli, Commands, LogFormat, OutputFormat};
pub use output::OutputFormatter;
