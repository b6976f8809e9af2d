//! Configuration parser for loading and layering configuration.
//!
//! This module handles loading configuration from YAML files and environment
//! variables, with proper precedence and error handling.

use crate::error::{ConfigError, PrettyPlanError, Result};
use crate::render::ColorMode;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

use super::spec::RenderConfig;

/// Configuration parser for loading render configuration.
#[derive(Debug, Default)]
pub struct ConfigParser;

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<RenderConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(PrettyPlanError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            PrettyPlanError::Config(ConfigError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses configuration from a YAML string. Blank input yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<RenderConfig> {
        debug!("Parsing YAML configuration");

        if content.trim().is_empty() {
            return Ok(RenderConfig::default());
        }

        serde_yaml::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            PrettyPlanError::Config(ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location,
            })
        })
    }

    /// Loads configuration with environment variable overrides.
    ///
    /// With no path, defaults are used as the base.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an
    /// override holds an invalid value.
    pub fn load_with_env(&self, path: Option<&Path>) -> Result<RenderConfig> {
        let mut config = match path {
            Some(path) => self.load_file(path)?,
            None => RenderConfig::default(),
        };

        Self::apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

        Ok(config)
    }

    /// Applies `PRETTYPLAN_*` overrides looked up through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a value of the wrong type.
    pub fn apply_env_overrides(
        config: &mut RenderConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<()> {
        if let Some(color) = lookup("PRETTYPLAN_COLOR") {
            debug!("Overriding color from environment");
            config.color = parse_color("PRETTYPLAN_COLOR", &color)?;
        }

        if let Some(preamble) = lookup("PRETTYPLAN_PREAMBLE") {
            debug!("Overriding preamble from environment");
            config.preamble = parse_env("PRETTYPLAN_PREAMBLE", &preamble)?;
        }

        if let Some(summary) = lookup("PRETTYPLAN_SUMMARY") {
            debug!("Overriding summary from environment");
            config.summary = parse_env("PRETTYPLAN_SUMMARY", &summary)?;
        }

        if let Some(indent) = lookup("PRETTYPLAN_INDENT") {
            debug!("Overriding indent from environment");
            config.indent = parse_env("PRETTYPLAN_INDENT", &indent)?;
        }

        if let Some(context) = lookup("PRETTYPLAN_CONTEXT") {
            debug!("Overriding context from environment");
            config.context = if context.is_empty() {
                None
            } else {
                Some(parse_env("PRETTYPLAN_CONTEXT", &context)?)
            };
        }

        Ok(())
    }
}

fn parse_env<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        PrettyPlanError::Config(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: value.to_string(),
        })
    })
}

fn parse_color(name: &str, value: &str) -> Result<ColorMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "auto" => Ok(ColorMode::Auto),
        "always" => Ok(ColorMode::Always),
        "never" => Ok(ColorMode::Never),
        _ => Err(PrettyPlanError::Config(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: value.to_string(),
        })),
    }
}

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "prettyplan.yaml",
    "prettyplan.yml",
    ".prettyplan.yaml",
    ".prettyplan.yml",
];

/// Finds the configuration file in `start_dir` or its parents, then in the
/// user configuration directory.
#[must_use]
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
    let mut current = start_dir.as_ref().to_path_buf();

    loop {
        for filename in DEFAULT_CONFIG_FILES {
            let config_path = current.join(filename);
            if config_path.exists() {
                info!("Found configuration file: {}", config_path.display());
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    let user_config = dirs::config_dir()?.join("prettyplan").join("config.yaml");
    if user_config.exists() {
        info!("Found user configuration file: {}", user_config.display());
        return Some(user_config);
    }

    debug!("No configuration file found, using defaults");
    None
}
