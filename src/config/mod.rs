//! Configuration module for prettyplan.
//!
//! This module handles all configuration-related functionality:
//! - Parsing and deserializing `prettyplan.yaml`
//! - Layering `PRETTYPLAN_*` environment overrides
//! - Validation of configuration values

mod parser;
mod spec;
mod validator;

pub use parser::{ConfigParser, DEFAULT_CONFIG_FILES, find_config_file};
pub use spec::RenderConfig;
pub use validator::{ConfigValidator, ValidationError};
