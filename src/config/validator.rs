//! Configuration validation.
//!
//! Checks option ranges after files, environment and flags are merged.

use crate::error::{ConfigError, PrettyPlanError, Result};
use tracing::debug;

use super::spec::RenderConfig;

/// Largest accepted indent width.
const MAX_INDENT: usize = 8;

/// Largest accepted diff context radius.
const MAX_CONTEXT: usize = 1000;

/// Validator for render configurations.
#[derive(Debug, Default)]
pub struct ConfigValidator;

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// The error message.
    pub message: String,
}

impl ConfigValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Collects every problem with the configuration.
    #[must_use]
    pub fn check(&self, config: &RenderConfig) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if config.indent == 0 || config.indent > MAX_INDENT {
            errors.push(ValidationError {
                field: String::from("indent"),
                message: format!(
                    "indent must be between 1 and {MAX_INDENT}, got {}",
                    config.indent
                ),
            });
        }

        if let Some(context) = config.context.filter(|c| *c > MAX_CONTEXT) {
            errors.push(ValidationError {
                field: String::from("context"),
                message: format!("context must be at most {MAX_CONTEXT}, got {context}"),
            });
        }

        errors
    }

    /// Validates a render configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn validate(&self, config: &RenderConfig) -> Result<()> {
        match self.check(config).into_iter().next() {
            None => {
                debug!("Configuration validation passed");
                Ok(())
            }
            Some(first) => Err(PrettyPlanError::Config(ConfigError::validation(
                first.message,
                first.field,
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(ConfigValidator::new().validate(&RenderConfig::default()).is_ok());
    }

    #[test]
    fn test_indent_bounds() {
        let validator = ConfigValidator::new();
        for indent in [0, 9] {
            let config = RenderConfig {
                indent,
                ..RenderConfig::default()
            };
            let errors = validator.check(&config);
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "indent");
        }
    }

    #[test]
    fn test_context_bound() {
        let config = RenderConfig {
            context: Some(5000),
            indent: 0,
            ..RenderConfig::default()
        };

        let errors = ConfigValidator::new().check(&config);
        assert_eq!(errors.len(), 2);

        let err = ConfigValidator::new().validate(&config).unwrap_err();
        match err {
            PrettyPlanError::Config(ConfigError::ValidationError { field, .. }) => {
                assert_eq!(field.as_deref(), Some("indent"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
