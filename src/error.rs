//! Error types for prettyplan.
//!
//! This module provides the error hierarchy for every stage of a render:
//! configuration, plan decoding, and report rendering. Fatal errors abort the
//! whole render; [`SerializationWarning`] is the one recoverable, per-resource
//! condition and is collected rather than propagated.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for prettyplan.
#[derive(Debug, Error)]
pub enum PrettyPlanError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The input could not be decoded into a valid plan.
    #[error("{0}")]
    Decode(#[from] DecodeError),

    /// The plan could not be rendered.
    #[error("{0}")]
    Render(#[from] RenderError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Validation failed.
    #[error("Configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },

    /// An environment override holds a value of the wrong type.
    #[error("Invalid value for environment variable {name}: {value}")]
    InvalidEnvVar {
        /// Name of the variable.
        name: String,
        /// The rejected value.
        value: String,
    },
}

/// Errors raised while decoding and validating plan JSON.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input is not valid plan JSON.
    #[error("invalid plan JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The plan carries no format version.
    #[error("plan is missing its format_version")]
    MissingFormatVersion,

    /// The plan format version is malformed or not supported.
    #[error("unsupported plan format version: {version}")]
    UnsupportedFormatVersion {
        /// The version string found in the plan.
        version: String,
    },

    /// A resource change has no address.
    #[error("resource change #{index} has an empty address")]
    EmptyAddress {
        /// Position of the resource change in the plan.
        index: usize,
    },

    /// Two resource changes share an address.
    #[error("duplicate resource address in plan: {address}")]
    DuplicateAddress {
        /// The repeated address.
        address: String,
    },
}

/// Fatal rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The action set of a resource matches none of the known classifications.
    #[error("unknown action set [{actions}] for resource {address}")]
    UnknownAction {
        /// Address of the offending resource.
        address: String,
        /// The raw action flags, comma separated.
        actions: String,
    },
}

/// A value tree that cannot be laid out as attribute text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// The root of a resource state is not a mapping.
    #[error("expected an object at the root of `{side}`, found {found}")]
    RootNotMapping {
        /// Which state was rejected (`before` or `after`).
        side: &'static str,
        /// Kind of value that was found instead.
        found: &'static str,
    },
}

/// A single resource whose attributes could not be rendered.
///
/// The resource still gets a placeholder block in the report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to render {address}: {reason}")]
pub struct SerializationWarning {
    /// Address of the affected resource.
    pub address: String,
    /// Why rendering failed.
    pub reason: ShapeError,
}

/// Result type alias for prettyplan operations.
pub type Result<T> = std::result::Result<T, PrettyPlanError>;

impl PrettyPlanError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if the error came from decoding the input plan.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

impl ConfigError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_action_message() {
        let err = RenderError::UnknownAction {
            address: String::from("aws_instance.web"),
            actions: String::from("forget"),
        };
        assert_eq!(
            err.to_string(),
            "unknown action set [forget] for resource aws_instance.web"
        );
    }

    #[test]
    fn test_decode_error_is_decode() {
        let err = PrettyPlanError::from(DecodeError::MissingFormatVersion);
        assert!(err.is_decode());
        assert!(!PrettyPlanError::internal("boom").is_decode());
    }

    #[test]
    fn test_serialization_warning_message() {
        let warning = SerializationWarning {
            address: String::from("null_resource.x"),
            reason: ShapeError::RootNotMapping {
                side: "after",
                found: "an array",
            },
        };
        assert_eq!(
            warning.to_string(),
            "failed to render null_resource.x: expected an object at the root of `after`, found an array"
        );
    }
}
