//! Plan decoding and validation.
//!
//! This module turns raw plan JSON into a [`Plan`] and rejects documents the
//! renderer cannot trust: missing or unsupported format versions, empty
//! addresses, and duplicate addresses.

use crate::error::{DecodeError, Result};
use std::collections::HashSet;
use std::io::Read;
use tracing::debug;

use super::types::Plan;

/// Highest major format version the decoder accepts.
const MAX_SUPPORTED_MAJOR: u64 = 1;

/// Decoder for plan JSON documents.
#[derive(Debug, Default)]
pub struct PlanDecoder;

impl PlanDecoder {
    /// Creates a new decoder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Decodes and validates a plan read from `reader`.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the input is not valid plan JSON or fails
    /// validation.
    pub fn decode_reader(&self, reader: impl Read) -> Result<Plan> {
        let plan: Plan = serde_json::from_reader(reader).map_err(DecodeError::from)?;
        self.validate(&plan)?;
        Ok(plan)
    }

    /// Decodes and validates a plan from a string.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the input is not valid plan JSON or fails
    /// validation.
    pub fn decode_str(&self, input: &str) -> Result<Plan> {
        let plan: Plan = serde_json::from_str(input).map_err(DecodeError::from)?;
        self.validate(&plan)?;
        Ok(plan)
    }

    /// Validates an already-decoded plan.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure found.
    pub fn validate(&self, plan: &Plan) -> Result<()> {
        Self::validate_format_version(&plan.format_version)?;

        let mut seen = HashSet::with_capacity(plan.resource_changes.len());
        for (index, change) in plan.resource_changes.iter().enumerate() {
            if change.address.is_empty() {
                return Err(DecodeError::EmptyAddress { index }.into());
            }
            if !seen.insert(change.address.as_str()) {
                return Err(DecodeError::DuplicateAddress {
                    address: change.address.clone(),
                }
                .into());
            }
        }

        debug!(
            "Validated plan format {} with {} resource changes",
            plan.format_version,
            plan.resource_changes.len()
        );
        Ok(())
    }

    /// Checks that the version looks like `MAJOR.MINOR[.PATCH]` with a supported major.
    fn validate_format_version(version: &str) -> std::result::Result<(), DecodeError> {
        if version.is_empty() {
            return Err(DecodeError::MissingFormatVersion);
        }

        let unsupported = || DecodeError::UnsupportedFormatVersion {
            version: version.to_string(),
        };

        let parts: Vec<&str> = version.split('.').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(unsupported());
        }

        let mut numbers = Vec::with_capacity(parts.len());
        for part in parts {
            numbers.push(part.parse::<u64>().map_err(|_| unsupported())?);
        }

        match numbers.first() {
            Some(major) if *major <= MAX_SUPPORTED_MAJOR => Ok(()),
            _ => Err(unsupported()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrettyPlanError;

    fn decode_err(input: &str) -> DecodeError {
        match PlanDecoder::new().decode_str(input) {
            Err(PrettyPlanError::Decode(err)) => err,
            other => panic!("expected a decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_minimal_plan() {
        let input = r#"{
            "format_version": "1.2",
            "terraform_version": "1.6.0",
            "resource_changes": [
                {
                    "address": "aws_instance.web",
                    "type": "aws_instance",
                    "name": "web",
                    "change": {"actions": ["create"], "before": null, "after": {"id": "i-1"}}
                }
            ]
        }"#;

        let plan = PlanDecoder::new().decode_str(input).unwrap();
        assert_eq!(plan.format_version, "1.2");
        assert_eq!(plan.terraform_version.as_deref(), Some("1.6.0"));
        assert_eq!(plan.resource_changes.len(), 1);
    }

    #[test]
    fn test_decode_reader() {
        let input = br#"{"format_version": "0.2", "resource_changes": []}"#;
        let plan = PlanDecoder::new().decode_reader(&input[..]).unwrap();
        assert!(plan.resource_changes.is_empty());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(decode_err("{not json"), DecodeError::Json(_)));
    }

    #[test]
    fn test_missing_format_version() {
        assert!(matches!(
            decode_err(r#"{"resource_changes": []}"#),
            DecodeError::MissingFormatVersion
        ));
    }

    #[test]
    fn test_unsupported_format_version() {
        for version in ["2.0", "1", "1.x", "1.2.3.4"] {
            let input = format!(r#"{{"format_version": "{version}"}}"#);
            assert!(
                matches!(decode_err(&input), DecodeError::UnsupportedFormatVersion { .. }),
                "version {version} should be rejected"
            );
        }
    }

    #[test]
    fn test_duplicate_address() {
        let input = r#"{
            "format_version": "1.0",
            "resource_changes": [
                {"address": "a.b", "type": "a", "name": "b", "change": {"actions": ["create"]}},
                {"address": "a.b", "type": "a", "name": "b", "change": {"actions": ["delete"]}}
            ]
        }"#;

        match decode_err(input) {
            DecodeError::DuplicateAddress { address } => assert_eq!(address, "a.b"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_address() {
        let input = r#"{
            "format_version": "1.0",
            "resource_changes": [
                {"address": "", "type": "a", "name": "b", "change": {"actions": ["create"]}}
            ]
        }"#;

        assert!(matches!(decode_err(input), DecodeError::EmptyAddress { index: 0 }));
    }
}
