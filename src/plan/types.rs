//! Plan document types.
//!
//! These structs map to the subset of the Terraform JSON plan format that the
//! renderer reads: the format version and the ordered list of resource changes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A decoded infrastructure plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Version of the plan JSON format.
    #[serde(default)]
    pub format_version: String,
    /// Version of the tool that produced the plan.
    #[serde(default)]
    pub terraform_version: Option<String>,
    /// Resource changes in plan order.
    #[serde(default)]
    pub resource_changes: Vec<ResourceChange>,
}

/// A proposed change to a single resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceChange {
    /// Unique address of the resource within the plan.
    pub address: String,
    /// Address the resource had before being moved, if it was moved.
    #[serde(default)]
    pub previous_address: Option<String>,
    /// Whether this is a managed resource or a data source.
    #[serde(default)]
    pub mode: ResourceMode,
    /// Resource type (e.g. `aws_instance`).
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Resource name within its module.
    pub name: String,
    /// Provider responsible for the resource.
    #[serde(default)]
    pub provider_name: Option<String>,
    /// The change itself.
    pub change: Change,
}

/// Resource mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceMode {
    /// A managed resource.
    #[default]
    Managed,
    /// A data source.
    Data,
}

/// Before and after states plus the raw actions connecting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    /// Raw action flags.
    pub actions: ActionSet,
    /// State before the change; null when the resource does not exist yet.
    #[serde(default)]
    pub before: serde_json::Value,
    /// State after the change; null when the resource is being removed.
    #[serde(default)]
    pub after: serde_json::Value,
}

/// The raw, ordered action flags of a change (`"create"`, `"delete"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionSet(Vec<String>);

impl ActionSet {
    /// Returns the flags in plan order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for ActionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

impl Change {
    /// Creates a change from its action flags and states.
    #[must_use]
    pub fn new<S: Into<String>>(
        actions: impl IntoIterator<Item = S>,
        before: serde_json::Value,
        after: serde_json::Value,
    ) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            before,
            after,
        }
    }
}

impl ResourceChange {
    /// Creates a managed resource change addressed as `<type>.<name>`.
    #[must_use]
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>, change: Change) -> Self {
        let resource_type = resource_type.into();
        let name = name.into();
        Self {
            address: format!("{resource_type}.{name}"),
            previous_address: None,
            mode: ResourceMode::Managed,
            resource_type,
            name,
            provider_name: None,
            change,
        }
    }

    /// Records the address the resource was moved from.
    #[must_use]
    pub fn with_previous_address(mut self, previous: impl Into<String>) -> Self {
        self.previous_address = Some(previous.into());
        self
    }

    /// Returns the previous address if the resource was moved.
    #[must_use]
    pub fn moved_from(&self) -> Option<&str> {
        self.previous_address
            .as_deref()
            .filter(|previous| *previous != self.address)
    }
}

impl fmt::Display for ResourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Managed => "resource",
            Self::Data => "data",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_resource_change() {
        let raw = json!({
            "address": "module.app.aws_instance.web",
            "mode": "managed",
            "type": "aws_instance",
            "name": "web",
            "provider_name": "registry.terraform.io/hashicorp/aws",
            "change": {
                "actions": ["delete", "create"],
                "before": {"ami": "ami-1"},
                "after": {"ami": "ami-2"}
            }
        });

        let change: ResourceChange = serde_json::from_value(raw).unwrap();
        assert_eq!(change.address, "module.app.aws_instance.web");
        assert_eq!(change.resource_type, "aws_instance");
        assert_eq!(change.mode, ResourceMode::Managed);
        assert_eq!(change.change.actions.as_slice(), ["delete", "create"]);
        assert_eq!(change.change.actions.to_string(), "delete, create");
    }

    #[test]
    fn test_missing_states_default_to_null() {
        let raw = json!({
            "address": "data.aws_ami.ubuntu",
            "mode": "data",
            "type": "aws_ami",
            "name": "ubuntu",
            "change": {"actions": ["read"]}
        });

        let change: ResourceChange = serde_json::from_value(raw).unwrap();
        assert_eq!(change.mode, ResourceMode::Data);
        assert!(change.change.before.is_null());
        assert!(change.change.after.is_null());
    }

    #[test]
    fn test_moved_from_ignores_same_address() {
        let change = ResourceChange::new(
            "aws_s3_bucket",
            "logs",
            Change::new(["update"], json!({}), json!({})),
        );
        assert_eq!(change.moved_from(), None);

        let same = change.clone().with_previous_address("aws_s3_bucket.logs");
        assert_eq!(same.moved_from(), None);

        let moved = change.with_previous_address("aws_s3_bucket.old_logs");
        assert_eq!(moved.moved_from(), Some("aws_s3_bucket.old_logs"));
    }
}
