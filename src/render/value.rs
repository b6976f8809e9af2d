//! Attribute value trees and null pruning.
//!
//! Resource states arrive as arbitrary JSON. They are converted into [`Value`],
//! a closed set of shapes with sorted mapping keys, so that pruning and
//! serialization are exhaustive matches and key order never depends on input
//! order.

use std::collections::BTreeMap;

/// A node in a resource attribute tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// An explicit null.
    Null,
    /// A leaf value.
    Scalar(Scalar),
    /// An ordered list of values.
    Sequence(Vec<Value>),
    /// Attributes keyed by name, in sorted key order.
    Mapping(BTreeMap<String, Value>),
}

/// A leaf attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    /// A boolean.
    Bool(bool),
    /// A number, kept in its decoded form.
    Number(serde_json::Number),
    /// A string.
    String(String),
}

impl Value {
    /// Returns true for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Human-readable name of the value's shape, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar(Scalar::Bool(_)) => "a boolean",
            Self::Scalar(Scalar::Number(_)) => "a number",
            Self::Scalar(Scalar::String(_)) => "a string",
            Self::Sequence(_) => "an array",
            Self::Mapping(_) => "an object",
        }
    }

    /// Removes every mapping entry whose value is null.
    ///
    /// Applies through nested mappings and through sequence elements. Null
    /// elements of a sequence are positional and are kept. Sanitizing an
    /// already sanitized tree returns it unchanged.
    #[must_use]
    pub fn sanitize(self) -> Self {
        match self {
            Self::Mapping(entries) => Self::Mapping(
                entries
                    .into_iter()
                    .filter(|(_, value)| !value.is_null())
                    .map(|(key, value)| (key, value.sanitize()))
                    .collect(),
            ),
            Self::Sequence(items) => {
                Self::Sequence(items.into_iter().map(Self::sanitize).collect())
            }
            leaf @ (Self::Null | Self::Scalar(_)) => leaf,
        }
    }

    /// Returns true if no mapping anywhere in the tree holds a null value.
    #[must_use]
    pub fn is_sanitized(&self) -> bool {
        match self {
            Self::Mapping(entries) => entries
                .values()
                .all(|value| !value.is_null() && value.is_sanitized()),
            Self::Sequence(items) => items.iter().all(Self::is_sanitized),
            Self::Null | Self::Scalar(_) => true,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            serde_json::Value::Number(n) => Self::Scalar(Scalar::Number(n)),
            serde_json::Value::String(s) => Self::Scalar(Scalar::String(s)),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Mapping(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(value: &serde_json::Value) -> Self {
        Self::from(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_removes_null_fields() {
        let value = Value::from(json!({"id": "i-1", "tags": null}));
        let expected = Value::from(json!({"id": "i-1"}));

        assert_eq!(value.sanitize(), expected);
    }

    #[test]
    fn test_sanitize_nested_mappings_and_sequences() {
        let value = Value::from(json!({
            "network": {"subnet": null, "vpc": "vpc-1"},
            "rules": [
                {"port": 22, "cidr": null},
                {"port": 443, "nested": [{"x": null, "y": 1}]}
            ],
            "list": ["a", null, "b"]
        }));
        let expected = Value::from(json!({
            "network": {"vpc": "vpc-1"},
            "rules": [
                {"port": 22},
                {"port": 443, "nested": [{"y": 1}]}
            ],
            "list": ["a", null, "b"]
        }));

        let sanitized = value.sanitize();
        assert_eq!(sanitized, expected);
        assert!(sanitized.is_sanitized());
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let value = Value::from(json!({
            "a": null,
            "b": {"c": null, "d": [{"e": null}, 1, null]},
            "f": true
        }));

        let once = value.sanitize();
        let twice = once.clone().sanitize();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_scalars_pass_through() {
        for raw in [json!(1.5), json!("text"), json!(false), json!(null)] {
            let value = Value::from(raw);
            assert_eq!(value.clone().sanitize(), value);
        }
    }

    #[test]
    fn test_sanitize_deep_nesting() {
        let mut raw = json!({"leaf": "x", "gone": null});
        for _ in 0..100 {
            raw = json!({"child": raw, "empty": null});
        }

        let sanitized = Value::from(raw).sanitize();
        assert!(sanitized.is_sanitized());

        let mut depth = 0;
        let mut cursor = &sanitized;
        while let Value::Mapping(entries) = cursor {
            match entries.get("child") {
                Some(child) => {
                    assert_eq!(entries.len(), 1);
                    cursor = child;
                    depth += 1;
                }
                None => break,
            }
        }
        assert_eq!(depth, 100);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::from(json!([])).kind(), "an array");
        assert_eq!(Value::from(json!({})).kind(), "an object");
        assert_eq!(Value::from(json!("s")).kind(), "a string");
    }
}
