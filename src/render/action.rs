//! Action classification.
//!
//! Every resource change carries a list of raw action flags. This module maps
//! that list to exactly one [`Action`]; combinations that match nothing are a
//! hard error.

use crate::error::RenderError;
use crate::plan::ResourceChange;
use std::fmt;

/// Semantic action of a resource change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Nothing changes.
    NoOp,
    /// A data source is read.
    Read,
    /// The resource is created.
    Create,
    /// The resource is updated in place.
    Update,
    /// The resource is destroyed.
    Delete,
    /// The resource is destroyed and created again.
    Replace(ReplaceOrder),
}

/// Order in which a replacement happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplaceOrder {
    /// The old object is destroyed before the new one is created.
    DestroyBeforeCreate,
    /// The new object is created before the old one is destroyed.
    CreateBeforeDestroy,
}

impl Action {
    /// Classifies the action flags of a resource change.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownAction`] if the flags match no known
    /// action.
    pub fn classify(change: &ResourceChange) -> Result<Self, RenderError> {
        let flags: Vec<&str> = change
            .change
            .actions
            .as_slice()
            .iter()
            .map(String::as_str)
            .collect();

        match flags.as_slice() {
            ["no-op"] => Ok(Self::NoOp),
            ["read"] => Ok(Self::Read),
            ["create"] => Ok(Self::Create),
            ["update"] => Ok(Self::Update),
            ["delete"] => Ok(Self::Delete),
            ["delete", "create"] => Ok(Self::Replace(ReplaceOrder::DestroyBeforeCreate)),
            ["create", "delete"] => Ok(Self::Replace(ReplaceOrder::CreateBeforeDestroy)),
            _ => Err(RenderError::UnknownAction {
                address: change.address.clone(),
                actions: change.change.actions.to_string(),
            }),
        }
    }

    /// Returns true for actions that never appear in a report.
    #[must_use]
    pub const fn is_filtered(self) -> bool {
        matches!(self, Self::NoOp | Self::Read)
    }

    /// Phrase describing what happens to the resource.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::NoOp => "has no changes",
            Self::Read => "will be read during apply",
            Self::Create => "will be created",
            Self::Update => "will be updated in-place",
            Self::Delete => "will be destroyed",
            Self::Replace(_) => "must be replaced",
        }
    }

    /// Symbol opening the resource line of a block.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::NoOp => " ",
            Self::Read => "<=",
            Self::Create => "+",
            Self::Update => "~",
            Self::Delete => "-",
            Self::Replace(ReplaceOrder::DestroyBeforeCreate) => "-/+",
            Self::Replace(ReplaceOrder::CreateBeforeDestroy) => "+/-",
        }
    }
}

impl ReplaceOrder {
    /// Note explaining the replacement order.
    #[must_use]
    pub const fn note(self) -> &'static str {
        match self {
            Self::DestroyBeforeCreate => "destroy and then create replacement",
            Self::CreateBeforeDestroy => "create replacement and then destroy",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NoOp => "no-op",
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Replace(_) => "replace",
        };
        write!(f, "{s}")
    }
}
