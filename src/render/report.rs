//! Change report aggregation.
//!
//! [`ReportAggregator`] folds a plan's resource changes into a [`ChangeReport`]:
//! one ordered list of blocks in plan order plus per-category lookup maps.
//! Category maps only ever grow while the plan is folded.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::{RenderError, SerializationWarning};
use crate::plan::{Plan, ResourceChange};

use super::action::Action;
use super::resource::{RenderedResource, ResourceRenderer};

/// Per-address lookup of rendered text.
pub type CategoryMap = BTreeMap<String, String>;

/// Report category of a rendered resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Created resources.
    Created,
    /// Resources updated in place.
    Updated,
    /// Destroyed resources.
    Deleted,
    /// Replaced resources.
    Replaced,
    /// Resources with a new address.
    Moved,
}

/// Counts used for the summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeCounts {
    /// Resources that will be created, replacements included.
    pub to_add: usize,
    /// Resources updated in place.
    pub to_change: usize,
    /// Resources that will be destroyed, replacements included.
    pub to_destroy: usize,
    /// Resources that changed address.
    pub to_move: usize,
}

/// The rendered view of a whole plan.
#[derive(Debug, Clone, Default)]
pub struct ChangeReport {
    created: CategoryMap,
    updated: CategoryMap,
    deleted: CategoryMap,
    replaced: CategoryMap,
    moved: CategoryMap,
    entries: Vec<RenderedResource>,
    warnings: Vec<SerializationWarning>,
}

/// Sequential fold of resource changes into a [`ChangeReport`].
#[derive(Debug)]
pub struct ReportAggregator<'a> {
    renderer: &'a ResourceRenderer,
    report: ChangeReport,
}

impl Category {
    /// All categories, in report order.
    pub const ALL: [Self; 5] = [
        Self::Created,
        Self::Updated,
        Self::Deleted,
        Self::Replaced,
        Self::Moved,
    ];

    /// Category a reportable action belongs to.
    #[must_use]
    pub const fn for_action(action: Action) -> Option<Self> {
        match action {
            Action::Create => Some(Self::Created),
            Action::Update => Some(Self::Updated),
            Action::Delete => Some(Self::Deleted),
            Action::Replace(_) => Some(Self::Replaced),
            Action::NoOp | Action::Read => None,
        }
    }

    /// Lowercase name, as used in JSON output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Replaced => "replaced",
            Self::Moved => "moved",
        }
    }
}

impl<'a> ReportAggregator<'a> {
    /// Starts an empty report.
    #[must_use]
    pub fn new(renderer: &'a ResourceRenderer) -> Self {
        Self {
            renderer,
            report: ChangeReport::default(),
        }
    }

    /// Classifies, renders and records one resource change.
    ///
    /// `NoOp` and `Read` changes leave the report untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownAction`] if the change's actions match no
    /// known classification.
    pub fn push(&mut self, change: &ResourceChange) -> Result<(), RenderError> {
        let action = Action::classify(change)?;
        let Some(category) = Category::for_action(action) else {
            debug!("Skipping {} ({action})", change.address);
            return Ok(());
        };

        let rendered = self.renderer.render(change, action);
        if let Some(warning) = &rendered.warning {
            warn!("{warning}");
            self.report.warnings.push(warning.clone());
        }

        self.report
            .map_mut(category)
            .insert(rendered.address.clone(), rendered.text.clone());
        if rendered.moved_from.is_some() {
            self.report
                .moved
                .insert(rendered.address.clone(), rendered.text.clone());
        }
        self.report.entries.push(rendered);
        Ok(())
    }

    /// Finishes the fold.
    #[must_use]
    pub fn finish(self) -> ChangeReport {
        self.report
    }
}

impl ChangeReport {
    /// Renders every resource change of a plan, in plan order.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownAction`] on the first change whose actions
    /// match no known classification; no report is produced in that case.
    pub fn build(plan: &Plan, renderer: &ResourceRenderer) -> Result<Self, RenderError> {
        let aggregator = plan.resource_changes.iter().try_fold(
            ReportAggregator::new(renderer),
            |mut aggregator, change| {
                aggregator.push(change)?;
                Ok::<_, RenderError>(aggregator)
            },
        )?;

        let report = aggregator.finish();
        debug!(
            "Built report with {} blocks and {} warnings",
            report.entries.len(),
            report.warnings.len()
        );
        Ok(report)
    }

    /// Rendered text per address for one category.
    #[must_use]
    pub const fn category(&self, category: Category) -> &CategoryMap {
        match category {
            Category::Created => &self.created,
            Category::Updated => &self.updated,
            Category::Deleted => &self.deleted,
            Category::Replaced => &self.replaced,
            Category::Moved => &self.moved,
        }
    }

    /// Created resources.
    #[must_use]
    pub const fn created(&self) -> &CategoryMap {
        &self.created
    }

    /// Resources updated in place.
    #[must_use]
    pub const fn updated(&self) -> &CategoryMap {
        &self.updated
    }

    /// Destroyed resources.
    #[must_use]
    pub const fn deleted(&self) -> &CategoryMap {
        &self.deleted
    }

    /// Replaced resources.
    #[must_use]
    pub const fn replaced(&self) -> &CategoryMap {
        &self.replaced
    }

    /// Moved resources.
    #[must_use]
    pub const fn moved(&self) -> &CategoryMap {
        &self.moved
    }

    /// Rendered blocks in plan order.
    pub fn ordered_changes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.text.as_str())
    }

    /// Rendered resources in plan order.
    #[must_use]
    pub fn entries(&self) -> &[RenderedResource] {
        &self.entries
    }

    /// Resources that were rendered as placeholders.
    #[must_use]
    pub fn warnings(&self) -> &[SerializationWarning] {
        &self.warnings
    }

    /// Returns true if no resource changes were reported.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Summary counts; a replacement counts as one add and one destroy.
    #[must_use]
    pub fn counts(&self) -> ChangeCounts {
        let replaced = self.replaced.len();
        ChangeCounts {
            to_add: self.created.len() + replaced,
            to_change: self.updated.len(),
            to_destroy: self.deleted.len() + replaced,
            to_move: self.moved.len(),
        }
    }

    const fn map_mut(&mut self, category: Category) -> &mut CategoryMap {
        match category {
            Category::Created => &mut self.created,
            Category::Updated => &mut self.updated,
            Category::Deleted => &mut self.deleted,
            Category::Replaced => &mut self.replaced,
            Category::Moved => &mut self.moved,
        }
    }
}
