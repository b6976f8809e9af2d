//! Change report rendering.
//!
//! This module turns a decoded plan into a readable report:
//! - classifying each resource change into one action
//! - pruning null attributes and laying attribute trees out as text
//! - diffing before and after states
//! - collecting blocks into ordered and per-category views

mod action;
mod differ;
mod formatter;
mod report;
mod resource;
mod style;
mod value;

pub use action::{Action, ReplaceOrder};
pub use differ::{DEFAULT_INDENT, DiffLine, LineKind, TreeDiff, TreeDiffer};
pub use formatter::{NO_CHANGES, PREAMBLE, ReportFormatter};
pub use report::{Category, CategoryMap, ChangeCounts, ChangeReport, ReportAggregator};
pub use resource::{RenderedResource, ResourceRenderer};
pub use style::{ColorMode, ColorStyle, PlainStyle, Style};
pub use value::{Scalar, Value};
