// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # prettyplan
//!
//! Readable change reports for Terraform JSON plans.
//!
//! ## Overview
//!
//! `terraform show -json plan.out` produces a machine-readable plan. prettyplan
//! turns it into one text block per changed resource:
//!
//! - Created resources show their new attributes, marked `+`
//! - Destroyed resources show their old attributes, marked `-`
//! - Updated and replaced resources show a line diff of their attributes
//! - Null attributes are pruned everywhere
//!
//! Besides the ordered text, every report exposes per-category maps
//! (`created`, `updated`, `deleted`, `replaced`, `moved`) keyed by resource
//! address for programmatic consumers.
//!
//! ## Modules
//!
//! - [`plan`]: Plan document types, decoding and validation
//! - [`render`]: Classification, pruning, diffing and report building
//! - [`config`]: Render configuration from files and environment
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```
//! use prettyplan::plan::PlanDecoder;
//! use prettyplan::render::{ChangeReport, ReportFormatter, ResourceRenderer};
//!
//! let input = r#"{
//!   "format_version": "1.2",
//!   "resource_changes": [{
//!     "address": "aws_instance.web",
//!     "type": "aws_instance",
//!     "name": "web",
//!     "change": {"actions": ["create"], "before": null, "after": {"id": "i-1", "tags": null}}
//!   }]
//! }"#;
//!
//! let plan = PlanDecoder::new().decode_str(input)?;
//! let report = ChangeReport::build(&plan, &ResourceRenderer::default())?;
//! let text = ReportFormatter::new().format(&report);
//!
//! assert!(text.contains("# aws_instance.web will be created"));
//! assert!(!text.contains("tags"));
//! assert_eq!(report.created().len(), 1);
//! # Ok::<(), prettyplan::PrettyPlanError>(())
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod error;
pub mod plan;
pub mod render;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{ConfigParser, ConfigValidator, RenderConfig};
pub use error::{PrettyPlanError, Result};
pub use plan::{Plan, PlanDecoder, ResourceChange};
pub use render::{ChangeReport, ReportAggregator, ReportFormatter, ResourceRenderer};
