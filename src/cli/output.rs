//! Output formatting for CLI commands.
//!
//! This module turns a [`ChangeReport`] into what a command prints, either as
//! text for people or as JSON for scripts.

use serde::Serialize;
use tabled::{Table, Tabled};

use crate::error::{PrettyPlanError, Result};
use crate::render::{Action, CategoryMap, ChangeCounts, ChangeReport, ReportFormatter};

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Resource row for table display.
#[derive(Tabled)]
struct ChangeRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Moved from")]
    moved_from: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the full report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn format_report(
        &self,
        report: &ChangeReport,
        formatter: &ReportFormatter,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(formatter.format(report)),
            OutputFormat::Json => to_json(&ReportJson::from(report)),
        }
    }

    /// Formats a table of changed resources.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn format_summary(&self, report: &ChangeReport) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(Self::format_summary_text(report)),
            OutputFormat::Json => to_json(&SummaryJson::from(report)),
        }
    }

    fn format_summary_text(report: &ChangeReport) -> String {
        let summary = ReportFormatter::summary_line(report);
        if report.is_empty() {
            return format!("{summary}\n");
        }

        let rows: Vec<ChangeRow> = report
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| ChangeRow {
                index: i + 1,
                action: Self::format_action(entry.action),
                address: entry.address.clone(),
                moved_from: entry.moved_from.clone().unwrap_or_default(),
            })
            .collect();

        let mut output = Table::new(rows).to_string();
        output.push_str("\n\n");
        output.push_str(&summary);
        output.push('\n');
        output
    }

    /// Formats an action with its symbol.
    fn format_action(action: Action) -> String {
        format!("{}{action}", action.symbol())
    }
}

fn to_json(value: &impl Serialize) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map(|mut json| {
            json.push('\n');
            json
        })
        .map_err(|e| PrettyPlanError::internal(format!("failed to serialize output: {e}")))
}

// JSON serialization helpers

#[derive(Serialize)]
struct ReportJson<'a> {
    counts: CountsJson,
    created: &'a CategoryMap,
    updated: &'a CategoryMap,
    deleted: &'a CategoryMap,
    replaced: &'a CategoryMap,
    moved: &'a CategoryMap,
    ordered_changes: Vec<&'a str>,
    warnings: Vec<WarningJson<'a>>,
}

#[derive(Serialize)]
struct SummaryJson<'a> {
    counts: CountsJson,
    changes: Vec<ChangeJson<'a>>,
}

#[derive(Serialize)]
struct CountsJson {
    add: usize,
    change: usize,
    destroy: usize,
    moved: usize,
}

#[derive(Serialize)]
struct ChangeJson<'a> {
    address: &'a str,
    action: String,
    moved_from: Option<&'a str>,
}

#[derive(Serialize)]
struct WarningJson<'a> {
    address: &'a str,
    message: String,
}

impl From<ChangeCounts> for CountsJson {
    fn from(counts: ChangeCounts) -> Self {
        Self {
            add: counts.to_add,
            change: counts.to_change,
            destroy: counts.to_destroy,
            moved: counts.to_move,
        }
    }
}

impl<'a> From<&'a ChangeReport> for ReportJson<'a> {
    fn from(report: &'a ChangeReport) -> Self {
        Self {
            counts: report.counts().into(),
            created: report.created(),
            updated: report.updated(),
            deleted: report.deleted(),
            replaced: report.replaced(),
            moved: report.moved(),
            ordered_changes: report.ordered_changes().collect(),
            warnings: report
                .warnings()
                .iter()
                .map(|w| WarningJson {
                    address: &w.address,
                    message: w.reason.to_string(),
                })
                .collect(),
        }
    }
}

impl<'a> From<&'a ChangeReport> for SummaryJson<'a> {
    fn from(report: &'a ChangeReport) -> Self {
        Self {
            counts: report.counts().into(),
            changes: report
                .entries()
                .iter()
                .map(|entry| ChangeJson {
                    address: &entry.address,
                    action: entry.action.to_string(),
                    moved_from: entry.moved_from.as_deref(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Change, Plan, ResourceChange};
    use crate::render::ResourceRenderer;
    use serde_json::{Value as Json, json};

    fn sample_report() -> ChangeReport {
        let plan = Plan {
            format_version: String::from("1.2"),
            terraform_version: None,
            resource_changes: vec![
                ResourceChange::new(
                    "aws_instance",
                    "web",
                    Change::new(["create"], Json::Null, json!({"id": "i-1"})),
                ),
                ResourceChange::new(
                    "aws_instance",
                    "db",
                    Change::new(["update"], json!({"size": "s"}), json!({"size": "m"})),
                )
                .with_previous_address("aws_instance.database"),
            ],
        };
        ChangeReport::build(&plan, &ResourceRenderer::default()).unwrap()
    }

    #[test]
    fn test_report_json_has_category_maps() {
        let output = OutputFormatter::new(OutputFormat::Json)
            .format_report(&sample_report(), &ReportFormatter::new())
            .unwrap();
        let parsed: Json = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["counts"]["add"], 1);
        assert_eq!(parsed["counts"]["change"], 1);
        assert_eq!(parsed["counts"]["moved"], 1);
        assert!(parsed["created"]["aws_instance.web"].is_string());
        assert!(parsed["moved"]["aws_instance.db"].is_string());
        assert_eq!(parsed["deleted"], json!({}));
        assert_eq!(parsed["ordered_changes"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["warnings"], json!([]));
    }

    #[test]
    fn test_report_text_uses_formatter() {
        let report = sample_report();
        let formatter = ReportFormatter::new().with_preamble(false);
        let output = OutputFormatter::new(OutputFormat::Text)
            .format_report(&report, &formatter)
            .unwrap();
        assert_eq!(output, formatter.format(&report));
    }

    #[test]
    fn test_summary_table() {
        let output = OutputFormatter::new(OutputFormat::Text)
            .format_summary(&sample_report())
            .unwrap();

        assert!(output.contains("+create"));
        assert!(output.contains("~update"));
        assert!(output.contains("aws_instance.database"));
        assert!(output.ends_with("Plan: 1 to add, 1 to change, 0 to destroy, 1 to move.\n"));
    }

    #[test]
    fn test_summary_json() {
        let output = OutputFormatter::new(OutputFormat::Json)
            .format_summary(&sample_report())
            .unwrap();
        let parsed: Json = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["changes"][0]["address"], "aws_instance.web");
        assert_eq!(parsed["changes"][0]["action"], "create");
        assert_eq!(parsed["changes"][1]["moved_from"], "aws_instance.database");
    }
}
