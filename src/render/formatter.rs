//! Final report text.

use std::fmt::Write;

use super::report::ChangeReport;

/// Line opening a report that has changes.
pub const PREAMBLE: &str = "Terraform will perform the following actions:";

/// Text of a report without changes.
pub const NO_CHANGES: &str = "No changes. Your infrastructure matches the configuration.";

/// Joins the ordered blocks of a [`ChangeReport`] into one string.
#[derive(Debug, Clone, Copy)]
pub struct ReportFormatter {
    preamble: bool,
    summary: bool,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter {
    /// Creates a formatter with preamble and summary enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            preamble: true,
            summary: true,
        }
    }

    /// Enables or disables the preamble line.
    #[must_use]
    pub const fn with_preamble(mut self, preamble: bool) -> Self {
        self.preamble = preamble;
        self
    }

    /// Enables or disables the trailing summary line.
    #[must_use]
    pub const fn with_summary(mut self, summary: bool) -> Self {
        self.summary = summary;
        self
    }

    /// Formats the report: blocks separated by blank lines, newline terminated.
    #[must_use]
    pub fn format(&self, report: &ChangeReport) -> String {
        if report.is_empty() {
            return format!("{NO_CHANGES}\n");
        }

        let mut sections: Vec<String> = Vec::new();
        if self.preamble {
            sections.push(PREAMBLE.to_string());
        }
        sections.extend(report.ordered_changes().map(String::from));
        if self.summary {
            sections.push(Self::summary_line(report));
        }

        let mut output = sections.join("\n\n");
        output.push('\n');
        output
    }

    /// `Plan: N to add, N to change, N to destroy.`, plus moves when present.
    #[must_use]
    pub fn summary_line(report: &ChangeReport) -> String {
        let counts = report.counts();
        let mut line = format!(
            "Plan: {} to add, {} to change, {} to destroy",
            counts.to_add, counts.to_change, counts.to_destroy
        );
        if counts.to_move > 0 {
            let _ = write!(line, ", {} to move", counts.to_move);
        }
        line.push('.');
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Change, Plan, ResourceChange};
    use crate::render::resource::ResourceRenderer;
    use pretty_assertions::assert_eq;
    use serde_json::{Value as Json, json};

    fn report(changes: Vec<ResourceChange>) -> ChangeReport {
        let plan = Plan {
            format_version: String::from("1.2"),
            terraform_version: None,
            resource_changes: changes,
        };
        ChangeReport::build(&plan, &ResourceRenderer::default()).unwrap()
    }

    fn two_changes() -> ChangeReport {
        report(vec![
            ResourceChange::new(
                "aws_instance",
                "web",
                Change::new(["create"], Json::Null, json!({"id": "i-1"})),
            ),
            ResourceChange::new(
                "aws_eip",
                "ip",
                Change::new(["delete"], json!({"id": "eip-1"}), Json::Null),
            ),
        ])
    }

    #[test]
    fn test_full_report() {
        let expected = "\
Terraform will perform the following actions:

# aws_instance.web will be created
+ resource \"aws_instance\" \"web\" {
+   id = \"i-1\"
+ }

# aws_eip.ip will be destroyed
- resource \"aws_eip\" \"ip\" {
-   id = \"eip-1\"
- }

Plan: 1 to add, 0 to change, 1 to destroy.
";
        assert_eq!(ReportFormatter::new().format(&two_changes()), expected);
    }

    #[test]
    fn test_blocks_only() {
        let output = ReportFormatter::new()
            .with_preamble(false)
            .with_summary(false)
            .format(&two_changes());

        assert!(output.starts_with("# aws_instance.web will be created"));
        assert!(output.ends_with("- }\n"));
        assert_eq!(output.matches("\n\n").count(), 1);
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(
            ReportFormatter::new().format(&report(Vec::new())),
            "No changes. Your infrastructure matches the configuration.\n"
        );
    }

    #[test]
    fn test_summary_mentions_moves() {
        let moved = report(vec![
            ResourceChange::new(
                "aws_instance",
                "web",
                Change::new(["update"], json!({"a": 1}), json!({"a": 2})),
            )
            .with_previous_address("aws_instance.old"),
        ]);

        assert_eq!(
            ReportFormatter::summary_line(&moved),
            "Plan: 0 to add, 1 to change, 0 to destroy, 1 to move."
        );
    }
}
