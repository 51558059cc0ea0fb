//! Output formatting module for costexp
//!
//! This module provides formatters for the results of each command:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! # Examples
//!
//! ```
//! use costexp::output::get_formatter;
//! use costexp_model::operation::OperationName;
//!
//! let formatter = get_formatter(true, false);
//! let json = formatter.format_operations(OperationName::ALL);
//! assert!(json.contains("AWSInsightsIndexService.GetCostAndUsage"));
//! ```

use colored::Colorize;
use costexp_core::expression::Expression;
use costexp_model::operation::{CheckedRequest, OperationName, RequestEnvelope};
use prettytable::{Table, format, row};
use serde_json::json;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format the list of operations
    fn format_operations(&self, operations: &[OperationName]) -> String;

    /// Format the outcome of validating a request document
    fn format_check(&self, checked: &CheckedRequest) -> String;

    /// Format a request envelope
    fn format_envelope(&self, envelope: &RequestEnvelope) -> String;

    /// Format a filter expression
    fn format_filter(&self, filter: &Expression) -> String;
}

/// Human-readable table output
pub struct TableFormatter {
    /// Whether to color status lines
    pub colored: bool,
}

impl TableFormatter {
    /// Create a new TableFormatter
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    fn ok(&self, text: &str) -> String {
        if self.colored {
            text.green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn problem(&self, text: &str) -> String {
        if self.colored {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn new_table() -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table
    }
}

impl OutputFormatter for TableFormatter {
    fn format_operations(&self, operations: &[OperationName]) -> String {
        let mut table = Self::new_table();
        table.set_titles(row![b -> "Operation", b -> "X-Amz-Target"]);
        for operation in operations {
            table.add_row(row![operation.as_str(), operation.target()]);
        }
        table.to_string()
    }

    fn format_check(&self, checked: &CheckedRequest) -> String {
        let report = &checked.report;
        if report.is_empty() {
            return format!("{} {} request is valid", self.ok("OK"), checked.operation);
        }

        let mut table = Self::new_table();
        table.set_titles(row![b -> "Path", b -> "Issue"]);
        for issue in report.issues() {
            let path = if issue.path.is_empty() {
                "(request)"
            } else {
                issue.path.as_str()
            };
            table.add_row(row![path, issue.kind.to_string()]);
        }
        format!(
            "{} {} request has {} issue(s)\n{}",
            self.problem("INVALID"),
            checked.operation,
            report.len(),
            table
        )
    }

    fn format_envelope(&self, envelope: &RequestEnvelope) -> String {
        let mut output = String::new();
        for (name, value) in envelope.headers() {
            output.push_str(&format!("{name}: {value}\n"));
        }
        output.push('\n');
        output.push_str(&envelope.body);
        output
    }

    fn format_filter(&self, filter: &Expression) -> String {
        let body = serde_json::to_string_pretty(filter).unwrap();
        format!(
            "{}\n\n{} predicate(s), {} node(s), depth {}",
            body,
            filter.leaves().count(),
            filter.node_count(),
            filter.depth()
        )
    }
}

/// Machine-readable JSON output
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_operations(&self, operations: &[OperationName]) -> String {
        let output = json!({
            "operations": operations
                .iter()
                .map(|operation| json!({
                    "name": operation.as_str(),
                    "target": operation.target(),
                }))
                .collect::<Vec<_>>(),
        });

        serde_json::to_string_pretty(&output).unwrap()
    }

    fn format_check(&self, checked: &CheckedRequest) -> String {
        let output = json!({
            "operation": checked.operation.as_str(),
            "valid": checked.report.is_empty(),
            "issues": checked.report.issues(),
        });

        serde_json::to_string_pretty(&output).unwrap()
    }

    fn format_envelope(&self, envelope: &RequestEnvelope) -> String {
        let body: serde_json::Value =
            serde_json::from_str(&envelope.body).unwrap_or_else(|_| json!(envelope.body));
        let output = json!({
            "target": envelope.target,
            "contentType": envelope.content_type,
            "body": body,
        });

        serde_json::to_string_pretty(&output).unwrap()
    }

    fn format_filter(&self, filter: &Expression) -> String {
        serde_json::to_string_pretty(filter).unwrap()
    }
}

/// Get appropriate formatter based on JSON flag
pub fn get_formatter(json: bool, colored: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new(colored))
    }
}
