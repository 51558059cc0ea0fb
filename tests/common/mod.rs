//! Common test utilities and helpers for costexp tests
//!
//! Sample request documents and helpers for writing them to a temporary
//! directory, so command tests can run against real files.

use costexp::cli::DocumentArgs;
use costexp_core::enums::Dimension;
use costexp_core::expression::Expression;
use costexp_core::types::{DimensionValues, TagValues};
use costexp_model::operation::OperationName;
use std::path::PathBuf;
use tempfile::TempDir;

/// Filter used throughout the documentation: us-east-1 or us-west-1,
/// excluding data transfer
#[allow(dead_code)]
pub const DOCUMENTED_FILTER: &str = r#"{"And":[{"Dimensions":{"Key":"REGION","Values":["us-east-1","us-west-1"]}},{"Not":{"Dimensions":{"Key":"USAGE_TYPE","Values":["DataTransfer"]}}}]}"#;

/// A valid GetCostForecast request
#[allow(dead_code)]
pub const FORECAST_DOCUMENT: &str = r#"{
    "TimePeriod": {"Start": "2020-03-01", "End": "2020-04-01"},
    "Metric": "UNBLENDED_COST",
    "Granularity": "MONTHLY",
    "PredictionIntervalLevel": 80
}"#;

/// A GetCostForecast request whose interval level is one too high
#[allow(dead_code)]
pub const FORECAST_LEVEL_100_DOCUMENT: &str = r#"{
    "TimePeriod": {"Start": "2020-03-01", "End": "2020-04-01"},
    "Metric": "UNBLENDED_COST",
    "Granularity": "MONTHLY",
    "PredictionIntervalLevel": 100
}"#;

/// A GetCostAndUsage request with several problems at once
#[allow(dead_code)]
pub const BROKEN_COST_AND_USAGE_DOCUMENT: &str = r#"{
    "TimePeriod": {"Start": "2020-02-01", "End": "2020-01-01"},
    "Granularity": "MONTHLY",
    "Metrics": ["UnblendedCost", "Profit"],
    "Filter": {"And": [{"Dimensions": {"Key": "REGION", "Values": ["us-east-1"]}}]}
}"#;

/// A Create request for a cost category with two rules
#[allow(dead_code)]
pub const COST_CATEGORY_DOCUMENT: &str = r#"{
    "Name": "Team",
    "RuleVersion": "CostCategoryExpression.v1",
    "Rules": [
        {"Value": "web", "Rule": {"Tags": {"Key": "team", "Values": ["web"]}}},
        {"Value": "data", "Rule": {"Tags": {"Key": "team", "Values": ["data", "analytics"]}}}
    ]
}"#;

/// The documented filter built with the typed API
#[allow(dead_code)]
pub fn documented_filter() -> Expression {
    Expression::and([
        DimensionValues::new(Dimension::Region, ["us-east-1", "us-west-1"]).into(),
        !Expression::from(DimensionValues::new(Dimension::UsageType, ["DataTransfer"])),
    ])
}

/// A small tag predicate
#[allow(dead_code)]
pub fn team_tag(values: &[&str]) -> Expression {
    TagValues::new("team", values.iter().copied()).into()
}

/// Temporary directory holding request documents
#[allow(dead_code)]
pub struct DocumentDir {
    dir: TempDir,
}

#[allow(dead_code)]
impl DocumentDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Write `contents` to `name` and return its path
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Path of a file that was never written
    pub fn missing(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `contents` and build command arguments for `operation`
    pub fn document_args(&self, name: &str, contents: &str, operation: OperationName) -> DocumentArgs {
        DocumentArgs {
            file: self.write(name, contents),
            operation,
        }
    }
}
