//! Cost and usage queries
//!
//! `GetCostAndUsage` and `GetCostAndUsageWithResources` share a request
//! shape: a time period, an optional granularity and filter, the metric
//! names to aggregate and up to two grouping axes.

use costexp_core::enums::{Dimension, Granularity};
use costexp_core::expression::Expression;
use costexp_core::types::{DateInterval, GroupDefinition, Metrics};
use costexp_core::validation::{
    FilterRestriction, IssueKind, Validate, ValidationReport, check_filter, check_group_by,
    check_known, check_metric_names, field_path,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metrics for one combination of group keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Group {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metrics: Metrics,
}

/// Results for one time bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ResultByTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<DateInterval>,
    /// Totals when no grouping was requested
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub total: Metrics,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
    /// Whether the bucket still contains estimated charges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated: Option<bool>,
}

impl ResultByTime {
    /// Decimal amount of `metric_name` in the bucket total
    pub fn total_amount(&self, metric_name: &str) -> Option<&str> {
        self.total
            .get(metric_name)
            .and_then(|value| value.amount.as_deref())
    }
}

fn validate_query(
    report: &mut ValidationReport,
    path: &str,
    time_period: &DateInterval,
    granularity: Option<&Granularity>,
    filter: Option<&Expression>,
    metrics: &[String],
    group_by: &[GroupDefinition],
) {
    time_period.validate_at(&field_path(path, "TimePeriod"), report);
    if let Some(granularity) = granularity {
        check_known(report, &field_path(path, "Granularity"), granularity);
    }
    check_filter(
        report,
        &field_path(path, "Filter"),
        filter,
        FilterRestriction::Unrestricted,
    );
    check_metric_names(report, &field_path(path, "Metrics"), metrics);
    check_group_by(report, &field_path(path, "GroupBy"), group_by);
}

/// Parameters for `GetCostAndUsage`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetCostAndUsageRequest {
    pub time_period: DateInterval,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<Granularity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Expression>,
    /// Metric names such as `UnblendedCost`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<GroupDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl GetCostAndUsageRequest {
    pub fn new(time_period: DateInterval) -> Self {
        Self {
            time_period,
            granularity: None,
            filter: None,
            metrics: Vec::new(),
            group_by: Vec::new(),
            next_page_token: None,
        }
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = Some(granularity);
        self
    }

    pub fn with_filter(mut self, filter: Expression) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Replace the metric names
    pub fn with_metrics<I, S>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metrics = metrics.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the grouping axes
    pub fn with_group_by(mut self, group_by: impl IntoIterator<Item = GroupDefinition>) -> Self {
        self.group_by = group_by.into_iter().collect();
        self
    }

    pub fn with_next_page_token(mut self, token: impl Into<String>) -> Self {
        self.next_page_token = Some(token.into());
        self
    }
}

impl Validate for GetCostAndUsageRequest {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        validate_query(
            report,
            path,
            &self.time_period,
            self.granularity.as_ref(),
            self.filter.as_ref(),
            &self.metrics,
            &self.group_by,
        );
    }
}

/// Result of `GetCostAndUsage` and `GetCostAndUsageWithResources`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GetCostAndUsageResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub group_definitions: Vec<GroupDefinition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub results_by_time: Vec<ResultByTime>,
}

/// Parameters for `GetCostAndUsageWithResources`
///
/// Same shape as [`GetCostAndUsageRequest`]; the service additionally needs
/// either a filter or a `RESOURCE_ID` grouping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetCostAndUsageWithResourcesRequest {
    pub time_period: DateInterval,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<Granularity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Expression>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<GroupDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl GetCostAndUsageWithResourcesRequest {
    pub fn new(time_period: DateInterval) -> Self {
        Self {
            time_period,
            granularity: None,
            filter: None,
            metrics: Vec::new(),
            group_by: Vec::new(),
            next_page_token: None,
        }
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = Some(granularity);
        self
    }

    pub fn with_filter(mut self, filter: Expression) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Replace the metric names
    pub fn with_metrics<I, S>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metrics = metrics.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the grouping axes
    pub fn with_group_by(mut self, group_by: impl IntoIterator<Item = GroupDefinition>) -> Self {
        self.group_by = group_by.into_iter().collect();
        self
    }

    pub fn with_next_page_token(mut self, token: impl Into<String>) -> Self {
        self.next_page_token = Some(token.into());
        self
    }

    fn groups_by_resource(&self) -> bool {
        let resource_id = GroupDefinition::dimension(Dimension::ResourceId);
        self.group_by.contains(&resource_id)
    }
}

impl Validate for GetCostAndUsageWithResourcesRequest {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        validate_query(
            report,
            path,
            &self.time_period,
            self.granularity.as_ref(),
            self.filter.as_ref(),
            &self.metrics,
            &self.group_by,
        );
        if self.filter.is_none() && !self.groups_by_resource() {
            report.push(
                field_path(path, "Filter"),
                IssueKind::Unsupported {
                    reason: "resource-level queries need a Filter or a RESOURCE_ID grouping"
                        .to_string(),
                },
            );
        }
    }
}

pub type GetCostAndUsageWithResourcesResponse = GetCostAndUsageResponse;

#[cfg(test)]
mod tests {
    use super::*;
    use costexp_core::types::{DimensionValues, MetricValue};

    fn january() -> DateInterval {
        DateInterval::new("2020-01-01", "2020-02-01")
    }

    #[test]
    fn test_minimal_request_wire_format() {
        let request = GetCostAndUsageRequest::new(january());
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"TimePeriod":{"Start":"2020-01-01","End":"2020-02-01"}}"#
        );
    }

    #[test]
    fn test_full_request_wire_format() {
        let request = GetCostAndUsageRequest::new(january())
            .with_granularity(Granularity::Monthly)
            .with_filter(DimensionValues::new(Dimension::Service, ["Amazon EC2"]).into())
            .with_metrics(["UnblendedCost"])
            .with_group_by([GroupDefinition::tag("team")]);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["Granularity"], "MONTHLY");
        assert_eq!(json["Filter"]["Dimensions"]["Key"], "SERVICE");
        assert_eq!(json["Metrics"][0], "UnblendedCost");
        assert_eq!(json["GroupBy"][0]["Type"], "TAG");
        assert!(json.get("NextPageToken").is_none());
    }

    #[test]
    fn test_builders_replace() {
        let request = GetCostAndUsageRequest::new(january())
            .with_metrics(["BlendedCost"])
            .with_metrics(["UnblendedCost", "UsageQuantity"]);
        assert_eq!(request.metrics, vec!["UnblendedCost", "UsageQuantity"]);
    }

    #[test]
    fn test_validation_catches_missing_metrics() {
        let report = GetCostAndUsageRequest::new(january()).validate();
        assert!(report.has_issue_at("Metrics"));
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_with_resources_needs_filter_or_resource_grouping() {
        let request = GetCostAndUsageWithResourcesRequest::new(january()).with_metrics(["UnblendedCost"]);
        assert!(request.validate().has_issue_at("Filter"));

        let request = request.with_group_by([GroupDefinition::dimension(Dimension::ResourceId)]);
        assert!(request.validate().is_empty());
    }

    #[test]
    fn test_nested_request_reports_prefixed_paths() {
        let request = GetCostAndUsageWithResourcesRequest::new(january());
        let mut report = ValidationReport::new();
        request.validate_at("Query", &mut report);
        assert!(report.has_issue_at("Query.Metrics"));
        assert!(report.has_issue_at("Query.Filter"));
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "GroupDefinitions": [{"Type": "DIMENSION", "Key": "SERVICE"}],
            "ResultsByTime": [{
                "TimePeriod": {"Start": "2020-01-01", "End": "2020-02-01"},
                "Total": {},
                "Groups": [{
                    "Keys": ["Amazon Simple Storage Service"],
                    "Metrics": {"UnblendedCost": {"Amount": "12.3456789", "Unit": "USD"}}
                }],
                "Estimated": false
            }]
        }"#;
        let response: GetCostAndUsageResponse = serde_json::from_str(json).unwrap();
        assert!(response.next_page_token.is_none());
        let bucket = &response.results_by_time[0];
        assert_eq!(bucket.estimated, Some(false));
        assert_eq!(
            bucket.groups[0].metrics["UnblendedCost"],
            MetricValue::new("12.3456789", "USD")
        );
    }

    #[test]
    fn test_total_amount() {
        let mut bucket = ResultByTime::default();
        bucket
            .total
            .insert("BlendedCost".to_string(), MetricValue::new("1.50", "USD"));
        assert_eq!(bucket.total_amount("BlendedCost"), Some("1.50"));
        assert_eq!(bucket.total_amount("UnblendedCost"), None);
    }
}
