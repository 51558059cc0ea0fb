//! Savings Plans coverage, utilization and purchase recommendations

use costexp_core::enums::{
    AccountScope, Granularity, LookbackPeriodInDays, PaymentOption, SavingsPlansDataType,
    SupportedSavingsPlansType, TermInYears,
};
use costexp_core::expression::Expression;
use costexp_core::types::{Attributes, DateInterval, GroupDefinition};
use costexp_core::validation::{
    FilterRestriction, IssueKind, Validate, ValidationReport, check_filter, check_group_by,
    check_known, check_positive, field_path, index_path,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metric names accepted by `GetSavingsPlansCoverage`
pub const SAVINGS_PLANS_COVERAGE_METRICS: &[&str] = &["SpendCoveredBySavingsPlans"];

/// Dimensions a Savings Plans utilization filter may use
pub const SAVINGS_PLANS_UTILIZATION_DIMENSIONS: &[&str] = &[
    "LINKED_ACCOUNT",
    "SAVINGS_PLAN_ARN",
    "SAVINGS_PLANS_TYPE",
    "REGION",
    "PAYMENT_OPTION",
    "INSTANCE_TYPE_FAMILY",
];

const UTILIZATION_FILTER: FilterRestriction = FilterRestriction::AndOfLeaves {
    allowed_dimensions: Some(SAVINGS_PLANS_UTILIZATION_DIMENSIONS),
};

fn check_utilization_granularity(
    report: &mut ValidationReport,
    path: &str,
    granularity: &Granularity,
) {
    if *granularity == Granularity::Hourly {
        report.push(
            field_path(path, "Granularity"),
            IssueKind::Unsupported {
                reason: "utilization is reported DAILY or MONTHLY".to_string(),
            },
        );
    } else {
        check_known(report, &field_path(path, "Granularity"), granularity);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SavingsPlansCoverageData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spend_covered_by_savings_plans: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_demand_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_percentage: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SavingsPlansCoverage {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<SavingsPlansCoverageData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<DateInterval>,
}

/// Parameters for `GetSavingsPlansCoverage`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetSavingsPlansCoverageRequest {
    pub time_period: DateInterval,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<GroupDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<Granularity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Expression>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
}

impl GetSavingsPlansCoverageRequest {
    pub fn new(time_period: DateInterval) -> Self {
        Self {
            time_period,
            group_by: Vec::new(),
            granularity: None,
            filter: None,
            metrics: Vec::new(),
            next_token: None,
            max_results: None,
        }
    }

    /// Replace the grouping axes
    pub fn with_group_by(mut self, group_by: impl IntoIterator<Item = GroupDefinition>) -> Self {
        self.group_by = group_by.into_iter().collect();
        self
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

    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    pub fn with_max_results(mut self, max_results: i32) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

impl Validate for GetSavingsPlansCoverageRequest {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        self.time_period.validate_at(&field_path(path, "TimePeriod"), report);
        check_group_by(report, &field_path(path, "GroupBy"), &self.group_by);
        if let Some(granularity) = &self.granularity {
            check_known(report, &field_path(path, "Granularity"), granularity);
        }
        check_filter(
            report,
            &field_path(path, "Filter"),
            self.filter.as_ref(),
            FilterRestriction::Unrestricted,
        );
        for (i, metric) in self.metrics.iter().enumerate() {
            if !SAVINGS_PLANS_COVERAGE_METRICS.contains(&metric.as_str()) {
                report.push(
                    index_path(&field_path(path, "Metrics"), i),
                    IssueKind::UnknownValue {
                        value: metric.clone(),
                    },
                );
            }
        }
        if let Some(max_results) = self.max_results {
            check_positive(report, &field_path(path, "MaxResults"), i64::from(max_results));
        }
    }
}

/// Result of `GetSavingsPlansCoverage`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GetSavingsPlansCoverageResponse {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub savings_plans_coverages: Vec<SavingsPlansCoverage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// The Savings Plan a recommendation is for
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SavingsPlansDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offering_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SavingsPlansPurchaseRecommendationDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_plans_details: Option<SavingsPlansDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upfront_cost: Option<String>,
    #[serde(rename = "EstimatedROI", skip_serializing_if = "Option::is_none")]
    pub estimated_roi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(rename = "EstimatedSPCost", skip_serializing_if = "Option::is_none")]
    pub estimated_sp_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_on_demand_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_on_demand_cost_with_current_commitment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_savings_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_savings_percentage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_commitment_to_purchase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_average_utilization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_monthly_savings_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_minimum_hourly_on_demand_spend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_maximum_hourly_on_demand_spend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_average_hourly_on_demand_spend: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SavingsPlansPurchaseRecommendationSummary {
    #[serde(rename = "EstimatedROI", skip_serializing_if = "Option::is_none")]
    pub estimated_roi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_total_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_on_demand_spend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_savings_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_recommendation_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_commitment_to_purchase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_commitment_to_purchase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_savings_percentage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_monthly_savings_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_on_demand_cost_with_current_commitment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SavingsPlansPurchaseRecommendation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_scope: Option<AccountScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_plans_type: Option<SupportedSavingsPlansType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_in_years: Option<TermInYears>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_option: Option<PaymentOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookback_period_in_days: Option<LookbackPeriodInDays>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub savings_plans_purchase_recommendation_details: Vec<SavingsPlansPurchaseRecommendationDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_plans_purchase_recommendation_summary:
        Option<SavingsPlansPurchaseRecommendationSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SavingsPlansPurchaseRecommendationMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_timestamp: Option<String>,
}

/// Parameters for `GetSavingsPlansPurchaseRecommendation`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetSavingsPlansPurchaseRecommendationRequest {
    pub savings_plans_type: SupportedSavingsPlansType,
    pub term_in_years: TermInYears,
    pub payment_option: PaymentOption,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_scope: Option<AccountScope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
    pub lookback_period_in_days: LookbackPeriodInDays,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Expression>,
}

impl GetSavingsPlansPurchaseRecommendationRequest {
    pub fn new(
        savings_plans_type: SupportedSavingsPlansType,
        term_in_years: TermInYears,
        payment_option: PaymentOption,
        lookback_period_in_days: LookbackPeriodInDays,
    ) -> Self {
        Self {
            savings_plans_type,
            term_in_years,
            payment_option,
            account_scope: None,
            next_page_token: None,
            page_size: None,
            lookback_period_in_days,
            filter: None,
        }
    }

    pub fn with_account_scope(mut self, account_scope: AccountScope) -> Self {
        self.account_scope = Some(account_scope);
        self
    }

    pub fn with_next_page_token(mut self, token: impl Into<String>) -> Self {
        self.next_page_token = Some(token.into());
        self
    }

    pub fn with_page_size(mut self, page_size: i32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_filter(mut self, filter: Expression) -> Self {
        self.filter = Some(filter);
        self
    }
}

impl Validate for GetSavingsPlansPurchaseRecommendationRequest {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        check_known(report, &field_path(path, "SavingsPlansType"), &self.savings_plans_type);
        check_known(report, &field_path(path, "TermInYears"), &self.term_in_years);
        check_known(report, &field_path(path, "PaymentOption"), &self.payment_option);
        if let Some(scope) = &self.account_scope {
            check_known(report, &field_path(path, "AccountScope"), scope);
        }
        if let Some(page_size) = self.page_size {
            check_positive(report, &field_path(path, "PageSize"), i64::from(page_size));
        }
        check_known(report, &field_path(path, "LookbackPeriodInDays"), &self.lookback_period_in_days);
        check_filter(
            report,
            &field_path(path, "Filter"),
            self.filter.as_ref(),
            FilterRestriction::Unrestricted,
        );
    }
}

/// Result of `GetSavingsPlansPurchaseRecommendation`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GetSavingsPlansPurchaseRecommendationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SavingsPlansPurchaseRecommendationMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_plans_purchase_recommendation: Option<SavingsPlansPurchaseRecommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Commitment used versus purchased
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SavingsPlansUtilization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_commitment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_commitment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unused_commitment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilization_percentage: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SavingsPlansSavings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_savings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_demand_cost_equivalent: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SavingsPlansAmortizedCommitment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amortized_recurring_commitment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amortized_upfront_commitment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amortized_commitment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SavingsPlansUtilizationByTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<DateInterval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilization: Option<SavingsPlansUtilization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<SavingsPlansSavings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amortized_commitment: Option<SavingsPlansAmortizedCommitment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SavingsPlansUtilizationAggregates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilization: Option<SavingsPlansUtilization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<SavingsPlansSavings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amortized_commitment: Option<SavingsPlansAmortizedCommitment>,
}

/// Utilization of a single Savings Plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SavingsPlansUtilizationDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_plan_arn: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilization: Option<SavingsPlansUtilization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<SavingsPlansSavings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amortized_commitment: Option<SavingsPlansAmortizedCommitment>,
}

/// Parameters for `GetSavingsPlansUtilization`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetSavingsPlansUtilizationRequest {
    pub time_period: DateInterval,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<Granularity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Expression>,
}

impl GetSavingsPlansUtilizationRequest {
    pub fn new(time_period: DateInterval) -> Self {
        Self {
            time_period,
            granularity: None,
            filter: None,
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
}

impl Validate for GetSavingsPlansUtilizationRequest {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        self.time_period.validate_at(&field_path(path, "TimePeriod"), report);
        if let Some(granularity) = &self.granularity {
            check_utilization_granularity(report, path, granularity);
        }
        check_filter(report, &field_path(path, "Filter"), self.filter.as_ref(), UTILIZATION_FILTER);
    }
}

/// Result of `GetSavingsPlansUtilization`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GetSavingsPlansUtilizationResponse {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub savings_plans_utilizations_by_time: Vec<SavingsPlansUtilizationByTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<SavingsPlansUtilizationAggregates>,
}

/// Parameters for `GetSavingsPlansUtilizationDetails`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetSavingsPlansUtilizationDetailsRequest {
    pub time_period: DateInterval,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Expression>,
    /// Which data sets to return; empty means all of them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_type: Vec<SavingsPlansDataType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
}

impl GetSavingsPlansUtilizationDetailsRequest {
    pub fn new(time_period: DateInterval) -> Self {
        Self {
            time_period,
            filter: None,
            data_type: Vec::new(),
            next_token: None,
            max_results: None,
        }
    }

    pub fn with_filter(mut self, filter: Expression) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Replace the requested data sets
    pub fn with_data_type(mut self, data_type: impl IntoIterator<Item = SavingsPlansDataType>) -> Self {
        self.data_type = data_type.into_iter().collect();
        self
    }

    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    pub fn with_max_results(mut self, max_results: i32) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

impl Validate for GetSavingsPlansUtilizationDetailsRequest {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        self.time_period.validate_at(&field_path(path, "TimePeriod"), report);
        check_filter(report, &field_path(path, "Filter"), self.filter.as_ref(), UTILIZATION_FILTER);
        for (i, data_type) in self.data_type.iter().enumerate() {
            check_known(report, &index_path(&field_path(path, "DataType"), i), data_type);
        }
        if let Some(max_results) = self.max_results {
            check_positive(report, &field_path(path, "MaxResults"), i64::from(max_results));
        }
    }
}

/// Result of `GetSavingsPlansUtilizationDetails`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GetSavingsPlansUtilizationDetailsResponse {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub savings_plans_utilization_details: Vec<SavingsPlansUtilizationDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<SavingsPlansUtilizationAggregates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<DateInterval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use costexp_core::enums::Dimension;
    use costexp_core::types::{DimensionValues, TagValues};

    fn period() -> DateInterval {
        DateInterval::new("2020-01-01", "2020-02-01")
    }

    fn dimension(key: Dimension, value: &str) -> Expression {
        DimensionValues::new(key, [value]).into()
    }

    #[test]
    fn test_utilization_accepts_allowed_dimensions() {
        let request = GetSavingsPlansUtilizationRequest::new(period()).with_filter(Expression::and([
            dimension(Dimension::LinkedAccount, "111122223333"),
            dimension(Dimension::SavingsPlansType, "COMPUTE_SP"),
        ]));
        assert!(request.validate().is_empty());
    }

    #[test]
    fn test_utilization_rejects_other_dimensions() {
        let request = GetSavingsPlansUtilizationRequest::new(period()).with_filter(Expression::and([
            dimension(Dimension::LinkedAccount, "111122223333"),
            dimension(Dimension::Service, "Amazon EC2"),
        ]));
        let report = request.validate();
        assert_eq!(report.len(), 1);
        assert!(report.has_issue_at("Filter.And[1].Dimensions.Key"));
    }

    #[test]
    fn test_utilization_details_rejects_tags_and_not() {
        let request = GetSavingsPlansUtilizationDetailsRequest::new(period())
            .with_filter(TagValues::new("team", ["web"]).into());
        assert!(request.validate().has_issue_at("Filter.Tags"));

        let request = GetSavingsPlansUtilizationDetailsRequest::new(period())
            .with_filter(!dimension(Dimension::Region, "us-east-1"));
        assert!(request.validate().has_issue_at("Filter.Not"));
    }

    #[test]
    fn test_utilization_granularity() {
        let request = GetSavingsPlansUtilizationRequest::new(period()).with_granularity(Granularity::Hourly);
        assert!(request.validate().has_issue_at("Granularity"));

        let request = GetSavingsPlansUtilizationRequest::new(period()).with_granularity(Granularity::Daily);
        assert!(request.validate().is_empty());
    }

    #[test]
    fn test_details_paths_under_parent() {
        let request = GetSavingsPlansUtilizationDetailsRequest::new(period())
            .with_filter(TagValues::new("team", ["web"]).into())
            .with_max_results(0);
        let mut report = ValidationReport::new();
        request.validate_at("Details", &mut report);
        assert!(report.has_issue_at("Details.Filter.Tags"));
        assert!(report.has_issue_at("Details.MaxResults"));
        assert!(!report.has_issue_at("MaxResults"));
    }

    #[test]
    fn test_coverage_request() {
        let request = GetSavingsPlansCoverageRequest::new(period())
            .with_metrics(["SpendCoveredBySavingsPlans"])
            .with_max_results(0)
            .with_filter(Expression::or([
                dimension(Dimension::Region, "us-east-1"),
                dimension(Dimension::Service, "AmazonEC2"),
            ]));
        let report = request.validate();
        assert_eq!(report.len(), 1);
        assert!(report.has_issue_at("MaxResults"));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["MaxResults"], 0);
        assert!(json.get("NextToken").is_none());
    }

    #[test]
    fn test_purchase_recommendation_request_wire_format() {
        let request = GetSavingsPlansPurchaseRecommendationRequest::new(
            SupportedSavingsPlansType::ComputeSp,
            TermInYears::OneYear,
            PaymentOption::NoUpfront,
            LookbackPeriodInDays::ThirtyDays,
        );
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"SavingsPlansType":"COMPUTE_SP","TermInYears":"ONE_YEAR","PaymentOption":"NO_UPFRONT","LookbackPeriodInDays":"THIRTY_DAYS"}"#
        );
        assert!(request.validate().is_empty());
    }

    #[test]
    fn test_purchase_recommendation_acronym_keys() {
        let json = r#"{
            "SavingsPlansPurchaseRecommendation": {
                "SavingsPlansType": "EC2_INSTANCE_SP",
                "SavingsPlansPurchaseRecommendationDetails": [{
                    "SavingsPlansDetails": {"Region": "us-east-1", "InstanceFamily": "m5"},
                    "EstimatedROI": "0.35",
                    "EstimatedSPCost": "720.00"
                }],
                "SavingsPlansPurchaseRecommendationSummary": {"EstimatedROI": "0.35"}
            }
        }"#;
        let response: GetSavingsPlansPurchaseRecommendationResponse =
            serde_json::from_str(json).unwrap();
        let recommendation = response.savings_plans_purchase_recommendation.unwrap();
        assert_eq!(
            recommendation.savings_plans_type,
            Some(SupportedSavingsPlansType::Ec2InstanceSp)
        );
        let detail = &recommendation.savings_plans_purchase_recommendation_details[0];
        assert_eq!(detail.estimated_sp_cost.as_deref(), Some("720.00"));

        let back = serde_json::to_value(detail).unwrap();
        assert_eq!(back["EstimatedROI"], "0.35");
        assert!(back.get("EstimatedRoi").is_none());
    }

    #[test]
    fn test_utilization_details_response() {
        let json = r#"{
            "SavingsPlansUtilizationDetails": [{
                "SavingsPlanArn": "arn:aws:savingsplans::111122223333:savingsplan/abc",
                "Attributes": {"Region": "us-east-1"},
                "Utilization": {"UtilizationPercentage": "100"}
            }],
            "TimePeriod": {"Start": "2020-01-01", "End": "2020-02-01"},
            "Total": {"Savings": {"NetSavings": "12.5"}}
        }"#;
        let response: GetSavingsPlansUtilizationDetailsResponse =
            serde_json::from_str(json).unwrap();
        assert_eq!(response.time_period, Some(period()));
        assert_eq!(
            response.total.unwrap().savings.unwrap().net_savings.as_deref(),
            Some("12.5")
        );
        assert_eq!(
            response.savings_plans_utilization_details[0].attributes["Region"],
            "us-east-1"
        );
    }

    #[test]
    fn test_data_type_builder_replaces() {
        let request = GetSavingsPlansUtilizationDetailsRequest::new(period())
            .with_data_type([SavingsPlansDataType::Attributes])
            .with_data_type([SavingsPlansDataType::Savings, SavingsPlansDataType::Utilization]);
        assert_eq!(
            request.data_type,
            vec![SavingsPlansDataType::Savings, SavingsPlansDataType::Utilization]
        );
        assert_eq!(
            serde_json::to_value(&request).unwrap()["DataType"][0],
            "SAVINGS"
        );
    }
}
