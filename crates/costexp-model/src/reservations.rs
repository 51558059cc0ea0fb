//! Reserved Instance coverage, utilization and purchase recommendations
//!
//! Coverage and utilization filters are restricted: the service accepts a
//! single dimension predicate or one `And` of dimension predicates, never
//! `Or` or `Not`.

use costexp_core::enums::{
    AccountScope, Granularity, LookbackPeriodInDays, OfferingClass, PaymentOption, TermInYears,
};
use costexp_core::expression::Expression;
use costexp_core::types::{Attributes, DateInterval, GroupDefinition};
use costexp_core::validation::{
    FilterRestriction, IssueKind, Validate, ValidationReport, check_filter, check_group_by,
    check_known, check_length, check_positive, field_path, index_path,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metric names accepted by `GetReservationCoverage`
pub const RESERVATION_COVERAGE_METRICS: &[&str] = &["Hour", "Unit", "Cost"];

const RESERVATION_FILTER: FilterRestriction = FilterRestriction::AndOfLeaves {
    allowed_dimensions: None,
};

/// Reserved versus on-demand hours
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CoverageHours {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_demand_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_running_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_hours_percentage: Option<String>,
}

/// Reserved versus on-demand normalized units
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CoverageNormalizedUnits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_demand_normalized_units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_normalized_units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_running_normalized_units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_normalized_units_percentage: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CoverageCost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_demand_cost: Option<String>,
}

/// How much of the usage reservations covered
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Coverage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_hours: Option<CoverageHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_normalized_units: Option<CoverageNormalizedUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_cost: Option<CoverageCost>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReservationCoverageGroup {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<Coverage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CoverageByTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<DateInterval>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<ReservationCoverageGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Coverage>,
}

/// Parameters for `GetReservationCoverage`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetReservationCoverageRequest {
    pub time_period: DateInterval,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<GroupDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<Granularity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Expression>,
    /// `Hour`, `Unit` or `Cost`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl GetReservationCoverageRequest {
    pub fn new(time_period: DateInterval) -> Self {
        Self {
            time_period,
            group_by: Vec::new(),
            granularity: None,
            filter: None,
            metrics: Vec::new(),
            next_page_token: None,
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

    pub fn with_next_page_token(mut self, token: impl Into<String>) -> Self {
        self.next_page_token = Some(token.into());
        self
    }
}

impl Validate for GetReservationCoverageRequest {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        self.time_period.validate_at(&field_path(path, "TimePeriod"), report);
        check_group_by(report, &field_path(path, "GroupBy"), &self.group_by);
        if let Some(granularity) = &self.granularity {
            check_known(report, &field_path(path, "Granularity"), granularity);
        }
        check_filter(report, &field_path(path, "Filter"), self.filter.as_ref(), RESERVATION_FILTER);
        for (i, metric) in self.metrics.iter().enumerate() {
            if !RESERVATION_COVERAGE_METRICS.contains(&metric.as_str()) {
                report.push(
                    index_path(&field_path(path, "Metrics"), i),
                    IssueKind::UnknownValue {
                        value: metric.clone(),
                    },
                );
            }
        }
    }
}

/// Result of `GetReservationCoverage`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GetReservationCoverageResponse {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub coverages_by_time: Vec<CoverageByTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Coverage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Utilization totals for a set of reservations
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReservationAggregates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilization_percentage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilization_percentage_in_units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchased_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchased_units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_actual_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_actual_units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unused_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unused_units: Option<String>,
    #[serde(
        rename = "OnDemandCostOfRIHoursUsed",
        skip_serializing_if = "Option::is_none"
    )]
    pub on_demand_cost_of_ri_hours_used: Option<String>,
    #[serde(rename = "NetRISavings", skip_serializing_if = "Option::is_none")]
    pub net_ri_savings: Option<String>,
    #[serde(
        rename = "TotalPotentialRISavings",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_potential_ri_savings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amortized_upfront_fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amortized_recurring_fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amortized_fee: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReservationUtilizationGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilization: Option<ReservationAggregates>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UtilizationByTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<DateInterval>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<ReservationUtilizationGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<ReservationAggregates>,
}

/// Parameters for `GetReservationUtilization`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetReservationUtilizationRequest {
    pub time_period: DateInterval,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<GroupDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<Granularity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl GetReservationUtilizationRequest {
    pub fn new(time_period: DateInterval) -> Self {
        Self {
            time_period,
            group_by: Vec::new(),
            granularity: None,
            filter: None,
            next_page_token: None,
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

    pub fn with_next_page_token(mut self, token: impl Into<String>) -> Self {
        self.next_page_token = Some(token.into());
        self
    }
}

impl Validate for GetReservationUtilizationRequest {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        self.time_period.validate_at(&field_path(path, "TimePeriod"), report);
        check_group_by(report, &field_path(path, "GroupBy"), &self.group_by);
        match &self.granularity {
            Some(granularity) if *granularity == Granularity::Hourly => report.push(
                field_path(path, "Granularity"),
                IssueKind::Unsupported {
                    reason: "utilization is reported DAILY or MONTHLY".to_string(),
                },
            ),
            Some(granularity) => check_known(report, &field_path(path, "Granularity"), granularity),
            None => {}
        }
        if self.granularity.is_some() && !self.group_by.is_empty() {
            report.push(
                field_path(path, "Granularity"),
                IssueKind::Unsupported {
                    reason: "Granularity cannot be combined with GroupBy".to_string(),
                },
            );
        }
        check_filter(report, &field_path(path, "Filter"), self.filter.as_ref(), RESERVATION_FILTER);
    }
}

/// Result of `GetReservationUtilization`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GetReservationUtilizationResponse {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub utilizations_by_time: Vec<UtilizationByTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<ReservationAggregates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Ec2InstanceDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenancy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_generation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_flex_eligible: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RdsInstanceDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_edition: Option<String>,
    /// Single-AZ or Multi-AZ
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_option: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_generation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_flex_eligible: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RedshiftInstanceDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_generation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_flex_eligible: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ElastiCacheInstanceDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_generation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_flex_eligible: Option<bool>,
}

/// Amazon Elasticsearch Service instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct EsInstanceDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_generation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_flex_eligible: Option<bool>,
}

/// Details of the instance a recommendation is for; one field is set,
/// matching the service the recommendation was requested for
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct InstanceDetails {
    #[serde(rename = "EC2InstanceDetails", skip_serializing_if = "Option::is_none")]
    pub ec2_instance_details: Option<Ec2InstanceDetails>,
    #[serde(rename = "RDSInstanceDetails", skip_serializing_if = "Option::is_none")]
    pub rds_instance_details: Option<RdsInstanceDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redshift_instance_details: Option<RedshiftInstanceDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elasti_cache_instance_details: Option<ElastiCacheInstanceDetails>,
    #[serde(rename = "ESInstanceDetails", skip_serializing_if = "Option::is_none")]
    pub es_instance_details: Option<EsInstanceDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Ec2Specification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offering_class: Option<OfferingClass>,
}

/// Service-specific recommendation parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ServiceSpecification {
    #[serde(rename = "EC2Specification", skip_serializing_if = "Option::is_none")]
    pub ec2_specification: Option<Ec2Specification>,
}

impl ServiceSpecification {
    /// EC2 recommendations for the given offering class
    pub fn ec2(offering_class: OfferingClass) -> Self {
        Self {
            ec2_specification: Some(Ec2Specification {
                offering_class: Some(offering_class),
            }),
        }
    }
}

impl Validate for ServiceSpecification {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        if let Some(offering_class) = self
            .ec2_specification
            .as_ref()
            .and_then(|spec| spec.offering_class.as_ref())
        {
            let spec_path = field_path(path, "EC2Specification");
            check_known(report, &field_path(&spec_path, "OfferingClass"), offering_class);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReservationPurchaseRecommendationDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_details: Option<InstanceDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_number_of_instances_to_purchase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_normalized_units_to_purchase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_number_of_instances_used_per_hour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_normalized_units_used_per_hour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_number_of_instances_used_per_hour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_normalized_units_used_per_hour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_number_of_instances_used_per_hour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_normalized_units_used_per_hour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_utilization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_break_even_in_months: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_monthly_savings_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_monthly_savings_percentage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_monthly_on_demand_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_reservation_cost_for_lookback_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upfront_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_standard_monthly_cost: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReservationPurchaseRecommendationSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_estimated_monthly_savings_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_estimated_monthly_savings_percentage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReservationPurchaseRecommendation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_scope: Option<AccountScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookback_period_in_days: Option<LookbackPeriodInDays>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_in_years: Option<TermInYears>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_option: Option<PaymentOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_specification: Option<ServiceSpecification>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recommendation_details: Vec<ReservationPurchaseRecommendationDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation_summary: Option<ReservationPurchaseRecommendationSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReservationPurchaseRecommendationMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_timestamp: Option<String>,
}

/// Parameters for `GetReservationPurchaseRecommendation`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetReservationPurchaseRecommendationRequest {
    /// Member account to scope the recommendation to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Service name, e.g. `Amazon Elastic Compute Cloud - Compute`
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_scope: Option<AccountScope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookback_period_in_days: Option<LookbackPeriodInDays>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_in_years: Option<TermInYears>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_option: Option<PaymentOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_specification: Option<ServiceSpecification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl GetReservationPurchaseRecommendationRequest {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            account_id: None,
            service: service.into(),
            account_scope: None,
            lookback_period_in_days: None,
            term_in_years: None,
            payment_option: None,
            service_specification: None,
            page_size: None,
            next_page_token: None,
        }
    }

    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn with_account_scope(mut self, account_scope: AccountScope) -> Self {
        self.account_scope = Some(account_scope);
        self
    }

    pub fn with_lookback_period_in_days(mut self, lookback: LookbackPeriodInDays) -> Self {
        self.lookback_period_in_days = Some(lookback);
        self
    }

    pub fn with_term_in_years(mut self, term: TermInYears) -> Self {
        self.term_in_years = Some(term);
        self
    }

    pub fn with_payment_option(mut self, payment_option: PaymentOption) -> Self {
        self.payment_option = Some(payment_option);
        self
    }

    pub fn with_service_specification(mut self, specification: ServiceSpecification) -> Self {
        self.service_specification = Some(specification);
        self
    }

    pub fn with_page_size(mut self, page_size: i32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_next_page_token(mut self, token: impl Into<String>) -> Self {
        self.next_page_token = Some(token.into());
        self
    }
}

impl Validate for GetReservationPurchaseRecommendationRequest {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        check_length(report, &field_path(path, "Service"), &self.service, 1, usize::MAX);
        if let Some(scope) = &self.account_scope {
            check_known(report, &field_path(path, "AccountScope"), scope);
        }
        if let Some(lookback) = &self.lookback_period_in_days {
            check_known(report, &field_path(path, "LookbackPeriodInDays"), lookback);
        }
        if let Some(term) = &self.term_in_years {
            check_known(report, &field_path(path, "TermInYears"), term);
        }
        if let Some(payment_option) = &self.payment_option {
            check_known(report, &field_path(path, "PaymentOption"), payment_option);
        }
        self.service_specification
            .validate_at(&field_path(path, "ServiceSpecification"), report);
        if let Some(page_size) = self.page_size {
            check_positive(report, &field_path(path, "PageSize"), i64::from(page_size));
        }
    }
}

/// Result of `GetReservationPurchaseRecommendation`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GetReservationPurchaseRecommendationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ReservationPurchaseRecommendationMetadata>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<ReservationPurchaseRecommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use costexp_core::enums::Dimension;
    use costexp_core::types::{DimensionValues, TagValues};

    fn period() -> DateInterval {
        DateInterval::new("2020-01-01", "2020-02-01")
    }

    fn region(value: &str) -> Expression {
        DimensionValues::new(Dimension::Region, [value]).into()
    }

    #[test]
    fn test_coverage_filter_accepts_and_of_leaves() {
        let request = GetReservationCoverageRequest::new(period())
            .with_filter(Expression::and([region("us-east-1"), region("eu-west-1")]))
            .with_metrics(["Hour", "Cost"]);
        assert!(request.validate().is_empty());
    }

    #[test]
    fn test_coverage_filter_rejects_not_and_or() {
        let request = GetReservationCoverageRequest::new(period()).with_filter(!region("us-east-1"));
        assert!(request.validate().has_issue_at("Filter.Not"));

        let request = GetReservationCoverageRequest::new(period())
            .with_filter(Expression::or([region("us-east-1"), region("eu-west-1")]));
        assert!(request.validate().has_issue_at("Filter.Or"));
    }

    #[test]
    fn test_coverage_metrics_are_checked() {
        let request = GetReservationCoverageRequest::new(period()).with_metrics(["Hour", "Dollars"]);
        let report = request.validate();
        assert_eq!(report.len(), 1);
        assert!(report.has_issue_at("Metrics[1]"));
    }

    #[test]
    fn test_utilization_rejects_nested_filter() {
        let request = GetReservationUtilizationRequest::new(period()).with_filter(Expression::and([
            region("us-east-1"),
            Expression::and([region("a"), region("b")]),
        ]));
        assert!(request.validate().has_issue_at("Filter.And[1].And"));
    }

    #[test]
    fn test_utilization_accepts_tag_leaf() {
        let request = GetReservationUtilizationRequest::new(period())
            .with_filter(TagValues::new("team", ["web"]).into());
        assert!(request.validate().is_empty());
    }

    #[test]
    fn test_utilization_granularity_rules() {
        let request =
            GetReservationUtilizationRequest::new(period()).with_granularity(Granularity::Hourly);
        assert!(request.validate().has_issue_at("Granularity"));

        let request = GetReservationUtilizationRequest::new(period())
            .with_granularity(Granularity::Monthly)
            .with_group_by([GroupDefinition::dimension(Dimension::SubscriptionId)]);
        assert!(request.validate().has_issue_at("Granularity"));
    }

    #[test]
    fn test_hourly_spelled_verbatim_is_unsupported_under_parent_path() {
        let request = GetReservationUtilizationRequest::new(period())
            .with_granularity(Granularity::Unknown("HOURLY".to_string()));
        let mut report = ValidationReport::new();
        request.validate_at("Utilization", &mut report);
        assert_eq!(report.len(), 1);
        assert_eq!(report.issues()[0].path, "Utilization.Granularity");
        assert!(matches!(report.issues()[0].kind, IssueKind::Unsupported { .. }));
    }

    #[test]
    fn test_reservation_aggregates_acronym_keys() {
        let json = r#"{
            "UtilizationPercentage": "85.5",
            "OnDemandCostOfRIHoursUsed": "100.0",
            "NetRISavings": "40.0",
            "TotalPotentialRISavings": "50.0"
        }"#;
        let aggregates: ReservationAggregates = serde_json::from_str(json).unwrap();
        assert_eq!(aggregates.net_ri_savings.as_deref(), Some("40.0"));
        assert_eq!(aggregates.on_demand_cost_of_ri_hours_used.as_deref(), Some("100.0"));

        let back = serde_json::to_value(&aggregates).unwrap();
        assert_eq!(back["TotalPotentialRISavings"], "50.0");
        assert!(back.get("TotalPotentialRiSavings").is_none());
    }

    #[test]
    fn test_purchase_recommendation_request() {
        let request = GetReservationPurchaseRecommendationRequest::new(
            "Amazon Elastic Compute Cloud - Compute",
        )
        .with_service_specification(ServiceSpecification::ec2(OfferingClass::Convertible))
        .with_term_in_years(TermInYears::ThreeYears)
        .with_page_size(10);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["ServiceSpecification"]["EC2Specification"]["OfferingClass"],
            "CONVERTIBLE"
        );
        assert_eq!(json["TermInYears"], "THREE_YEARS");
        assert!(request.validate().is_empty());

        let report = request.with_page_size(0).validate();
        assert!(report.has_issue_at("PageSize"));
    }

    #[test]
    fn test_purchase_recommendation_response() {
        let json = r#"{
            "Metadata": {"RecommendationId": "abc", "GenerationTimestamp": "2020-01-02T00:00:00Z"},
            "Recommendations": [{
                "AccountScope": "PAYER",
                "LookbackPeriodInDays": "THIRTY_DAYS",
                "RecommendationDetails": [{
                    "AccountId": "111122223333",
                    "InstanceDetails": {
                        "EC2InstanceDetails": {"Family": "m5", "InstanceType": "m5.large", "SizeFlexEligible": true},
                        "ESInstanceDetails": null
                    },
                    "RecommendedNumberOfInstancesToPurchase": "3"
                }],
                "RecommendationSummary": {"CurrencyCode": "USD"}
            }]
        }"#;
        let response: GetReservationPurchaseRecommendationResponse =
            serde_json::from_str(json).unwrap();
        let recommendation = &response.recommendations[0];
        assert_eq!(recommendation.account_scope, Some(AccountScope::Payer));
        let details = recommendation.recommendation_details[0]
            .instance_details
            .as_ref()
            .unwrap();
        let ec2 = details.ec2_instance_details.as_ref().unwrap();
        assert_eq!(ec2.instance_type.as_deref(), Some("m5.large"));
        assert_eq!(ec2.size_flex_eligible, Some(true));
        assert!(details.es_instance_details.is_none());
    }
}
