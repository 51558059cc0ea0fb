//! EC2 rightsizing recommendations

use costexp_core::enums::{LookbackPeriodInDays, RecommendationTarget, RightsizingType};
use costexp_core::expression::Expression;
use costexp_core::types::TagValues;
use costexp_core::validation::{
    FilterRestriction, IssueKind, Validate, ValidationReport, check_filter, check_known,
    check_positive, field_path,
};
use serde::{Deserialize, Serialize};

/// The only service rightsizing recommendations are available for
pub const RIGHTSIZING_SERVICE: &str = "AmazonEC2";

/// How recommendations are generated
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RightsizingRecommendationConfiguration {
    /// Recommend within the same instance family or across families
    pub recommendation_target: RecommendationTarget,
    /// Whether RI and Savings Plans benefits are taken into account
    pub benefits_considered: bool,
}

impl RightsizingRecommendationConfiguration {
    pub fn new(recommendation_target: RecommendationTarget, benefits_considered: bool) -> Self {
        Self {
            recommendation_target,
            benefits_considered,
        }
    }
}

impl Validate for RightsizingRecommendationConfiguration {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        check_known(
            report,
            &field_path(path, "RecommendationTarget"),
            &self.recommendation_target,
        );
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Ec2ResourceDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_on_demand_rate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_performance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcpu: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ResourceDetails {
    #[serde(rename = "EC2ResourceDetails", skip_serializing_if = "Option::is_none")]
    pub ec2_resource_details: Option<Ec2ResourceDetails>,
}

/// Peak utilization over the lookback period, in percent
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Ec2ResourceUtilization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cpu_utilization_percentage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_memory_utilization_percentage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_storage_utilization_percentage: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ResourceUtilization {
    #[serde(rename = "EC2ResourceUtilization", skip_serializing_if = "Option::is_none")]
    pub ec2_resource_utilization: Option<Ec2ResourceUtilization>,
}

/// The instance a recommendation is about
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CurrentInstance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TagValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_details: Option<ResourceDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_utilization: Option<ResourceUtilization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_covered_hours_in_lookback_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_plans_covered_hours_in_lookback_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_demand_hours_in_lookback_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_running_hours_in_lookback_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
}

/// A candidate instance type to move to
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TargetInstance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_monthly_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_monthly_savings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    /// Whether this is the target the service recommends by default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_target_instance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_details: Option<ResourceDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_resource_utilization: Option<ResourceUtilization>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ModifyRecommendationDetail {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub target_instances: Vec<TargetInstance>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TerminateRecommendationDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_monthly_savings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RightsizingRecommendation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_instance: Option<CurrentInstance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rightsizing_type: Option<RightsizingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modify_recommendation_detail: Option<ModifyRecommendationDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminate_recommendation_detail: Option<TerminateRecommendationDetail>,
}

impl RightsizingRecommendation {
    /// Estimated monthly savings of following the recommendation
    ///
    /// For `MODIFY` this is the default target instance's estimate.
    pub fn estimated_monthly_savings(&self) -> Option<&str> {
        match self.rightsizing_type.as_ref()?.normalized() {
            RightsizingType::Terminate => self
                .terminate_recommendation_detail
                .as_ref()?
                .estimated_monthly_savings
                .as_deref(),
            RightsizingType::Modify => self
                .modify_recommendation_detail
                .as_ref()?
                .target_instances
                .iter()
                .find(|target| target.default_target_instance == Some(true))?
                .estimated_monthly_savings
                .as_deref(),
            RightsizingType::Unknown(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RightsizingRecommendationMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookback_period_in_days: Option<LookbackPeriodInDays>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RightsizingRecommendationSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_recommendation_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_total_monthly_savings_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_percentage: Option<String>,
}

/// Parameters for `GetRightsizingRecommendation`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRightsizingRecommendationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<RightsizingRecommendationConfiguration>,
    /// Always [`RIGHTSIZING_SERVICE`] at present
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl GetRightsizingRecommendationRequest {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            filter: None,
            configuration: None,
            service: service.into(),
            page_size: None,
            next_page_token: None,
        }
    }

    /// Request for EC2, the only supported service
    pub fn ec2() -> Self {
        Self::new(RIGHTSIZING_SERVICE)
    }

    pub fn with_filter(mut self, filter: Expression) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_configuration(mut self, configuration: RightsizingRecommendationConfiguration) -> Self {
        self.configuration = Some(configuration);
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

impl Validate for GetRightsizingRecommendationRequest {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        check_filter(
            report,
            &field_path(path, "Filter"),
            self.filter.as_ref(),
            FilterRestriction::Unrestricted,
        );
        self.configuration.validate_at(&field_path(path, "Configuration"), report);
        if self.service.is_empty() {
            report.push(field_path(path, "Service"), IssueKind::Empty);
        } else if self.service != RIGHTSIZING_SERVICE {
            report.push(
                field_path(path, "Service"),
                IssueKind::Unsupported {
                    reason: format!("rightsizing is only available for {RIGHTSIZING_SERVICE}"),
                },
            );
        }
        if let Some(page_size) = self.page_size {
            check_positive(report, &field_path(path, "PageSize"), i64::from(page_size));
        }
    }
}

/// Result of `GetRightsizingRecommendation`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GetRightsizingRecommendationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RightsizingRecommendationMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RightsizingRecommendationSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rightsizing_recommendations: Vec<RightsizingRecommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<RightsizingRecommendationConfiguration>,
}
