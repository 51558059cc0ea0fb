//! Cost category definitions
//!
//! Create, describe, list, update and delete the rule sets that bucket
//! billing line items into user-defined categories.
//!
//! # Examples
//!
//! ```
//! use costexp_core::enums::{CostCategoryRuleVersion, Dimension};
//! use costexp_core::types::DimensionValues;
//! use costexp_model::cost_category::{CostCategoryRule, CreateCostCategoryDefinitionRequest};
//!
//! let request = CreateCostCategoryDefinitionRequest::new(
//!     "Environment",
//!     CostCategoryRuleVersion::CostCategoryExpressionV1,
//!     [CostCategoryRule::new(
//!         "Production",
//!         DimensionValues::new(Dimension::LinkedAccount, ["111122223333"]).into(),
//!     )],
//! );
//! assert_eq!(request.rules.len(), 1);
//! ```

use costexp_core::enums::CostCategoryRuleVersion;
use costexp_core::expression::Expression;
use costexp_core::types::parse_date_bound;
use costexp_core::validation::{
    IssueKind, MAX_NAME_LENGTH, Validate, ValidationReport, check_arn, check_count, check_known,
    check_length, check_positive, field_path, index_path,
};
use serde::{Deserialize, Serialize};

/// Maximum number of rules in one cost category
pub const MAX_RULES: usize = 500;

/// One rule: records matching `rule` are assigned `value`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CostCategoryRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<Expression>,
}

impl CostCategoryRule {
    pub fn new(value: impl Into<String>, rule: Expression) -> Self {
        Self {
            value: Some(value.into()),
            rule: Some(rule),
        }
    }
}

impl Validate for CostCategoryRule {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        let value_path = field_path(path, "Value");
        match &self.value {
            None => report.push(value_path, IssueKind::Missing),
            Some(value) => check_length(report, &value_path, value, 1, MAX_NAME_LENGTH),
        }
        match &self.rule {
            None => report.push(field_path(path, "Rule"), IssueKind::Missing),
            Some(rule) => rule.validate_at(&field_path(path, "Rule"), report),
        }
    }
}

/// A full cost category definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CostCategory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_category_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_version: Option<CostCategoryRuleVersion>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<CostCategoryRule>,
}

/// Summary entry returned when listing cost categories
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CostCategoryReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_category_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_rules: Option<i32>,
}

fn check_rules(report: &mut ValidationReport, path: &str, rules: &[CostCategoryRule]) {
    let rules_path = field_path(path, "Rules");
    check_count(report, &rules_path, rules.len(), 1, MAX_RULES);
    for (i, rule) in rules.iter().enumerate() {
        rule.validate_at(&index_path(&rules_path, i), report);
    }
}

fn check_effective_on(report: &mut ValidationReport, path: &str, effective_on: Option<&str>) {
    if let Some(value) = effective_on
        && parse_date_bound(value).is_none()
    {
        report.push(
            field_path(path, "EffectiveOn"),
            IssueKind::InvalidFormat {
                expected: "YYYY-MM-DD or YYYY-MM-DDThh:mm:ssZ".to_string(),
            },
        );
    }
}

/// Parameters for `CreateCostCategoryDefinition`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCostCategoryDefinitionRequest {
    pub name: String,
    pub rule_version: CostCategoryRuleVersion,
    pub rules: Vec<CostCategoryRule>,
}

impl CreateCostCategoryDefinitionRequest {
    pub fn new(
        name: impl Into<String>,
        rule_version: CostCategoryRuleVersion,
        rules: impl IntoIterator<Item = CostCategoryRule>,
    ) -> Self {
        Self {
            name: name.into(),
            rule_version,
            rules: rules.into_iter().collect(),
        }
    }

    /// Replace the rule list
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = CostCategoryRule>) -> Self {
        self.rules = rules.into_iter().collect();
        self
    }
}

impl Validate for CreateCostCategoryDefinitionRequest {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        check_length(
            report,
            &field_path(path, "Name"),
            &self.name,
            1,
            MAX_NAME_LENGTH,
        );
        check_known(report, &field_path(path, "RuleVersion"), &self.rule_version);
        check_rules(report, path, &self.rules);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateCostCategoryDefinitionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_category_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_start: Option<String>,
}

/// Parameters for `DeleteCostCategoryDefinition`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteCostCategoryDefinitionRequest {
    pub cost_category_arn: String,
}

impl DeleteCostCategoryDefinitionRequest {
    pub fn new(cost_category_arn: impl Into<String>) -> Self {
        Self {
            cost_category_arn: cost_category_arn.into(),
        }
    }
}

impl Validate for DeleteCostCategoryDefinitionRequest {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        check_arn(report, &field_path(path, "CostCategoryArn"), &self.cost_category_arn);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteCostCategoryDefinitionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_category_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_end: Option<String>,
}

/// Parameters for `DescribeCostCategoryDefinition`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeCostCategoryDefinitionRequest {
    pub cost_category_arn: String,
    /// Point in time to describe; the current definition when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_on: Option<String>,
}

impl DescribeCostCategoryDefinitionRequest {
    pub fn new(cost_category_arn: impl Into<String>) -> Self {
        Self {
            cost_category_arn: cost_category_arn.into(),
            effective_on: None,
        }
    }

    pub fn with_effective_on(mut self, effective_on: impl Into<String>) -> Self {
        self.effective_on = Some(effective_on.into());
        self
    }
}

impl Validate for DescribeCostCategoryDefinitionRequest {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        check_arn(report, &field_path(path, "CostCategoryArn"), &self.cost_category_arn);
        check_effective_on(report, path, self.effective_on.as_deref());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DescribeCostCategoryDefinitionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_category: Option<CostCategory>,
}

/// Parameters for `ListCostCategoryDefinitions`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ListCostCategoryDefinitionsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
}

impl ListCostCategoryDefinitionsRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_effective_on(mut self, effective_on: impl Into<String>) -> Self {
        self.effective_on = Some(effective_on.into());
        self
    }

    pub fn with_next_token(mut self, next_token: impl Into<String>) -> Self {
        self.next_token = Some(next_token.into());
        self
    }

    pub fn with_max_results(mut self, max_results: i32) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

impl Validate for ListCostCategoryDefinitionsRequest {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        check_effective_on(report, path, self.effective_on.as_deref());
        if let Some(max_results) = self.max_results {
            check_positive(
                report,
                &field_path(path, "MaxResults"),
                i64::from(max_results),
            );
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ListCostCategoryDefinitionsResponse {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cost_category_references: Vec<CostCategoryReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// Parameters for `UpdateCostCategoryDefinition`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateCostCategoryDefinitionRequest {
    pub cost_category_arn: String,
    pub rule_version: CostCategoryRuleVersion,
    pub rules: Vec<CostCategoryRule>,
}

impl UpdateCostCategoryDefinitionRequest {
    pub fn new(
        cost_category_arn: impl Into<String>,
        rule_version: CostCategoryRuleVersion,
        rules: impl IntoIterator<Item = CostCategoryRule>,
    ) -> Self {
        Self {
            cost_category_arn: cost_category_arn.into(),
            rule_version,
            rules: rules.into_iter().collect(),
        }
    }

    /// Replace the rule list
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = CostCategoryRule>) -> Self {
        self.rules = rules.into_iter().collect();
        self
    }
}

impl Validate for UpdateCostCategoryDefinitionRequest {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        check_arn(report, &field_path(path, "CostCategoryArn"), &self.cost_category_arn);
        check_known(report, &field_path(path, "RuleVersion"), &self.rule_version);
        check_rules(report, path, &self.rules);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UpdateCostCategoryDefinitionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_category_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_start: Option<String>,
}
