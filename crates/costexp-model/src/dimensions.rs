//! Dimension and tag value lookups

use costexp_core::enums::{Context, Dimension};
use costexp_core::types::{Attributes, DateInterval};
use costexp_core::validation::{Validate, ValidationReport, check_known, field_path};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A dimension value with its metadata
///
/// For `LINKED_ACCOUNT` the attributes carry the account description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DimensionValuesWithAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
}

/// Parameters for `GetDimensionValues`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetDimensionValuesRequest {
    /// Only return values that start with this string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_string: Option<String>,
    pub time_period: DateInterval,
    pub dimension: Dimension,
    /// Which data set to look the values up in; the service defaults to
    /// `COST_AND_USAGE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl GetDimensionValuesRequest {
    pub fn new(time_period: DateInterval, dimension: Dimension) -> Self {
        Self {
            search_string: None,
            time_period,
            dimension,
            context: None,
            next_page_token: None,
        }
    }

    pub fn with_search_string(mut self, search_string: impl Into<String>) -> Self {
        self.search_string = Some(search_string.into());
        self
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_next_page_token(mut self, token: impl Into<String>) -> Self {
        self.next_page_token = Some(token.into());
        self
    }
}

impl Validate for GetDimensionValuesRequest {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        self.time_period.validate_at(&field_path(path, "TimePeriod"), report);
        check_known(report, &field_path(path, "Dimension"), &self.dimension);
        if let Some(context) = &self.context {
            check_known(report, &field_path(path, "Context"), context);
        }
    }
}

/// Result of `GetDimensionValues`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GetDimensionValuesResponse {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dimension_values: Vec<DimensionValuesWithAttributes>,
    /// Number of values in this page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_size: Option<i32>,
    /// Number of values across all pages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl GetDimensionValuesResponse {
    /// The bare values, in service order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.dimension_values
            .iter()
            .filter_map(|entry| entry.value.as_deref())
    }
}

/// Parameters for `GetTags`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetTagsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_string: Option<String>,
    pub time_period: DateInterval,
    /// List values of this key; without it the service lists tag keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl GetTagsRequest {
    pub fn new(time_period: DateInterval) -> Self {
        Self {
            search_string: None,
            time_period,
            tag_key: None,
            next_page_token: None,
        }
    }

    pub fn with_search_string(mut self, search_string: impl Into<String>) -> Self {
        self.search_string = Some(search_string.into());
        self
    }

    pub fn with_tag_key(mut self, tag_key: impl Into<String>) -> Self {
        self.tag_key = Some(tag_key.into());
        self
    }

    pub fn with_next_page_token(mut self, token: impl Into<String>) -> Self {
        self.next_page_token = Some(token.into());
        self
    }
}

impl Validate for GetTagsRequest {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        self.time_period.validate_at(&field_path(path, "TimePeriod"), report);
    }
}

/// Result of `GetTags`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GetTagsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_size: Option<i32>,
}
