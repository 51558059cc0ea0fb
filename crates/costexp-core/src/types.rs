//! Shared value objects
//!
//! Flat records that several operations reuse: time periods, the three
//! leaf predicates of a filter expression, group definitions and metric
//! values. Field names map onto the service's PascalCase JSON keys, and
//! unset fields are left out of the serialized form entirely.

use crate::enums::{Dimension, GroupDefinitionType, MatchOption};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form key/value attributes attached to result groups
pub type Attributes = BTreeMap<String, String>;

/// Named metric values, keyed by metric name (e.g. `UnblendedCost`)
pub type Metrics = BTreeMap<String, MetricValue>;

/// Wire format for date-only bounds
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for hourly bounds
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parse a time period bound in either wire form
///
/// Accepts `YYYY-MM-DD` and `YYYY-MM-DDThh:mm:ssZ`. Date-only bounds are
/// taken at midnight.
///
/// ```
/// use costexp_core::types::parse_date_bound;
///
/// assert!(parse_date_bound("2020-01-31").is_some());
/// assert!(parse_date_bound("2020-01-31T13:00:00Z").is_some());
/// assert!(parse_date_bound("31/01/2020").is_none());
/// ```
pub fn parse_date_bound(value: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return date.and_hms_opt(0, 0, 0);
    }
    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT).ok()
}

/// A time period: `start` is inclusive, `end` is exclusive
///
/// # Examples
/// ```
/// use costexp_core::types::DateInterval;
/// use chrono::NaiveDate;
///
/// let january = DateInterval::from_dates(
///     NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
/// );
/// assert_eq!(january.start, "2020-01-01");
/// assert_eq!(
///     serde_json::to_string(&january).unwrap(),
///     r#"{"Start":"2020-01-01","End":"2020-02-01"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DateInterval {
    /// Inclusive start of the period
    pub start: String,
    /// Exclusive end of the period
    pub end: String,
}

impl DateInterval {
    /// Create an interval from raw wire strings
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Create a date-only interval
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(
            start.format(DATE_FORMAT).to_string(),
            end.format(DATE_FORMAT).to_string(),
        )
    }

    /// Create an hourly interval
    pub fn from_date_times(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::new(
            start.format(DATE_TIME_FORMAT).to_string(),
            end.format(DATE_TIME_FORMAT).to_string(),
        )
    }

    /// Parsed start bound, if it is well formed
    pub fn start_bound(&self) -> Option<NaiveDateTime> {
        parse_date_bound(&self.start)
    }

    /// Parsed end bound, if it is well formed
    pub fn end_bound(&self) -> Option<NaiveDateTime> {
        parse_date_bound(&self.end)
    }
}

/// Match options the service applies when a predicate sets none
pub fn default_match_options() -> Vec<MatchOption> {
    vec![MatchOption::Equals, MatchOption::CaseSensitive]
}

/// Leaf predicate over a predefined dimension
///
/// The values are OR'd together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DimensionValues {
    /// Dimension to match on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Dimension>,
    /// Accepted values
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Comparison options; empty means the service default
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub match_options: Vec<MatchOption>,
}

impl DimensionValues {
    /// Match `key` against any of `values`
    pub fn new<I, S>(key: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: Some(key),
            values: values.into_iter().map(Into::into).collect(),
            match_options: Vec::new(),
        }
    }

    /// Replace the match options
    pub fn with_match_options(mut self, options: impl IntoIterator<Item = MatchOption>) -> Self {
        self.match_options = options.into_iter().collect();
        self
    }

    /// Match options the service will apply
    pub fn effective_match_options(&self) -> Vec<MatchOption> {
        if self.match_options.is_empty() {
            default_match_options()
        } else {
            self.match_options.clone()
        }
    }
}

/// Leaf predicate over a cost allocation tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TagValues {
    /// Tag key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Accepted tag values
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Comparison options; empty means the service default
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub match_options: Vec<MatchOption>,
}

impl TagValues {
    /// Match tag `key` against any of `values`
    pub fn new<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: Some(key.into()),
            values: values.into_iter().map(Into::into).collect(),
            match_options: Vec::new(),
        }
    }

    /// Replace the match options
    pub fn with_match_options(mut self, options: impl IntoIterator<Item = MatchOption>) -> Self {
        self.match_options = options.into_iter().collect();
        self
    }

    /// Match options the service will apply
    pub fn effective_match_options(&self) -> Vec<MatchOption> {
        if self.match_options.is_empty() {
            default_match_options()
        } else {
            self.match_options.clone()
        }
    }
}

/// Leaf predicate over a cost category
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostCategoryValues {
    /// Cost category name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Accepted category values
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Comparison options; empty means the service default
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub match_options: Vec<MatchOption>,
}

impl CostCategoryValues {
    /// Match cost category `key` against any of `values`
    pub fn new<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: Some(key.into()),
            values: values.into_iter().map(Into::into).collect(),
            match_options: Vec::new(),
        }
    }

    /// Replace the match options
    pub fn with_match_options(mut self, options: impl IntoIterator<Item = MatchOption>) -> Self {
        self.match_options = options.into_iter().collect();
        self
    }

    /// Match options the service will apply
    pub fn effective_match_options(&self) -> Vec<MatchOption> {
        if self.match_options.is_empty() {
            default_match_options()
        } else {
            self.match_options.clone()
        }
    }
}

/// One grouping axis for cost and usage results
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<GroupDefinitionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl GroupDefinition {
    /// Group by a predefined dimension
    pub fn dimension(dimension: Dimension) -> Self {
        Self {
            r#type: Some(GroupDefinitionType::Dimension),
            key: Some(dimension.as_str().to_string()),
        }
    }

    /// Group by a tag key
    pub fn tag(key: impl Into<String>) -> Self {
        Self {
            r#type: Some(GroupDefinitionType::Tag),
            key: Some(key.into()),
        }
    }

    /// Group by a cost category name
    pub fn cost_category(name: impl Into<String>) -> Self {
        Self {
            r#type: Some(GroupDefinitionType::CostCategory),
            key: Some(name.into()),
        }
    }
}

/// An aggregated amount with its unit
///
/// Amounts stay decimal strings so that financial figures never pass
/// through floating point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl MetricValue {
    pub fn new(amount: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            amount: Some(amount.into()),
            unit: Some(unit.into()),
        }
    }
}
