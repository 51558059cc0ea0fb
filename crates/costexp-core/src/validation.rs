//! Opt-in client-side validation
//!
//! Nothing in this crate validates on construction: a request with an
//! out-of-range value builds fine and would be rejected by the service.
//! Callers that prefer to catch those mistakes before sending can run
//! [`Validate::validate`], which collects every problem it finds into a
//! [`ValidationReport`] keyed by the wire path of the offending field.
//!
//! # Examples
//!
//! ```
//! use costexp_core::types::DateInterval;
//! use costexp_core::validation::Validate;
//!
//! let backwards = DateInterval::new("2020-02-01", "2020-01-01");
//! let report = backwards.validate();
//! assert_eq!(report.len(), 1);
//! assert!(report.into_result().is_err());
//! ```

use crate::enums::{Dimension, GroupDefinitionType, MatchOption, Metric, WireEnum};
use crate::error::{CostExplorerError, Result};
use crate::expression::{Expression, Predicate};
use crate::types::{CostCategoryValues, DateInterval, DimensionValues, GroupDefinition, TagValues};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Maximum number of `GroupBy` definitions per request
pub const MAX_GROUP_BY: usize = 2;

/// Maximum length of names and values such as cost category names
pub const MAX_NAME_LENGTH: usize = 255;

static ARN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^arn:aws[-a-z0-9]*:[a-z0-9]+:[-a-z0-9]*:[0-9]{12}:[-a-zA-Z0-9/:_]+$")
        .expect("ARN pattern is a valid regex")
});

/// What is wrong with a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    /// A required value is absent
    Missing,
    /// A value is present but empty
    Empty,
    /// A number is outside its accepted range
    OutOfRange { min: i64, max: i64, actual: i64 },
    /// A list or string has fewer elements than required
    TooShort { min: usize, actual: usize },
    /// A list or string has more elements than allowed
    TooLong { max: usize, actual: usize },
    /// A string does not have the expected shape
    InvalidFormat { expected: String },
    /// An enumerated value this client does not know
    UnknownValue { value: String },
    /// A time period whose start is not before its end
    InvalidInterval { start: String, end: String },
    /// A construct the target operation does not accept
    Unsupported { reason: String },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "required value is missing"),
            Self::Empty => write!(f, "value must not be empty"),
            Self::OutOfRange { min, max, actual } => {
                write!(f, "{actual} is outside the accepted range {min}..={max}")
            }
            Self::TooShort { min, actual } => {
                write!(f, "needs at least {min} element(s), found {actual}")
            }
            Self::TooLong { max, actual } => {
                write!(f, "allows at most {max} element(s), found {actual}")
            }
            Self::InvalidFormat { expected } => write!(f, "expected {expected}"),
            Self::UnknownValue { value } => write!(f, "unknown value '{value}'"),
            Self::InvalidInterval { start, end } => {
                write!(f, "start '{start}' must be before end '{end}'")
            }
            Self::Unsupported { reason } => write!(f, "{reason}"),
        }
    }
}

/// One problem found during validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Dotted wire path of the field, e.g. `Filter.And[1].Dimensions.Values`
    pub path: String,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.path, self.kind)
        }
    }
}

/// All problems found in one value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue at `path`
    pub fn push(&mut self, path: impl Into<String>, kind: IssueKind) {
        let issue = ValidationIssue {
            path: path.into(),
            kind,
        };
        debug!("Validation issue: {}", issue);
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether any issue was recorded at exactly `path`
    pub fn has_issue_at(&self, path: &str) -> bool {
        self.issues.iter().any(|issue| issue.path == path)
    }

    /// `Ok(())` when clean, otherwise [`CostExplorerError::Validation`]
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CostExplorerError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} issue(s)", self.issues.len())?;
        for (i, issue) in self.issues.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{issue}")?;
        }
        Ok(())
    }
}

/// Eager validation against the constraints the service documents
pub trait Validate {
    /// Append issues for `self`, located under `path`
    fn validate_at(&self, path: &str, report: &mut ValidationReport);

    /// Validate `self` as a top-level value
    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        self.validate_at("", &mut report);
        report
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        if let Some(value) = self {
            value.validate_at(path, report);
        }
    }
}

impl<T: Validate> Validate for Box<T> {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        (**self).validate_at(path, report);
    }
}

/// Path of `field` below `parent`
pub fn field_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}

/// Path of element `index` of the list at `parent`
pub fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

/// Check that `value` lies in `min..=max`
pub fn check_range(report: &mut ValidationReport, path: &str, value: i64, min: i64, max: i64) {
    if value < min || value > max {
        report.push(path, IssueKind::OutOfRange { min, max, actual: value });
    }
}

/// Check that a page size or result limit is at least one
pub fn check_positive(report: &mut ValidationReport, path: &str, value: i64) {
    check_range(report, path, value, 1, i64::from(i32::MAX));
}

/// Check that a string has between `min` and `max` characters
pub fn check_length(report: &mut ValidationReport, path: &str, value: &str, min: usize, max: usize) {
    let actual = value.chars().count();
    if actual == 0 && min > 0 {
        report.push(path, IssueKind::Empty);
    } else if actual < min {
        report.push(path, IssueKind::TooShort { min, actual });
    } else if actual > max {
        report.push(path, IssueKind::TooLong { max, actual });
    }
}

/// Check that a list has between `min` and `max` elements
pub fn check_count(report: &mut ValidationReport, path: &str, actual: usize, min: usize, max: usize) {
    if actual < min {
        report.push(path, IssueKind::TooShort { min, actual });
    } else if actual > max {
        report.push(path, IssueKind::TooLong { max, actual });
    }
}

/// Check that an enumerated value is one this client knows
pub fn check_known<E: WireEnum>(report: &mut ValidationReport, path: &str, value: &E) {
    if !value.is_known() {
        report.push(
            path,
            IssueKind::UnknownValue {
                value: value.as_str().to_string(),
            },
        );
    }
}

/// Check that a string looks like an AWS ARN
pub fn check_arn(report: &mut ValidationReport, path: &str, value: &str) {
    if value.is_empty() {
        report.push(path, IssueKind::Empty);
    } else if !ARN_PATTERN.is_match(value) {
        report.push(
            path,
            IssueKind::InvalidFormat {
                expected: "an ARN of the form arn:aws:<service>:<region>:<account>:<resource>"
                    .to_string(),
            },
        );
    }
}

/// Check a `GroupBy` list
pub fn check_group_by(report: &mut ValidationReport, path: &str, groups: &[GroupDefinition]) {
    if groups.len() > MAX_GROUP_BY {
        report.push(
            path,
            IssueKind::TooLong {
                max: MAX_GROUP_BY,
                actual: groups.len(),
            },
        );
    }
    for (i, group) in groups.iter().enumerate() {
        group.validate_at(&index_path(path, i), report);
    }
}

/// Check the metric names of a cost and usage query
pub fn check_metric_names(report: &mut ValidationReport, path: &str, names: &[String]) {
    if names.is_empty() {
        report.push(path, IssueKind::Empty);
    }
    for (i, name) in names.iter().enumerate() {
        if !Metric::METRIC_NAMES.contains(&name.as_str()) {
            report.push(
                index_path(path, i),
                IssueKind::UnknownValue {
                    value: name.clone(),
                },
            );
        }
    }
}

/// Extra shape restrictions some operations put on their filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterRestriction {
    /// Any well-formed expression
    #[default]
    Unrestricted,
    /// A single leaf, or one `And` whose operands are all leaves
    ///
    /// When `allowed_dimensions` is set, only dimension predicates on those
    /// dimensions are accepted.
    AndOfLeaves {
        allowed_dimensions: Option<&'static [&'static str]>,
    },
}

/// Validate an optional filter and apply an operation's restriction to it
pub fn check_filter(
    report: &mut ValidationReport,
    path: &str,
    filter: Option<&Expression>,
    restriction: FilterRestriction,
) {
    let Some(filter) = filter else {
        return;
    };
    filter.validate_at(path, report);

    let FilterRestriction::AndOfLeaves { allowed_dimensions } = restriction else {
        return;
    };
    match filter {
        Expression::And(operands) => {
            let and_path = field_path(path, "And");
            for (i, operand) in operands.iter().enumerate() {
                let operand_path = index_path(&and_path, i);
                if operand.is_leaf() {
                    check_allowed_leaf(report, &operand_path, operand, allowed_dimensions);
                } else {
                    report.push(
                        field_path(&operand_path, operand.slot_name()),
                        IssueKind::Unsupported {
                            reason: "this operation accepts only one level of nesting".to_string(),
                        },
                    );
                }
            }
        }
        Expression::Or(_) | Expression::Not(_) => {
            report.push(
                field_path(path, filter.slot_name()),
                IssueKind::Unsupported {
                    reason: "this operation accepts only And".to_string(),
                },
            );
        }
        leaf => check_allowed_leaf(report, path, leaf, allowed_dimensions),
    }
}

fn check_allowed_leaf(
    report: &mut ValidationReport,
    path: &str,
    leaf: &Expression,
    allowed_dimensions: Option<&'static [&'static str]>,
) {
    let Some(allowed) = allowed_dimensions else {
        return;
    };
    match leaf.as_predicate() {
        Some(Predicate::Dimensions(values)) => {
            if let Some(key) = &values.key
                && !allowed.contains(&key.as_str())
            {
                report.push(
                    field_path(&field_path(path, "Dimensions"), "Key"),
                    IssueKind::Unsupported {
                        reason: format!(
                            "dimension {} is not accepted here; expected one of {}",
                            key,
                            allowed.join(", ")
                        ),
                    },
                );
            }
        }
        Some(_) => report.push(
            field_path(path, leaf.slot_name()),
            IssueKind::Unsupported {
                reason: "this operation accepts only dimension predicates".to_string(),
            },
        ),
        None => {}
    }
}

impl Validate for DateInterval {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        let expected = || IssueKind::InvalidFormat {
            expected: "YYYY-MM-DD or YYYY-MM-DDThh:mm:ssZ".to_string(),
        };
        let start = self.start_bound();
        let end = self.end_bound();
        if start.is_none() {
            report.push(field_path(path, "Start"), expected());
        }
        if end.is_none() {
            report.push(field_path(path, "End"), expected());
        }
        if let (Some(start), Some(end)) = (start, end)
            && start >= end
        {
            report.push(
                path,
                IssueKind::InvalidInterval {
                    start: self.start.clone(),
                    end: self.end.clone(),
                },
            );
        }
    }
}

impl Validate for GroupDefinition {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        match &self.r#type {
            None => report.push(field_path(path, "Type"), IssueKind::Missing),
            Some(kind) => check_known(report, &field_path(path, "Type"), kind),
        }
        let key_path = field_path(path, "Key");
        match self.key.as_deref() {
            None => report.push(key_path, IssueKind::Missing),
            Some("") => report.push(key_path, IssueKind::Empty),
            Some(key) => {
                if self.r#type == Some(GroupDefinitionType::Dimension) {
                    check_known(report, &key_path, &Dimension::from(key));
                }
            }
        }
    }
}

fn check_match_options(
    report: &mut ValidationReport,
    path: &str,
    options: &[MatchOption],
) {
    let options_path = field_path(path, "MatchOptions");
    for (i, option) in options.iter().enumerate() {
        check_known(report, &index_path(&options_path, i), option);
    }
}

fn check_free_key(report: &mut ValidationReport, path: &str, key: Option<&str>) {
    let key_path = field_path(path, "Key");
    match key {
        None => report.push(key_path, IssueKind::Missing),
        Some(key) => check_length(report, &key_path, key, 1, MAX_NAME_LENGTH),
    }
}

impl Validate for DimensionValues {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        match &self.key {
            None => report.push(field_path(path, "Key"), IssueKind::Missing),
            Some(key) => check_known(report, &field_path(path, "Key"), key),
        }
        if self.values.is_empty() {
            report.push(field_path(path, "Values"), IssueKind::Empty);
        }
        check_match_options(report, path, &self.match_options);
    }
}

impl Validate for TagValues {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        check_free_key(report, path, self.key.as_deref());
        check_match_options(report, path, &self.match_options);
    }
}

impl Validate for CostCategoryValues {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        check_free_key(report, path, self.key.as_deref());
        check_match_options(report, path, &self.match_options);
    }
}

impl Validate for Expression {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        let slot_path = field_path(path, self.slot_name());
        match self {
            Expression::Or(operands) | Expression::And(operands) => {
                if operands.len() < 2 {
                    report.push(
                        slot_path.clone(),
                        IssueKind::TooShort {
                            min: 2,
                            actual: operands.len(),
                        },
                    );
                }
                for (i, operand) in operands.iter().enumerate() {
                    operand.validate_at(&index_path(&slot_path, i), report);
                }
            }
            Expression::Not(operand) => operand.validate_at(&slot_path, report),
            Expression::Dimensions(values) => values.validate_at(&slot_path, report),
            Expression::Tags(values) => values.validate_at(&slot_path, report),
            Expression::CostCategories(values) => values.validate_at(&slot_path, report),
        }
    }
}
