//! Cost and usage forecasts
//!
//! Both forecast operations take the same parameters and return the same
//! shape; they differ only in which metrics the service accepts.

use costexp_core::enums::{Granularity, Metric};
use costexp_core::expression::Expression;
use costexp_core::types::{DateInterval, MetricValue};
use costexp_core::validation::{
    FilterRestriction, Validate, ValidationReport, check_filter, check_known, check_range,
    field_path,
};
use serde::{Deserialize, Serialize};

/// Lowest accepted prediction interval level, in percent
pub const MIN_PREDICTION_INTERVAL_LEVEL: i32 = 51;

/// Highest accepted prediction interval level, in percent
pub const MAX_PREDICTION_INTERVAL_LEVEL: i32 = 99;

/// Forecast for one time bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ForecastResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<DateInterval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction_interval_lower_bound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction_interval_upper_bound: Option<String>,
}

fn validate_forecast(
    report: &mut ValidationReport,
    path: &str,
    time_period: &DateInterval,
    metric: &Metric,
    granularity: &Granularity,
    filter: Option<&Expression>,
    prediction_interval_level: Option<i32>,
) {
    time_period.validate_at(&field_path(path, "TimePeriod"), report);
    check_known(report, &field_path(path, "Metric"), metric);
    check_known(report, &field_path(path, "Granularity"), granularity);
    check_filter(
        report,
        &field_path(path, "Filter"),
        filter,
        FilterRestriction::Unrestricted,
    );
    if let Some(level) = prediction_interval_level {
        check_range(
            report,
            &field_path(path, "PredictionIntervalLevel"),
            i64::from(level),
            i64::from(MIN_PREDICTION_INTERVAL_LEVEL),
            i64::from(MAX_PREDICTION_INTERVAL_LEVEL),
        );
    }
}

/// Parameters for `GetCostForecast`
///
/// # Examples
///
/// ```
/// use costexp_core::enums::{Granularity, Metric};
/// use costexp_core::types::DateInterval;
/// use costexp_core::validation::Validate;
/// use costexp_model::forecast::GetCostForecastRequest;
///
/// let request = GetCostForecastRequest::new(
///     DateInterval::new("2020-03-01", "2020-04-01"),
///     Metric::UnblendedCost,
///     Granularity::Monthly,
/// )
/// .with_prediction_interval_level(100);
///
/// // Builds fine; only validation objects to the level.
/// assert_eq!(request.prediction_interval_level, Some(100));
/// assert!(request.validate().has_issue_at("PredictionIntervalLevel"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetCostForecastRequest {
    pub time_period: DateInterval,
    pub metric: Metric,
    pub granularity: Granularity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Expression>,
    /// Confidence of the prediction interval, in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction_interval_level: Option<i32>,
}

impl GetCostForecastRequest {
    pub fn new(time_period: DateInterval, metric: Metric, granularity: Granularity) -> Self {
        Self {
            time_period,
            metric,
            granularity,
            filter: None,
            prediction_interval_level: None,
        }
    }

    pub fn with_filter(mut self, filter: Expression) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_prediction_interval_level(mut self, level: i32) -> Self {
        self.prediction_interval_level = Some(level);
        self
    }
}

impl Validate for GetCostForecastRequest {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        validate_forecast(
            report,
            path,
            &self.time_period,
            &self.metric,
            &self.granularity,
            self.filter.as_ref(),
            self.prediction_interval_level,
        );
    }
}

/// Result of `GetCostForecast` and `GetUsageForecast`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GetCostForecastResponse {
    /// Forecast for the whole period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<MetricValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub forecast_results_by_time: Vec<ForecastResult>,
}

/// Parameters for `GetUsageForecast`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetUsageForecastRequest {
    pub time_period: DateInterval,
    pub metric: Metric,
    pub granularity: Granularity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction_interval_level: Option<i32>,
}

impl GetUsageForecastRequest {
    pub fn new(time_period: DateInterval, metric: Metric, granularity: Granularity) -> Self {
        Self {
            time_period,
            metric,
            granularity,
            filter: None,
            prediction_interval_level: None,
        }
    }

    pub fn with_filter(mut self, filter: Expression) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_prediction_interval_level(mut self, level: i32) -> Self {
        self.prediction_interval_level = Some(level);
        self
    }
}

impl Validate for GetUsageForecastRequest {
    fn validate_at(&self, path: &str, report: &mut ValidationReport) {
        validate_forecast(
            report,
            path,
            &self.time_period,
            &self.metric,
            &self.granularity,
            self.filter.as_ref(),
            self.prediction_interval_level,
        );
    }
}

pub type GetUsageForecastResponse = GetCostForecastResponse;
