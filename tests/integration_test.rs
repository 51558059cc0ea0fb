//! Integration tests for the costexp request and response models
//!
//! These tests go through the public API end to end: building requests,
//! validating them, encoding envelopes and decoding response bodies.

mod common;

use common::{DOCUMENTED_FILTER, FORECAST_LEVEL_100_DOCUMENT, documented_filter};
use costexp::{CostExplorerError, Validate};
use costexp_core::enums::{
    Dimension, Granularity, LookbackPeriodInDays, Metric, PaymentOption, RightsizingType,
    ServiceErrorKind, SupportedSavingsPlansType, TermInYears, WireEnum,
};
use costexp_core::expression::Expression;
use costexp_core::types::{DateInterval, DimensionValues, GroupDefinition};
use costexp_core::validation::IssueKind;
use costexp_model::cost_and_usage::{GetCostAndUsageRequest, GetCostAndUsageWithResourcesRequest};
use costexp_model::forecast::GetCostForecastRequest;
use costexp_model::operation::{
    JSON_CONTENT_TYPE, Operation, OperationName, decode_response, decode_service_error,
    encode_request,
};
use costexp_model::reservations::GetReservationUtilizationRequest;
use costexp_model::rightsizing::GetRightsizingRecommendationRequest;
use costexp_model::savings_plans::{
    GetSavingsPlansPurchaseRecommendationRequest, GetSavingsPlansUtilizationDetailsRequest,
};

fn january() -> DateInterval {
    DateInterval::new("2020-01-01", "2020-02-01")
}

#[test]
fn test_documented_filter_wire_format() {
    let filter = documented_filter();
    assert_eq!(serde_json::to_string(&filter).unwrap(), DOCUMENTED_FILTER);

    let parsed: Expression = serde_json::from_str(DOCUMENTED_FILTER).unwrap();
    assert_eq!(parsed, filter);
    assert_eq!(parsed.depth(), 3);
    assert_eq!(parsed.leaves().count(), 2);
}

#[test]
fn test_expression_with_two_slots_is_rejected() {
    let document = r#"{
        "And": [{"Tags": {"Key": "team", "Values": ["web"]}}, {"Tags": {"Key": "team", "Values": ["data"]}}],
        "Or": [{"Tags": {"Key": "team", "Values": ["ops"]}}, {"Tags": {"Key": "team", "Values": ["qa"]}}]
    }"#;
    assert!(serde_json::from_str::<Expression>(document).is_err());
    assert!(serde_json::from_str::<Expression>("{}").is_err());
}

#[test]
fn test_cost_and_usage_request_body() {
    let request = GetCostAndUsageRequest::new(january())
        .with_granularity(Granularity::Monthly)
        .with_metrics(["UnblendedCost", "UsageQuantity"])
        .with_group_by([GroupDefinition::dimension(Dimension::Service)])
        .with_filter(documented_filter());
    assert!(request.validate().is_empty());

    let envelope = encode_request(&request).unwrap();
    assert_eq!(envelope.target, "AWSInsightsIndexService.GetCostAndUsage");
    assert_eq!(envelope.content_type, JSON_CONTENT_TYPE);

    let body: serde_json::Value = serde_json::from_str(&envelope.body).unwrap();
    assert_eq!(body["TimePeriod"]["Start"], "2020-01-01");
    assert_eq!(body["Granularity"], "MONTHLY");
    assert_eq!(body["GroupBy"][0]["Type"], "DIMENSION");
    assert_eq!(body["GroupBy"][0]["Key"], "SERVICE");
    assert!(body.get("NextPageToken").is_none());
}

#[test]
fn test_absent_optional_fields_are_omitted() {
    let request = GetCostAndUsageRequest::new(january()).with_metrics(["BlendedCost"]);
    assert_eq!(
        serde_json::to_string(&request).unwrap(),
        r#"{"TimePeriod":{"Start":"2020-01-01","End":"2020-02-01"},"Metrics":["BlendedCost"]}"#
    );
}

#[test]
fn test_forecast_level_100_constructs_but_fails_validation() {
    let request = GetCostForecastRequest::new(
        DateInterval::new("2020-03-01", "2020-04-01"),
        Metric::UnblendedCost,
        Granularity::Monthly,
    )
    .with_prediction_interval_level(100);

    let report = request.validate();
    assert_eq!(report.len(), 1);
    assert_eq!(report.issues()[0].path, "PredictionIntervalLevel");
    assert_eq!(
        report.issues()[0].kind,
        IssueKind::OutOfRange {
            min: 51,
            max: 99,
            actual: 100
        }
    );
    assert!(matches!(
        report.into_result(),
        Err(CostExplorerError::Validation(_))
    ));

    // The same request read from a document behaves identically
    let checked = OperationName::GetCostForecast
        .check_document(FORECAST_LEVEL_100_DOCUMENT)
        .unwrap();
    assert!(checked.report.has_issue_at("PredictionIntervalLevel"));
}

#[test]
fn test_single_operand_and_is_reported() {
    let request = GetCostAndUsageRequest::new(january())
        .with_metrics(["UnblendedCost"])
        .with_filter(Expression::and([DimensionValues::new(
            Dimension::Region,
            ["us-east-1"],
        )
        .into()]));

    let report = request.validate();
    assert!(report.has_issue_at("Filter.And"));
}

#[test]
fn test_with_resources_needs_filter_or_resource_grouping() {
    let request = GetCostAndUsageWithResourcesRequest::new(january())
        .with_granularity(Granularity::Daily)
        .with_metrics(["UnblendedCost"]);
    assert!(request.validate().has_issue_at("Filter"));

    let grouped = request
        .clone()
        .with_group_by([GroupDefinition::dimension(Dimension::ResourceId)]);
    assert!(grouped.validate().is_empty());

    let filtered = request.with_filter(Expression::from(DimensionValues::new(
        Dimension::Service,
        ["Amazon Elastic Compute Cloud - Compute"],
    )));
    assert!(filtered.validate().is_empty());
}

#[test]
fn test_reservation_utilization_rejects_hourly() {
    let request = GetReservationUtilizationRequest::new(january()).with_granularity(Granularity::Hourly);
    let report = request.validate();
    assert!(report.has_issue_at("Granularity"));
    assert!(matches!(
        report.issues()[0].kind,
        IssueKind::Unsupported { .. }
    ));
}

#[test]
fn test_rightsizing_only_accepts_ec2() {
    assert!(GetRightsizingRecommendationRequest::ec2().validate().is_empty());
    let report = GetRightsizingRecommendationRequest::new("AmazonRDS").validate();
    assert!(report.has_issue_at("Service"));
}

#[test]
fn test_savings_plans_recommendation_request() {
    let request = GetSavingsPlansPurchaseRecommendationRequest::new(
        SupportedSavingsPlansType::ComputeSp,
        TermInYears::OneYear,
        PaymentOption::NoUpfront,
        LookbackPeriodInDays::ThirtyDays,
    );
    assert!(request.validate().is_empty());

    let body: serde_json::Value = serde_json::to_value(&request).unwrap();
    assert_eq!(body["SavingsPlansType"], "COMPUTE_SP");
    assert_eq!(body["TermInYears"], "ONE_YEAR");
    assert_eq!(body["PaymentOption"], "NO_UPFRONT");
    assert_eq!(body["LookbackPeriodInDays"], "THIRTY_DAYS");
}

#[test]
fn test_utilization_details_filter_dimensions() {
    let allowed = GetSavingsPlansUtilizationDetailsRequest::new(january())
        .with_filter(DimensionValues::new(Dimension::Region, ["us-east-1"]).into());
    assert!(allowed.validate().is_empty());

    let rejected = GetSavingsPlansUtilizationDetailsRequest::new(january())
        .with_filter(DimensionValues::new(Dimension::UsageType, ["BoxUsage"]).into());
    assert!(rejected.validate().has_issue_at("Filter.Dimensions.Key"));
}

#[test]
fn test_unknown_enum_values_survive_a_round_trip() {
    let document = r#"{"TimePeriod":{"Start":"2020-03-01","End":"2020-04-01"},"Metric":"CARBON_FOOTPRINT","Granularity":"MONTHLY"}"#;
    let request: GetCostForecastRequest = serde_json::from_str(document).unwrap();
    assert_eq!(request.metric, Metric::Unknown("CARBON_FOOTPRINT".to_string()));
    assert!(!request.metric.is_known());
    assert_eq!(serde_json::to_string(&request).unwrap(), document);

    let report = request.validate();
    assert!(report.has_issue_at("Metric"));
}

#[test]
fn test_decode_cost_and_usage_response() {
    let body = br#"{
        "GroupDefinitions": [{"Type": "DIMENSION", "Key": "SERVICE"}],
        "ResultsByTime": [{
            "TimePeriod": {"Start": "2020-01-01", "End": "2020-02-01"},
            "Total": {"UnblendedCost": {"Amount": "12.3400000001", "Unit": "USD"}},
            "Groups": [],
            "Estimated": false
        }],
        "NewFieldFromTheFuture": true
    }"#;

    let response = decode_response::<GetCostAndUsageRequest>(body).unwrap();
    assert!(response.next_page_token.is_none());
    assert_eq!(response.group_definitions.len(), 1);
    assert_eq!(response.results_by_time[0].estimated, Some(false));
    assert_eq!(
        response.results_by_time[0].total_amount("UnblendedCost"),
        Some("12.3400000001")
    );
}

#[test]
fn test_decode_rightsizing_response() {
    let body = br#"{
        "RightsizingRecommendations": [{
            "AccountId": "123456789012",
            "RightsizingType": "TERMINATE",
            "CurrentInstance": {
                "ResourceId": "i-0abc",
                "ResourceDetails": {"EC2ResourceDetails": {"InstanceType": "m5.large"}}
            },
            "TerminateRecommendationDetail": {"EstimatedMonthlySavings": "70.08", "CurrencyCode": "USD"}
        }],
        "Summary": {"TotalRecommendationCount": "1"}
    }"#;

    let response = decode_response::<GetRightsizingRecommendationRequest>(body).unwrap();
    let recommendation = &response.rightsizing_recommendations[0];
    assert_eq!(recommendation.rightsizing_type, Some(RightsizingType::Terminate));
    assert_eq!(recommendation.estimated_monthly_savings(), Some("70.08"));
}

#[test]
fn test_decode_service_error() {
    let body = br#"{"__type": "com.amazon.insights#LimitExceededException", "message": "Rate exceeded"}"#;

    let error = decode_service_error(body).unwrap();
    assert_eq!(error.kind, ServiceErrorKind::LimitExceeded);
    assert!(error.is_throttling());
    assert_eq!(error.message.as_deref(), Some("Rate exceeded"));

    match decode_response::<GetCostForecastRequest>(body) {
        Err(CostExplorerError::Service(error)) => {
            assert_eq!(error.kind, ServiceErrorKind::LimitExceeded);
        }
        other => panic!("Expected service error, got {other:?}"),
    }
}

#[test]
fn test_empty_response_body_is_default() {
    let response = decode_response::<GetCostForecastRequest>(b"").unwrap();
    assert_eq!(response, Default::default());
}

#[test]
fn test_every_operation_has_a_distinct_target() {
    let mut targets: Vec<String> = OperationName::ALL.iter().map(|op| op.target()).collect();
    assert_eq!(targets.len(), 19);
    targets.sort();
    targets.dedup();
    assert_eq!(targets.len(), 19);

    assert_eq!(
        <GetCostForecastRequest as Operation>::target(),
        OperationName::GetCostForecast.target()
    );
    assert_eq!(
        "AWSInsightsIndexService.GetTags".parse::<OperationName>().unwrap(),
        OperationName::GetTags
    );
}
