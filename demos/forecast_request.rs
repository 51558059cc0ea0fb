//! Building, validating and encoding a cost forecast request
//!
//! Run with `cargo run --example forecast_request`.

use costexp::{
    CostExplorerError, DateInterval, Dimension, DimensionValues, Expression, Granularity, Metric,
    Validate,
    model::forecast::{GetCostForecastRequest, GetCostForecastResponse},
    model::operation::{decode_response, encode_request},
};

fn main() -> Result<(), CostExplorerError> {
    tracing_subscriber::fmt::init();

    let request = GetCostForecastRequest::new(
        DateInterval::new("2020-03-01", "2020-04-01"),
        Metric::UnblendedCost,
        Granularity::Monthly,
    )
    .with_filter(Expression::and([
        DimensionValues::new(Dimension::Region, ["us-east-1", "us-west-1"]).into(),
        !Expression::from(DimensionValues::new(Dimension::UsageType, ["DataTransfer"])),
    ]))
    .with_prediction_interval_level(100);

    // Construction never fails; validation is a separate step
    let report = request.validate();
    println!("Validation found {} issue(s):", report.len());
    for issue in report.issues() {
        println!("  {issue}");
    }

    let request = request.with_prediction_interval_level(80);
    request.validate().into_result()?;

    let envelope = encode_request(&request)?;
    println!("\nRequest envelope:");
    for (name, value) in envelope.headers() {
        println!("  {name}: {value}");
    }
    println!("  {}", envelope.body);

    let body = br#"{
        "Total": {"Amount": "1234.56", "Unit": "USD"},
        "ForecastResultsByTime": [{
            "TimePeriod": {"Start": "2020-03-01", "End": "2020-04-01"},
            "MeanValue": "1234.56",
            "PredictionIntervalLowerBound": "1100.00",
            "PredictionIntervalUpperBound": "1369.12"
        }]
    }"#;
    let response: GetCostForecastResponse = decode_response::<GetCostForecastRequest>(body)?;

    println!("\nForecast:");
    if let Some(total) = &response.total {
        println!(
            "  Total: {} {}",
            total.amount.as_deref().unwrap_or("-"),
            total.unit.as_deref().unwrap_or("")
        );
    }
    for result in &response.forecast_results_by_time {
        println!(
            "  {} .. {}",
            result.prediction_interval_lower_bound.as_deref().unwrap_or("-"),
            result.prediction_interval_upper_bound.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
