//! Integration tests for costexp CLI commands
//!
//! These tests write request documents to a temporary directory and run
//! them through the same command functions `main` dispatches to.

mod common;

use clap::Parser;
use common::{
    BROKEN_COST_AND_USAGE_DOCUMENT, COST_CATEGORY_DOCUMENT, DOCUMENTED_FILTER, DocumentDir,
    FORECAST_DOCUMENT, FORECAST_LEVEL_100_DOCUMENT,
};
use costexp::cli::{Cli, Command, FilterArgs};
use costexp::commands::{self, run_envelope, run_filter, run_operations, run_validate};
use costexp::error::CostexpError;
use costexp::output::{JsonFormatter, TableFormatter, get_formatter};
use costexp_core::expression::Expression;
use costexp_model::operation::OperationName;

#[test]
fn test_operations_command_lists_every_operation() {
    let output = run_operations(&JsonFormatter);
    assert!(output.success);

    let json: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    let operations = json["operations"].as_array().unwrap();
    assert_eq!(operations.len(), OperationName::ALL.len());
    assert_eq!(operations[0]["name"], "CreateCostCategoryDefinition");
    assert_eq!(
        operations[0]["target"],
        "AWSInsightsIndexService.CreateCostCategoryDefinition"
    );
}

#[test]
fn test_validate_valid_document() {
    let dir = DocumentDir::new();
    let args = dir.document_args("forecast.json", FORECAST_DOCUMENT, OperationName::GetCostForecast);

    let output = run_validate(&args, &TableFormatter::new(false)).unwrap();
    assert!(output.success);
    assert_eq!(output.text, "OK GetCostForecast request is valid");
}

#[test]
fn test_validate_reports_interval_level() {
    let dir = DocumentDir::new();
    let args = dir.document_args(
        "forecast.json",
        FORECAST_LEVEL_100_DOCUMENT,
        OperationName::GetCostForecast,
    );

    let output = run_validate(&args, &JsonFormatter).unwrap();
    assert!(!output.success);

    let json: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(json["operation"], "GetCostForecast");
    assert_eq!(json["valid"], false);
    assert_eq!(json["issues"][0]["path"], "PredictionIntervalLevel");
    assert_eq!(json["issues"][0]["actual"], 100);
}

#[test]
fn test_validate_collects_every_issue() {
    let dir = DocumentDir::new();
    let args = dir.document_args(
        "usage.json",
        BROKEN_COST_AND_USAGE_DOCUMENT,
        OperationName::GetCostAndUsage,
    );

    let output = run_validate(&args, &JsonFormatter).unwrap();
    assert!(!output.success);

    let json: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    let paths: Vec<&str> = json["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|issue| issue["path"].as_str().unwrap())
        .collect();
    assert!(paths.contains(&"TimePeriod"));
    assert!(paths.contains(&"Filter.And"));
    assert!(paths.contains(&"Metrics[1]"));
    assert_eq!(paths.len(), 3);
}

#[test]
fn test_validate_cost_category_document() {
    let dir = DocumentDir::new();
    let args = dir.document_args(
        "category.json",
        COST_CATEGORY_DOCUMENT,
        OperationName::CreateCostCategoryDefinition,
    );

    let output = run_validate(&args, &TableFormatter::new(false)).unwrap();
    assert!(output.success, "{}", output.text);
}

#[test]
fn test_document_for_wrong_operation_fails_to_parse() {
    let dir = DocumentDir::new();
    let args = dir.document_args(
        "forecast.json",
        FORECAST_DOCUMENT,
        OperationName::CreateCostCategoryDefinition,
    );

    let result = run_validate(&args, &JsonFormatter);
    assert!(matches!(result, Err(CostexpError::CostExplorer(_))));
}

#[test]
fn test_missing_document_names_the_path() {
    let dir = DocumentDir::new();
    let path = dir.missing("nowhere.json");
    let cli = Cli::parse_from([
        "costexp",
        "validate",
        path.to_str().unwrap(),
        "--operation",
        "GetCostForecast",
    ]);

    let error = commands::run(&cli.command, &JsonFormatter).unwrap_err();
    assert!(matches!(error, CostexpError::ReadDocument { .. }));
    assert!(error.to_string().contains("nowhere.json"));
}

#[test]
fn test_envelope_command() {
    let dir = DocumentDir::new();
    let args = dir.document_args("forecast.json", FORECAST_DOCUMENT, OperationName::GetCostForecast);

    let output = run_envelope(&args, &TableFormatter::new(false)).unwrap();
    assert!(output.success);

    let mut lines = output.text.lines();
    assert_eq!(
        lines.next(),
        Some("X-Amz-Target: AWSInsightsIndexService.GetCostForecast")
    );
    assert_eq!(
        lines.next(),
        Some("Content-Type: application/x-amz-json-1.1")
    );
    assert_eq!(lines.next(), Some(""));

    let body: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
    assert_eq!(body["PredictionIntervalLevel"], 80);
}

#[test]
fn test_envelope_is_produced_for_invalid_requests() {
    let dir = DocumentDir::new();
    let args = dir.document_args(
        "forecast.json",
        FORECAST_LEVEL_100_DOCUMENT,
        OperationName::GetCostForecast,
    );

    let output = run_envelope(&args, &JsonFormatter).unwrap();
    assert!(output.success);
    let json: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(json["body"]["PredictionIntervalLevel"], 100);
}

#[test]
fn test_filter_command_builds_documented_filter() {
    let cli = Cli::parse_from([
        "costexp",
        "--json",
        "filter",
        "--dimension",
        "REGION=us-east-1,us-west-1",
        "--exclude-dimension",
        "usage-type=DataTransfer",
    ]);
    let formatter = get_formatter(cli.json, false);

    let output = commands::run(&cli.command, formatter.as_ref()).unwrap();
    let built: Expression = serde_json::from_str(&output.text).unwrap();
    let expected: Expression = serde_json::from_str(DOCUMENTED_FILTER).unwrap();
    assert_eq!(built, expected);
}

#[test]
fn test_filter_command_without_predicates() {
    let result = run_filter(&FilterArgs::default(), &JsonFormatter);
    assert!(matches!(result, Err(CostexpError::EmptyFilter)));
}

#[test]
fn test_operation_from_environment() {
    // Only this test reads COSTEXP_OPERATION
    unsafe { std::env::set_var("COSTEXP_OPERATION", "GetTags") };
    let cli = Cli::try_parse_from(["costexp", "validate", "tags.json"]);
    unsafe { std::env::remove_var("COSTEXP_OPERATION") };

    match cli.unwrap().command {
        Command::Validate(args) => assert_eq!(args.operation, OperationName::GetTags),
        other => panic!("Expected Validate command, got {other:?}"),
    }
}
