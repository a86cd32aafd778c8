//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;
use std::path::Path;

use outlay_core::{ForecastConfig, Forecaster, InputFormat};

use crate::commands;

const TWO_MONTHS_JSON: &str = r#"[
    {"date": "2024-01-15T00:00:00.000Z", "amount": 100, "category": "Food"},
    {"date": "2024-02-15T00:00:00.000Z", "amount": 200, "category": "Rent"}
]"#;

const FOUR_MONTHS_CSV: &str = "Date,Description,Amount\n\
    2024-01-05,GROCERY,100.00\n\
    2024-02-05,GROCERY,200.00\n\
    2024-03-05,GROCERY,400.00\n\
    2024-04-05,GROCERY,800.00\n";

fn write_temp(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn render(input: &str, format: InputFormat, insights: bool) -> serde_json::Value {
    let output = commands::render_forecast(
        &Forecaster::default(),
        input.as_bytes(),
        format,
        false,
        insights,
    )
    .unwrap();
    serde_json::from_str(&output).unwrap()
}

// ========== Format Resolution Tests ==========

#[test]
fn test_resolve_format_explicit() {
    let format = commands::resolve_format(Some("csv"), Some(Path::new("data.json"))).unwrap();
    assert_eq!(format, InputFormat::Csv);
}

#[test]
fn test_resolve_format_from_extension() {
    assert_eq!(
        commands::resolve_format(None, Some(Path::new("export.CSV"))).unwrap(),
        InputFormat::Csv
    );
    assert_eq!(
        commands::resolve_format(None, Some(Path::new("export.json"))).unwrap(),
        InputFormat::Json
    );
    assert_eq!(commands::resolve_format(None, None).unwrap(), InputFormat::Json);
}

#[test]
fn test_resolve_format_unknown() {
    let result = commands::resolve_format(Some("xml"), None);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Unknown input format"));
}

// ========== Forecast Rendering Tests ==========

#[test]
fn test_render_forecast_success() {
    let json = render(TWO_MONTHS_JSON, InputFormat::Json, false);

    assert_eq!(json["success"], true);
    assert_eq!(json["prediction"]["method"], "linear");
    assert_eq!(json["historical"]["values"][0], 100.0);
    assert!(json["all_models"]["polynomial"].is_null());
    assert!(json.get("insights").is_none());
}

#[test]
fn test_render_forecast_with_insights() {
    let json = render(FOUR_MONTHS_CSV, InputFormat::Csv, true);

    assert_eq!(json["success"], true);
    assert_eq!(json["trend"]["trend"], "increasing");
    let insights = json["insights"].as_array().unwrap();
    assert!(!insights.is_empty());
    assert!(insights.iter().all(|i| i["type"].is_string()));
}

#[test]
fn test_render_forecast_failures_are_in_band() {
    let json = render("[]", InputFormat::Json, false);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "No transaction data provided");

    let json = render(
        r#"[{"date": "2024-01-15", "amount": 5}]"#,
        InputFormat::Json,
        false,
    );
    assert_eq!(json["success"], false);
    assert_eq!(
        json["error"],
        "Insufficient data for prediction (minimum 2 months required)"
    );

    let json = render("not json", InputFormat::Json, true);
    assert_eq!(json["success"], false);
    assert!(json.get("prediction").is_none());
}

#[test]
fn test_render_forecast_pretty() {
    let output = commands::render_forecast(
        &Forecaster::default(),
        TWO_MONTHS_JSON.as_bytes(),
        InputFormat::Json,
        true,
        false,
    )
    .unwrap();
    assert!(output.contains("\n  \"success\": true"));
}

#[test]
fn test_render_forecast_custom_config() {
    let mut config = ForecastConfig::default();
    config.forecast.horizon = 2;
    let output = commands::render_forecast(
        &Forecaster::new(config),
        TWO_MONTHS_JSON.as_bytes(),
        InputFormat::Json,
        false,
        false,
    )
    .unwrap();

    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["forecast_months"].as_array().unwrap().len(), 2);
    assert_eq!(json["prediction"]["next_3_months"].as_array().unwrap().len(), 2);
}

// ========== Command Tests ==========

#[test]
fn test_cmd_forecast_json_file() {
    let file = write_temp(TWO_MONTHS_JSON, ".json");
    let result = commands::cmd_forecast(None, Some(file.path()), None, false, false);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_forecast_missing_file_is_in_band() {
    let result = commands::cmd_forecast(
        None,
        Some(Path::new("/nonexistent/transactions.json")),
        None,
        false,
        false,
    );
    assert!(result.is_ok());
}

#[test]
fn test_cmd_forecast_bad_config() {
    let config = write_temp("[forecast]\nhorizon = 0\n", ".toml");
    let file = write_temp(TWO_MONTHS_JSON, ".json");
    let result = commands::cmd_forecast(Some(config.path()), Some(file.path()), None, false, false);
    assert!(result.is_err());
}

#[test]
fn test_cmd_report_csv_file() {
    let file = write_temp(FOUR_MONTHS_CSV, ".csv");
    let result = commands::cmd_report(None, Some(file.path()), None);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_report_insufficient_data() {
    let file = write_temp(r#"[{"date": "2024-01-15", "amount": 5}]"#, ".json");
    let result = commands::cmd_report(None, Some(file.path()), None);
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("minimum 2 months required"));
}

#[test]
fn test_cmd_report_missing_file() {
    let result = commands::cmd_report(None, Some(Path::new("/nonexistent/t.csv")), None);
    assert!(result.is_err());
}

#[test]
fn test_cmd_config() {
    assert!(commands::cmd_config(None).is_ok());

    let config = write_temp("[trend]\ngrowth_threshold = 8.0\n", ".toml");
    assert!(commands::cmd_config(Some(config.path())).is_ok());
}
