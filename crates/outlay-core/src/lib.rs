//! Outlay Core Library
//!
//! Monthly expense forecasting from raw transactions:
//! - Transaction parsing (JSON payloads, CSV exports)
//! - Monthly aggregation
//! - Predictor ensemble (linear, polynomial, moving average)
//! - Confidence-based model selection
//! - Trend and volatility analysis
//! - Forecast report assembly and plain-language insights
//!
//! Every forecast is a pure, one-shot computation over the transactions
//! supplied; nothing is persisted between invocations.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod forecast;
pub mod import;
pub mod insights;
pub mod models;
pub mod predict;
pub mod selector;
pub mod stats;
pub mod trend;

pub use aggregate::{aggregate_monthly, monthly_totals};
pub use config::{ConfigSource, ForecastConfig};
pub use error::{Error, Result};
pub use forecast::{forecast_json, generate_forecast, Forecaster};
pub use import::{parse_csv, parse_input, parse_json, InputFormat};
pub use insights::prediction_insights;
pub use models::{
    ForecastReport, ForecastResponse, MonthBucket, PredictionInsight, PredictionMethod,
    PredictionResult, Transaction, Trend, TrendResult, Volatility,
};
pub use predict::{Predictor, PredictorEnsemble};
pub use selector::select_best;
pub use trend::analyze_trend;
