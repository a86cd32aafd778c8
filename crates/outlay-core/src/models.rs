//! Domain models for Outlay

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A parsed transaction, consumed by aggregation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transaction {
    /// Calendar date as written in the input (no timezone conversion)
    pub date: NaiveDate,
    pub amount: f64,
}

impl Transaction {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }
}

/// Aggregated spending for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub total: f64,
    pub count: usize,
    /// First day of the month
    pub anchor_date: NaiveDate,
}

impl MonthBucket {
    /// Month label in `YYYY-MM` form
    pub fn label(&self) -> String {
        self.anchor_date.format("%Y-%m").to_string()
    }
}

/// Forecasting strategy that produced a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMethod {
    Linear,
    Polynomial,
    MovingAverage,
}

impl PredictionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Polynomial => "polynomial",
            Self::MovingAverage => "moving_average",
        }
    }

    /// Human-readable method name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Linear => "Linear Regression",
            Self::Polynomial => "Polynomial Regression",
            Self::MovingAverage => "Moving Average",
        }
    }

    /// All methods in selection tie-break order
    pub fn all() -> &'static [PredictionMethod] {
        &[Self::Linear, Self::Polynomial, Self::MovingAverage]
    }
}

impl std::str::FromStr for PredictionMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "polynomial" => Ok(Self::Polynomial),
            "moving_average" | "moving-average" => Ok(Self::MovingAverage),
            _ => Err(format!("Unknown prediction method: {}", s)),
        }
    }
}

impl std::fmt::Display for PredictionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output of a single forecasting strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// One non-negative value per forecast month
    pub predictions: Vec<f64>,
    /// Ranking score (R² for regressions), not a calibrated probability
    pub confidence: f64,
    pub method: PredictionMethod,
}

/// Direction of recent spending relative to older history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spending volatility band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Volatility {
    Low,
    Medium,
    High,
}

impl Volatility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Volatility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub trend: Trend,
    /// Percent change of recent months over older months
    pub growth_rate: f64,
    pub volatility: Volatility,
    pub coefficient_of_variation: f64,
}

impl TrendResult {
    /// Result used when there is not enough history to compare
    pub fn degenerate() -> Self {
        Self {
            trend: Trend::Stable,
            growth_rate: 0.0,
            volatility: Volatility::Low,
            coefficient_of_variation: 0.0,
        }
    }
}

/// Summary statistics over the monthly totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    pub last_month: f64,
}

/// The selected model's forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestPrediction {
    pub next_month: f64,
    pub next_3_months: Vec<f64>,
    pub confidence: f64,
    pub method: PredictionMethod,
}

/// Monthly history as parallel label/value arrays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Historical {
    pub months: Vec<String>,
    pub values: Vec<f64>,
}

/// Every strategy's raw output; `None` when its precondition failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllModels {
    pub linear: Option<PredictionResult>,
    pub polynomial: Option<PredictionResult>,
    pub moving_average: Option<PredictionResult>,
}

impl AllModels {
    pub fn get(&self, method: PredictionMethod) -> Option<&PredictionResult> {
        match method {
            PredictionMethod::Linear => self.linear.as_ref(),
            PredictionMethod::Polynomial => self.polynomial.as_ref(),
            PredictionMethod::MovingAverage => self.moving_average.as_ref(),
        }
    }
}

/// Complete forecast for one invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub prediction: BestPrediction,
    pub historical: Historical,
    pub forecast_months: Vec<String>,
    pub trend: TrendResult,
    pub statistics: Statistics,
    pub all_models: AllModels,
}

/// Kind of advice attached to a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Positive,
    Info,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Positive => "positive",
            Self::Info => "info",
        }
    }
}

impl std::fmt::Display for InsightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionInsight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub message: String,
}

impl PredictionInsight {
    pub fn new(kind: InsightKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Boundary response: a report on success, an error message otherwise
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: Option<ForecastReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<Vec<PredictionInsight>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ForecastResponse {
    pub fn success(report: ForecastReport) -> Self {
        Self {
            success: true,
            report: Some(report),
            insights: None,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            report: None,
            insights: None,
            error: Some(error.into()),
        }
    }

    pub fn with_insights(mut self, insights: Vec<PredictionInsight>) -> Self {
        self.insights = Some(insights);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_method_tags() {
        assert_eq!(PredictionMethod::MovingAverage.as_str(), "moving_average");
        assert_eq!(
            serde_json::to_value(PredictionMethod::Linear).unwrap(),
            serde_json::json!("linear")
        );
        assert_eq!(
            "moving-average".parse::<PredictionMethod>().unwrap(),
            PredictionMethod::MovingAverage
        );
        assert!("arima".parse::<PredictionMethod>().is_err());
    }

    #[test]
    fn test_prediction_method_labels() {
        assert_eq!(PredictionMethod::Linear.label(), "Linear Regression");
        assert_eq!(PredictionMethod::Polynomial.label(), "Polynomial Regression");
        assert_eq!(PredictionMethod::MovingAverage.label(), "Moving Average");
    }

    #[test]
    fn test_month_bucket_label() {
        let bucket = MonthBucket {
            year: 2024,
            month: 3,
            total: 10.0,
            count: 1,
            anchor_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        assert_eq!(bucket.label(), "2024-03");
    }

    #[test]
    fn test_failure_response_shape() {
        let json = serde_json::to_value(ForecastResponse::failure("boom")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "boom"}));
    }
}
