//! Forecast assembly - the pipeline entry point
//!
//! transactions → monthly buckets → {predictor ensemble, trend analysis}
//! → model selection → [`ForecastReport`]
//!
//! [`Forecaster::respond`] is the boundary form: it never fails, turning
//! every error into `{success: false, error}`.

use std::io::Read;

use chrono::{Duration, NaiveDate};
use tracing::{debug, info, warn};

use crate::aggregate::{aggregate_monthly, monthly_totals};
use crate::config::ForecastConfig;
use crate::error::{Error, Result};
use crate::import::{parse_input, parse_json, InputFormat};
use crate::insights::prediction_insights;
use crate::models::{
    BestPrediction, ForecastReport, ForecastResponse, Historical, PredictionMethod, Transaction,
};
use crate::predict::PredictorEnsemble;
use crate::selector::select_from;
use crate::stats::summarize;
use crate::trend::analyze_trend_with;

/// Days added per forecast month label (approximate, not calendar-exact)
const DAYS_PER_FORECAST_MONTH: i64 = 30;

/// Forecast with the default configuration
pub fn generate_forecast(transactions: &[Transaction]) -> Result<ForecastReport> {
    Forecaster::default().forecast(transactions)
}

/// Parse a JSON payload and forecast with the default configuration,
/// reporting failures in-band
pub fn forecast_json(payload: &str) -> ForecastResponse {
    let forecaster = Forecaster::default();
    forecaster.respond(parse_json(payload), false)
}

/// Labels (`YYYY-MM`) for the months after `last_anchor`, stepping 30 days
pub fn forecast_month_labels(last_anchor: NaiveDate, count: usize) -> Vec<String> {
    (1..=count as i64)
        .map(|i| {
            (last_anchor + Duration::days(DAYS_PER_FORECAST_MONTH * i))
                .format("%Y-%m")
                .to_string()
        })
        .collect()
}

/// Reject reports carrying NaN or infinite numbers, which JSON cannot hold
fn ensure_finite(report: &ForecastReport) -> Result<()> {
    let prediction = &report.prediction;
    let statistics = &report.statistics;
    let trend = &report.trend;

    let fields = [
        ("prediction.next_month", prediction.next_month),
        ("prediction.confidence", prediction.confidence),
        ("trend.growth_rate", trend.growth_rate),
        ("trend.coefficient_of_variation", trend.coefficient_of_variation),
        ("statistics.average", statistics.average),
        ("statistics.min", statistics.min),
        ("statistics.max", statistics.max),
        ("statistics.std_dev", statistics.std_dev),
        ("statistics.last_month", statistics.last_month),
    ];
    if let Some((name, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
        return Err(Error::NonFinite((*name).to_string()));
    }

    if prediction.next_3_months.iter().any(|v| !v.is_finite()) {
        return Err(Error::NonFinite("prediction.next_3_months".into()));
    }

    for method in PredictionMethod::all() {
        if let Some(result) = report.all_models.get(*method) {
            let finite = result.confidence.is_finite()
                && result.predictions.iter().all(|v| v.is_finite());
            if !finite {
                return Err(Error::NonFinite(format!("all_models.{}", method)));
            }
        }
    }

    Ok(())
}

/// Runs the forecasting pipeline under a configuration
pub struct Forecaster {
    config: ForecastConfig,
    ensemble: PredictorEnsemble,
}

impl Default for Forecaster {
    fn default() -> Self {
        Self::new(ForecastConfig::default())
    }
}

impl Forecaster {
    pub fn new(config: ForecastConfig) -> Self {
        let ensemble = PredictorEnsemble::with_window(config.forecast.moving_average_window);
        Self { config, ensemble }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Build a forecast report from raw transactions
    pub fn forecast(&self, transactions: &[Transaction]) -> Result<ForecastReport> {
        if transactions.is_empty() {
            return Err(Error::NoTransactions);
        }

        let buckets = aggregate_monthly(transactions)?;
        let settings = &self.config.forecast;

        if buckets.len() < settings.min_months {
            return Err(Error::InsufficientData {
                required: settings.min_months,
            });
        }

        let totals = monthly_totals(&buckets);
        if let Some(bucket) = buckets.iter().find(|b| !b.total.is_finite()) {
            return Err(Error::NonFinite(format!(
                "total for {} overflowed",
                bucket.label()
            )));
        }
        debug!(months = totals.len(), "Aggregated monthly totals");

        let all_models = self.ensemble.run_all(&totals, settings.horizon)?;
        let best = select_from(&all_models)?;

        let next_month = *best
            .predictions
            .first()
            .ok_or_else(|| Error::DegenerateFit("model produced no predictions".into()))?;

        let prediction = BestPrediction {
            next_month,
            next_3_months: best.predictions.clone(),
            confidence: best.confidence,
            method: best.method,
        };

        let last_anchor = buckets
            .last()
            .map(|b| b.anchor_date)
            .ok_or(Error::InsufficientData {
                required: settings.min_months,
            })?;

        let statistics = summarize(&totals).ok_or(Error::InsufficientData {
            required: settings.min_months,
        })?;

        let report = ForecastReport {
            prediction,
            historical: Historical {
                months: buckets.iter().map(|b| b.label()).collect(),
                values: totals.clone(),
            },
            forecast_months: forecast_month_labels(last_anchor, settings.horizon),
            trend: analyze_trend_with(&totals, &self.config.trend),
            statistics,
            all_models,
        };
        ensure_finite(&report)?;

        info!(
            months = totals.len(),
            method = report.prediction.method.as_str(),
            confidence = report.prediction.confidence,
            next_month = report.prediction.next_month,
            "Forecast generated"
        );

        Ok(report)
    }

    /// Read a payload and forecast, reporting failures in-band
    pub fn forecast_reader<R: Read>(
        &self,
        reader: R,
        format: InputFormat,
        with_insights: bool,
    ) -> ForecastResponse {
        self.respond(parse_input(reader, format), with_insights)
    }

    /// Turn parsed input into a boundary response
    pub fn respond(
        &self,
        transactions: Result<Vec<Transaction>>,
        with_insights: bool,
    ) -> ForecastResponse {
        let result = transactions.and_then(|txs| self.forecast(&txs));

        match result {
            Ok(report) => {
                let insights =
                    with_insights.then(|| prediction_insights(&report, &self.config.insights));
                let response = ForecastResponse::success(report);
                match insights {
                    Some(insights) => response.with_insights(insights),
                    None => response,
                }
            }
            Err(e) => {
                warn!(error = %e, "Forecast failed");
                ForecastResponse::failure(e.to_string())
            }
        }
    }
}
