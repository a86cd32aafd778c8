//! Predictor Ensemble - competing monthly spending forecasts
//!
//! Each predictor is a stateless strategy over the ordered monthly totals.
//! Strategies share nothing but a read-only slice, so the ensemble runs
//! them on the rayon pool and collects results in registration order.
//!
//! ## Built-in Predictors
//!
//! - **Linear** - least-squares line, confidence = R²
//! - **Polynomial** - degree-2 least squares, confidence = R²
//! - **Moving Average** - flat mean of the last 3 months

pub mod linear;
pub mod moving_average;
pub mod ols;
pub mod polynomial;

use rayon::prelude::*;

use crate::error::Result;
use crate::models::{AllModels, PredictionMethod, PredictionResult};

pub use linear::LinearPredictor;
pub use moving_average::MovingAveragePredictor;
pub use ols::PolynomialFit;
pub use polynomial::{PolynomialPredictor, POLYNOMIAL_DEGREE};

/// A forecasting strategy
pub trait Predictor: Send + Sync {
    /// Method tag for results of this predictor
    fn id(&self) -> PredictionMethod;

    /// Human-readable name
    fn name(&self) -> &'static str {
        self.id().label()
    }

    /// Minimum series length this predictor needs
    fn min_points(&self) -> usize;

    /// Forecast `horizon` months past the end of `totals`.
    ///
    /// Returns `Ok(None)` when the series is shorter than `min_points`.
    fn predict(&self, totals: &[f64], horizon: usize) -> Result<Option<PredictionResult>>;
}

/// Month positions `0..n` as regression inputs
pub(crate) fn series_indices(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

/// Evaluate a fit at positions `n..n+horizon`; expenses cannot be negative
pub(crate) fn extrapolate(fit: &PolynomialFit, n: usize, horizon: usize) -> Vec<f64> {
    (0..horizon)
        .map(|i| fit.evaluate((n + i) as f64).max(0.0))
        .collect()
}

/// Runs every registered predictor over the same series
pub struct PredictorEnsemble {
    predictors: Vec<Box<dyn Predictor>>,
}

impl Default for PredictorEnsemble {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictorEnsemble {
    /// Ensemble with the built-in predictors
    pub fn new() -> Self {
        Self::with_window(moving_average::DEFAULT_WINDOW)
    }

    /// Built-in predictors with a custom moving-average window
    pub fn with_window(window: usize) -> Self {
        let mut ensemble = Self { predictors: vec![] };

        // Registration order is the selection tie-break order
        ensemble.register(Box::new(LinearPredictor::new()));
        ensemble.register(Box::new(PolynomialPredictor::new()));
        ensemble.register(Box::new(MovingAveragePredictor::with_window(window)));

        ensemble
    }

    /// Register a predictor
    pub fn register(&mut self, predictor: Box<dyn Predictor>) {
        self.predictors.push(predictor);
    }

    /// Run all predictors in parallel, results in registration order
    pub fn run(&self, totals: &[f64], horizon: usize) -> Result<Vec<Option<PredictionResult>>> {
        let results: Vec<Result<Option<PredictionResult>>> = self
            .predictors
            .par_iter()
            .map(|p| p.predict(totals, horizon))
            .collect();

        let mut outputs = Vec::with_capacity(results.len());
        for (predictor, result) in self.predictors.iter().zip(results) {
            let output = result?;
            match &output {
                Some(r) => tracing::debug!(
                    predictor = predictor.name(),
                    confidence = r.confidence,
                    predictions = ?r.predictions,
                    "Predictor complete"
                ),
                None => tracing::debug!(
                    predictor = predictor.name(),
                    needed = predictor.min_points(),
                    got = totals.len(),
                    "Predictor skipped: series too short"
                ),
            }
            outputs.push(output);
        }

        Ok(outputs)
    }

    /// Run all predictors and key the results by method
    pub fn run_all(&self, totals: &[f64], horizon: usize) -> Result<AllModels> {
        let mut models = AllModels {
            linear: None,
            polynomial: None,
            moving_average: None,
        };

        for result in self.run(totals, horizon)?.into_iter().flatten() {
            let slot = match result.method {
                PredictionMethod::Linear => &mut models.linear,
                PredictionMethod::Polynomial => &mut models.polynomial,
                PredictionMethod::MovingAverage => &mut models.moving_average,
            };
            *slot = Some(result);
        }

        Ok(models)
    }

    /// Methods of the registered predictors
    pub fn methods(&self) -> Vec<PredictionMethod> {
        self.predictors.iter().map(|p| p.id()).collect()
    }
}
