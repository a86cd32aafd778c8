//! Linear trend predictor

use crate::error::Result;
use crate::models::{PredictionMethod, PredictionResult};

use super::ols::PolynomialFit;
use super::{extrapolate, series_indices, Predictor};

/// Fits a least-squares line through the monthly totals and extends it
pub struct LinearPredictor;

impl LinearPredictor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LinearPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl Predictor for LinearPredictor {
    fn id(&self) -> PredictionMethod {
        PredictionMethod::Linear
    }

    fn min_points(&self) -> usize {
        2
    }

    fn predict(&self, totals: &[f64], horizon: usize) -> Result<Option<PredictionResult>> {
        if totals.len() < self.min_points() {
            return Ok(None);
        }

        let xs = series_indices(totals.len());
        let fit = PolynomialFit::fit(&xs, totals, 1)?;

        Ok(Some(PredictionResult {
            predictions: extrapolate(&fit, totals.len(), horizon),
            confidence: fit.r_squared(&xs, totals),
            method: self.id(),
        }))
    }
}
