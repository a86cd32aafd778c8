//! Quadratic trend predictor

use crate::error::Result;
use crate::models::{PredictionMethod, PredictionResult};

use super::ols::PolynomialFit;
use super::{extrapolate, series_indices, Predictor};

/// Degree of the polynomial fit. Fixed: higher degrees overfit the short
/// series this runs on.
pub const POLYNOMIAL_DEGREE: usize = 2;

/// Fits `a + b*x + c*x^2` to the monthly totals, capturing mild
/// acceleration or deceleration in spending
pub struct PolynomialPredictor;

impl PolynomialPredictor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PolynomialPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl Predictor for PolynomialPredictor {
    fn id(&self) -> PredictionMethod {
        PredictionMethod::Polynomial
    }

    fn min_points(&self) -> usize {
        POLYNOMIAL_DEGREE + 1
    }

    fn predict(&self, totals: &[f64], horizon: usize) -> Result<Option<PredictionResult>> {
        if totals.len() < self.min_points() {
            return Ok(None);
        }

        let xs = series_indices(totals.len());
        let fit = PolynomialFit::fit(&xs, totals, POLYNOMIAL_DEGREE)?;

        Ok(Some(PredictionResult {
            predictions: extrapolate(&fit, totals.len(), horizon),
            confidence: fit.r_squared(&xs, totals),
            method: self.id(),
        }))
    }
}
