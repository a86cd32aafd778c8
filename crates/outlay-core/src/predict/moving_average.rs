//! Moving average predictor

use crate::error::Result;
use crate::models::{PredictionMethod, PredictionResult};
use crate::stats::{mean, std_dev};

use super::Predictor;

/// Preferred number of trailing months to average
pub const DEFAULT_WINDOW: usize = 3;

/// Flat forecast at the mean of the last `window` months.
///
/// No slope is extrapolated. Confidence is `1 - stddev / (mean + 1)`
/// over the window, floored at zero.
pub struct MovingAveragePredictor {
    window: usize,
}

impl MovingAveragePredictor {
    pub fn new() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }

    pub fn with_window(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for MovingAveragePredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl Predictor for MovingAveragePredictor {
    fn id(&self) -> PredictionMethod {
        PredictionMethod::MovingAverage
    }

    fn min_points(&self) -> usize {
        1
    }

    fn predict(&self, totals: &[f64], horizon: usize) -> Result<Option<PredictionResult>> {
        if totals.len() < self.min_points() {
            return Ok(None);
        }

        // Window shrinks to the whole series when history is short
        let window = self.window.min(totals.len());
        let recent = &totals[totals.len() - window..];

        let recent_avg = mean(recent);
        let confidence = (1.0 - std_dev(recent) / (recent_avg + 1.0)).max(0.0);

        Ok(Some(PredictionResult {
            predictions: vec![recent_avg; horizon],
            confidence,
            method: self.id(),
        }))
    }
}
