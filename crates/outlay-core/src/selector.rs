//! Model selection across predictor outputs

use crate::error::{Error, Result};
use crate::models::{AllModels, PredictionMethod, PredictionResult};

/// Pick the candidate with the highest confidence.
///
/// Only a strictly higher confidence replaces the current best, so exact
/// ties go to the earliest candidate.
pub fn select_best<'a, I>(candidates: I) -> Result<&'a PredictionResult>
where
    I: IntoIterator<Item = &'a PredictionResult>,
{
    let mut best: Option<&PredictionResult> = None;

    for candidate in candidates {
        match best {
            Some(current) if candidate.confidence <= current.confidence => {}
            // NaN confidence never wins
            _ if candidate.confidence.is_nan() => {}
            _ => best = Some(candidate),
        }
    }

    best.ok_or(Error::NoModelAvailable)
}

/// Select among all available models in the fixed order
/// linear, polynomial, moving average
pub fn select_from(models: &AllModels) -> Result<&PredictionResult> {
    select_best(
        PredictionMethod::all()
            .iter()
            .filter_map(|method| models.get(*method)),
    )
}
