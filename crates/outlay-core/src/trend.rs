//! Trend and volatility analysis of monthly totals

use crate::config::TrendSettings;
use crate::models::{Trend, TrendResult, Volatility};
use crate::stats::{mean, std_dev};

/// Number of trailing months treated as "recent"
const RECENT_MONTHS: usize = 3;

/// Classify spending direction and volatility with default thresholds
pub fn analyze_trend(totals: &[f64]) -> TrendResult {
    analyze_trend_with(totals, &TrendSettings::default())
}

/// Classify spending direction and volatility.
///
/// Growth compares the mean of the last three months with the mean of
/// everything before them. With three or fewer months it compares the
/// last value (or the last three) with the first value instead.
pub fn analyze_trend_with(totals: &[f64], settings: &TrendSettings) -> TrendResult {
    let n = totals.len();
    if n < 2 {
        return TrendResult::degenerate();
    }

    let recent_avg = if n >= RECENT_MONTHS {
        mean(&totals[n - RECENT_MONTHS..])
    } else {
        totals[n - 1]
    };
    let older_avg = if n > RECENT_MONTHS {
        mean(&totals[..n - RECENT_MONTHS])
    } else {
        totals[0]
    };

    let growth_rate = (recent_avg - older_avg) / (older_avg + 1.0) * 100.0;

    let trend = if growth_rate > settings.growth_threshold {
        Trend::Increasing
    } else if growth_rate < -settings.growth_threshold {
        Trend::Decreasing
    } else {
        Trend::Stable
    };

    let coefficient_of_variation = std_dev(totals) / (mean(totals) + 1.0) * 100.0;

    let volatility = if coefficient_of_variation < settings.volatility_low {
        Volatility::Low
    } else if coefficient_of_variation < settings.volatility_medium {
        Volatility::Medium
    } else {
        Volatility::High
    };

    TrendResult {
        trend,
        growth_rate,
        volatility,
        coefficient_of_variation,
    }
}
