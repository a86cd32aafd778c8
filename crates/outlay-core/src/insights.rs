//! Plain-language insights about a forecast

use crate::config::InsightSettings;
use crate::models::{ForecastReport, InsightKind, PredictionInsight, Trend, Volatility};

/// Explain a forecast relative to the user's own history
pub fn prediction_insights(
    report: &ForecastReport,
    settings: &InsightSettings,
) -> Vec<PredictionInsight> {
    let mut insights = Vec::new();
    let average = report.statistics.average;
    let next_month = report.prediction.next_month;

    // 1. Next month against the historical average
    let percent_diff = if average > 0.0 {
        Some((next_month - average) / average * 100.0)
    } else {
        None
    };

    match percent_diff {
        Some(diff) if diff > settings.deviation_threshold => {
            insights.push(PredictionInsight::new(
                InsightKind::Warning,
                format!(
                    "Expected spending is {:.1}% higher than your average. Plan accordingly.",
                    diff
                ),
            ));
        }
        Some(diff) if diff < -settings.deviation_threshold => {
            insights.push(PredictionInsight::new(
                InsightKind::Positive,
                format!(
                    "Expected spending is {:.1}% lower than average. Great progress!",
                    diff.abs()
                ),
            ));
        }
        _ => {
            insights.push(PredictionInsight::new(
                InsightKind::Info,
                "Expected spending is consistent with your average.",
            ));
        }
    }

    // 2. Trend direction
    match report.trend.trend {
        Trend::Increasing => insights.push(PredictionInsight::new(
            InsightKind::Warning,
            format!(
                "Your spending trend is increasing by {:.1}% per month.",
                report.trend.growth_rate
            ),
        )),
        Trend::Decreasing => insights.push(PredictionInsight::new(
            InsightKind::Positive,
            format!(
                "Your spending trend is decreasing by {:.1}% per month.",
                report.trend.growth_rate.abs()
            ),
        )),
        Trend::Stable => {}
    }

    // 3. Volatility
    if report.trend.volatility == Volatility::High {
        insights.push(PredictionInsight::new(
            InsightKind::Info,
            "Your spending is quite variable. Consider budgeting to stabilize expenses.",
        ));
    }

    // 4. Confidence
    if report.prediction.confidence < settings.low_confidence {
        insights.push(PredictionInsight::new(
            InsightKind::Info,
            "Prediction confidence is moderate. Add more expense data for better accuracy.",
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AllModels, BestPrediction, Historical, PredictionMethod, Statistics, TrendResult,
    };

    fn report(next_month: f64, average: f64, trend: TrendResult, confidence: f64) -> ForecastReport {
        ForecastReport {
            prediction: BestPrediction {
                next_month,
                next_3_months: vec![next_month; 3],
                confidence,
                method: PredictionMethod::MovingAverage,
            },
            historical: Historical {
                months: vec!["2024-01".into(), "2024-02".into()],
                values: vec![average, average],
            },
            forecast_months: vec!["2024-03".into(), "2024-04".into(), "2024-05".into()],
            trend,
            statistics: Statistics {
                average,
                min: average,
                max: average,
                std_dev: 0.0,
                last_month: average,
            },
            all_models: AllModels {
                linear: None,
                polynomial: None,
                moving_average: None,
            },
        }
    }

    #[test]
    fn test_consistent_spending_only() {
        let insights = prediction_insights(
            &report(500.0, 500.0, TrendResult::degenerate(), 1.0),
            &InsightSettings::default(),
        );
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Info);
        assert_eq!(
            insights[0].message,
            "Expected spending is consistent with your average."
        );
    }

    #[test]
    fn test_higher_spending_with_increasing_trend() {
        let trend = TrendResult {
            trend: Trend::Increasing,
            growth_rate: 12.345,
            volatility: Volatility::High,
            coefficient_of_variation: 45.0,
        };
        let insights =
            prediction_insights(&report(150.0, 100.0, trend, 0.5), &InsightSettings::default());

        let kinds: Vec<InsightKind> = insights.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                InsightKind::Warning,
                InsightKind::Warning,
                InsightKind::Info,
                InsightKind::Info
            ]
        );
        assert_eq!(
            insights[0].message,
            "Expected spending is 50.0% higher than your average. Plan accordingly."
        );
        assert_eq!(
            insights[1].message,
            "Your spending trend is increasing by 12.3% per month."
        );
    }

    #[test]
    fn test_lower_spending_with_decreasing_trend() {
        let trend = TrendResult {
            trend: Trend::Decreasing,
            growth_rate: -20.0,
            volatility: Volatility::Low,
            coefficient_of_variation: 5.0,
        };
        let insights =
            prediction_insights(&report(75.0, 100.0, trend, 0.9), &InsightSettings::default());

        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].kind, InsightKind::Positive);
        assert_eq!(
            insights[0].message,
            "Expected spending is 25.0% lower than average. Great progress!"
        );
        assert_eq!(
            insights[1].message,
            "Your spending trend is decreasing by 20.0% per month."
        );
    }

    #[test]
    fn test_zero_average_is_consistent() {
        let insights = prediction_insights(
            &report(10.0, 0.0, TrendResult::degenerate(), 1.0),
            &InsightSettings::default(),
        );
        assert_eq!(insights[0].kind, InsightKind::Info);
    }
}
