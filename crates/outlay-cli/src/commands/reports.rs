//! Report command implementation

use std::path::Path;

use anyhow::Result;
use outlay_core::models::{ForecastReport, InsightKind, PredictionInsight, PredictionMethod};
use outlay_core::prediction_insights;

use super::{load_forecaster, open_input, resolve_format};

pub fn cmd_report(
    config_path: Option<&Path>,
    file: Option<&Path>,
    format: Option<&str>,
) -> Result<()> {
    let forecaster = load_forecaster(config_path)?;
    let format = resolve_format(format, file)?;
    let reader = open_input(file)?;

    let response = forecaster.forecast_reader(reader, format, false);
    let report = match (response.report, response.error) {
        (Some(report), _) => report,
        (None, Some(error)) => anyhow::bail!(error),
        (None, None) => anyhow::bail!("Unable to generate predictions"),
    };

    let insights = prediction_insights(&report, &forecaster.config().insights);
    print_report(&report, &insights);
    Ok(())
}

fn insight_icon(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Warning => "⚠️ ",
        InsightKind::Positive => "✅",
        InsightKind::Info => "💡",
    }
}

pub fn print_report(report: &ForecastReport, insights: &[PredictionInsight]) {
    let prediction = &report.prediction;

    println!();
    println!("🔮 Expense Forecast");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Next month: ${:.2}", prediction.next_month);
    println!(
        "   Model: {} ({:.0}% confidence)",
        prediction.method.label(),
        prediction.confidence * 100.0
    );
    println!();
    println!("   {:10} │ {:>12}", "Month", "Forecast");
    println!("   ───────────┼─────────────");
    for (month, value) in report.forecast_months.iter().zip(&prediction.next_3_months) {
        println!("   {:10} │ {:>12.2}", month, value);
    }

    println!();
    println!("📊 History");
    println!("   {:10} │ {:>12}", "Month", "Spent");
    println!("   ───────────┼─────────────");
    for (month, value) in report.historical.months.iter().zip(&report.historical.values) {
        println!("   {:10} │ {:>12.2}", month, value);
    }

    let stats = &report.statistics;
    println!();
    println!(
        "   Average: ${:.2}   Min: ${:.2}   Max: ${:.2}   Std dev: ${:.2}",
        stats.average, stats.min, stats.max, stats.std_dev
    );

    println!();
    println!("📈 Trend");
    println!(
        "   {} ({:+.1}%), {} volatility (cv {:.1}%)",
        report.trend.trend,
        report.trend.growth_rate,
        report.trend.volatility,
        report.trend.coefficient_of_variation
    );

    println!();
    println!("🧮 Models");
    println!(
        "   {:22} │ {:>10} │ {:>12}",
        "Method", "Confidence", "Next month"
    );
    println!("   ───────────────────────┼────────────┼─────────────");
    for method in PredictionMethod::all() {
        match report.all_models.get(*method) {
            Some(model) => {
                let marker = if *method == prediction.method { "*" } else { " " };
                let next = model.predictions.first().copied().unwrap_or(0.0);
                println!(
                    "   {:21}{} │ {:>10.3} │ {:>12.2}",
                    method.label(),
                    marker,
                    model.confidence,
                    next
                );
            }
            None => println!(
                "   {:22} │ {:>10} │ {:>12}",
                method.label(),
                "-",
                "(not enough data)"
            ),
        }
    }

    if !insights.is_empty() {
        println!();
        println!("💬 Insights");
        for insight in insights {
            println!("   {} {}", insight_icon(insight.kind), insight.message);
        }
    }

    println!();
}
