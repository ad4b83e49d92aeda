//! Quickstart example demonstrating basic usage of visitor-forecast.
//!
//! Run with: cargo run --example quickstart

use chrono::{Days, NaiveDate};
use visitor_forecast::prelude::*;

fn main() {
    println!("=== visitor-forecast Quickstart ===\n");

    // 1. Build two years of daily visitor records
    let base = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let mut records = Vec::new();
    for day in 0..730u64 {
        let date = base + Days::new(day);
        let season = (2.0 * std::f64::consts::PI * day as f64 / 365.25).sin();
        let weather = if day % 4 == 0 { "Rainy" } else { "Sunny" };
        records.push(VisitorRecord::new(
            date,
            "Hiker",
            weather,
            (120.0 + 80.0 * season + day as f64 * 0.05) as u64,
        ));
        records.push(VisitorRecord::new(
            date,
            "Camper",
            weather,
            (40.0 + 30.0 * season) as u64,
        ));
    }
    let dataset = VisitorDataset::new(records);
    println!(
        "Created dataset with {} rows, {} visitors",
        dataset.len(),
        dataset.total_visitors()
    );

    // 2. Monthly totals
    println!("\n--- Monthly Visitors ---");
    let monthly = aggregate_visitors(&dataset, Granularity::Monthly);
    for bucket in monthly.buckets().iter().take(6) {
        println!("  {}: {}", bucket.key, bucket.total);
    }

    // 3. Visitor type matrix
    println!("\n--- Visitor Types ---");
    let matrix = pivot_visitor_types(&dataset);
    println!("  types: {:?}", matrix.visitor_types());
    for (month, total) in matrix.months().iter().zip(matrix.row_totals()).take(3) {
        println!("  {} ({}): {}", month, month.short_name(), total);
    }

    // 4. Forecast hikers on sunny days
    println!("\n--- Hiker Forecast (Sunny) ---");
    let config = ForecastConfig::new()
        .with_horizon_date(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    let outcome = TrendForecaster::new()
        .with_config(config)
        .forecast(&dataset, &ForecastRequest::new("Hiker", "Sunny"))
        .unwrap();

    match outcome {
        ForecastOutcome::Forecast(result) => {
            println!("{:>8} {:>10} {:>12}", "Month", "Actual", "Predicted");
            println!("{:-<32}", "");
            for point in result.points.iter().rev().take(14).rev() {
                let actual = point.actual.map(|a| a.to_string()).unwrap_or_default();
                let predicted = point
                    .predicted
                    .map(|p| format!("{p:.1}"))
                    .unwrap_or_default();
                println!("{:>8} {:>10} {:>12}", point.month, actual, predicted);
            }
            if let Some(metrics) = result.in_sample_accuracy() {
                println!("\nIn-sample MAE: {:.2}, RMSE: {:.2}", metrics.mae, metrics.rmse);
            }
        }
        ForecastOutcome::InsufficientData { months, needed } => {
            println!("Only {months} months of history (need {needed})");
        }
    }
}
