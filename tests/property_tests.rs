//! Property-based tests for the aggregation, pivot and forecast invariants.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated visitor tables.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use visitor_forecast::aggregate::{aggregate_visitors, Granularity};
use visitor_forecast::core::{VisitorDataset, VisitorRecord};
use visitor_forecast::forecast::{ForecastConfig, ForecastRequest, TrendForecaster};
use visitor_forecast::pivot::pivot_visitor_types;

const TYPES: [&str; 4] = ["Hiker", "Camper", "Cyclist", "Angler"];
const WEATHER: [&str; 3] = ["Sunny", "Rainy", "Cloudy"];

/// Strategy for a visitor record within a roughly two-year window.
fn record_strategy() -> impl Strategy<Value = VisitorRecord> {
    (0u64..730, 0usize..TYPES.len(), 0usize..WEATHER.len(), 0u64..5_000).prop_map(
        |(offset, t, w, visitors)| {
            let base = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
            VisitorRecord::new(base + Days::new(offset), TYPES[t], WEATHER[w], visitors)
        },
    )
}

fn dataset_strategy(max_rows: usize) -> impl Strategy<Value = VisitorDataset> {
    prop::collection::vec(record_strategy(), 0..max_rows).prop_map(VisitorDataset::new)
}

fn granularity_strategy() -> impl Strategy<Value = Granularity> {
    prop::sample::select(Granularity::ALL.to_vec())
}

// =============================================================================
// Property: Aggregation preserves the total visitor count
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn aggregation_preserves_totals(
        dataset in dataset_strategy(200),
        granularity in granularity_strategy()
    ) {
        let series = aggregate_visitors(&dataset, granularity);
        prop_assert_eq!(series.total(), dataset.total_visitors());
        let keys = series.keys();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn pivot_columns_are_observed_types(dataset in dataset_strategy(200)) {
        let matrix = pivot_visitor_types(&dataset);

        let mut expected = dataset.visitor_types();
        expected.sort();
        prop_assert_eq!(matrix.visitor_types(), expected.as_slice());
        prop_assert_eq!(matrix.grand_total(), dataset.total_visitors());
        prop_assert_eq!(matrix.months().len(), dataset.months().len());
        prop_assert!(matrix.months().windows(2).all(|w| w[0] < w[1]));
        for row in matrix.rows() {
            prop_assert_eq!(row.len(), expected.len());
        }
    }
}

// =============================================================================
// Property: Forecast shape and small-history guard
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn forecast_respects_history_guard_and_horizon(
        dataset in dataset_strategy(120),
        type_idx in 0usize..TYPES.len(),
        weather_idx in 0usize..=WEATHER.len()
    ) {
        let visitor_type = TYPES[type_idx];
        prop_assume!(dataset.has_visitor_type(visitor_type));
        let weather = if weather_idx == WEATHER.len() { "All" } else { WEATHER[weather_idx] };
        prop_assume!(weather == "All" || dataset.has_weather(weather));

        let horizon = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let config = ForecastConfig::new().with_horizon_date(horizon);
        let outcome = TrendForecaster::new()
            .with_config(config)
            .forecast(&dataset, &ForecastRequest::new(visitor_type, weather))
            .unwrap();

        let by_type = dataset.filter(|r| r.visitor_type == visitor_type);
        let by_weather = by_type.filter(|r| r.weather == weather);
        let selected = if weather != "All" && by_weather.len() > 5 { by_weather } else { by_type };

        match outcome.into_result() {
            None => prop_assert!(selected.months().len() < 5),
            Some(result) => {
                prop_assert!(selected.months().len() >= 5);
                let last_actual = result.historical().last().map(|p| p.month).unwrap();
                let future = result.future().count();
                prop_assert!(future <= 12);
                for point in &result.points {
                    if let Some(p) = point.predicted {
                        prop_assert!(p >= 0.0);
                        prop_assert!(point.date <= horizon);
                    }
                }
                for point in result.future() {
                    prop_assert!(point.month > last_actual);
                }
            }
        }
    }
}
