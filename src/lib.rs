//! # visitor-forecast
//!
//! Visitor-count analytics for park dashboards.
//!
//! Loads a visitor table (date, visitor type, weather, visitor count),
//! aggregates it into daily, weekly or monthly totals, pivots it into a
//! month x visitor-type matrix, and forecasts monthly visitors for a chosen
//! visitor type and weather condition with an additive trend + seasonality
//! model.
//!
//! ```
//! use visitor_forecast::prelude::*;
//!
//! let csv = "Date,Visitor Type,Weather Condition,Number of Visitors\n\
//!            2024-01-05,Hiker,Sunny,120\n\
//!            2024-01-06,Camper,Rainy,40\n";
//! let dataset = read_csv(csv.as_bytes()).unwrap();
//!
//! let monthly = aggregate_visitors(&dataset, "Monthly".parse().unwrap());
//! assert_eq!(monthly.total(), 160);
//!
//! let matrix = pivot_visitor_types(&dataset);
//! assert_eq!(matrix.visitor_types(), &["Camper".to_string(), "Hiker".to_string()]);
//!
//! // One month of history is not enough to forecast.
//! let outcome = predict_trends(&dataset, "Hiker", "All").unwrap();
//! assert!(outcome.is_empty());
//! ```

#![allow(clippy::needless_range_loop)]

pub mod aggregate;
pub mod core;
pub mod error;
pub mod forecast;
pub mod ingest;
pub mod models;
pub mod pivot;
pub mod transform;
pub mod utils;

pub use error::{Result, VisitorError};

pub mod prelude {
    pub use crate::aggregate::{aggregate_visitors, AggregatedSeries, Granularity};
    pub use crate::core::{MonthlySeries, VisitorDataset, VisitorRecord, YearMonth};
    pub use crate::error::{Result, VisitorError};
    pub use crate::forecast::{
        predict_trends, ForecastConfig, ForecastOutcome, ForecastRequest, ForecastResult,
        TrendForecaster, WeatherFilter,
    };
    pub use crate::ingest::{read_csv, read_csv_path};
    pub use crate::models::{ForecastOracle, SeasonalTrendModel};
    pub use crate::pivot::{pivot_visitor_types, TypeMatrix};
}
