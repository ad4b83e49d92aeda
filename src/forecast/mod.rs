//! Per-selection monthly visitor forecasting.
//!
//! The pipeline filters the dataset by visitor type and (when enough rows
//! remain) weather. It then builds a contiguous monthly series, fits a
//! [`ForecastOracle`](crate::models::ForecastOracle), predicts history plus
//! the forecast horizon, smooths with a trailing mean, and merges actuals with
//! predictions.

mod config;
mod outcome;
mod pipeline;
mod request;

pub use config::ForecastConfig;
pub use outcome::{ForecastOutcome, ForecastPoint, ForecastResult, INSUFFICIENT_DATA_WARNING};
pub use pipeline::{monthly_totals, predict_trends, TrendForecaster};
pub use request::{ForecastRequest, WeatherFilter};
