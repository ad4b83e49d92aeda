//! Forecasting oracles.

mod traits;

pub mod seasonal_trend;

pub use seasonal_trend::{Seasonality, SeasonalTrendModel};
pub use traits::{BoxedOracle, ForecastOracle};
