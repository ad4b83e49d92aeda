//! Numerical helpers shared by the forecasting models.

pub mod metrics;
pub mod ridge;

pub use metrics::{calculate_metrics, AccuracyMetrics};
pub use ridge::{ridge_fit, RidgeResult};
