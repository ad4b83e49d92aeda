//! Forecast results returned to the presentation layer.

use crate::core::YearMonth;
use crate::forecast::WeatherFilter;
use crate::utils::{calculate_metrics, AccuracyMetrics};
use chrono::NaiveDate;

/// Message shown to users when a forecast cannot be produced.
pub const INSUFFICIENT_DATA_WARNING: &str =
    "Not enough historical data for this combination. Try selecting 'All' for weather.";

/// One month of the merged actual/predicted series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    pub month: YearMonth,
    /// Month-end date used as the chart x value.
    pub date: NaiveDate,
    /// Observed total, absent for future months.
    pub actual: Option<u64>,
    /// Smoothed prediction, absent for months past the horizon date.
    pub predicted: Option<f64>,
}

/// Historical actuals merged with smoothed predictions, in month order.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    pub visitor_type: String,
    pub weather: WeatherFilter,
    /// False when the weather filter was requested but dropped by the small-sample guard.
    pub weather_applied: bool,
    pub model: String,
    pub points: Vec<ForecastPoint>,
}

impl ForecastResult {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points carrying an observed total.
    pub fn historical(&self) -> impl Iterator<Item = &ForecastPoint> {
        self.points.iter().filter(|p| p.actual.is_some())
    }

    /// Points past the last observation.
    pub fn future(&self) -> impl Iterator<Item = &ForecastPoint> {
        self.points.iter().filter(|p| p.actual.is_none())
    }

    /// All predicted values in month order.
    pub fn predicted(&self) -> Vec<f64> {
        self.points.iter().filter_map(|p| p.predicted).collect()
    }

    /// Last month carrying a prediction.
    pub fn last_predicted_month(&self) -> Option<YearMonth> {
        self.points
            .iter()
            .rev()
            .find(|p| p.predicted.is_some())
            .map(|p| p.month)
    }

    /// Accuracy of the smoothed predictions over months that have both values.
    pub fn in_sample_accuracy(&self) -> Option<AccuracyMetrics> {
        let (actual, predicted): (Vec<f64>, Vec<f64>) = self
            .points
            .iter()
            .filter_map(|p| Some((p.actual? as f64, p.predicted?)))
            .unzip();
        calculate_metrics(&actual, &predicted).ok()
    }
}

/// Result of a forecast request.
///
/// Insufficient history is an expected outcome rather than an error, so
/// callers must match on it and surface [`warning`](Self::warning).
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastOutcome {
    Forecast(ForecastResult),
    InsufficientData { months: usize, needed: usize },
}

impl ForecastOutcome {
    pub fn is_empty(&self) -> bool {
        match self {
            ForecastOutcome::Forecast(result) => result.is_empty(),
            ForecastOutcome::InsufficientData { .. } => true,
        }
    }

    pub fn as_result(&self) -> Option<&ForecastResult> {
        match self {
            ForecastOutcome::Forecast(result) => Some(result),
            ForecastOutcome::InsufficientData { .. } => None,
        }
    }

    pub fn into_result(self) -> Option<ForecastResult> {
        match self {
            ForecastOutcome::Forecast(result) => Some(result),
            ForecastOutcome::InsufficientData { .. } => None,
        }
    }

    /// User-facing warning when no forecast was produced.
    pub fn warning(&self) -> Option<&'static str> {
        self.is_empty().then_some(INSUFFICIENT_DATA_WARNING)
    }
}
