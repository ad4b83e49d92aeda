//! Forecast pipeline configuration.

use crate::error::{Result, VisitorError};
use chrono::NaiveDate;

/// Tunables for [`TrendForecaster`](crate::forecast::TrendForecaster).
///
/// Defaults: the weather filter needs more than 5 rows, forecasting needs at
/// least 5 observed months, predictions extend 12 months past the last
/// observation but never past 2026-01-01, and predictions are smoothed
/// with a 3-month trailing mean.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    min_weather_rows: usize,
    min_months: usize,
    horizon_periods: usize,
    horizon_date: NaiveDate,
    smoothing_window: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            min_weather_rows: 5,
            min_months: 5,
            horizon_periods: 12,
            horizon_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or(NaiveDate::MAX),
            smoothing_window: 3,
        }
    }
}

impl ForecastConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The weather filter is kept only when it leaves strictly more rows than this.
    pub fn with_min_weather_rows(mut self, rows: usize) -> Self {
        self.min_weather_rows = rows;
        self
    }

    /// Minimum number of observed months required to call the oracle.
    pub fn with_min_months(mut self, months: usize) -> Result<Self> {
        if months == 0 {
            return Err(VisitorError::InvalidParameter(
                "min_months must be at least 1".into(),
            ));
        }
        self.min_months = months;
        Ok(self)
    }

    /// Number of months to predict past the last observed month.
    pub fn with_horizon_periods(mut self, periods: usize) -> Self {
        self.horizon_periods = periods;
        self
    }

    /// No predicted month may end after this date.
    pub fn with_horizon_date(mut self, date: NaiveDate) -> Self {
        self.horizon_date = date;
        self
    }

    /// Trailing window of the smoothing mean.
    pub fn with_smoothing_window(mut self, window: usize) -> Result<Self> {
        if window == 0 {
            return Err(VisitorError::InvalidParameter(
                "smoothing window must be at least 1".into(),
            ));
        }
        self.smoothing_window = window;
        Ok(self)
    }

    pub fn min_weather_rows(&self) -> usize {
        self.min_weather_rows
    }

    pub fn min_months(&self) -> usize {
        self.min_months
    }

    pub fn horizon_periods(&self) -> usize {
        self.horizon_periods
    }

    pub fn horizon_date(&self) -> NaiveDate {
        self.horizon_date
    }

    pub fn smoothing_window(&self) -> usize {
        self.smoothing_window
    }
}
