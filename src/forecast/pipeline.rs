//! Filter, aggregate, fit, predict, smooth, merge.

use crate::core::{MonthlySeries, VisitorDataset, YearMonth};
use crate::error::{Result, VisitorError};
use crate::forecast::{
    ForecastConfig, ForecastOutcome, ForecastPoint, ForecastRequest, ForecastResult,
    WeatherFilter,
};
use crate::models::{ForecastOracle, SeasonalTrendModel};
use crate::transform::rolling_mean;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Contiguous monthly visitor totals from the first to the last observed
/// month. Months without rows are zero.
pub fn monthly_totals(dataset: &VisitorDataset) -> Result<MonthlySeries> {
    let mut totals: BTreeMap<YearMonth, u64> = BTreeMap::new();
    for record in dataset.records() {
        *totals.entry(record.month()).or_insert(0) += record.visitors;
    }

    let (first, last) = match (totals.keys().next(), totals.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return MonthlySeries::new(Vec::new(), Vec::new()),
    };

    let months = YearMonth::range_inclusive(first, last);
    let values = months
        .iter()
        .map(|m| totals.get(m).copied().unwrap_or(0) as f64)
        .collect();
    MonthlySeries::new(months, values)
}

/// Per-selection visitor forecaster.
///
/// # Example
/// ```
/// use visitor_forecast::core::{VisitorDataset, VisitorRecord};
/// use visitor_forecast::forecast::{ForecastOutcome, ForecastRequest, TrendForecaster};
/// use chrono::NaiveDate;
///
/// let records = (1..=6)
///     .map(|m| {
///         let date = NaiveDate::from_ymd_opt(2024, m, 10).unwrap();
///         VisitorRecord::new(date, "Hiker", "Sunny", 100 + 10 * m as u64)
///     })
///     .collect();
/// let dataset = VisitorDataset::new(records);
///
/// let mut forecaster = TrendForecaster::new();
/// let outcome = forecaster
///     .forecast(&dataset, &ForecastRequest::new("Hiker", "All"))
///     .unwrap();
/// match outcome {
///     ForecastOutcome::Forecast(result) => assert_eq!(result.historical().count(), 6),
///     ForecastOutcome::InsufficientData { .. } => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TrendForecaster<O = SeasonalTrendModel> {
    config: ForecastConfig,
    oracle: O,
}

impl TrendForecaster<SeasonalTrendModel> {
    /// Forecaster backed by the default seasonal trend model.
    pub fn new() -> Self {
        Self::with_oracle(SeasonalTrendModel::new())
    }
}

impl Default for TrendForecaster<SeasonalTrendModel> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: ForecastOracle> TrendForecaster<O> {
    pub fn with_oracle(oracle: O) -> Self {
        Self {
            config: ForecastConfig::default(),
            oracle,
        }
    }

    pub fn with_config(mut self, config: ForecastConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Forecast monthly visitors for one visitor type and weather selection.
    ///
    /// Returns [`ForecastOutcome::InsufficientData`] when fewer than
    /// `min_months` months contain data after filtering. Errors are reserved
    /// for selections that were never observed and for oracle failures.
    pub fn forecast(
        &mut self,
        dataset: &VisitorDataset,
        request: &ForecastRequest,
    ) -> Result<ForecastOutcome> {
        if !dataset.has_visitor_type(&request.visitor_type) {
            return Err(VisitorError::UnknownCategory {
                kind: "visitor type",
                value: request.visitor_type.clone(),
            });
        }
        if let Some(condition) = request.weather.condition() {
            if !dataset.has_weather(condition) {
                return Err(VisitorError::UnknownCategory {
                    kind: "weather condition",
                    value: condition.to_string(),
                });
            }
        }

        let by_type = dataset.filter(|r| r.visitor_type == request.visitor_type);
        let (selected, weather_applied) = self.apply_weather(by_type, &request.weather);

        let observed = selected.months().len();
        if observed < self.config.min_months() {
            warn!(
                visitor_type = %request.visitor_type,
                weather = %request.weather,
                months = observed,
                needed = self.config.min_months(),
                "not enough history to forecast"
            );
            return Ok(ForecastOutcome::InsufficientData {
                months: observed,
                needed: self.config.min_months(),
            });
        }

        let history = monthly_totals(&selected)?;
        self.oracle.fit(&history)?;

        let months = self.prediction_months(&history);
        let predicted = self.smoothed_predictions(&months)?;

        let mut merged: BTreeMap<YearMonth, (Option<u64>, Option<f64>)> = BTreeMap::new();
        for (month, value) in history.months().iter().zip(history.values()) {
            merged.entry(*month).or_default().0 = Some(*value as u64);
        }
        for (month, value) in months.iter().zip(predicted) {
            merged.entry(*month).or_default().1 = Some(value);
        }

        let points: Vec<ForecastPoint> = merged
            .into_iter()
            .map(|(month, (actual, predicted))| ForecastPoint {
                month,
                date: month.last_day(),
                actual,
                predicted,
            })
            .collect();

        info!(
            visitor_type = %request.visitor_type,
            weather = %request.weather,
            weather_applied,
            history = history.len(),
            predicted = months.len(),
            model = self.oracle.name(),
            "forecast complete"
        );

        Ok(ForecastOutcome::Forecast(ForecastResult {
            visitor_type: request.visitor_type.clone(),
            weather: request.weather.clone(),
            weather_applied,
            model: self.oracle.name().to_string(),
            points,
        }))
    }

    /// Apply the weather filter unless it leaves too few rows.
    fn apply_weather(
        &self,
        by_type: VisitorDataset,
        weather: &WeatherFilter,
    ) -> (VisitorDataset, bool) {
        let Some(condition) = weather.condition() else {
            return (by_type, false);
        };

        let filtered = by_type.filter(|r| r.weather == condition);
        if filtered.len() > self.config.min_weather_rows() {
            (filtered, true)
        } else {
            warn!(
                weather = condition,
                rows = filtered.len(),
                threshold = self.config.min_weather_rows(),
                "too few rows for weather filter, using visitor type only"
            );
            (by_type, false)
        }
    }

    /// History months plus the forecast horizon, cut at the horizon date.
    fn prediction_months(&self, history: &MonthlySeries) -> Vec<YearMonth> {
        let mut months = history.months().to_vec();
        if let Some(last) = history.last_month() {
            let mut next = last;
            for _ in 0..self.config.horizon_periods() {
                next = next.succ();
                months.push(next);
            }
        }
        let horizon = self.config.horizon_date();
        months.retain(|m| m.last_day() <= horizon);
        debug!(months = months.len(), %horizon, "prediction months");
        months
    }

    fn smoothed_predictions(&self, months: &[YearMonth]) -> Result<Vec<f64>> {
        if months.is_empty() {
            return Ok(Vec::new());
        }

        let raw = self.oracle.predict(months)?;
        if raw.len() != months.len() {
            return Err(VisitorError::DimensionMismatch {
                expected: months.len(),
                got: raw.len(),
            });
        }
        if raw.iter().any(|v| !v.is_finite()) {
            return Err(VisitorError::ComputationError(format!(
                "{} produced non-finite predictions",
                self.oracle.name()
            )));
        }

        Ok(rolling_mean(&raw, self.config.smoothing_window(), 1)
            .into_iter()
            .map(|v| v.max(0.0))
            .collect())
    }
}

/// Forecast with the default model and configuration.
///
/// `weather` is a selector value: an observed condition or `"All"`.
pub fn predict_trends(
    dataset: &VisitorDataset,
    visitor_type: &str,
    weather: &str,
) -> Result<ForecastOutcome> {
    TrendForecaster::new().forecast(dataset, &ForecastRequest::new(visitor_type, weather))
}
