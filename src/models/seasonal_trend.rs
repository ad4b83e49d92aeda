//! Additive trend + Fourier seasonality model.
//!
//! `SeasonalTrendModel` fits
//!
//! ```text
//! y(d) = m + k * t(d) + Σ_s Σ_{n=1..N_s} [a_sn cos(2π n d / P_s) + b_sn sin(2π n d / P_s)]
//! ```
//!
//! where `d` is the observation date in days since the Unix epoch, `t(d)` is
//! `d` rescaled so the training window spans `[0, 1]`, and each seasonality
//! `s` has period `P_s` days and Fourier order `N_s`. The target is scaled by
//! its largest absolute value before fitting. Seasonal coefficients carry a
//! Gaussian prior (`prior_scale`), which turns the fit into a ridge regression
//! that stays solvable when there are fewer months than coefficients.
//!
//! Monthly observations are placed on the last day of their month.

use crate::core::{MonthlySeries, YearMonth};
use crate::error::{Result, VisitorError};
use crate::models::ForecastOracle;
use crate::utils::{ridge_fit, RidgeResult};
use chrono::NaiveDate;
use std::f64::consts::PI;
use tracing::debug;

/// Penalty on the intercept and slope. Effectively unregularized.
const TREND_PENALTY: f64 = 1e-6;

/// A periodic component expressed as a truncated Fourier series.
#[derive(Debug, Clone, PartialEq)]
pub struct Seasonality {
    name: String,
    period_days: f64,
    fourier_order: usize,
    prior_scale: f64,
}

impl Seasonality {
    /// Create a seasonal component.
    ///
    /// # Arguments
    /// * `name` - Component name; adding a component with an existing name replaces it
    /// * `period_days` - Period length in days
    /// * `fourier_order` - Number of sine/cosine pairs
    pub fn new(name: impl Into<String>, period_days: f64, fourier_order: usize) -> Result<Self> {
        if !period_days.is_finite() || period_days <= 0.0 {
            return Err(VisitorError::InvalidParameter(format!(
                "seasonality period must be positive, got {period_days}"
            )));
        }
        if fourier_order == 0 {
            return Err(VisitorError::InvalidParameter(
                "fourier order must be at least 1".into(),
            ));
        }
        Ok(Self {
            name: name.into(),
            period_days,
            fourier_order,
            prior_scale: 10.0,
        })
    }

    /// Yearly seasonality: period 365.25 days, order 10.
    pub fn yearly() -> Self {
        Self {
            name: "yearly".into(),
            period_days: 365.25,
            fourier_order: 10,
            prior_scale: 10.0,
        }
    }

    /// Custom "monthly" seasonality: period 30.5 days, order 5.
    pub fn monthly() -> Self {
        Self {
            name: "monthly".into(),
            period_days: 30.5,
            fourier_order: 5,
            prior_scale: 10.0,
        }
    }

    /// Set the prior scale. Smaller values shrink the component harder.
    pub fn with_prior_scale(mut self, prior_scale: f64) -> Result<Self> {
        if !prior_scale.is_finite() || prior_scale <= 0.0 {
            return Err(VisitorError::InvalidParameter(format!(
                "prior scale must be positive, got {prior_scale}"
            )));
        }
        self.prior_scale = prior_scale;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn period_days(&self) -> f64 {
        self.period_days
    }

    pub fn fourier_order(&self) -> usize {
        self.fourier_order
    }

    pub fn prior_scale(&self) -> f64 {
        self.prior_scale
    }

    /// Number of design columns this component contributes.
    fn width(&self) -> usize {
        2 * self.fourier_order
    }

    fn features(&self, epoch_days: f64, out: &mut Vec<f64>) {
        for n in 1..=self.fourier_order {
            let angle = 2.0 * PI * n as f64 * epoch_days / self.period_days;
            out.push(angle.sin());
            out.push(angle.cos());
        }
    }
}

/// State learned by [`SeasonalTrendModel::fit`].
#[derive(Debug, Clone)]
struct FittedState {
    start_day: f64,
    span_days: f64,
    y_scale: f64,
    ridge: RidgeResult,
}

/// Additive linear trend plus Fourier seasonalities, fitted by ridge regression.
///
/// # Example
/// ```
/// use visitor_forecast::core::{MonthlySeries, YearMonth};
/// use visitor_forecast::models::{ForecastOracle, SeasonalTrendModel};
///
/// let start = YearMonth::new(2023, 1).unwrap();
/// let months = YearMonth::range_inclusive(start, YearMonth::new(2024, 12).unwrap());
/// let values: Vec<f64> = (0..months.len()).map(|i| 200.0 + 10.0 * i as f64).collect();
/// let series = MonthlySeries::new(months, values).unwrap();
///
/// let mut model = SeasonalTrendModel::new();
/// model.fit(&series).unwrap();
///
/// let future = [YearMonth::new(2025, 1).unwrap()];
/// let prediction = model.predict(&future).unwrap();
/// assert_eq!(prediction.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SeasonalTrendModel {
    seasonalities: Vec<Seasonality>,
    state: Option<FittedState>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
}

impl SeasonalTrendModel {
    /// Create a model with yearly and 30.5-day seasonalities.
    pub fn new() -> Self {
        Self {
            seasonalities: vec![Seasonality::yearly(), Seasonality::monthly()],
            state: None,
            fitted: None,
            residuals: None,
        }
    }

    /// Create a pure linear-trend model with no seasonal components.
    pub fn trend_only() -> Self {
        Self {
            seasonalities: Vec::new(),
            ..Self::new()
        }
    }

    /// Add a seasonal component, replacing any component with the same name.
    pub fn with_seasonality(mut self, seasonality: Seasonality) -> Self {
        self.seasonalities.retain(|s| s.name != seasonality.name);
        self.seasonalities.push(seasonality);
        self
    }

    /// Remove the named seasonal component if present.
    pub fn without_seasonality(mut self, name: &str) -> Self {
        self.seasonalities.retain(|s| s.name != name);
        self
    }

    /// Set the prior scale of every configured seasonality.
    pub fn with_seasonality_prior_scale(mut self, prior_scale: f64) -> Result<Self> {
        self.seasonalities = self
            .seasonalities
            .into_iter()
            .map(|s| s.with_prior_scale(prior_scale))
            .collect::<Result<_>>()?;
        Ok(self)
    }

    pub fn seasonalities(&self) -> &[Seasonality] {
        &self.seasonalities
    }

    /// Get the residuals (actual - fitted).
    pub fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn penalties(&self) -> Vec<f64> {
        let mut penalties = vec![TREND_PENALTY, TREND_PENALTY];
        for s in &self.seasonalities {
            let penalty = 1.0 / (s.prior_scale * s.prior_scale);
            penalties.extend(std::iter::repeat(penalty).take(s.width()));
        }
        penalties
    }

    fn design_row(&self, date: NaiveDate, start_day: f64, span_days: f64) -> Vec<f64> {
        let day = epoch_days(date);
        let width = 2 + self.seasonalities.iter().map(Seasonality::width).sum::<usize>();
        let mut row = Vec::with_capacity(width);
        row.push(1.0);
        row.push((day - start_day) / span_days);
        for s in &self.seasonalities {
            s.features(day, &mut row);
        }
        row
    }
}

impl Default for SeasonalTrendModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastOracle for SeasonalTrendModel {
    fn fit(&mut self, series: &MonthlySeries) -> Result<()> {
        if series.is_empty() {
            return Err(VisitorError::EmptyData);
        }
        if series.has_missing_values() {
            return Err(VisitorError::InvalidParameter(
                "series contains NaN or infinite values".into(),
            ));
        }

        let dates: Vec<NaiveDate> = series.months().iter().map(YearMonth::last_day).collect();
        let start_day = epoch_days(dates[0]);
        let span = epoch_days(dates[dates.len() - 1]) - start_day;
        let span_days = if span > 0.0 { span } else { 1.0 };

        let values = series.values();
        let max_abs = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let y_scale = if max_abs > 0.0 { max_abs } else { 1.0 };
        let scaled: Vec<f64> = values.iter().map(|v| v / y_scale).collect();

        let design: Vec<Vec<f64>> = dates
            .iter()
            .map(|&d| self.design_row(d, start_day, span_days))
            .collect();
        let ridge = ridge_fit(&design, &scaled, &self.penalties())?;

        let fitted: Vec<f64> = ridge
            .predict(&design)?
            .into_iter()
            .map(|v| v * y_scale)
            .collect();
        let residuals = values.iter().zip(&fitted).map(|(y, f)| y - f).collect();

        debug!(
            observations = series.len(),
            coefficients = ridge.num_coefficients(),
            "fitted seasonal trend model"
        );

        self.state = Some(FittedState {
            start_day,
            span_days,
            y_scale,
            ridge,
        });
        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
        Ok(())
    }

    fn predict(&self, months: &[YearMonth]) -> Result<Vec<f64>> {
        let state = self.state.as_ref().ok_or(VisitorError::FitRequired)?;
        let design: Vec<Vec<f64>> = months
            .iter()
            .map(|m| self.design_row(m.last_day(), state.start_day, state.span_days))
            .collect();
        Ok(state
            .ridge
            .predict(&design)?
            .into_iter()
            .map(|v| v * state.y_scale)
            .collect())
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn name(&self) -> &str {
        "SeasonalTrend"
    }
}

/// Days since 1970-01-01.
fn epoch_days(date: NaiveDate) -> f64 {
    (date - NaiveDate::default()).num_days() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn months_from(year: i32, month: u32, n: usize) -> Vec<YearMonth> {
        let start = YearMonth::new(year, month).unwrap();
        let mut out = vec![start];
        while out.len() < n {
            let next = out[out.len() - 1].succ();
            out.push(next);
        }
        out
    }

    fn linear_series(n: usize) -> MonthlySeries {
        let months = months_from(2022, 1, n);
        let values = (0..n).map(|i| 100.0 + 10.0 * i as f64).collect();
        MonthlySeries::new(months, values).unwrap()
    }

    #[test]
    fn default_components() {
        let model = SeasonalTrendModel::new();
        let names: Vec<&str> = model.seasonalities().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["yearly", "monthly"]);
        assert_relative_eq!(model.seasonalities()[0].period_days(), 365.25);
        assert_eq!(model.seasonalities()[0].fourier_order(), 10);
        assert_relative_eq!(model.seasonalities()[1].period_days(), 30.5);
        assert_eq!(model.seasonalities()[1].fourier_order(), 5);
    }

    #[test]
    fn seasonality_validation() {
        assert!(Seasonality::new("weekly", 7.0, 3).is_ok());
        assert!(Seasonality::new("bad", 0.0, 3).is_err());
        assert!(Seasonality::new("bad", f64::NAN, 3).is_err());
        assert!(Seasonality::new("bad", 7.0, 0).is_err());
        assert!(Seasonality::yearly().with_prior_scale(-1.0).is_err());
    }

    #[test]
    fn with_seasonality_replaces_by_name() {
        let custom = Seasonality::new("yearly", 365.25, 3).unwrap();
        let model = SeasonalTrendModel::new().with_seasonality(custom);
        assert_eq!(model.seasonalities().len(), 2);
        let yearly = model
            .seasonalities()
            .iter()
            .find(|s| s.name() == "yearly")
            .unwrap();
        assert_eq!(yearly.fourier_order(), 3);

        let model = model.without_seasonality("monthly");
        assert_eq!(model.seasonalities().len(), 1);
    }

    #[test]
    fn predict_before_fit_fails() {
        let model = SeasonalTrendModel::new();
        let months = months_from(2024, 1, 2);
        assert!(matches!(
            model.predict(&months),
            Err(VisitorError::FitRequired)
        ));
    }

    #[test]
    fn empty_series_fails() {
        let mut model = SeasonalTrendModel::new();
        let empty = MonthlySeries::new(vec![], vec![]).unwrap();
        assert!(matches!(model.fit(&empty), Err(VisitorError::EmptyData)));
    }

    #[test]
    fn trend_only_extrapolates_a_line() {
        // Month lengths differ, so use a series that is linear in days.
        let months = months_from(2022, 1, 12);
        let base = epoch_days(months[0].last_day());
        let values: Vec<f64> = months
            .iter()
            .map(|m| 50.0 + 0.5 * (epoch_days(m.last_day()) - base))
            .collect();
        let series = MonthlySeries::new(months, values).unwrap();

        let mut model = SeasonalTrendModel::trend_only();
        model.fit(&series).unwrap();

        let next = YearMonth::new(2023, 1).unwrap();
        let expected = 50.0 + 0.5 * (epoch_days(next.last_day()) - base);
        let pred = model.predict(&[next]).unwrap();
        assert_relative_eq!(pred[0], expected, epsilon = 1e-3);

        for r in model.residuals().unwrap() {
            assert!(r.abs() < 1e-3);
        }
    }

    #[test]
    fn seasonal_fit_tracks_history() {
        let series = linear_series(24);
        let mut model = SeasonalTrendModel::new();
        model.fit(&series).unwrap();

        let fitted = model.fitted_values().unwrap();
        assert_eq!(fitted.len(), 24);
        for (f, y) in fitted.iter().zip(series.values()) {
            assert!((f - y).abs() / y < 0.05, "fitted {f} vs actual {y}");
        }

        let future = months_from(2024, 1, 12);
        let preds = model.predict(&future).unwrap();
        assert_eq!(preds.len(), 12);
        assert!(preds.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn fits_short_series_with_more_coefficients_than_points() {
        let series = linear_series(5);
        let mut model = SeasonalTrendModel::new();
        model.fit(&series).unwrap();
        let preds = model.predict(&months_from(2022, 1, 17)).unwrap();
        assert_eq!(preds.len(), 17);
        assert!(preds.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn single_point_and_zero_series() {
        let one = MonthlySeries::new(months_from(2024, 1, 1), vec![42.0]).unwrap();
        let mut model = SeasonalTrendModel::new();
        model.fit(&one).unwrap();
        assert!(model.is_fitted());

        let zeros = MonthlySeries::new(months_from(2024, 1, 6), vec![0.0; 6]).unwrap();
        model.fit(&zeros).unwrap();
        let preds = model.predict(&months_from(2024, 7, 3)).unwrap();
        for p in preds {
            assert_relative_eq!(p, 0.0, epsilon = 1e-9);
        }
    }
}
