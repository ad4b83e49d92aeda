//! Forecasting oracle trait: the narrow seam between the visitor pipeline and
//! any statistical model.

use crate::core::{MonthlySeries, YearMonth};
use crate::error::Result;

/// A model that learns from a monthly series and predicts arbitrary months.
///
/// Unlike a horizon-based forecaster, `predict` receives the months to
/// evaluate explicitly, so a single call can cover in-sample and
/// out-of-sample periods. This trait is object-safe.
pub trait ForecastOracle {
    /// Fit the model to the monthly series.
    fn fit(&mut self, series: &MonthlySeries) -> Result<()>;

    /// Predict one value per requested month.
    fn predict(&self, months: &[YearMonth]) -> Result<Vec<f64>>;

    /// Get the fitted values (in-sample predictions).
    fn fitted_values(&self) -> Option<&[f64]>;

    /// Get the model name.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool {
        self.fitted_values().is_some()
    }
}

/// Type alias for boxed oracle trait objects.
pub type BoxedOracle = Box<dyn ForecastOracle>;

impl<O: ForecastOracle + ?Sized> ForecastOracle for Box<O> {
    fn fit(&mut self, series: &MonthlySeries) -> Result<()> {
        (**self).fit(series)
    }

    fn predict(&self, months: &[YearMonth]) -> Result<Vec<f64>> {
        (**self).predict(months)
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        (**self).fitted_values()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_fitted(&self) -> bool {
        (**self).is_fitted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeasonalTrendModel;

    fn series(n: usize) -> MonthlySeries {
        let mut month = YearMonth::new(2023, 1).unwrap();
        let mut months = Vec::new();
        for _ in 0..n {
            months.push(month);
            month = month.succ();
        }
        let values = (0..n).map(|i| 100.0 + 5.0 * i as f64).collect();
        MonthlySeries::new(months, values).unwrap()
    }

    #[test]
    fn boxed_oracle_delegates() {
        let mut model: BoxedOracle = Box::new(SeasonalTrendModel::new());
        assert_eq!(model.name(), "SeasonalTrend");
        assert!(!model.is_fitted());

        let ts = series(12);
        model.fit(&ts).unwrap();
        assert!(model.is_fitted());
        assert_eq!(model.fitted_values().unwrap().len(), 12);

        let preds = model.predict(ts.months()).unwrap();
        assert_eq!(preds.len(), 12);
    }
}
