//! Monthly series handed to forecasting oracles.

use crate::core::calendar::YearMonth;
use crate::error::{Result, VisitorError};

/// A univariate series indexed by calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySeries {
    months: Vec<YearMonth>,
    values: Vec<f64>,
}

impl MonthlySeries {
    /// Create a series, validating that months are strictly increasing and
    /// that there is one value per month.
    pub fn new(months: Vec<YearMonth>, values: Vec<f64>) -> Result<Self> {
        if months.len() != values.len() {
            return Err(VisitorError::DimensionMismatch {
                expected: months.len(),
                got: values.len(),
            });
        }

        for i in 1..months.len() {
            if months[i] <= months[i - 1] {
                return Err(VisitorError::InvalidParameter(
                    "months must be strictly increasing".to_string(),
                ));
            }
        }

        Ok(Self { months, values })
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.months.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn months(&self) -> &[YearMonth] {
        &self.months
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn first_month(&self) -> Option<YearMonth> {
        self.months.first().copied()
    }

    pub fn last_month(&self) -> Option<YearMonth> {
        self.months.last().copied()
    }

    /// Value observed for `month`, if present.
    pub fn get(&self, month: &YearMonth) -> Option<f64> {
        self.months
            .binary_search(month)
            .ok()
            .map(|idx| self.values[idx])
    }

    /// Check if series has missing values (NaN or Inf).
    pub fn has_missing_values(&self) -> bool {
        self.values.iter().any(|v| !v.is_finite())
    }

    /// True when every month between the first and last is present.
    pub fn is_contiguous(&self) -> bool {
        self.months
            .windows(2)
            .all(|pair| pair[0].months_until(&pair[1]) == 1)
    }

    /// Extract a slice of the series.
    pub fn slice(&self, start: usize, end: usize) -> Result<MonthlySeries> {
        if start > end {
            return Err(VisitorError::InvalidParameter(
                "start must be <= end".to_string(),
            ));
        }
        if end > self.len() {
            return Err(VisitorError::InvalidParameter(format!(
                "end {} out of bounds (size: {})",
                end,
                self.len()
            )));
        }

        Ok(MonthlySeries {
            months: self.months[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
        })
    }
}
