//! A single row of the visitor dataset.

use crate::core::calendar::{YearMonth, YearWeek};
use chrono::NaiveDate;

/// One visitor-count observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorRecord {
    pub date: NaiveDate,
    pub visitor_type: String,
    pub weather: String,
    pub visitors: u64,
}

impl VisitorRecord {
    pub fn new(
        date: NaiveDate,
        visitor_type: impl Into<String>,
        weather: impl Into<String>,
        visitors: u64,
    ) -> Self {
        Self {
            date,
            visitor_type: visitor_type.into(),
            weather: weather.into(),
            visitors,
        }
    }

    /// Month bucket of this record.
    pub fn month(&self) -> YearMonth {
        YearMonth::from_date(self.date)
    }

    /// Week bucket of this record.
    pub fn week(&self) -> YearWeek {
        YearWeek::from_date(self.date)
    }
}
