//! Calendar bucket keys used to group visitor records.

use crate::error::{Result, VisitorError};
use chrono::{Datelike, Days, NaiveDate};
use std::fmt;

/// A calendar month, displayed as `%Y-%m`.
///
/// Internally anchored on the first day of the month, so ordering and
/// arithmetic follow the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    /// Create a month from its year and 1-based month number.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or_else(|| {
                VisitorError::InvalidParameter(format!("invalid month {year}-{month:02}"))
            })
    }

    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            first: date - Days::new(u64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Last calendar day of the month (the month-end label of a monthly bucket).
    pub fn last_day(&self) -> NaiveDate {
        self.first + Days::new(u64::from(self.days_in_month() - 1))
    }

    /// Number of days in this month.
    pub fn days_in_month(&self) -> u32 {
        match self.month() {
            2 if is_leap_year(self.year()) => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// The following month.
    pub fn succ(&self) -> Self {
        Self {
            first: self.first + Days::new(u64::from(self.days_in_month())),
        }
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_until(&self, other: &YearMonth) -> i64 {
        (i64::from(other.year()) - i64::from(self.year())) * 12 + i64::from(other.month())
            - i64::from(self.month())
    }

    /// All months from `start` to `end` inclusive. Empty if `end < start`.
    pub fn range_inclusive(start: YearMonth, end: YearMonth) -> Vec<YearMonth> {
        let mut months = Vec::with_capacity(start.months_until(&end).max(0) as usize + 1);
        let mut current = start;
        while current <= end {
            months.push(current);
            current = current.succ();
        }
        months
    }

    /// Abbreviated English month name (`%b`), as shown on chart axes.
    pub fn short_name(&self) -> String {
        self.first.format("%b").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// A Sunday-based week of the year, displayed as `%Y-%U`.
///
/// Days before the first Sunday of January fall in week `00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearWeek {
    year: i32,
    week: u32,
}

impl YearWeek {
    /// The week containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        let yday = date.ordinal0();
        let wday = date.weekday().num_days_from_sunday();
        Self {
            year: date.year(),
            week: (yday + 7 - wday) / 7,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn week(&self) -> u32 {
        self.week
    }
}

impl fmt::Display for YearWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.week)
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
