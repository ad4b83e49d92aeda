//! Time-bucket size selector.

use crate::error::{Result, VisitorError};
use std::fmt;
use std::str::FromStr;

/// Size of the time bucket used to aggregate visitor counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Granularity {
    /// One bucket per calendar date.
    #[default]
    Daily,
    /// One bucket per Sunday-based week of the year (`%Y-%U`).
    Weekly,
    /// One bucket per calendar month (`%Y-%m`).
    Monthly,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [Granularity::Daily, Granularity::Weekly, Granularity::Monthly];

    /// Selector label as shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Granularity::Daily => "Daily",
            Granularity::Weekly => "Weekly",
            Granularity::Monthly => "Monthly",
        }
    }

    /// Name of the bucket column in tabular output.
    pub fn key_column(&self) -> &'static str {
        match self {
            Granularity::Daily => "Date",
            Granularity::Weekly => "Week",
            Granularity::Monthly => "Month",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Granularity {
    type Err = VisitorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Granularity::Daily),
            "weekly" => Ok(Granularity::Weekly),
            "monthly" => Ok(Granularity::Monthly),
            _ => Err(VisitorError::UnknownGranularity(s.to_string())),
        }
    }
}
