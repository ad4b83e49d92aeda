//! Required columns and header normalization.

use crate::error::{Result, VisitorError};
use csv::StringRecord;

pub const DATE: &str = "Date";
pub const VISITOR_TYPE: &str = "Visitor Type";
pub const WEATHER_CONDITION: &str = "Weather Condition";
pub const NUMBER_OF_VISITORS: &str = "Number of Visitors";

/// Every column a visitor table must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [DATE, VISITOR_TYPE, WEATHER_CONDITION, NUMBER_OF_VISITORS];

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub date: usize,
    pub visitor_type: usize,
    pub weather: usize,
    pub visitors: usize,
}

impl ColumnIndex {
    /// Resolve required columns from a header row.
    ///
    /// Header names are compared after trimming surrounding whitespace. When a
    /// name repeats, the first occurrence wins. Extra columns are ignored.
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        let names: Vec<&str> = headers.iter().map(str::trim).collect();
        let find = |column: &str| {
            names
                .iter()
                .position(|name| *name == column)
                .ok_or_else(|| VisitorError::MissingColumn(column.to_string()))
        };

        Ok(Self {
            date: find(DATE)?,
            visitor_type: find(VISITOR_TYPE)?,
            weather: find(WEATHER_CONDITION)?,
            visitors: find(NUMBER_OF_VISITORS)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_trimmed_headers() {
        let headers = StringRecord::from(vec![
            " Number of Visitors ",
            "Extra",
            "Date",
            "Weather Condition  ",
            "  Visitor Type",
        ]);
        let idx = ColumnIndex::from_headers(&headers).unwrap();
        assert_eq!(
            idx,
            ColumnIndex {
                date: 2,
                visitor_type: 4,
                weather: 3,
                visitors: 0,
            }
        );
    }

    #[test]
    fn reports_first_missing_column() {
        let headers = StringRecord::from(vec!["Date", "Visitor Type", "Number of Visitors"]);
        let err = ColumnIndex::from_headers(&headers).unwrap_err();
        assert!(matches!(err, VisitorError::MissingColumn(ref c) if c == WEATHER_CONDITION));
    }
}
