//! CSV loading with value coercion.

use crate::core::{VisitorDataset, VisitorRecord};
use crate::error::{Result, VisitorError};
use crate::ingest::schema::ColumnIndex;
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Load a visitor table from a CSV file on disk.
pub fn read_csv_path(path: impl AsRef<Path>) -> Result<VisitorDataset> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening visitor csv");
    let file = File::open(path)?;
    read_csv(BufReader::new(file))
}

/// Load a visitor table from any CSV source.
///
/// Headers and cells are trimmed once here; every later stage works on the
/// normalized records.
pub fn read_csv<R: Read>(source: R) -> Result<VisitorDataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        records.push(parse_row(&row, &columns, line)?);
    }

    let dataset = VisitorDataset::new(records);
    info!(
        rows = dataset.len(),
        visitors = dataset.total_visitors(),
        "loaded visitor dataset"
    );
    Ok(dataset)
}

fn parse_row(row: &StringRecord, columns: &ColumnIndex, line: u64) -> Result<VisitorRecord> {
    let field = |idx: usize, name: &str| {
        row.get(idx)
            .map(str::trim)
            .ok_or_else(|| invalid(line, format!("missing {name} field")))
    };

    let date = parse_date(field(columns.date, "date")?)
        .ok_or_else(|| invalid(line, format!("unparseable date {:?}", row.get(columns.date))))?;

    let visitor_type = field(columns.visitor_type, "visitor type")?;
    if visitor_type.is_empty() {
        return Err(invalid(line, "empty visitor type".to_string()));
    }

    let weather = field(columns.weather, "weather condition")?;
    if weather.is_empty() {
        return Err(invalid(line, "empty weather condition".to_string()));
    }

    let raw_visitors = field(columns.visitors, "visitor count")?;
    let visitors = parse_visitors(raw_visitors)
        .ok_or_else(|| invalid(line, format!("invalid visitor count {raw_visitors:?}")))?;

    Ok(VisitorRecord::new(date, visitor_type, weather, visitors))
}

/// Parse a date cell. Time-of-day components are discarded.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parse a visitor count: a non-negative integer, or an integral float such as `"12.0"`.
pub fn parse_visitors(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u64>() {
        return Some(n);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Some(value as u64)
    } else {
        None
    }
}

fn invalid(line: u64, reason: String) -> VisitorError {
    VisitorError::InvalidRecord { line, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_and_normalizes_headers() {
        let data = "Date , Visitor Type,Weather Condition ,Number of Visitors \n\
                    2024-01-03,Hiker,Sunny,12\n\
                    2024-01-04, Camper ,Rainy, 7\n";
        let ds = read_csv(data.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[1].visitor_type, "Camper");
        assert_eq!(ds.records()[1].visitors, 7);
        assert_eq!(ds.total_visitors(), 19);
    }

    #[test]
    fn missing_column_is_explicit() {
        let data = "Date,Visitor Type,Number of Visitors\n2024-01-03,Hiker,12\n";
        let err = read_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(err, VisitorError::MissingColumn(ref c) if c == "Weather Condition"));
    }

    #[test]
    fn bad_count_reports_line() {
        let data = "Date,Visitor Type,Weather Condition,Number of Visitors\n\
                    2024-01-03,Hiker,Sunny,12\n\
                    2024-01-04,Hiker,Sunny,-3\n";
        let err = read_csv(data.as_bytes()).unwrap_err();
        match err {
            VisitorError::InvalidRecord { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("-3"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bad_date_is_rejected() {
        let data = "Date,Visitor Type,Weather Condition,Number of Visitors\n\
                    yesterday,Hiker,Sunny,12\n";
        assert!(matches!(
            read_csv(data.as_bytes()),
            Err(VisitorError::InvalidRecord { line: 2, .. })
        ));
    }

    #[test]
    fn empty_category_is_rejected() {
        let data = "Date,Visitor Type,Weather Condition,Number of Visitors\n\
                    2024-01-03,,Sunny,12\n";
        assert!(matches!(
            read_csv(data.as_bytes()),
            Err(VisitorError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn header_only_file_is_empty_dataset() {
        let data = "Date,Visitor Type,Weather Condition,Number of Visitors\n";
        let ds = read_csv(data.as_bytes()).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert_eq!(parse_date("2024-07-04"), Some(expected));
        assert_eq!(parse_date("2024/07/04"), Some(expected));
        assert_eq!(parse_date("07/04/2024"), Some(expected));
        assert_eq!(parse_date("2024-07-04 13:45:00"), Some(expected));
        assert_eq!(parse_date("2024-07-04T13:45:00"), Some(expected));
        assert_eq!(parse_date("2024-13-04"), None);
    }

    #[test]
    fn visitor_counts() {
        assert_eq!(parse_visitors("42"), Some(42));
        assert_eq!(parse_visitors("42.0"), Some(42));
        assert_eq!(parse_visitors("0"), Some(0));
        assert_eq!(parse_visitors("4.5"), None);
        assert_eq!(parse_visitors("-1"), None);
        assert_eq!(parse_visitors("NaN"), None);
        assert_eq!(parse_visitors("many"), None);
    }
}
