//! The validated, immutable visitor table shared by every pipeline stage.

use crate::core::calendar::YearMonth;
use crate::core::record::VisitorRecord;
use chrono::NaiveDate;

/// Selector value meaning "no weather filter".
pub const ALL_WEATHER: &str = "All";

/// Visitor records in file order.
///
/// A dataset is only built from already-normalized records (see
/// [`crate::ingest`]); pipeline stages never mutate it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitorDataset {
    records: Vec<VisitorRecord>,
}

impl VisitorDataset {
    pub fn new(records: Vec<VisitorRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[VisitorRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of visitors over all rows.
    pub fn total_visitors(&self) -> u64 {
        self.records.iter().map(|r| r.visitors).sum()
    }

    /// Distinct visitor types in order of first appearance.
    pub fn visitor_types(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.visitor_type.as_str()))
    }

    /// Distinct weather conditions in order of first appearance.
    pub fn weather_conditions(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.weather.as_str()))
    }

    /// Weather selector choices: `"All"` followed by every observed condition.
    pub fn weather_options(&self) -> Vec<String> {
        let mut options = vec![ALL_WEATHER.to_string()];
        options.extend(self.weather_conditions());
        options
    }

    pub fn has_visitor_type(&self, visitor_type: &str) -> bool {
        self.records.iter().any(|r| r.visitor_type == visitor_type)
    }

    pub fn has_weather(&self, weather: &str) -> bool {
        self.records.iter().any(|r| r.weather == weather)
    }

    /// Earliest and latest dates, or `None` when empty.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.iter().map(|r| r.date).min()?;
        let last = self.records.iter().map(|r| r.date).max()?;
        Some((first, last))
    }

    /// Distinct months containing at least one row, ascending.
    pub fn months(&self) -> Vec<YearMonth> {
        let mut months: Vec<YearMonth> = self.records.iter().map(|r| r.month()).collect();
        months.sort_unstable();
        months.dedup();
        months
    }

    /// New dataset holding the rows accepted by `predicate`.
    pub fn filter<P>(&self, mut predicate: P) -> VisitorDataset
    where
        P: FnMut(&VisitorRecord) -> bool,
    {
        VisitorDataset {
            records: self
                .records
                .iter()
                .filter(|r| predicate(r))
                .cloned()
                .collect(),
        }
    }
}

impl From<Vec<VisitorRecord>> for VisitorDataset {
    fn from(records: Vec<VisitorRecord>) -> Self {
        Self::new(records)
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(y: i32, m: u32, d: u32, kind: &str, weather: &str, n: u64) -> VisitorRecord {
        VisitorRecord::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), kind, weather, n)
    }

    fn sample() -> VisitorDataset {
        VisitorDataset::new(vec![
            record(2024, 3, 2, "Hiker", "Sunny", 10),
            record(2024, 1, 5, "Camper", "Rainy", 4),
            record(2024, 3, 9, "Hiker", "Rainy", 6),
            record(2024, 2, 1, "Cyclist", "Sunny", 3),
        ])
    }

    #[test]
    fn distinct_categories_keep_first_appearance_order() {
        let ds = sample();
        assert_eq!(ds.visitor_types(), vec!["Hiker", "Camper", "Cyclist"]);
        assert_eq!(ds.weather_conditions(), vec!["Sunny", "Rainy"]);
        assert_eq!(ds.weather_options(), vec!["All", "Sunny", "Rainy"]);
    }

    #[test]
    fn totals_and_ranges() {
        let ds = sample();
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.total_visitors(), 23);
        let (first, last) = ds.date_range().unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        let months: Vec<String> = ds.months().iter().map(|m| m.to_string()).collect();
        assert_eq!(months, vec!["2024-01", "2024-02", "2024-03"]);
    }

    #[test]
    fn filter_returns_new_dataset() {
        let ds = sample();
        let hikers = ds.filter(|r| r.visitor_type == "Hiker");
        assert_eq!(hikers.len(), 2);
        assert_eq!(ds.len(), 4);
        assert!(hikers.has_weather("Rainy"));
        assert!(!hikers.has_visitor_type("Camper"));
    }

    #[test]
    fn empty_dataset_has_no_range() {
        let ds = VisitorDataset::default();
        assert!(ds.is_empty());
        assert!(ds.date_range().is_none());
        assert_eq!(ds.weather_options(), vec!["All"]);
    }
}
