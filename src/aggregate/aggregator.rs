//! Bucketed visitor totals.

use crate::aggregate::Granularity;
use crate::core::{VisitorDataset, VisitorRecord, YearMonth, YearWeek};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Key of an aggregation bucket. Orders chronologically within a granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BucketKey {
    Day(NaiveDate),
    Week(YearWeek),
    Month(YearMonth),
}

impl BucketKey {
    /// Bucket containing `record` at the given granularity.
    pub fn for_record(record: &VisitorRecord, granularity: Granularity) -> Self {
        match granularity {
            Granularity::Daily => BucketKey::Day(record.date),
            Granularity::Weekly => BucketKey::Week(record.week()),
            Granularity::Monthly => BucketKey::Month(record.month()),
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            BucketKey::Week(week) => fmt::Display::fmt(week, f),
            BucketKey::Month(month) => fmt::Display::fmt(month, f),
        }
    }
}

/// Total visitors for one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub key: BucketKey,
    pub total: u64,
}

/// Visitor totals per bucket, in ascending bucket order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedSeries {
    granularity: Granularity,
    buckets: Vec<Bucket>,
}

impl AggregatedSeries {
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn keys(&self) -> Vec<BucketKey> {
        self.buckets.iter().map(|b| b.key).collect()
    }

    pub fn totals(&self) -> Vec<u64> {
        self.buckets.iter().map(|b| b.total).collect()
    }

    /// Sum over all buckets. Equals the dataset's total visitors.
    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|b| b.total).sum()
    }
}

/// Sum visitors per bucket of the requested granularity.
///
/// # Example
///
/// ```
/// use visitor_forecast::aggregate::{aggregate_visitors, Granularity};
/// use visitor_forecast::core::{VisitorDataset, VisitorRecord};
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
/// let dataset = VisitorDataset::new(vec![
///     VisitorRecord::new(day(1), "Hiker", "Sunny", 10),
///     VisitorRecord::new(day(1), "Camper", "Sunny", 5),
///     VisitorRecord::new(day(2), "Hiker", "Rainy", 3),
/// ]);
///
/// let daily = aggregate_visitors(&dataset, Granularity::Daily);
/// assert_eq!(daily.totals(), vec![15, 3]);
///
/// let monthly = aggregate_visitors(&dataset, Granularity::Monthly);
/// assert_eq!(monthly.buckets()[0].key.to_string(), "2024-06");
/// assert_eq!(monthly.total(), 18);
/// ```
pub fn aggregate_visitors(dataset: &VisitorDataset, granularity: Granularity) -> AggregatedSeries {
    let mut totals: BTreeMap<BucketKey, u64> = BTreeMap::new();
    for record in dataset.records() {
        *totals
            .entry(BucketKey::for_record(record, granularity))
            .or_insert(0) += record.visitors;
    }

    debug!(
        granularity = %granularity,
        buckets = totals.len(),
        "aggregated visitor counts"
    );

    AggregatedSeries {
        granularity,
        buckets: totals
            .into_iter()
            .map(|(key, total)| Bucket { key, total })
            .collect(),
    }
}
