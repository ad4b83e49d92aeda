//! Daily, weekly and monthly visitor totals.

mod aggregator;
mod granularity;

pub use aggregator::{aggregate_visitors, AggregatedSeries, Bucket, BucketKey};
pub use granularity::Granularity;
