//! Core data structures shared by the aggregation, pivot and forecast stages.

mod calendar;
mod dataset;
mod record;
mod series;

pub use calendar::{YearMonth, YearWeek};
pub use dataset::{VisitorDataset, ALL_WEATHER};
pub use record::VisitorRecord;
pub use series::MonthlySeries;
