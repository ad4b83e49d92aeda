//! Loading and schema normalization of visitor tables.
//!
//! Column names are trimmed and validated once, at ingestion. Downstream
//! stages receive a [`VisitorDataset`](crate::core::VisitorDataset) and never
//! see raw headers.
//!
//! # Example
//!
//! ```
//! use visitor_forecast::ingest::read_csv;
//!
//! let csv = "Date,Visitor Type,Weather Condition,Number of Visitors\n\
//!            2024-05-01,Hiker,Sunny,120\n";
//! let dataset = read_csv(csv.as_bytes()).unwrap();
//! assert_eq!(dataset.total_visitors(), 120);
//! ```

pub mod reader;
pub mod schema;

pub use reader::{parse_date, parse_visitors, read_csv, read_csv_path};
pub use schema::{ColumnIndex, REQUIRED_COLUMNS};
