//! Month x visitor-type pivot table.

use crate::core::{VisitorDataset, YearMonth};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Visitor totals keyed by month (rows) and visitor type (columns).
///
/// Rows are the months present in the input in chronological order; columns
/// are the distinct visitor types in lexicographic order. Absent
/// combinations hold zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeMatrix {
    months: Vec<YearMonth>,
    visitor_types: Vec<String>,
    /// cells[row][column]
    cells: Vec<Vec<u64>>,
}

impl TypeMatrix {
    pub fn months(&self) -> &[YearMonth] {
        &self.months
    }

    pub fn visitor_types(&self) -> &[String] {
        &self.visitor_types
    }

    pub fn rows(&self) -> &[Vec<u64>] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Number of (months, visitor types).
    pub fn shape(&self) -> (usize, usize) {
        (self.months.len(), self.visitor_types.len())
    }

    /// Total for one month and visitor type. `None` if either is not in the matrix.
    pub fn cell(&self, month: &YearMonth, visitor_type: &str) -> Option<u64> {
        let row = self.months.binary_search(month).ok()?;
        let col = self.column_index(visitor_type)?;
        Some(self.cells[row][col])
    }

    /// Monthly totals of one visitor type, aligned with [`months`](Self::months).
    pub fn column(&self, visitor_type: &str) -> Option<Vec<u64>> {
        let col = self.column_index(visitor_type)?;
        Some(self.cells.iter().map(|row| row[col]).collect())
    }

    /// Total visitors per month across all types (stacked bar height).
    pub fn row_totals(&self) -> Vec<u64> {
        self.cells.iter().map(|row| row.iter().sum()).collect()
    }

    pub fn grand_total(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }

    fn column_index(&self, visitor_type: &str) -> Option<usize> {
        self.visitor_types
            .binary_search_by(|t| t.as_str().cmp(visitor_type))
            .ok()
    }
}

/// Pivot the dataset into a month x visitor-type matrix of summed visitors.
///
/// An empty dataset yields an empty matrix.
pub fn pivot_visitor_types(dataset: &VisitorDataset) -> TypeMatrix {
    let visitor_types: Vec<String> = dataset
        .records()
        .iter()
        .map(|r| r.visitor_type.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut rows: BTreeMap<YearMonth, Vec<u64>> = BTreeMap::new();
    for record in dataset.records() {
        let col = visitor_types
            .binary_search(&record.visitor_type)
            .unwrap_or_default();
        let row = rows
            .entry(record.month())
            .or_insert_with(|| vec![0; visitor_types.len()]);
        row[col] += record.visitors;
    }

    debug!(
        months = rows.len(),
        visitor_types = visitor_types.len(),
        "pivoted visitor types"
    );

    let (months, cells): (Vec<YearMonth>, Vec<Vec<u64>>) = rows.into_iter().unzip();
    TypeMatrix {
        months,
        visitor_types,
        cells,
    }
}
