//! Per-month, per-visitor-type visitor matrix.

mod matrix;

pub use matrix::{pivot_visitor_types, TypeMatrix};
