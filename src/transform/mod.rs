//! Series transformations.
//!
//! # Example
//!
//! ```
//! use visitor_forecast::transform::rolling_mean;
//!
//! let smoothed = rolling_mean(&[3.0, 6.0, 9.0], 3, 1);
//! assert_eq!(smoothed, vec![3.0, 4.5, 6.0]);
//! ```

pub mod window;

pub use window::rolling_mean;
