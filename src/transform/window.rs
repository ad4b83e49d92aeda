//! Trailing window functions.

/// Trailing rolling mean with a minimum observation count.
///
/// Position `i` averages `series[i + 1 - window ..= i]`, clipped at the start
/// of the series. Positions with fewer than `min_periods` values in their
/// window are `NaN`. A `min_periods` of 1 makes the leading edge average
/// whatever values are available.
///
/// # Arguments
/// * `series` - Input values
/// * `window` - Window size
/// * `min_periods` - Minimum number of values required for a result
pub fn rolling_mean(series: &[f64], window: usize, min_periods: usize) -> Vec<f64> {
    rolling_apply(series, window, min_periods, |s| {
        s.iter().sum::<f64>() / s.len() as f64
    })
}

fn rolling_apply<F>(series: &[f64], window: usize, min_periods: usize, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    if window == 0 {
        return vec![f64::NAN; series.len()];
    }
    let min_periods = min_periods.clamp(1, window);

    (0..series.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let segment = &series[start..=i];
            if segment.len() >= min_periods {
                f(segment)
            } else {
                f64::NAN
            }
        })
        .collect()
}
