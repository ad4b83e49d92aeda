//! Ridge-penalized least squares used by the seasonal trend model.
//!
//! Each coefficient carries its own L2 penalty, which is the MAP estimate
//! under independent zero-mean Gaussian priors with unit noise variance.

use crate::error::{Result, VisitorError};

/// Fitted ridge regression coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct RidgeResult {
    /// One coefficient per design column.
    pub coefficients: Vec<f64>,
}

impl RidgeResult {
    /// Predict one value per design row.
    pub fn predict(&self, design: &[Vec<f64>]) -> Result<Vec<f64>> {
        design
            .iter()
            .map(|row| {
                if row.len() != self.coefficients.len() {
                    return Err(VisitorError::DimensionMismatch {
                        expected: self.coefficients.len(),
                        got: row.len(),
                    });
                }
                Ok(row
                    .iter()
                    .zip(&self.coefficients)
                    .map(|(x, beta)| x * beta)
                    .sum())
            })
            .collect()
    }

    /// Get the number of coefficients.
    pub fn num_coefficients(&self) -> usize {
        self.coefficients.len()
    }
}

/// Fit `y ≈ X @ beta` minimizing `|y - X beta|² + Σ penalty_j beta_j²`.
///
/// # Arguments
/// * `design` - Design matrix as rows (n rows of k columns)
/// * `y` - Target values (length n)
/// * `penalties` - Non-negative L2 penalty per column (length k)
pub fn ridge_fit(design: &[Vec<f64>], y: &[f64], penalties: &[f64]) -> Result<RidgeResult> {
    let n = y.len();
    if n == 0 {
        return Err(VisitorError::InsufficientData { needed: 1, got: 0 });
    }
    if design.len() != n {
        return Err(VisitorError::DimensionMismatch {
            expected: n,
            got: design.len(),
        });
    }

    let k = penalties.len();
    if let Some(row) = design.iter().find(|row| row.len() != k) {
        return Err(VisitorError::DimensionMismatch {
            expected: k,
            got: row.len(),
        });
    }
    if penalties.iter().any(|p| !p.is_finite() || *p < 0.0) {
        return Err(VisitorError::InvalidParameter(
            "ridge penalties must be finite and non-negative".into(),
        ));
    }

    // Normal equations: (X'X + diag(penalties)) beta = X'y
    let mut xtx = vec![vec![0.0; k]; k];
    let mut xty = vec![0.0; k];
    for (row, &target) in design.iter().zip(y) {
        for i in 0..k {
            xty[i] += row[i] * target;
            for j in 0..=i {
                xtx[i][j] += row[i] * row[j];
            }
        }
    }
    for i in 0..k {
        for j in 0..i {
            xtx[j][i] = xtx[i][j];
        }
        // Small jitter keeps unpenalized columns solvable.
        xtx[i][i] += penalties[i] + 1e-10;
    }

    let coefficients = solve_symmetric(&xtx, &xty).ok_or_else(|| {
        VisitorError::ComputationError(
            "ridge regression failed: matrix not positive definite".into(),
        )
    })?;

    Ok(RidgeResult { coefficients })
}

/// Solve symmetric positive definite system using Cholesky decomposition.
///
/// Solves A @ x = b where A is symmetric positive definite.
fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return None;
    }

    // Cholesky decomposition A = L @ L'
    let mut l = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }

            if i == j {
                if sum <= 0.0 || !sum.is_finite() {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // Forward substitution: L @ y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    // Backward substitution: L' @ x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    Some(x)
}
