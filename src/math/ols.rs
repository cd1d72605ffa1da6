//! Least squares solvers.
//!
//! The closed-form line fit lives with the mean-squares strategy; everything
//! else (weighted lines for robust fitting, polynomials) goes through the
//! general solver here:
//!
//! ```text
//! minimize Σ w_i (y_i - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - Rows are scaled by `sqrt(w_i)` and the result is solved as ordinary
//!   least squares.
//! - SVD handles tall design matrices and rank-deficient ones (e.g. every
//!   click in the same column) without panicking.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Weighted least squares: scales each row of `x` and `y` by `sqrt(w_i)`.
///
/// Negative or non-finite weights are treated as zero.
pub fn solve_weighted_least_squares(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    weights: &[f64],
) -> Option<DVector<f64>> {
    debug_assert_eq!(x.nrows(), weights.len());
    debug_assert_eq!(y.len(), weights.len());

    let mut xw = x.clone();
    let mut yw = y.clone();
    for (i, &w) in weights.iter().enumerate() {
        let s = if w.is_finite() && w > 0.0 { w.sqrt() } else { 0.0 };
        for j in 0..xw.ncols() {
            xw[(i, j)] *= s;
        }
        yw[i] *= s;
    }

    solve_least_squares(&xw, &yw)
}

/// Vandermonde-style design matrix with columns `1, t, t^2, ..., t^degree`.
pub fn polynomial_design(ts: &[f64], degree: usize) -> DMatrix<f64> {
    let cols = degree + 1;
    DMatrix::from_fn(ts.len(), cols, |row, col| ts[row].powi(col as i32))
}
