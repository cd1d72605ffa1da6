//! Outlier-resistant line fit.
//!
//! Implemented as a small number of IRLS iterations:
//!
//! - start with uniform weights
//! - solve weighted least squares on `[1, x]`
//! - compute residuals
//! - update weights (Huber) and repeat
//!
//! Deterministic; no RNG is involved.

use nalgebra::DVector;
use tracing::debug;

use crate::domain::Point;
use crate::fit::{FittedFunction, FittingStrategy, LinearFit, least_squares_line};
use crate::math::{polynomial_design, solve_weighted_least_squares};

/// Lower bound on the Huber down-weighting factor.
const MIN_WEIGHT_FACTOR: f64 = 1e-3;

/// Huber-weighted least squares line.
#[derive(Debug, Clone, Copy)]
pub struct HuberLine {
    /// Huber tuning constant, in units of the robust residual scale.
    pub k: f64,
    /// Number of reweighting passes after the initial unweighted fit.
    pub iterations: usize,
}

impl Default for HuberLine {
    fn default() -> Self {
        Self { k: 1.5, iterations: 5 }
    }
}

impl HuberLine {
    pub fn fit_line(&self, points: &[Point]) -> LinearFit {
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let design = polynomial_design(&xs, 1);
        let y = DVector::from_iterator(points.len(), points.iter().map(|p| p.y));

        let mut weights = vec![1.0; points.len()];
        let mut line = least_squares_line(points);

        for pass in 0..=self.iterations {
            let Some(beta) = solve_weighted_least_squares(&design, &y, &weights) else {
                // Rank-deficient (e.g. every x identical): keep the closed form.
                debug!(pass, "weighted solve rejected, keeping previous line");
                break;
            };
            line = LinearFit {
                slope: beta[1],
                intercept: beta[0],
            };

            if pass == self.iterations {
                break;
            }

            let residuals: Vec<f64> = points.iter().map(|p| p.y - line.eval(p.x)).collect();
            weights = huber_weights(&residuals, self.k);
        }

        line
    }
}

impl FittingStrategy for HuberLine {
    fn name(&self) -> &str {
        "huber"
    }

    fn fit(&self, points: &[Point]) -> FittedFunction {
        self.fit_line(points).into()
    }
}

fn huber_weights(residuals: &[f64], k: f64) -> Vec<f64> {
    // Scale via MAD (median absolute deviation).
    let mut abs: Vec<f64> = residuals.iter().map(|r| r.abs()).filter(|v| v.is_finite()).collect();
    let mad = median_mut(&mut abs).unwrap_or(0.0);
    let scale = (mad / 0.6745).max(1e-12);
    let cutoff = k.max(1e-6) * scale;

    residuals
        .iter()
        .map(|&r| {
            let ar = r.abs();
            let factor = if ar <= cutoff || !ar.is_finite() { 1.0 } else { cutoff / ar };
            factor.max(MIN_WEIGHT_FACTOR)
        })
        .collect()
}

fn median_mut(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_data_matches_least_squares() {
        let points: Vec<Point> = (0..10).map(|i| Point::new(i as f64 * 10.0, 5.0 + i as f64 * 20.0)).collect();
        let line = HuberLine::default().fit_line(&points);
        assert!((line.slope - 2.0).abs() < 1e-9);
        assert!((line.intercept - 5.0).abs() < 1e-7);
    }

    #[test]
    fn resists_a_single_outlier() {
        // y = x with small alternating noise, plus one point far above the line.
        let mut points: Vec<Point> = (0..20)
            .map(|i| {
                let x = i as f64 * 10.0;
                let noise = if i % 2 == 0 { 1.0 } else { -1.0 };
                Point::new(x, x + noise)
            })
            .collect();
        points.push(Point::new(100.0, 600.0));

        let ols = least_squares_line(&points);
        let huber = HuberLine::default().fit_line(&points);

        let ols_err = (ols.eval(150.0) - 150.0).abs();
        let huber_err = (huber.eval(150.0) - 150.0).abs();
        assert!(huber_err < ols_err / 2.0, "huber {huber_err} vs ols {ols_err}");
    }

    #[test]
    fn identical_x_does_not_panic() {
        let points = [Point::new(5.0, 5.0), Point::new(5.0, 10.0)];
        let f = HuberLine::default().fit(&points);
        let _ = f.eval(0.0);
    }

    #[test]
    fn median_handles_even_and_odd() {
        assert_eq!(median_mut(&mut [3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median_mut(&mut [4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median_mut(&mut []), None);
    }

    #[test]
    fn huber_weights_downweight_large_residuals() {
        let w = huber_weights(&[1.0, -1.0, 1.0, -1.0, 50.0], 1.5);
        assert_eq!(w[0], 1.0);
        assert!(w[4] < 0.1);
    }
}
