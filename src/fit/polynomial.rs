//! Polynomial least squares.
//!
//! Pixel coordinates run into the hundreds, so raw powers (`x^3 ~ 1e9`) make
//! the design matrix badly conditioned. We fit on a centred, scaled axis
//! `t = (x - shift) / scale` with `t ∈ [-1, 1]` over the observed x range.

use std::fmt;

use nalgebra::DVector;
use tracing::warn;

use crate::domain::Point;
use crate::fit::{FittedFunction, FittingStrategy};
use crate::math::{polynomial_design, solve_least_squares};

/// `y = Σ coeffs[i] · t^i` with `t = (x - shift) / scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    pub shift: f64,
    pub scale: f64,
    pub coeffs: Vec<f64>,
}

impl Polynomial {
    pub fn eval(&self, x: f64) -> f64 {
        let t = (x - self.shift) / self.scale;
        // Horner.
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * t + c)
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "degree {} (y({:.1}) = {:.3})", self.degree(), self.shift, self.eval(self.shift))
    }
}

impl From<Polynomial> for FittedFunction {
    fn from(poly: Polynomial) -> Self {
        FittedFunction::new(poly.to_string(), move |x| poly.eval(x))
    }
}

/// Least squares polynomial of a fixed degree.
#[derive(Debug, Clone, Copy)]
pub struct PolynomialFit {
    degree: usize,
}

impl PolynomialFit {
    pub fn new(degree: usize) -> Self {
        Self { degree }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Fit the polynomial. Coefficients are NaN when no solve is accepted.
    pub fn fit_polynomial(&self, points: &[Point]) -> Polynomial {
        let (x_min, x_max) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
        let shift = (x_min + x_max) / 2.0;
        let half_range = (x_max - x_min) / 2.0;
        let scale = if half_range.is_finite() && half_range > 0.0 { half_range } else { 1.0 };

        let ts: Vec<f64> = points.iter().map(|p| (p.x - shift) / scale).collect();
        let design = polynomial_design(&ts, self.degree);
        let y = DVector::from_iterator(points.len(), points.iter().map(|p| p.y));

        let coeffs = match solve_least_squares(&design, &y) {
            Some(beta) => beta.iter().copied().collect(),
            None => {
                warn!(degree = self.degree, n = points.len(), "polynomial solve rejected");
                vec![f64::NAN; self.degree + 1]
            }
        };

        Polynomial { shift, scale, coeffs }
    }
}

impl FittingStrategy for PolynomialFit {
    fn name(&self) -> &str {
        match self.degree {
            1 => "linear",
            2 => "quadratic",
            3 => "cubic",
            _ => "polynomial",
        }
    }

    fn fit(&self, points: &[Point]) -> FittedFunction {
        self.fit_polynomial(points).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::least_squares_line;

    #[test]
    fn recovers_exact_parabola() {
        // y = 0.01 (x - 200)^2 + 50
        let points: Vec<Point> = (0..15)
            .map(|i| {
                let x = 20.0 + i as f64 * 25.0;
                Point::new(x, 0.01 * (x - 200.0).powi(2) + 50.0)
            })
            .collect();

        let poly = PolynomialFit::new(2).fit_polynomial(&points);
        for x in [0.0, 150.0, 200.0, 400.0, 800.0] {
            let expected = 0.01 * (x - 200.0_f64).powi(2) + 50.0;
            assert!((poly.eval(x) - expected).abs() < 1e-6, "x={x}");
        }
    }

    #[test]
    fn degree_one_matches_closed_form_line() {
        let points = [
            Point::new(10.0, 40.0),
            Point::new(90.0, 35.0),
            Point::new(250.0, 160.0),
            Point::new(400.0, 170.0),
        ];
        let poly = PolynomialFit::new(1).fit_polynomial(&points);
        let line = least_squares_line(&points);
        for x in [0.0, 100.0, 640.0] {
            assert!((poly.eval(x) - line.eval(x)).abs() < 1e-8);
        }
    }

    #[test]
    fn more_terms_than_points_still_interpolates() {
        // Two points, cubic: underdetermined, SVD picks the minimum-norm
        // solution, which still passes through both points.
        let points = [Point::new(100.0, 10.0), Point::new(300.0, 30.0)];
        let poly = PolynomialFit::new(3).fit_polynomial(&points);
        assert!((poly.eval(100.0) - 10.0).abs() < 1e-8);
        assert!((poly.eval(300.0) - 30.0).abs() < 1e-8);
    }

    #[test]
    fn names_follow_degree() {
        assert_eq!(PolynomialFit::new(2).name(), "quadratic");
        assert_eq!(PolynomialFit::new(5).name(), "polynomial");
    }
}
