//! Ordinary least squares line in closed form.
//!
//! With `n` points and the running sums `Sx, Sy, Sxy, Sxx`:
//!
//! ```text
//! m = (n·Sxy − Sx·Sy) / (n·Sxx − Sx·Sx)
//! b = (Sy − m·Sx) / n
//! ```
//!
//! When every x is identical the denominator is zero and `m`, `b` come out
//! non-finite. That is left as is; the renderer refuses to draw such a line.

use std::fmt;

use tracing::warn;

use crate::domain::Point;
use crate::fit::{FittedFunction, FittingStrategy};

/// `y = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn is_finite(&self) -> bool {
        self.slope.is_finite() && self.intercept.is_finite()
    }
}

impl fmt::Display for LinearFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.intercept < 0.0 {
            write!(f, "y = {:.3}x - {:.3}", self.slope, -self.intercept)
        } else {
            write!(f, "y = {:.3}x + {:.3}", self.slope, self.intercept)
        }
    }
}

impl From<LinearFit> for FittedFunction {
    fn from(line: LinearFit) -> Self {
        FittedFunction::new(line.to_string(), move |x| line.eval(x))
    }
}

/// Closed-form least squares line over `points`.
pub fn least_squares_line(points: &[Point]) -> LinearFit {
    let n = points.len() as f64;
    let (mut sx, mut sy, mut sxy, mut sxx) = (0.0, 0.0, 0.0, 0.0);
    for p in points {
        sx += p.x;
        sy += p.y;
        sxy += p.x * p.y;
        sxx += p.x * p.x;
    }

    let slope = (n * sxy - sx * sy) / (n * sxx - sx * sx);
    let intercept = (sy - slope * sx) / n;
    LinearFit { slope, intercept }
}

/// The default strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanSquares;

impl FittingStrategy for MeanSquares {
    fn name(&self) -> &str {
        "mean squares"
    }

    fn fit(&self, points: &[Point]) -> FittedFunction {
        let line = least_squares_line(points);
        if !line.is_finite() {
            warn!(n = points.len(), "degenerate point set, fitted line is not finite");
        }
        line.into()
    }
}
