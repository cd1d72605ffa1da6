//! Fitting strategies.
//!
//! A strategy maps the full, ordered point set to a continuous function of x.
//! Strategies are stateless and swappable: `PlotState` only ever talks to the
//! `FittingStrategy` trait, and any `Fn(&[Point]) -> FittedFunction` closure
//! qualifies.

use std::fmt;
use std::sync::Arc;

use clap::ValueEnum;

use crate::domain::Point;

pub mod mean_squares;
pub mod polynomial;
pub mod robust;

pub use mean_squares::*;
pub use polynomial::*;
pub use robust::*;

/// A fitting algorithm.
pub trait FittingStrategy {
    /// Short display name (used in the status line and logs).
    fn name(&self) -> &str;

    /// Fit a function through `points`.
    ///
    /// Callers guarantee `points.len() >= 2`.
    fn fit(&self, points: &[Point]) -> FittedFunction;
}

impl<F> FittingStrategy for F
where
    F: Fn(&[Point]) -> FittedFunction,
{
    fn name(&self) -> &str {
        "custom"
    }

    fn fit(&self, points: &[Point]) -> FittedFunction {
        self(points)
    }
}

/// The result of a fit: a real function of one real argument.
///
/// Cheap to clone; the underlying closure is shared.
#[derive(Clone)]
pub struct FittedFunction {
    label: String,
    f: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
}

impl FittedFunction {
    pub fn new(label: impl Into<String>, f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            f: Arc::new(f),
        }
    }

    /// Evaluate the function at `x`. May be non-finite for degenerate fits.
    pub fn eval(&self, x: f64) -> f64 {
        (self.f)(x)
    }

    /// Human-readable form, e.g. `y = 1.000x + 0.000`.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for FittedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FittedFunction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Built-in strategies, selectable from the command line and cycled in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    /// Ordinary least squares line (closed form).
    MeanSquares,
    /// Huber-weighted line (outlier resistant).
    Huber,
    /// Least squares parabola.
    Quadratic,
    /// Least squares cubic.
    Cubic,
}

impl StrategyKind {
    pub fn build(self) -> Box<dyn FittingStrategy> {
        match self {
            StrategyKind::MeanSquares => Box::new(MeanSquares),
            StrategyKind::Huber => Box::new(HuberLine::default()),
            StrategyKind::Quadratic => Box::new(PolynomialFit::new(2)),
            StrategyKind::Cubic => Box::new(PolynomialFit::new(3)),
        }
    }

    pub fn next(self) -> Self {
        match self {
            StrategyKind::MeanSquares => StrategyKind::Huber,
            StrategyKind::Huber => StrategyKind::Quadratic,
            StrategyKind::Quadratic => StrategyKind::Cubic,
            StrategyKind::Cubic => StrategyKind::MeanSquares,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_strategies() {
        let flat = |points: &[Point]| {
            let y = points[0].y;
            FittedFunction::new("flat", move |_| y)
        };
        let f = flat.fit(&[Point::new(0.0, 7.0), Point::new(1.0, 9.0)]);
        assert_eq!(flat.name(), "custom");
        assert_eq!(f.eval(123.0), 7.0);
        assert_eq!(f.label(), "flat");
    }

    #[test]
    fn strategy_cycle_visits_every_kind() {
        let mut kind = StrategyKind::MeanSquares;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(kind);
            kind = kind.next();
        }
        assert_eq!(kind, StrategyKind::MeanSquares);
        assert_eq!(
            seen,
            vec![
                StrategyKind::MeanSquares,
                StrategyKind::Huber,
                StrategyKind::Quadratic,
                StrategyKind::Cubic
            ]
        );
    }

    #[test]
    fn built_strategies_report_names() {
        assert_eq!(StrategyKind::MeanSquares.build().name(), "mean squares");
        assert_eq!(StrategyKind::Huber.build().name(), "huber");
        assert_eq!(StrategyKind::Quadratic.build().name(), "quadratic");
        assert_eq!(StrategyKind::Cubic.build().name(), "cubic");
    }
}
