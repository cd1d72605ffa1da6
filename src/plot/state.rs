//! Plot state: the recorded points plus the fit derived from them.

use tracing::debug;

use crate::domain::Point;
use crate::fit::{FittedFunction, FittingStrategy, MeanSquares};

/// Owns the append-only point set and the active fitted function.
///
/// Invariant: `fitted` is `Some` iff at least two points exist, and it is
/// always the active strategy applied to *all* current points.
pub struct PlotState {
    points: Vec<Point>,
    fitted: Option<FittedFunction>,
    strategy: Box<dyn FittingStrategy>,
}

impl PlotState {
    pub fn new(strategy: Box<dyn FittingStrategy>) -> Self {
        Self {
            points: Vec::new(),
            fitted: None,
            strategy,
        }
    }

    /// Append a point and refit when the set is large enough.
    pub fn add_point(&mut self, p: Point) {
        self.points.push(p);
        debug!(x = p.x, y = p.y, n = self.points.len(), "point recorded");
        self.refit();
    }

    /// Replace the active strategy; an existing fit is recomputed with it.
    pub fn set_strategy(&mut self, strategy: Box<dyn FittingStrategy>) {
        self.strategy = strategy;
        self.refit();
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn fitted_function(&self) -> Option<&FittedFunction> {
        self.fitted.as_ref()
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Root-mean-square residual of the current fit over all points.
    pub fn rmse(&self) -> Option<f64> {
        let f = self.fitted.as_ref()?;
        let sse: f64 = self
            .points
            .iter()
            .map(|p| {
                let r = p.y - f.eval(p.x);
                r * r
            })
            .sum();
        Some((sse / self.points.len() as f64).sqrt())
    }

    fn refit(&mut self) {
        if self.points.len() < 2 {
            self.fitted = None;
            return;
        }
        let fitted = self.strategy.fit(&self.points);
        debug!(strategy = self.strategy.name(), fit = fitted.label(), "refit");
        self.fitted = Some(fitted);
    }
}

impl Default for PlotState {
    fn default() -> Self {
        Self::new(Box::new(MeanSquares))
    }
}

impl std::fmt::Debug for PlotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlotState")
            .field("points", &self.points)
            .field("fitted", &self.fitted)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}
