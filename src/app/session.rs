//! Event orchestration shared by every host.
//!
//! A session owns the plot state, the renderer and the surface. Each event is
//! handled to completion: state change first, then a full redraw. The host
//! (terminal UI, tests) only translates its native events into
//! `SurfaceEvent`s.

use tracing::{debug, info};

use crate::domain::{Point, StyleConfig, SurfaceSize};
use crate::error::AppError;
use crate::fit::FittingStrategy;
use crate::plot::{PlotState, Renderer, Surface};

/// Host input, already expressed in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    /// The surface was clicked at this pixel position.
    Click(Point),
    /// The surface now has these pixel dimensions.
    Resize(SurfaceSize),
}

pub struct PlotSession<S: Surface> {
    state: PlotState,
    renderer: Renderer,
    surface: S,
}

impl<S: Surface> PlotSession<S> {
    /// Build a session and paint the first frame.
    pub fn new(
        mut surface: S,
        size: SurfaceSize,
        style: StyleConfig,
        strategy: Box<dyn FittingStrategy>,
    ) -> Result<Self, AppError> {
        style.validate()?;
        surface.resize(size)?;

        let mut session = Self {
            state: PlotState::new(strategy),
            renderer: Renderer::new(style),
            surface,
        };
        info!(size = %size, strategy = session.state.strategy_name(), "plot session started");
        session.redraw()?;
        Ok(session)
    }

    pub fn handle(&mut self, event: SurfaceEvent) -> Result<(), AppError> {
        match event {
            SurfaceEvent::Click(p) => self.add_point(p),
            SurfaceEvent::Resize(size) => self.resize(size),
        }
    }

    pub fn add_point(&mut self, p: Point) -> Result<(), AppError> {
        self.state.add_point(p);
        self.redraw()
    }

    /// Append several points, then paint once.
    pub fn extend(&mut self, points: impl IntoIterator<Item = Point>) -> Result<(), AppError> {
        for p in points {
            self.state.add_point(p);
        }
        self.redraw()
    }

    pub fn resize(&mut self, size: SurfaceSize) -> Result<(), AppError> {
        debug!(size = %size, "surface resize");
        self.surface.resize(size)?;
        self.redraw()
    }

    pub fn set_strategy(&mut self, strategy: Box<dyn FittingStrategy>) -> Result<(), AppError> {
        info!(strategy = strategy.name(), "fitting strategy changed");
        self.state.set_strategy(strategy);
        self.redraw()
    }

    pub fn redraw(&mut self) -> Result<(), AppError> {
        self.surface.redraw(&self.renderer, &self.state)
    }

    pub fn state(&self) -> &PlotState {
        &self.state
    }

    pub fn style(&self) -> &StyleConfig {
        self.renderer.style()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
