//! Drawing surfaces.
//!
//! A surface owns pixel storage of some kind and knows how to repaint itself
//! with a `Renderer`. The session layer only talks to the `Surface` trait, so
//! the same event handling drives the terminal UI and the in-memory buffer.

use plotters::prelude::*;
use tracing::debug;

use crate::domain::{Rgb, SurfaceSize};
use crate::error::AppError;
use crate::plot::render::Renderer;
use crate::plot::state::PlotState;

pub trait Surface {
    /// Current pixel dimensions.
    fn size(&self) -> SurfaceSize;

    /// Resize the pixel storage. Contents are undefined until the next redraw.
    fn resize(&mut self, size: SurfaceSize) -> Result<(), AppError>;

    /// Full repaint from `state`.
    fn redraw(&mut self, renderer: &Renderer, state: &PlotState) -> Result<(), AppError>;
}

/// An RGB pixel buffer (3 bytes per pixel, row-major).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelSurface {
    size: SurfaceSize,
    rgb: Vec<u8>,
}

impl PixelSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            rgb: vec![0; size.area() * 3],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.rgb
    }

    /// Colour at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 3;
        Some(Rgb(self.rgb[i], self.rgb[i + 1], self.rgb[i + 2]))
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) -> Result<(), AppError> {
        debug!(from = %self.size, to = %size, "pixel surface resized");
        self.size = size;
        self.rgb = vec![0; size.area() * 3];
        Ok(())
    }

    fn redraw(&mut self, renderer: &Renderer, state: &PlotState) -> Result<(), AppError> {
        if self.size.is_empty() {
            return Ok(());
        }

        let dims = (self.size.width, self.size.height);
        let root = BitMapBackend::with_buffer(&mut self.rgb, dims).into_drawing_area();
        renderer
            .render(&root, state)
            .map_err(|e| AppError::render(format!("Failed to render surface: {e:?}")))?;
        root.present()
            .map_err(|e| AppError::render(format!("Failed to present surface: {e:?}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Point, StyleConfig};

    fn style() -> StyleConfig {
        StyleConfig {
            pixel_size: 10.0,
            primary_color: Rgb::RED,
            bg_color: Rgb(0, 0, 32),
            axes_padding: 50.0,
        }
    }

    fn state_with(points: &[(f64, f64)]) -> PlotState {
        let mut state = PlotState::default();
        for &p in points {
            state.add_point(Point::from(p));
        }
        state
    }

    #[test]
    fn redraw_is_idempotent() {
        let renderer = Renderer::new(style());
        let state = state_with(&[(120.0, 80.0), (300.0, 200.0), (500.0, 260.0)]);

        let mut surface = PixelSurface::new(SurfaceSize::new(640, 480));
        surface.redraw(&renderer, &state).unwrap();
        let first = surface.as_bytes().to_vec();
        surface.redraw(&renderer, &state).unwrap();

        assert_eq!(first, surface.as_bytes());
    }

    #[test]
    fn draws_background_axes_markers_and_line() {
        let renderer = Renderer::new(style());
        // y = x through two points.
        let state = state_with(&[(100.0, 100.0), (300.0, 300.0)]);

        let mut surface = PixelSurface::new(SurfaceSize::new(400, 400));
        surface.redraw(&renderer, &state).unwrap();

        // Background far from everything.
        assert_eq!(surface.pixel(390, 10), Some(Rgb(0, 0, 32)));
        // Axes: x axis at y = 400 - 50, y axis at x = 50.
        assert_eq!(surface.pixel(200, 350), Some(Rgb::WHITE));
        assert_eq!(surface.pixel(50, 20), Some(Rgb::WHITE));
        // Marker interiors.
        assert_eq!(surface.pixel(102, 98), Some(Rgb::RED));
        assert_eq!(surface.pixel(300, 300), Some(Rgb::RED));
        // The fitted line y = x, away from markers.
        assert_eq!(surface.pixel(200, 200), Some(Rgb::RED));
        assert_eq!(surface.pixel(20, 20), Some(Rgb::RED));
    }

    #[test]
    fn renders_without_fit_for_a_single_point() {
        let renderer = Renderer::new(style());
        let state = state_with(&[(200.0, 100.0)]);

        let mut surface = PixelSurface::new(SurfaceSize::new(400, 300));
        surface.redraw(&renderer, &state).unwrap();

        assert_eq!(surface.pixel(200, 100), Some(Rgb::RED));
        // Nothing drawn along where a line would go.
        assert_eq!(surface.pixel(10, 10), Some(Rgb(0, 0, 32)));
    }

    #[test]
    fn degenerate_fit_renders_without_line() {
        let renderer = Renderer::new(style());
        let state = state_with(&[(5.0, 5.0), (5.0, 10.0)]);
        assert!(state.fitted_function().is_some());

        let mut surface = PixelSurface::new(SurfaceSize::new(200, 200));
        surface.redraw(&renderer, &state).unwrap();

        assert_eq!(surface.pixel(150, 20), Some(Rgb(0, 0, 32)));
    }

    #[test]
    fn resize_moves_axes() {
        let renderer = Renderer::new(style());
        let state = state_with(&[(100.0, 100.0), (200.0, 120.0)]);

        let mut surface = PixelSurface::new(SurfaceSize::new(800, 600));
        surface.redraw(&renderer, &state).unwrap();
        assert_eq!(surface.pixel(400, 550), Some(Rgb::WHITE));

        surface.resize(SurfaceSize::new(400, 300)).unwrap();
        surface.redraw(&renderer, &state).unwrap();

        assert_eq!(surface.as_bytes().len(), 400 * 300 * 3);
        assert_eq!(surface.pixel(390, 250), Some(Rgb::WHITE));
        assert_eq!(surface.pixel(50, 10), Some(Rgb::WHITE));
        assert_eq!(surface.pixel(390, 249), Some(Rgb(0, 0, 32)));
        assert_eq!(surface.pixel(400, 550), None);
    }

    #[test]
    fn empty_surface_is_a_no_op() {
        let renderer = Renderer::new(style());
        let mut surface = PixelSurface::new(SurfaceSize::new(0, 0));
        surface.redraw(&renderer, &PlotState::default()).unwrap();
        assert!(surface.as_bytes().is_empty());
    }
}
