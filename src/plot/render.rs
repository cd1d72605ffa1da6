//! Surface renderer.
//!
//! Draws a full frame onto any Plotters drawing area, in order:
//!
//! 1. background fill
//! 2. axes (fixed white, 1px)
//! 3. point markers (rounded squares in the primary colour)
//! 4. the fitted line from `x = 0` to `x = width`, clipped to the surface
//!
//! Every call repaints everything, so two calls with the same inputs produce
//! the same pixels. Style travels with each element (`ShapeStyle`); there is
//! no shared drawing state to restore afterwards.

use std::f64::consts::FRAC_PI_2;

use plotters::coord::Shift;
use plotters::prelude::{
    Color, DrawingArea, DrawingAreaErrorKind, DrawingBackend, PathElement, Polygon, RGBColor, Rectangle,
};

use crate::domain::{Rgb, StyleConfig};
use crate::plot::state::PlotState;

/// Axis colour; not part of the configurable palette.
pub const AXIS_COLOR: Rgb = Rgb::WHITE;

/// Segments per quarter-circle when outlining marker corners.
const CORNER_STEPS: usize = 6;

type BackendPoint = (i32, i32);

/// Stateless painter for a `PlotState`.
#[derive(Debug, Clone)]
pub struct Renderer {
    style: StyleConfig,
}

impl Renderer {
    pub fn new(style: StyleConfig) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Repaint `area` from scratch. Never mutates `state`.
    pub fn render<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        state: &PlotState,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let (width, height) = area.dim_in_pixel();
        let (w, h) = (width as f64, height as f64);

        let primary: RGBColor = self.style.primary_color.into();
        let bg: RGBColor = self.style.bg_color.into();
        let axis: RGBColor = AXIS_COLOR.into();

        // 1) Clear.
        area.fill(&bg)?;

        // 2) Axes.
        let x_axis_y = to_px(h - self.style.axes_padding);
        let y_axis_x = to_px(self.style.axes_padding);
        area.draw(&PathElement::new(
            vec![(0, x_axis_y), (width as i32, x_axis_y)],
            axis.stroke_width(1),
        ))?;
        area.draw(&PathElement::new(
            vec![(y_axis_x, 0), (y_axis_x, height as i32)],
            axis.stroke_width(1),
        ))?;

        // 3) Markers.
        let side = self.style.pixel_size;
        for p in state.points() {
            if side <= 2.0 {
                let half = side / 2.0;
                area.draw(&Rectangle::new(
                    [(to_px(p.x - half), to_px(p.y - half)), (to_px(p.x + half), to_px(p.y + half))],
                    primary.filled(),
                ))?;
            } else {
                let outline = rounded_square((p.x, p.y), side, side / 2.0);
                area.draw(&Polygon::new(outline, primary.filled()))?;
            }
        }

        // 4) Fitted line.
        if let Some(f) = state.fitted_function() {
            let from = (0.0, f.eval(0.0));
            let to = (w, f.eval(w));
            if let Some((a, b)) = clip_segment(from, to, w, h) {
                area.draw(&PathElement::new(
                    vec![(to_px(a.0), to_px(a.1)), (to_px(b.0), to_px(b.1))],
                    primary.stroke_width(1),
                ))?;
            }
        }

        Ok(())
    }
}

fn to_px(v: f64) -> i32 {
    v.round() as i32
}

/// Clip the segment `a → b` to `[0, w] × [0, h]` (Liang–Barsky).
///
/// Returns `None` when an endpoint is not finite or nothing of the segment
/// lies inside the rectangle.
pub fn clip_segment(a: (f64, f64), b: (f64, f64), w: f64, h: f64) -> Option<((f64, f64), (f64, f64))> {
    if !(a.0.is_finite() && a.1.is_finite() && b.0.is_finite() && b.1.is_finite()) {
        return None;
    }

    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    if !(dx.is_finite() && dy.is_finite()) {
        return None;
    }
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [(-dx, a.0), (dx, w - a.0), (-dy, a.1), (dy, h - a.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        (a.0 + t0 * dx, a.1 + t0 * dy),
        (a.0 + t1 * dx, a.1 + t1 * dy),
    ))
}

/// Outline of a square of side `side` centred on `center`, with corners
/// rounded to `radius` (clamped to `side / 2`). Consecutive duplicate
/// vertices after rounding to pixels are dropped.
pub fn rounded_square(center: (f64, f64), side: f64, radius: f64) -> Vec<BackendPoint> {
    let half = side / 2.0;
    let r = radius.clamp(0.0, half);
    let inset = half - r;
    let (cx, cy) = center;

    // Corner arc centres, walked clockwise in screen space starting at the
    // bottom-right, each paired with the starting angle of its quarter arc.
    let corners = [
        ((cx + inset, cy + inset), 0.0),
        ((cx - inset, cy + inset), FRAC_PI_2),
        ((cx - inset, cy - inset), 2.0 * FRAC_PI_2),
        ((cx + inset, cy - inset), 3.0 * FRAC_PI_2),
    ];

    let mut out: Vec<BackendPoint> = Vec::with_capacity(4 * (CORNER_STEPS + 1));
    for ((ox, oy), start) in corners {
        for step in 0..=CORNER_STEPS {
            let theta = start + FRAC_PI_2 * step as f64 / CORNER_STEPS as f64;
            let v = (to_px(ox + r * theta.cos()), to_px(oy + r * theta.sin()));
            if out.last() != Some(&v) {
                out.push(v);
            }
        }
    }
    if out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    out
}
