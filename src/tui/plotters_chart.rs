//! Plotters-powered surface widget for Ratatui.
//!
//! The renderer is written against Plotters' `DrawingBackend`, so the terminal
//! host only needs to hand it a drawing area. We get one from
//! `plotters-ratatui-backend`, which maps Plotters primitives onto Ratatui's
//! `Canvas` and ultimately the terminal buffer.

use std::cell::Cell;

use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::plot::{PlotState, Renderer};

/// Below this many cells Plotters has too little room to draw anything useful.
pub const MIN_WIDTH: u16 = 20;
pub const MIN_HEIGHT: u16 = 8;

/// Render-only view of a plot; all state lives in the session.
pub struct SurfaceWidget<'a> {
    pub renderer: &'a Renderer,
    pub state: &'a PlotState,
    /// Receives the pixel dimensions the backend reports for this draw, so
    /// mouse positions can be mapped back onto the surface.
    pub pixels: &'a Cell<(u32, u32)>,
}

impl<'a> Widget for SurfaceWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            self.pixels.set((0, 0));
            buf.set_string(
                area.x,
                area.y,
                "Surface too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let widget = widget_fn(move |root| {
            self.pixels.set(root.dim_in_pixel());
            self.renderer.render(&root, self.state)?;
            Ok(())
        });

        widget.render(area, buf);
    }
}
