//! The terminal as a drawing surface.

use std::cell::Cell;

use ratatui::{
    Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tracing::debug;

use crate::domain::{Point, SurfaceSize};
use crate::error::AppError;
use crate::plot::{PlotState, Renderer, Surface};
use crate::tui::plotters_chart::SurfaceWidget;

const HELP: &str = "click add point  m strategy  q quit";

/// A ratatui terminal whose chart block is the plot surface.
///
/// The surface pixel size is whatever the Plotters backend reports for the
/// chart block on the most recent draw; terminal resizes only invalidate the
/// screen, the next draw picks up the new geometry.
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    chart: Rect,
    pixels: Cell<(u32, u32)>,
    status: String,
}

impl<B: Backend> TerminalSurface<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            chart: Rect::default(),
            pixels: Cell::new((0, 0)),
            status: String::new(),
        }
    }

    /// Message shown in the footer on the next draw.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Cells covered by the surface on the last draw.
    pub fn chart_area(&self) -> Rect {
        self.chart
    }

    /// Map a terminal cell to surface pixel coordinates (the cell centre).
    ///
    /// `None` when the cell is outside the surface or nothing was drawn yet.
    pub fn cell_to_point(&self, column: u16, row: u16) -> Option<Point> {
        let r = self.chart;
        let inside = column >= r.x
            && row >= r.y
            && u32::from(column) < u32::from(r.x) + u32::from(r.width)
            && u32::from(row) < u32::from(r.y) + u32::from(r.height);
        let (pw, ph) = self.pixels.get();
        if !inside || pw == 0 || ph == 0 {
            return None;
        }

        let x = (f64::from(column - r.x) + 0.5) * f64::from(pw) / f64::from(r.width);
        let y = (f64::from(row - r.y) + 0.5) * f64::from(ph) / f64::from(r.height);
        Some(Point::new(x, y))
    }
}

impl<B: Backend> Surface for TerminalSurface<B> {
    fn size(&self) -> SurfaceSize {
        let (w, h) = self.pixels.get();
        SurfaceSize::new(w, h)
    }

    fn resize(&mut self, size: SurfaceSize) -> Result<(), AppError> {
        debug!(cells = %size, "terminal resized");
        self.terminal
            .clear()
            .map_err(|e| AppError::terminal(format!("Terminal clear error: {e}")))
    }

    fn redraw(&mut self, renderer: &Renderer, state: &PlotState) -> Result<(), AppError> {
        let Self {
            terminal,
            chart,
            pixels,
            status,
        } = self;

        terminal
            .draw(|frame| {
                *chart = draw_frame(frame, renderer, state, pixels, status);
            })
            .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
        Ok(())
    }
}

/// Draw the chart block and footer; returns the surface rectangle.
fn draw_frame(
    frame: &mut ratatui::Frame<'_>,
    renderer: &Renderer,
    state: &PlotState,
    pixels: &Cell<(u32, u32)>,
    status: &str,
) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(frame.area());

    let block = Block::default().title("scatterfit").borders(Borders::ALL);
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);
    frame.render_widget(
        SurfaceWidget {
            renderer,
            state,
            pixels,
        },
        inner,
    );

    let fit = state.fitted_function().map(|f| f.label()).unwrap_or("-");
    let rmse = state
        .rmse()
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "-".to_string());
    // Status first: the footer is one line and gets truncated on the right.
    let mut spans = Vec::new();
    if !status.is_empty() {
        spans.push(Span::styled(status, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(" | "));
    }
    spans.push(Span::raw(format!(
        "points: {} | {} | {fit} | rmse={rmse}",
        state.len(),
        state.strategy_name()
    )));
    spans.push(Span::raw(" | "));
    spans.push(Span::styled(HELP, Style::default().fg(Color::Gray)));
    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[1]);

    inner
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::app::session::{PlotSession, SurfaceEvent};
    use crate::domain::StyleConfig;
    use crate::fit::MeanSquares;

    fn session() -> PlotSession<TerminalSurface<TestBackend>> {
        let terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let style = StyleConfig {
            pixel_size: 2.0,
            axes_padding: 4.0,
            ..StyleConfig::default()
        };
        PlotSession::new(
            TerminalSurface::new(terminal),
            SurfaceSize::new(80, 24),
            style,
            Box::new(MeanSquares),
        )
        .unwrap()
    }

    fn screen_text(surface: &TerminalSurface<TestBackend>) -> String {
        surface
            .terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn chart_block_is_the_surface() {
        let s = session();
        assert_eq!(s.surface().chart_area(), Rect::new(1, 1, 78, 19));
        let size = s.surface().size();
        assert!(size.width > 0 && size.height > 0);
    }

    #[test]
    fn cells_outside_the_chart_map_to_nothing() {
        let s = session();
        assert!(s.surface().cell_to_point(0, 0).is_none());
        assert!(s.surface().cell_to_point(79, 5).is_none());
        assert!(s.surface().cell_to_point(10, 22).is_none());
    }

    #[test]
    fn clicks_inside_the_chart_add_points() {
        let mut s = session();
        let a = s.surface().cell_to_point(10, 5).unwrap();
        let b = s.surface().cell_to_point(60, 15).unwrap();
        assert!(a.x < b.x && a.y < b.y);

        s.handle(SurfaceEvent::Click(a)).unwrap();
        s.handle(SurfaceEvent::Click(b)).unwrap();

        assert_eq!(s.state().len(), 2);
        assert!(s.state().fitted_function().is_some());
        assert!(screen_text(s.surface()).contains("points: 2"));
    }

    #[test]
    fn status_appears_in_footer() {
        let mut s = session();
        s.surface_mut().set_status("strategy: huber");
        s.redraw().unwrap();
        assert!(screen_text(s.surface()).contains("strategy: huber"));
    }

    #[test]
    fn resize_keeps_the_surface_usable() {
        let mut s = session();
        s.handle(SurfaceEvent::Resize(SurfaceSize::new(80, 24))).unwrap();
        assert!(s.surface().cell_to_point(10, 5).is_some());
    }
}
