//! Ratatui-based terminal host.
//!
//! The chart block is the plot surface: left clicks inside it become points,
//! terminal resizes trigger a full repaint, `m` cycles the fitting strategy.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::session::{PlotSession, SurfaceEvent};
use crate::cli::Cli;
use crate::data::scatter_points;
use crate::domain::SurfaceSize;
use crate::error::AppError;
use crate::fit::{FittingStrategy, StrategyKind};
use crate::plot::Surface;

mod plotters_chart;
mod surface;

pub use surface::TerminalSurface;

/// Start the TUI.
pub fn run(cli: &Cli) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)
        .map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;
    let cells = terminal
        .size()
        .map_err(|e| AppError::terminal(format!("Failed to query terminal size: {e}")))?;

    let session = PlotSession::new(
        TerminalSurface::new(terminal),
        SurfaceSize::new(u32::from(cells.width), u32::from(cells.height)),
        cli.style(),
        cli.strategy.build(),
    )?;

    let mut app = App {
        session,
        strategy: cli.strategy,
    };
    if cli.scatter > 0 {
        app.scatter(cli.scatter, cli.seed)?;
    }
    app.event_loop()
}

/// Ensures the terminal is restored (raw mode, alternate screen, mouse) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
    }
}

struct App<B: ratatui::backend::Backend> {
    session: PlotSession<TerminalSurface<B>>,
    strategy: StrategyKind,
}

impl<B: ratatui::backend::Backend> App<B> {
    fn scatter(&mut self, count: usize, seed: u64) -> Result<(), AppError> {
        let size = self.session.surface().size();
        match scatter_points(size, self.session.style(), count, seed) {
            Ok(points) => {
                info!(count, seed, "scattered demo points");
                self.session.extend(points)
            }
            Err(err) => {
                warn!(%err, "demo scatter skipped");
                self.session.surface_mut().set_status(format!("Scatter skipped: {err}"));
                self.session.redraw()
            }
        }
    }

    fn event_loop(&mut self) -> Result<(), AppError> {
        loop {
            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
                        break;
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse)?,
                Event::Resize(width, height) => {
                    let size = SurfaceSize::new(u32::from(width), u32::from(height));
                    self.session.handle(SurfaceEvent::Resize(size))?;
                }
                _ => {}
            }
        }
        info!(points = self.session.state().len(), "quitting");
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Char('m') => {
                self.strategy = self.strategy.next();
                let strategy = self.strategy.build();
                let status = format!("strategy: {}", strategy.name());
                self.session.surface_mut().set_status(status);
                self.session.set_strategy(strategy)?;
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<(), AppError> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(());
        }
        let Some(p) = self.session.surface().cell_to_point(mouse.column, mouse.row) else {
            return Ok(());
        };
        self.session.surface_mut().set_status("");
        self.session.handle(SurfaceEvent::Click(p))
    }
}
