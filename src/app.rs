//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs the optional file logger
//! - hands over to the terminal UI

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::Cli;
use crate::error::AppError;

pub mod session;

/// Entry point for the `scatterfit` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is the normal case.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    cli.style().validate()?;

    if let Some(path) = &cli.log {
        init_logging(path)?;
    }
    tracing::info!(strategy = ?cli.strategy, scatter = cli.scatter, "starting scatterfit");

    let result = crate::tui::run(&cli);
    if let Err(err) = &result {
        tracing::error!(%err, "scatterfit exited with an error");
    }
    result
}

/// Log to `path` (truncated); the terminal itself belongs to the UI.
fn init_logging(path: &Path) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::config(format!("Failed to open log file {}: {e}", path.display())))?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| AppError::config(format!("Failed to install logger: {e}")))
}
