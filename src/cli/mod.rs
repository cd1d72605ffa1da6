//! Command-line parsing.
//!
//! Every style option can also come from the environment (or a `.env` file,
//! loaded before parsing), so a preferred palette does not have to be
//! repeated on each launch.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::{DEFAULT_AXES_PADDING, DEFAULT_PIXEL_SIZE, Rgb, StyleConfig};
use crate::fit::StrategyKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "scatterfit",
    version,
    about = "Click to place points; a best-fit line follows them"
)]
pub struct Cli {
    /// Marker side length in surface pixels.
    #[arg(long, env = "SCATTERFIT_PIXEL_SIZE", default_value_t = DEFAULT_PIXEL_SIZE)]
    pub pixel_size: f64,

    /// Colour of points and the fitted line (#rgb or #rrggbb).
    #[arg(long, env = "SCATTERFIT_PRIMARY_COLOR", default_value = "#ff0000")]
    pub primary_color: Rgb,

    /// Background colour (#rgb or #rrggbb).
    #[arg(long, env = "SCATTERFIT_BG_COLOR", default_value = "#000")]
    pub bg_color: Rgb,

    /// Offset of the axes from the left and bottom edges, in surface pixels.
    #[arg(long, env = "SCATTERFIT_AXES_PADDING", default_value_t = DEFAULT_AXES_PADDING)]
    pub axes_padding: f64,

    /// Fitting strategy used at startup (cycle with `m` in the UI).
    #[arg(long, value_enum, env = "SCATTERFIT_STRATEGY", default_value_t = StrategyKind::MeanSquares)]
    pub strategy: StrategyKind,

    /// Place this many random points at startup.
    #[arg(long, default_value_t = 0)]
    pub scatter: usize,

    /// Random seed for `--scatter`.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Write a debug log to this file.
    #[arg(long, env = "SCATTERFIT_LOG")]
    pub log: Option<PathBuf>,
}

impl Cli {
    pub fn style(&self) -> StyleConfig {
        StyleConfig {
            pixel_size: self.pixel_size,
            primary_color: self.primary_color,
            bg_color: self.bg_color,
            axes_padding: self.axes_padding,
        }
    }
}
