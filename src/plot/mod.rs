//! The plot itself: state, renderer and drawing surfaces.
//!
//! - `state`: append-only points plus the fit derived from them
//! - `render`: full-frame painter over any Plotters backend
//! - `surface`: pixel storage the renderer paints into

pub mod render;
pub mod state;
pub mod surface;

pub use render::Renderer;
pub use state::PlotState;
pub use surface::{PixelSurface, Surface};
