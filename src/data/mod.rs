//! Input data sources other than the mouse.

pub mod sample;

pub use sample::scatter_points;
