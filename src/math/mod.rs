//! Mathematical utilities: SVD-backed (weighted) least squares.

pub mod ols;

pub use ols::*;
