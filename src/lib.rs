//! `scatterfit` library crate.
//!
//! Click points onto a surface and keep a best-fit function drawn over them.
//! The binary is a thin terminal host around this library so that:
//!
//! - fitting, state and rendering are testable without a terminal
//! - fitting strategies and surfaces can be swapped independently

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod math;
pub mod plot;
pub mod tui;
