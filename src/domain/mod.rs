//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - recorded points (`Point`) and surface dimensions (`SurfaceSize`)
//! - the session style (`StyleConfig`, `Rgb`)

pub mod types;

pub use types::*;
