//! Random demo scatter.
//!
//! Picks a random line through the plotting region (the part of the surface
//! inside the axes padding) and scatters points around it with Gaussian
//! noise. Deterministic for a given seed.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Point, StyleConfig, SurfaceSize};
use crate::error::AppError;

/// Noise standard deviation as a fraction of the region height.
const NOISE_FRACTION: f64 = 0.05;

pub fn scatter_points(
    size: SurfaceSize,
    style: &StyleConfig,
    count: usize,
    seed: u64,
) -> Result<Vec<Point>, AppError> {
    if count == 0 {
        return Err(AppError::config("Scatter count must be > 0."));
    }

    let pad = style.axes_padding;
    let (w, h) = (size.width as f64, size.height as f64);
    let (x0, x1) = (pad, w);
    let (y0, y1) = (0.0, h - pad);
    if !(x1 - x0 > 1.0 && y1 - y0 > 1.0) {
        return Err(AppError::config(format!(
            "Surface {size} leaves no room for points inside an axes padding of {pad}."
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let sigma = (y1 - y0) * NOISE_FRACTION;
    let noise = Normal::new(0.0, sigma)
        .map_err(|e| AppError::config(format!("Noise distribution error: {e}")))?;

    // Line endpoints at the region's left and right edges, kept away from the
    // top and bottom so most of the noise stays visible.
    let margin = (y1 - y0) * 0.15;
    let left = rng.gen_range(y0 + margin..=y1 - margin);
    let right = rng.gen_range(y0 + margin..=y1 - margin);
    let slope = (right - left) / (x1 - x0);

    let points = (0..count)
        .map(|_| {
            let x = rng.gen_range(x0..=x1);
            let y = left + slope * (x - x0) + noise.sample(&mut rng);
            Point::new(x, y.clamp(y0, y1))
        })
        .collect();

    Ok(points)
}
