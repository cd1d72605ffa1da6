//! Shared domain types.
//!
//! Everything here is plain data: points in surface pixel space, surface
//! dimensions and the fixed style a session is built with.

use std::fmt;
use std::str::FromStr;

use plotters::style::RGBColor;

use crate::error::AppError;

/// Default marker side length (pixels).
pub const DEFAULT_PIXEL_SIZE: f64 = 10.0;

/// Default offset of the axes from the left/bottom surface edges (pixels).
pub const DEFAULT_AXES_PADDING: f64 = 50.0;

/// A recorded point in surface pixel coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered by the surface.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl fmt::Display for SurfaceSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// 8-bit RGB colour.
///
/// Parses the CSS-style hex forms `#rgb` and `#rrggbb` (the leading `#` is
/// optional) and displays as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
}

impl From<Rgb> for RGBColor {
    fn from(c: Rgb) -> Self {
        RGBColor(c.0, c.1, c.2)
    }
}

impl FromStr for Rgb {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let invalid = || AppError::config(format!("Invalid color '{s}': expected #rgb or #rrggbb"));

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match hex.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (slot, i) in channels.iter_mut().zip(0..3) {
                    let v = u8::from_str_radix(&hex[i..i + 1], 16).map_err(|_| invalid())?;
                    *slot = v * 17;
                }
                Ok(Rgb(channels[0], channels[1], channels[2]))
            }
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
                Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Rendering parameters fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleConfig {
    /// Marker side length; markers are rounded squares with corner radius
    /// `pixel_size / 2`.
    pub pixel_size: f64,
    /// Colour of point markers and the fitted line.
    pub primary_color: Rgb,
    /// Clear colour of the surface.
    pub bg_color: Rgb,
    /// Offset of the x axis from the bottom edge and of the y axis from the
    /// left edge.
    pub axes_padding: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            pixel_size: DEFAULT_PIXEL_SIZE,
            primary_color: Rgb::RED,
            bg_color: Rgb::BLACK,
            axes_padding: DEFAULT_AXES_PADDING,
        }
    }
}

impl StyleConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.pixel_size.is_finite() && self.pixel_size > 0.0) {
            return Err(AppError::config(format!(
                "Pixel size must be a positive number, got {}.",
                self.pixel_size
            )));
        }
        if !(self.axes_padding.is_finite() && self.axes_padding >= 0.0) {
            return Err(AppError::config(format!(
                "Axes padding must be a non-negative number, got {}.",
                self.axes_padding
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!("#000".parse::<Rgb>().unwrap(), Rgb::BLACK);
        assert_eq!("#fff".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert_eq!("#ff0000".parse::<Rgb>().unwrap(), Rgb::RED);
        assert_eq!("1a2B3c".parse::<Rgb>().unwrap(), Rgb(0x1a, 0x2b, 0x3c));
        assert_eq!("#f80".parse::<Rgb>().unwrap(), Rgb(0xff, 0x88, 0x00));
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["", "#", "#ff", "#ff00", "#gg0000", "red", "#ff00000"] {
            let err = bad.parse::<Rgb>().unwrap_err();
            assert_eq!(err.exit_code(), 2, "{bad:?} should be a config error");
        }
    }

    #[test]
    fn color_display_is_long_hex() {
        assert_eq!(Rgb(1, 2, 255).to_string(), "#0102ff");
    }

    #[test]
    fn default_style_is_valid() {
        let style = StyleConfig::default();
        assert_eq!(style.pixel_size, 10.0);
        assert!(style.validate().is_ok());
    }

    #[test]
    fn style_validation_rejects_bad_numbers() {
        let mut style = StyleConfig::default();
        style.pixel_size = 0.0;
        assert!(style.validate().is_err());

        let mut style = StyleConfig::default();
        style.axes_padding = f64::NAN;
        assert!(style.validate().is_err());

        let mut style = StyleConfig::default();
        style.axes_padding = 0.0;
        assert!(style.validate().is_ok());
    }
}
