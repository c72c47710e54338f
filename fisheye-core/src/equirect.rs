use crate::{direction_from_polar, polar_from_direction, ConfigError, Direction};
use std::f64::consts::PI;
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Bijective map between directions on the sphere and an
/// equirectangular pixel grid.
///
/// Rows map linearly to latitude over `[0, π]` with row 0 at the top
/// pole, and columns map linearly to longitude over `[-π, π)` with
/// wraparound, so column `width` and column 0 are the same direction.
/// Pixel centers sit at half-integer coordinates; the exact poles fall
/// between rows, and a direction at a pole maps to longitude 0 by
/// convention since every column there is equally valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Equirect {
    width: u32,
    height: u32,
}

impl Equirect {
    /// Creates the mapper for a `width` × `height` grid, which must be
    /// a nonzero full-sphere 2:1 rectangle.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyImage { width, height });
        }
        if width != 2 * height {
            return Err(ConfigError::PanoramaAspect { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Maps a continuous pixel coordinate to a direction.
    pub fn pixel_to_direction(&self, px: f64, py: f64) -> Direction {
        let longitude = px / f64::from(self.width) * 2.0 * PI - PI;
        let latitude = py / f64::from(self.height) * PI;
        direction_from_polar(latitude, longitude)
    }

    /// Maps a direction back to a continuous pixel coordinate, with
    /// `x` wrapped into `[0, width)`.
    pub fn direction_to_pixel(&self, dir: &Direction) -> (f64, f64) {
        let (latitude, longitude) = polar_from_direction(dir);
        let px = (longitude + PI) / (2.0 * PI) * f64::from(self.width);
        let py = latitude / PI * f64::from(self.height);
        (px.rem_euclid(f64::from(self.width)), py)
    }
}
