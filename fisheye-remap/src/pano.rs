use fisheye_core::{ConfigError, Direction, Equirect};

/// The geometry of an equirectangular panorama: a full-sphere
/// longitude/latitude grid with no lens or layout of its own.
///
/// Both mapping directions are total — every pixel views a direction
/// and every direction lands on the grid — so unlike a photo a
/// panorama never produces a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanoGeometry {
    grid: Equirect,
}

impl PanoGeometry {
    /// Creates the geometry for a `width` × `height` panorama, which
    /// must be 2:1.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            grid: Equirect::new(width, height)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn pixel_to_direction(&self, px: f64, py: f64) -> Direction {
        self.grid.pixel_to_direction(px, py)
    }

    pub fn direction_to_pixel(&self, dir: &Direction) -> (f64, f64) {
        self.grid.direction_to_pixel(dir)
    }
}
