use crate::ConfigError;
use core::fmt;
use core::str::FromStr;
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Slack allowed on the unit-disk boundary check, so rim pixels that
/// round a hair past radius 1 are clamped instead of dropped.
const DISK_EPSILON: f64 = 1e-9;

/// How the circular lens image sits inside the rectangular pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum LayoutKind {
    /// One circle inscribed in the image, diameter `min(width, height)`;
    /// the margins outside it carry no lens data.
    Inscribed,
    /// The circle circumscribes the image: its radius is the
    /// center-to-corner distance, so every pixel lies inside it.
    Full,
    /// The circle's diameter equals the image width; its top and bottom
    /// are cut off by the image bounds when the image is wider than tall.
    Cropped,
    /// Two inscribed circles side by side; circle 0 on the left faces
    /// the front pole, circle 1 on the right faces the back pole.
    Double,
}

impl LayoutKind {
    /// The names accepted by [`FromStr`], for CLI help text.
    pub const NAMES: [&'static str; 4] = ["inscribed", "full", "cropped", "double"];
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayoutKind::Inscribed => "inscribed",
            LayoutKind::Full => "full",
            LayoutKind::Cropped => "cropped",
            LayoutKind::Double => "double",
        };
        f.write_str(name)
    }
}

impl FromStr for LayoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inscribed" => Ok(LayoutKind::Inscribed),
            "full" => Ok(LayoutKind::Full),
            "cropped" => Ok(LayoutKind::Cropped),
            "double" => Ok(LayoutKind::Double),
            other => Err(format!(
                "unknown layout {:?}, expected one of: {}",
                other,
                LayoutKind::NAMES.join(", ")
            )),
        }
    }
}

/// A coordinate on one of a layout's unit disks.
///
/// `u` points right and `v` points up; `(u, v)` lies in the closed unit
/// disk. `circle` is 0 except for the right half of a double layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleCoord {
    pub circle: usize,
    pub u: f64,
    pub v: f64,
}

impl CircleCoord {
    /// Distance from the circle center, in `[0, 1]`.
    pub fn radius(&self) -> f64 {
        self.u.hypot(self.v)
    }

    /// Angle of the coordinate around the circle center, in radians
    /// counterclockwise from the `u` axis.
    pub fn azimuth(&self) -> f64 {
        self.v.atan2(self.u)
    }
}

/// A [`LayoutKind`] bound to concrete pixel-grid dimensions.
///
/// Pixel coordinates are continuous, with the pixel at index `(i, j)`
/// centered on `(i + 0.5, j + 0.5)`; `y` grows downward as usual for
/// images while `v` grows upward on the disk.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Layout {
    kind: LayoutKind,
    width: u32,
    height: u32,
}

impl Layout {
    /// Binds a layout kind to image dimensions.
    ///
    /// Double layouts split the width into two equal halves, so an odd
    /// width is rejected; zero-sized images are rejected for all kinds.
    pub fn new(kind: LayoutKind, width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyImage { width, height });
        }
        if kind == LayoutKind::Double && width % 2 != 0 {
            return Err(ConfigError::OddWidth { kind, width });
        }
        Ok(Self {
            kind,
            width,
            height,
        })
    }

    pub fn kind(&self) -> LayoutKind {
        self.kind
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The number of circles this layout carries.
    pub fn circles(&self) -> usize {
        match self.kind {
            LayoutKind::Double => 2,
            _ => 1,
        }
    }

    /// Center (in continuous pixel coordinates) and radius (in pixels)
    /// of the given circle.
    fn circle_frame(&self, circle: usize) -> (f64, f64, f64) {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        match self.kind {
            LayoutKind::Inscribed => (w / 2.0, h / 2.0, w.min(h) / 2.0),
            LayoutKind::Full => (w / 2.0, h / 2.0, (w / 2.0).hypot(h / 2.0)),
            LayoutKind::Cropped => (w / 2.0, h / 2.0, w / 2.0),
            LayoutKind::Double => {
                let half = w / 2.0;
                let cx = half / 2.0 + circle as f64 * half;
                (cx, h / 2.0, half.min(h) / 2.0)
            }
        }
    }

    /// Maps a continuous pixel coordinate onto the unit disk it falls
    /// in. Returns `None` when the pixel lies outside every circle,
    /// which is the "no lens data here" miss case.
    pub fn pixel_to_circle(&self, px: f64, py: f64) -> Option<CircleCoord> {
        let circle = match self.kind {
            LayoutKind::Double if px >= f64::from(self.width) / 2.0 => 1,
            _ => 0,
        };
        let (cx, cy, radius) = self.circle_frame(circle);
        let u = (px - cx) / radius;
        let v = (cy - py) / radius;
        let r = u.hypot(v);
        if r > 1.0 + DISK_EPSILON {
            return None;
        }
        // Pull boundary overshoot back onto the rim.
        let (u, v) = if r > 1.0 { (u / r, v / r) } else { (u, v) };
        Some(CircleCoord { circle, u, v })
    }

    /// Maps a unit-disk coordinate back to a continuous pixel
    /// coordinate. Inverse of [`Layout::pixel_to_circle`] for every
    /// in-disk coordinate.
    pub fn circle_to_pixel(&self, coord: &CircleCoord) -> (f64, f64) {
        let (cx, cy, radius) = self.circle_frame(coord.circle);
        (cx + coord.u * radius, cy - coord.v * radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inscribed_center_and_rim() {
        let layout = Layout::new(LayoutKind::Inscribed, 100, 100).unwrap();
        let center = layout.pixel_to_circle(50.0, 50.0).unwrap();
        assert_eq!(center.circle, 0);
        assert!(center.radius() < 1e-12);

        // Left edge midpoint sits on the rim pointing along -u.
        let rim = layout.pixel_to_circle(0.0, 50.0).unwrap();
        assert!((rim.u + 1.0).abs() < 1e-12);
        assert!(rim.v.abs() < 1e-12);

        // Corners of a square image lie outside the inscribed circle.
        assert_eq!(layout.pixel_to_circle(1.0, 1.0), None);
    }

    #[test]
    fn full_contains_every_pixel() {
        let layout = Layout::new(LayoutKind::Full, 60, 40).unwrap();
        for &(px, py) in &[(0.0, 0.0), (60.0, 0.0), (0.0, 40.0), (60.0, 40.0)] {
            let coord = layout.pixel_to_circle(px, py).unwrap();
            assert!((coord.radius() - 1.0).abs() < 1e-12, "corner not on rim");
        }
        let inside = layout.pixel_to_circle(30.5, 20.5).unwrap();
        assert!(inside.radius() < 1.0);
    }

    #[test]
    fn cropped_drops_corners_keeps_sides() {
        let layout = Layout::new(LayoutKind::Cropped, 100, 60).unwrap();
        assert!(layout.pixel_to_circle(2.0, 2.0).is_none());
        let side = layout.pixel_to_circle(0.0, 30.0).unwrap();
        assert!((side.radius() - 1.0).abs() < 1e-12);
        // Top edge midpoint is inside the cropped circle.
        let top = layout.pixel_to_circle(50.0, 0.0).unwrap();
        assert!(top.radius() < 1.0);
    }

    #[test]
    fn double_splits_halves() {
        let layout = Layout::new(LayoutKind::Double, 200, 100).unwrap();
        assert_eq!(layout.circles(), 2);

        let left = layout.pixel_to_circle(50.0, 50.0).unwrap();
        assert_eq!(left.circle, 0);
        assert!(left.radius() < 1e-12);

        let right = layout.pixel_to_circle(150.0, 50.0).unwrap();
        assert_eq!(right.circle, 1);
        assert!(right.radius() < 1e-12);

        // Between the two circles, against the seam, there is no data.
        assert_eq!(layout.pixel_to_circle(100.5, 1.0), None);
    }

    #[test]
    fn pixel_round_trip() {
        let layouts = [
            Layout::new(LayoutKind::Inscribed, 120, 120).unwrap(),
            Layout::new(LayoutKind::Full, 90, 60).unwrap(),
            Layout::new(LayoutKind::Cropped, 100, 70).unwrap(),
            Layout::new(LayoutKind::Double, 240, 120).unwrap(),
        ];
        for layout in layouts {
            for &(px, py) in &[(33.25, 41.5), (60.0, 35.0), (10.5, 58.75)] {
                if let Some(coord) = layout.pixel_to_circle(px, py) {
                    let (bx, by) = layout.circle_to_pixel(&coord);
                    assert!((bx - px).abs() < 1e-9, "{:?}: x {px} -> {bx}", layout.kind());
                    assert!((by - py).abs() < 1e-9, "{:?}: y {py} -> {by}", layout.kind());
                }
            }
        }
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert!(matches!(
            Layout::new(LayoutKind::Double, 201, 100),
            Err(ConfigError::OddWidth { .. })
        ));
        assert!(matches!(
            Layout::new(LayoutKind::Inscribed, 0, 100),
            Err(ConfigError::EmptyImage { .. })
        ));
        assert!(Layout::new(LayoutKind::Double, 200, 100).is_ok());
    }

    #[test]
    fn kind_names_round_trip() {
        for name in LayoutKind::NAMES {
            let kind: LayoutKind = name.parse().unwrap();
            assert_eq!(kind.to_string(), name);
        }
        assert!("mosaic".parse::<LayoutKind>().is_err());
    }
}
