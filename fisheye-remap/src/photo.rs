use fisheye_core::{
    direction_from_polar, polar_from_direction, CircleCoord, ConfigError, Direction, Layout,
    LayoutKind, Lens,
};
use std::f64::consts::{FRAC_PI_2, PI};

/// The full geometry of a lens photograph: a [`Lens`] bound to a
/// [`Layout`] over a concrete pixel grid.
///
/// This is the photo side of the backward-mapping pipeline. Going from
/// a pixel to a direction composes the layout's disk coordinates with
/// the lens inverse; going from a direction to a sample coordinate
/// composes the lens forward function with the layout's pixel map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoGeometry {
    lens: Lens,
    layout: Layout,
}

impl PhotoGeometry {
    /// Combines a lens and a layout, validating their interaction:
    /// each circle of a double layout must cover at least a
    /// hemisphere, so FoV below 180° is rejected there.
    pub fn new(lens: Lens, layout: Layout) -> Result<Self, ConfigError> {
        if layout.kind() == LayoutKind::Double && lens.half_fov() < FRAC_PI_2 {
            return Err(ConfigError::DoubleFovTooNarrow {
                fov: lens.half_fov().to_degrees() * 2.0,
            });
        }
        Ok(Self { lens, layout })
    }

    pub fn lens(&self) -> Lens {
        self.lens
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn width(&self) -> u32 {
        self.layout.width()
    }

    pub fn height(&self) -> u32 {
        self.layout.height()
    }

    /// Maps a continuous pixel coordinate to the direction it views.
    ///
    /// `None` when the pixel carries no lens data: outside every
    /// circle, or (equivalently, after the disk normalization) beyond
    /// the lens FoV.
    pub fn pixel_to_direction(&self, px: f64, py: f64) -> Option<Direction> {
        let coord = self.layout.pixel_to_circle(px, py)?;
        let angle = self.lens.radius_to_angle(coord.radius())?;
        if coord.circle == 0 {
            Some(direction_from_polar(angle, coord.azimuth()))
        } else {
            // The right circle faces the back pole and is mirrored in
            // x so the printed halves line up as a front/back pair.
            let azimuth = coord.v.atan2(-coord.u);
            Some(direction_from_polar(PI - angle, azimuth))
        }
    }

    /// Maps a direction to the continuous pixel coordinate where the
    /// photo sampled it, or `None` when the direction is outside the
    /// photo's field of view.
    ///
    /// For double layouts the circle whose pole is nearer to the
    /// direction wins; the other circle is the fallback when the FoV
    /// of the nearer one excludes the direction.
    pub fn direction_to_pixel(&self, dir: &Direction) -> Option<(f64, f64)> {
        let (polar, azimuth) = polar_from_direction(dir);
        if self.layout.kind() != LayoutKind::Double {
            return self.circle_pixel(0, polar, azimuth);
        }
        let front = || self.circle_pixel(0, polar, azimuth);
        let back = || self.circle_pixel(1, PI - polar, azimuth);
        if polar <= FRAC_PI_2 {
            front().or_else(back)
        } else {
            back().or_else(front)
        }
    }

    fn circle_pixel(&self, circle: usize, angle: f64, azimuth: f64) -> Option<(f64, f64)> {
        let radius = self.lens.angle_to_radius(angle)?;
        let (sin_a, cos_a) = azimuth.sin_cos();
        let (mut u, v) = (radius * cos_a, radius * sin_a);
        if circle == 1 {
            u = -u;
        }
        Some(self.layout.circle_to_pixel(&CircleCoord { circle, u, v }))
    }
}
