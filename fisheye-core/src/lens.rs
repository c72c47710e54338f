use crate::ConfigError;
use core::fmt;
use core::str::FromStr;
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Slack allowed when checking the lens domain, so values that land a
/// floating-point rounding step past the FoV edge still count as the
/// edge instead of becoming misses.
const DOMAIN_EPSILON: f64 = 1e-9;

/// The closed set of supported radial lens projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum LensKind {
    /// Radius proportional to the incidence angle.
    Equidistant,
    /// Radius proportional to `sin(angle/2)`; preserves solid angle.
    Equisolid,
    /// Radius proportional to `sin(angle)`; the image of a sphere seen
    /// from infinity.
    Orthographic,
    /// Radius proportional to `tan(angle/2)`; conformal.
    Stereographic,
    /// Radius proportional to `tan(angle)`; the ordinary perspective
    /// projection, diverging as the angle approaches 90°.
    Rectilinear,
}

impl LensKind {
    /// The names accepted by [`FromStr`], for CLI help text.
    pub const NAMES: [&'static str; 5] = [
        "equidistant",
        "equisolid",
        "orthographic",
        "stereographic",
        "rectilinear",
    ];
}

impl fmt::Display for LensKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LensKind::Equidistant => "equidistant",
            LensKind::Equisolid => "equisolid",
            LensKind::Orthographic => "orthographic",
            LensKind::Stereographic => "stereographic",
            LensKind::Rectilinear => "rectilinear",
        };
        f.write_str(name)
    }
}

impl FromStr for LensKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equidistant" => Ok(LensKind::Equidistant),
            "equisolid" => Ok(LensKind::Equisolid),
            "orthographic" => Ok(LensKind::Orthographic),
            "stereographic" => Ok(LensKind::Stereographic),
            "rectilinear" => Ok(LensKind::Rectilinear),
            other => Err(format!(
                "unknown lens {:?}, expected one of: {}",
                other,
                LensKind::NAMES.join(", ")
            )),
        }
    }
}

/// An idealized lens: a [`LensKind`] bound to a field of view.
///
/// The radial functions are normalized so the FoV half-angle maps
/// exactly to radius 1, i.e. the FoV edge lands on the unit circle
/// boundary. Forward and inverse are closed-form mutual inverses over
/// `[0, half_fov]`; outside that domain both return `None` so callers
/// can treat the value as an out-of-FoV miss.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Lens {
    kind: LensKind,
    half_fov: f64,
}

impl Lens {
    /// Creates a lens from a kind and a total FoV in degrees.
    ///
    /// Rejects FoV outside `(0, 360]`, rectilinear at or beyond 180°
    /// (the tangent diverges), and orthographic beyond 180° (the sine
    /// stops being monotonic, so the inverse would be ambiguous).
    pub fn new(kind: LensKind, fov_degrees: f64) -> Result<Self, ConfigError> {
        if !fov_degrees.is_finite() || fov_degrees <= 0.0 || fov_degrees > 360.0 {
            return Err(ConfigError::FovOutOfRange { fov: fov_degrees });
        }
        match kind {
            LensKind::Rectilinear if fov_degrees >= 180.0 => {
                return Err(ConfigError::FovBeyondLens {
                    kind,
                    limit: 180.0,
                    fov: fov_degrees,
                });
            }
            LensKind::Orthographic if fov_degrees > 180.0 => {
                return Err(ConfigError::FovBeyondLens {
                    kind,
                    limit: 180.0,
                    fov: fov_degrees,
                });
            }
            _ => {}
        }
        Ok(Self {
            kind,
            half_fov: fov_degrees.to_radians() / 2.0,
        })
    }

    pub fn kind(&self) -> LensKind {
        self.kind
    }

    /// Half the field of view, in radians.
    pub fn half_fov(&self) -> f64 {
        self.half_fov
    }

    /// Maps an incidence angle (radians from the optical axis) to a
    /// normalized image radius in `[0, 1]`.
    ///
    /// Returns `None` for angles beyond the FoV half-angle.
    pub fn angle_to_radius(&self, angle: f64) -> Option<f64> {
        if !angle.is_finite() || angle < 0.0 || angle > self.half_fov + DOMAIN_EPSILON {
            return None;
        }
        let angle = angle.min(self.half_fov);
        let radius = match self.kind {
            LensKind::Equidistant => angle / self.half_fov,
            LensKind::Equisolid => (angle / 2.0).sin() / (self.half_fov / 2.0).sin(),
            LensKind::Orthographic => angle.sin() / self.half_fov.sin(),
            LensKind::Stereographic => (angle / 2.0).tan() / (self.half_fov / 2.0).tan(),
            LensKind::Rectilinear => angle.tan() / self.half_fov.tan(),
        };
        Some(radius.clamp(0.0, 1.0))
    }

    /// Maps a normalized image radius in `[0, 1]` back to an incidence
    /// angle in `[0, half_fov]`.
    ///
    /// Returns `None` for radii outside the unit circle. This is the
    /// analytic inverse of [`Lens::angle_to_radius`], not an iterative
    /// solve.
    pub fn radius_to_angle(&self, radius: f64) -> Option<f64> {
        if !radius.is_finite() || radius < 0.0 || radius > 1.0 + DOMAIN_EPSILON {
            return None;
        }
        let radius = radius.min(1.0);
        let angle = match self.kind {
            LensKind::Equidistant => radius * self.half_fov,
            LensKind::Equisolid => 2.0 * (radius * (self.half_fov / 2.0).sin()).asin(),
            LensKind::Orthographic => (radius * self.half_fov.sin()).asin(),
            LensKind::Stereographic => 2.0 * (radius * (self.half_fov / 2.0).tan()).atan(),
            LensKind::Rectilinear => (radius * self.half_fov.tan()).atan(),
        };
        Some(angle.clamp(0.0, self.half_fov))
    }
}
