//! Geometry core for remapping between fisheye photographs and
//! equirectangular panoramas.
//!
//! Everything in this crate is a pure function of its inputs: lens
//! radial models ([`Lens`]), image layouts ([`Layout`]), the
//! equirectangular grid mapping ([`Equirect`]), and sphere rotation
//! ([`SphereRotation`]). Pixel buffers and resampling live in
//! `fisheye-remap`; this crate only answers "which direction does this
//! coordinate correspond to" and the reverse.
//!
//! Directions are unit 3-vectors in a right-handed frame: `x` lateral,
//! `y` vertical, `z` along the optical axis. The optical axis pierces
//! the sphere at the panorama's top pole, so a photo's center pixel is
//! latitude 0. Fallible mappings return `Option` rather than
//! extrapolating outside their domain; configuration mistakes are
//! [`ConfigError`]s raised at construction time, before any pixel is
//! touched.

pub use nalgebra;

use nalgebra::{Unit, UnitVector3, Vector3};

mod equirect;
mod error;
mod layout;
mod lens;
mod rotation;

pub use equirect::Equirect;
pub use error::ConfigError;
pub use layout::{CircleCoord, Layout, LayoutKind};
pub use lens::{Lens, LensKind};
pub use rotation::SphereRotation;

/// A direction on the unit sphere.
pub type Direction = UnitVector3<f64>;

/// Directions closer to a pole than this have their azimuth fixed to 0.
const POLE_EPSILON: f64 = 1e-12;

/// Builds a direction from a polar angle (radians from the optical
/// axis, in `[0, π]`) and an azimuth (radians counterclockwise from the
/// lateral axis).
pub fn direction_from_polar(polar: f64, azimuth: f64) -> Direction {
    let (sin_p, cos_p) = polar.sin_cos();
    let (sin_a, cos_a) = azimuth.sin_cos();
    Unit::new_unchecked(Vector3::new(sin_p * cos_a, sin_p * sin_a, cos_p))
}

/// Decomposes a direction into `(polar, azimuth)`.
///
/// At the poles the azimuth is degenerate; it is fixed to 0 by
/// convention so callers always receive a finite angle.
pub fn polar_from_direction(dir: &Direction) -> (f64, f64) {
    let polar = dir.z.clamp(-1.0, 1.0).acos();
    let azimuth = if dir.x.hypot(dir.y) <= POLE_EPSILON {
        0.0
    } else {
        dir.y.atan2(dir.x)
    };
    (polar, azimuth)
}
