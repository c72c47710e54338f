use crate::Direction;
use nalgebra::{Rotation3, Unit, Vector3};
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A rigid orientation transform of the sphere, built from pitch, yaw,
/// and roll.
///
/// The elementary rotations are applied in a fixed order: pitch about
/// the lateral `x` axis first, then yaw about the vertical `y` axis,
/// then roll about the depth `z` axis (the optical axis). The transform
/// rotates the *scene*, so an engine producing a rotated output samples
/// the source at [`SphereRotation::apply_inverse`] of each destination
/// direction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SphereRotation {
    forward: Rotation3<f64>,
}

impl SphereRotation {
    /// The identity transform; remapping with it reproduces the input
    /// orientation exactly.
    pub fn identity() -> Self {
        Self {
            forward: Rotation3::identity(),
        }
    }

    /// Builds the transform from Euler angles in degrees.
    pub fn from_degrees(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self::from_radians(pitch.to_radians(), yaw.to_radians(), roll.to_radians())
    }

    /// Builds the transform from Euler angles in radians.
    pub fn from_radians(pitch: f64, yaw: f64, roll: f64) -> Self {
        let pitch = Rotation3::from_axis_angle(&Vector3::x_axis(), pitch);
        let yaw = Rotation3::from_axis_angle(&Vector3::y_axis(), yaw);
        let roll = Rotation3::from_axis_angle(&Vector3::z_axis(), roll);
        Self {
            forward: roll * yaw * pitch,
        }
    }

    /// Composes `self` with a rotation applied after it.
    #[must_use]
    pub fn then(&self, next: &SphereRotation) -> Self {
        Self {
            forward: next.forward * self.forward,
        }
    }

    /// The inverse transform. Rotation matrices are orthonormal, so
    /// this is just the transpose.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            forward: self.forward.inverse(),
        }
    }

    /// Rotates a direction into the transformed frame.
    pub fn apply(&self, dir: &Direction) -> Direction {
        Unit::new_unchecked(self.forward * dir.into_inner())
    }

    /// Rotates a direction back into the source frame.
    pub fn apply_inverse(&self, dir: &Direction) -> Direction {
        Unit::new_unchecked(self.forward.inverse() * dir.into_inner())
    }
}

impl Default for SphereRotation {
    fn default() -> Self {
        Self::identity()
    }
}
