use crate::{LayoutKind, LensKind};
use thiserror::Error;

/// Rejected lens, layout, or panorama configurations.
///
/// Every variant is detected eagerly, before any pixel processing
/// begins, so a failed operation never leaves partial output behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The field of view is outside `(0, 360]` degrees.
    #[error("field of view must be within (0, 360] degrees, got {fov}")]
    FovOutOfRange { fov: f64 },
    /// The lens formula diverges or loses monotonicity at this FoV.
    #[error("{kind} lens supports a field of view below {limit} degrees, got {fov}")]
    FovBeyondLens {
        kind: LensKind,
        limit: f64,
        fov: f64,
    },
    /// Each circle of a double image must cover at least a hemisphere.
    #[error("double layout requires a field of view of at least 180 degrees, got {fov}")]
    DoubleFovTooNarrow { fov: f64 },
    /// A double image splits into two equal halves, so its width must be even.
    #[error("{kind} layout requires an even image width, got {width}")]
    OddWidth { kind: LayoutKind, width: u32 },
    /// Zero-sized images have no geometry to speak of.
    #[error("image dimensions must be nonzero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
    /// Equirectangular panoramas are full-sphere 2:1 grids.
    #[error("equirectangular panorama must have a 2:1 aspect, got {width}x{height}")]
    PanoramaAspect { width: u32, height: u32 },
}
