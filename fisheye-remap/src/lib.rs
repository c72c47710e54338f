//! Backward-mapping resampling between fisheye photographs and
//! equirectangular panoramas.
//!
//! The engine walks every destination pixel, asks the destination
//! projection which direction it views, rotates that direction back
//! into the source frame, asks the source projection where that
//! direction lands on its grid, and reconstructs the color with
//! bilinear interpolation. Pixels whose direction falls outside either
//! side's field of view are misses and come out black. Every per-pixel
//! step is a pure function of the configuration, so destination rows
//! are processed in parallel.

mod engine;
mod pano;
mod photo;
mod sampler;

pub use engine::{remap, Projection};
pub use pano::PanoGeometry;
pub use photo::PhotoGeometry;
pub use sampler::{bilinear, SampleWrap};
