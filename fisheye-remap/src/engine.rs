use crate::{bilinear, PanoGeometry, PhotoGeometry, SampleWrap};
use fisheye_core::{Direction, SphereRotation};
use image::{Rgb, RgbImage};
use log::*;
use rayon::prelude::*;

/// What a destination pixel is painted with when its direction falls
/// outside some field of view along the chain.
const MISS: Rgb<u8> = Rgb([0, 0, 0]);

/// A projection surface the engine can map pixels through, resolved
/// once per operation so the hot loop dispatches over a closed enum
/// instead of a virtual call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Photo(PhotoGeometry),
    Pano(PanoGeometry),
}

impl Projection {
    pub fn width(&self) -> u32 {
        match self {
            Projection::Photo(photo) => photo.width(),
            Projection::Pano(pano) => pano.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Projection::Photo(photo) => photo.height(),
            Projection::Pano(pano) => pano.height(),
        }
    }

    /// The direction a destination pixel views, or `None` for a miss.
    fn pixel_to_direction(&self, px: f64, py: f64) -> Option<Direction> {
        match self {
            Projection::Photo(photo) => photo.pixel_to_direction(px, py),
            Projection::Pano(pano) => Some(pano.pixel_to_direction(px, py)),
        }
    }

    /// Where a source-frame direction lands on this surface's grid,
    /// or `None` when it is outside the surface's field of view.
    fn direction_to_pixel(&self, dir: &Direction) -> Option<(f64, f64)> {
        match self {
            Projection::Photo(photo) => photo.direction_to_pixel(dir),
            Projection::Pano(pano) => Some(pano.direction_to_pixel(dir)),
        }
    }

    fn wrap(&self) -> SampleWrap {
        match self {
            Projection::Photo(_) => SampleWrap::Clamp,
            Projection::Pano(_) => SampleWrap::WrapX,
        }
    }
}

/// Backward-maps every destination pixel to a source sample.
///
/// For each destination pixel: find its viewing direction, rotate that
/// direction back into the source frame (the rotation transforms the
/// scene, so sampling uses the inverse), project it onto the source
/// grid, and reconstruct the color bilinearly. A miss at either
/// projection paints the pixel black. Rows are independent and run in
/// parallel; the source buffer and configuration are only read.
pub fn remap(
    source: &RgbImage,
    source_projection: &Projection,
    dest_projection: &Projection,
    rotation: &SphereRotation,
) -> RgbImage {
    debug_assert_eq!(source.width(), source_projection.width());
    debug_assert_eq!(source.height(), source_projection.height());

    let width = dest_projection.width();
    let height = dest_projection.height();
    let wrap = source_projection.wrap();
    let inverse = rotation.inverse();
    info!(
        "remapping {}x{} source into {}x{} destination",
        source.width(),
        source.height(),
        width,
        height
    );

    let mut output = RgbImage::new(width, height);
    let stride = width as usize * 3;
    output
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let py = y as f64 + 0.5;
            for x in 0..width as usize {
                let px = x as f64 + 0.5;
                let color = dest_projection
                    .pixel_to_direction(px, py)
                    .map(|dir| inverse.apply(&dir))
                    .and_then(|dir| source_projection.direction_to_pixel(&dir))
                    .map(|(sx, sy)| bilinear(source, sx, sy, wrap))
                    .unwrap_or(MISS);
                row[x * 3..x * 3 + 3].copy_from_slice(&color.0);
            }
        });
    output
}
