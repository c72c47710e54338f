use image::{Rgb, RgbImage};

/// How sample coordinates outside the source grid are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleWrap {
    /// Clamp to the nearest edge texel on both axes (photographs).
    Clamp,
    /// Wrap the x axis modulo the width for longitude seam continuity,
    /// clamp the y axis (panoramas).
    WrapX,
}

fn resolve(index: i64, len: i64, wrap: bool) -> u32 {
    if wrap {
        index.rem_euclid(len) as u32
    } else {
        index.clamp(0, len - 1) as u32
    }
}

/// Reconstructs the color at a fractional sample coordinate by
/// bilinear interpolation over the four nearest texels.
///
/// Coordinates are continuous with texel `(i, j)` centered on
/// `(i + 0.5, j + 0.5)`. Interpolation weights are clamped at the image
/// edges, so a coordinate slightly outside the grid (rounding near a
/// FoV boundary) resolves to the nearest valid edge sample.
pub fn bilinear(image: &RgbImage, x: f64, y: f64, wrap: SampleWrap) -> Rgb<u8> {
    let w = i64::from(image.width());
    let h = i64::from(image.height());
    let wrap_x = wrap == SampleWrap::WrapX;

    let xf = x - 0.5;
    let yf = y - 0.5;
    let x0 = xf.floor();
    let y0 = yf.floor();
    let tx = xf - x0;
    let ty = yf - y0;

    let x0 = x0 as i64;
    let y0 = y0 as i64;
    let columns = [resolve(x0, w, wrap_x), resolve(x0 + 1, w, wrap_x)];
    let rows = [resolve(y0, h, false), resolve(y0 + 1, h, false)];
    let weights = [
        (1.0 - tx) * (1.0 - ty),
        tx * (1.0 - ty),
        (1.0 - tx) * ty,
        tx * ty,
    ];

    let mut accum = [0.0f64; 3];
    for (corner, weight) in weights.into_iter().enumerate() {
        let pixel = image.get_pixel(columns[corner & 1], rows[corner >> 1]);
        for (sum, &channel) in accum.iter_mut().zip(pixel.0.iter()) {
            *sum += weight * f64::from(channel);
        }
    }
    Rgb([
        accum[0].round() as u8,
        accum[1].round() as u8,
        accum[2].round() as u8,
    ])
}
