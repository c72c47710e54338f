//! Whole-pipeline properties: panorama -> photo -> panorama round
//! trips, information loss under FoV reduction, double-layout
//! conversion, and rotation undo.

use fisheye_core::{polar_from_direction, Layout, LayoutKind, Lens, LensKind, SphereRotation};
use fisheye_remap::{remap, PanoGeometry, PhotoGeometry, Projection};
use image::{Rgb, RgbImage};

/// A gradient that is smooth over the whole sphere (it is a function of
/// the direction vector), so resampling error stays small everywhere
/// and the longitude seam is not a discontinuity.
fn gradient_pano(width: u32, height: u32) -> (RgbImage, PanoGeometry) {
    let pano = PanoGeometry::new(width, height).unwrap();
    let image = RgbImage::from_fn(width, height, |x, y| {
        let dir = pano.pixel_to_direction(x as f64 + 0.5, y as f64 + 0.5);
        Rgb([
            (128.0 + 100.0 * dir.x) as u8,
            (128.0 + 100.0 * dir.y) as u8,
            (128.0 + 100.0 * dir.z) as u8,
        ])
    });
    (image, pano)
}

fn photo_projection(kind: LensKind, fov: f64, layout: LayoutKind, w: u32, h: u32) -> Projection {
    Projection::Photo(
        PhotoGeometry::new(
            Lens::new(kind, fov).unwrap(),
            Layout::new(layout, w, h).unwrap(),
        )
        .unwrap(),
    )
}

fn channel_delta(a: &Rgb<u8>, b: &Rgb<u8>) -> i16 {
    (0..3)
        .map(|c| (i16::from(a.0[c]) - i16::from(b.0[c])).abs())
        .max()
        .unwrap()
}

#[test]
fn pano_photo_pano_round_trip() {
    let (original, pano) = gradient_pano(256, 128);
    let pano_projection = Projection::Pano(pano);
    let photo = photo_projection(LensKind::Equidistant, 360.0, LayoutKind::Inscribed, 128, 128);
    let identity = SphereRotation::identity();

    let intermediate = remap(&original, &pano_projection, &photo, &identity);
    let recovered = remap(&intermediate, &photo, &pano_projection, &identity);

    for (x, y, pixel) in recovered.enumerate_pixels() {
        let dir = pano.pixel_to_direction(x as f64 + 0.5, y as f64 + 0.5);
        let (polar, _) = polar_from_direction(&dir);
        // The photo's rim ring is the degenerate image of the bottom
        // pole; interpolation bleeds background there.
        if polar > 2.95 {
            continue;
        }
        let delta = channel_delta(pixel, original.get_pixel(x, y));
        assert!(delta <= 12, "({x}, {y}): delta {delta}");
    }
}

#[test]
fn narrower_fov_cannot_recover_the_far_hemisphere() {
    let (original, pano) = gradient_pano(256, 128);
    let pano_projection = Projection::Pano(pano);
    let hemisphere =
        photo_projection(LensKind::Equidistant, 180.0, LayoutKind::Inscribed, 128, 128);
    let identity = SphereRotation::identity();

    let intermediate = remap(&original, &pano_projection, &hemisphere, &identity);
    let recovered = remap(&intermediate, &hemisphere, &pano_projection, &identity);

    // Rows well below the equator were never captured and stay black.
    for y in 72..128 {
        for x in 0..256 {
            assert_eq!(
                *recovered.get_pixel(x, y),
                Rgb([0, 0, 0]),
                "({x}, {y}) recovered data beyond the 180-degree FoV"
            );
        }
    }
    // The near hemisphere did survive.
    let upper = recovered.get_pixel(128, 20);
    assert!(channel_delta(upper, original.get_pixel(128, 20)) <= 12);
}

#[test]
fn inscribed_to_double_conversion() {
    let (pano_image, pano) = gradient_pano(256, 128);
    let pano_projection = Projection::Pano(pano);
    let identity = SphereRotation::identity();

    let inscribed =
        photo_projection(LensKind::Equidistant, 360.0, LayoutKind::Inscribed, 128, 128);
    let source = remap(&pano_image, &pano_projection, &inscribed, &identity);

    let double_geometry = PhotoGeometry::new(
        Lens::new(LensKind::Equidistant, 195.0).unwrap(),
        Layout::new(LayoutKind::Double, 256, 128).unwrap(),
    )
    .unwrap();
    let double = Projection::Photo(double_geometry);
    let output = remap(&source, &inscribed, &double, &identity);

    // Same height, twice the per-circle width.
    assert_eq!(output.height(), source.height());
    assert_eq!(output.width(), 2 * source.width());

    // The left circle's center views the top pole, like the source center.
    let front = output.get_pixel(64, 64);
    assert!(channel_delta(front, source.get_pixel(64, 64)) <= 8, "{front:?}");

    // A mid-radius point in the right circle views the far hemisphere;
    // its color matches the gradient for the direction it views. (The
    // exact back pole is skipped: it is the degenerate rim ring of the
    // 360-degree source, where interpolation bleeds background.)
    let dir = double_geometry.pixel_to_direction(224.5, 64.5).unwrap();
    assert!(dir.z < -0.5, "right circle should look backward, got {dir:?}");
    let expected = Rgb([
        (128.0 + 100.0 * dir.x) as u8,
        (128.0 + 100.0 * dir.y) as u8,
        (128.0 + 100.0 * dir.z) as u8,
    ]);
    let back = output.get_pixel(224, 64);
    assert!(channel_delta(back, &expected) <= 12, "{back:?} vs {expected:?}");
}

#[test]
fn rotation_applied_then_undone() {
    let (original, pano) = gradient_pano(256, 128);
    let pano_projection = Projection::Pano(pano);
    let photo = photo_projection(LensKind::Equidistant, 360.0, LayoutKind::Inscribed, 128, 128);
    let rotation = SphereRotation::from_degrees(30.0, 45.0, 60.0);

    let rotated_photo = remap(&original, &pano_projection, &photo, &rotation);
    let recovered = remap(&rotated_photo, &photo, &pano_projection, &rotation.inverse());

    for (x, y, pixel) in recovered.enumerate_pixels() {
        let dir = pano.pixel_to_direction(x as f64 + 0.5, y as f64 + 0.5);
        // Skip the band the photo's rim ring degenerates into; with the
        // scene rotated it is no longer the bottom rows.
        let (polar, _) = polar_from_direction(&rotation.apply(&dir));
        if polar > 2.9 {
            continue;
        }
        let delta = channel_delta(pixel, original.get_pixel(x, y));
        assert!(delta <= 14, "({x}, {y}): delta {delta}");
    }
}
