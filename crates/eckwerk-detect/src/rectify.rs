// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective rectification of a cropped quadrilateral.

use eckwerk_core::error::{EckwerkError, Result};
use eckwerk_core::{Corners, ImageSize};
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use tracing::{debug, info, instrument};

/// Output dimensions for a quad: the mean length of each pair of opposite
/// edges, rounded and at least one pixel.
pub fn output_size(corners: &Corners) -> ImageSize {
    let width = (corners.tl.distance(&corners.tr) + corners.bl.distance(&corners.br)) / 2.0;
    let height = (corners.tl.distance(&corners.bl) + corners.tr.distance(&corners.br)) / 2.0;
    ImageSize::new(
        (width.round() as u32).max(1),
        (height.round() as u32).max(1),
    )
}

/// Warp the region inside `corners` onto an upright rectangle.
///
/// Pixels that map outside the source are filled white.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn rectify(image: &DynamicImage, corners: &Corners) -> Result<RgbaImage> {
    if corners.area() < 1.0 {
        return Err(EckwerkError::InvalidCorners(
            "quadrilateral has no area".into(),
        ));
    }

    let out = output_size(corners);
    let (w, h) = (out.width as f32, out.height as f32);
    let src = corners
        .to_array()
        .map(|p| (p.x as f32, p.y as f32));
    let dest = [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)];

    let projection = Projection::from_control_points(src, dest).ok_or_else(|| {
        EckwerkError::InvalidCorners("corners do not define a projective transform".into())
    })?;
    debug!(out_width = out.width, out_height = out.height, "projection computed");

    let rgba = image.to_rgba8();
    let mut output = RgbaImage::new(out.width, out.height);
    warp_into(
        &rgba,
        &projection,
        Interpolation::Bilinear,
        Rgba([255u8, 255, 255, 255]),
        &mut output,
    );

    info!(out_width = out.width, out_height = out.height, "quadrilateral rectified");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use eckwerk_core::Point;

    use super::*;

    /// Bilinear sampling may be off by one level after rounding.
    fn assert_pixel(actual: &Rgba<u8>, expected: [u8; 4]) {
        let close = actual
            .0
            .iter()
            .zip(expected)
            .all(|(a, e)| a.abs_diff(e) <= 1);
        assert!(close, "expected {expected:?}, got {:?}", actual.0);
    }

    #[test]
    fn output_size_averages_opposite_edges() {
        let corners = Corners::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(90.0, 50.0),
            Point::new(10.0, 50.0),
        );
        let size = output_size(&corners);
        assert_eq!(size.width, 90);
        // Left and right edges are both √(10² + 50²).
        assert_eq!(size.height, 51);
    }

    #[test]
    fn full_image_rectifies_to_itself() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_fn(40, 30, |x, _| {
            if x < 20 { Rgba([255, 0, 0, 255]) } else { Rgba([0, 0, 255, 255]) }
        }));
        let corners = Corners::full_image(ImageSize::new(40, 30));
        let out = rectify(&img, &corners).expect("rectify");
        assert_eq!(out.dimensions(), (40, 30));
        assert_pixel(out.get_pixel(5, 10), [255, 0, 0, 255]);
        assert_pixel(out.get_pixel(35, 10), [0, 0, 255, 255]);
    }

    #[test]
    fn inner_quad_is_cropped() {
        // Green square at 20..60 inside a black 80×80 image.
        let img = DynamicImage::ImageRgba8(RgbaImage::from_fn(80, 80, |x, y| {
            if (20..60).contains(&x) && (20..60).contains(&y) {
                Rgba([0, 255, 0, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        }));
        let corners = Corners::new(
            Point::new(20.0, 20.0),
            Point::new(60.0, 20.0),
            Point::new(60.0, 60.0),
            Point::new(20.0, 60.0),
        );
        let out = rectify(&img, &corners).expect("rectify");
        assert_eq!(out.dimensions(), (40, 40));
        assert_pixel(out.get_pixel(20, 20), [0, 255, 0, 255]);
    }

    #[test]
    fn degenerate_corners_are_rejected() {
        let img = DynamicImage::new_rgba8(10, 10);
        let p = Point::new(5.0, 5.0);
        let err = rectify(&img, &Corners::new(p, p, p, p)).expect_err("no area");
        assert!(matches!(err, EckwerkError::InvalidCorners(_)));
    }
}
