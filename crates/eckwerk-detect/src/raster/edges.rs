// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edge-map extraction: pre-filter the grayscale raster, then run Canny.

use eckwerk_core::config::{EdgeConfig, EdgeMode};
use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::erode;
use tracing::debug;

/// Binary edge raster (0 or 255) for `gray`.
pub fn edge_map(gray: &GrayImage, config: &EdgeConfig) -> GrayImage {
    let filtered = match config.mode {
        EdgeMode::AdaptiveThreshold {
            block_radius,
            offset,
            erode_radius,
        } => {
            let binary = adaptive_threshold(gray, block_radius, offset);
            if erode_radius > 0 {
                erode(&binary, Norm::LInf, erode_radius)
            } else {
                binary
            }
        }
        EdgeMode::GaussianBlur { sigma } => gaussian_blur_f32(gray, sigma),
    };
    let edges = canny(&filtered, config.canny_low, config.canny_high);
    debug!(
        edge_pixels = edges.pixels().filter(|p| p.0[0] > 0).count(),
        "edge map extracted"
    );
    edges
}

/// Local-mean binarisation: a pixel turns black when it is darker than the
/// mean of its `(2r+1)²` neighbourhood minus `offset`.
pub fn adaptive_threshold(gray: &GrayImage, block_radius: u32, offset: i16) -> GrayImage {
    let (width, height) = gray.dimensions();
    let integral = IntegralImage::new(gray);

    GrayImage::from_fn(width, height, |x, y| {
        let mean = integral.mean_around(x, y, block_radius);
        let threshold = (mean - offset as f64).clamp(0.0, 255.0);
        if (gray.get_pixel(x, y).0[0] as f64) < threshold {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    })
}

/// Summed-area table with a zero-padded first row and column.
struct IntegralImage {
    table: Vec<u64>,
    width: u32,
    height: u32,
}

impl IntegralImage {
    fn new(gray: &GrayImage) -> Self {
        let (width, height) = gray.dimensions();
        let stride = width as usize + 1;
        let mut table = vec![0u64; stride * (height as usize + 1)];

        for y in 0..height as usize {
            let mut row_sum = 0u64;
            for x in 0..width as usize {
                row_sum += gray.get_pixel(x as u32, y as u32).0[0] as u64;
                table[(y + 1) * stride + x + 1] = row_sum + table[y * stride + x + 1];
            }
        }

        Self {
            table,
            width,
            height,
        }
    }

    /// Mean over the square of radius `radius` centred on `(cx, cy)`,
    /// clipped to the image.
    fn mean_around(&self, cx: u32, cy: u32, radius: u32) -> f64 {
        let stride = self.width as usize + 1;
        let x1 = cx.saturating_sub(radius) as usize;
        let y1 = cy.saturating_sub(radius) as usize;
        let x2 = (cx.saturating_add(radius) as usize + 1).min(self.width as usize);
        let y2 = (cy.saturating_add(radius) as usize + 1).min(self.height as usize);

        let count = ((x2 - x1) * (y2 - y1)) as f64;
        if count == 0.0 {
            return 0.0;
        }

        let sum = self.table[y2 * stride + x2] + self.table[y1 * stride + x1]
            - self.table[y1 * stride + x2]
            - self.table[y2 * stride + x1];
        sum as f64 / count
    }
}
