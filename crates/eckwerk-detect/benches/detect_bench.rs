// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the corner detector: the line-level selection
// core on a worst-case line set, and the full raster pipeline on a synthetic
// photo.

use std::f64::consts::FRAC_PI_2;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, GrayImage, Luma};

use eckwerk_core::{DetectorConfig, ImageSize, PolarLine};
use eckwerk_detect::{CornerDetector, locate_corners};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Four horizontal and four vertical lines spread across the raster give 16
/// in-bounds intersections, the most the default caps allow, so the
/// adjacency search enumerates every candidate quad.
fn bench_locate_corners(c: &mut Criterion) {
    let size = ImageSize::new(365, 274);
    let mut lines = Vec::new();
    for i in 0..4 {
        let offset = 20.0 + i as f64 * 70.0;
        lines.push(PolarLine::new(offset * 0.75, FRAC_PI_2 + 0.01 * i as f64));
        lines.push(PolarLine::new(offset, 0.01 * i as f64));
    }
    let config = DetectorConfig::default();

    c.bench_function("locate_corners (4h x 4v)", |b| {
        b.iter(|| black_box(locate_corners(black_box(&lines), size, &config)));
    });
}

/// Full pipeline on a 640x480 image: dark desk, bright page from (80, 60)
/// to (560, 420). Downsampled to the default 100k-pixel raster.
fn bench_detect(c: &mut Criterion) {
    let (width, height) = (640u32, 480u32);
    let mut img = GrayImage::from_pixel(width, height, Luma([30u8]));
    for y in 60..420 {
        for x in 80..560 {
            img.put_pixel(x, y, Luma([235u8]));
        }
    }
    let dynamic = DynamicImage::ImageLuma8(img);
    let detector = CornerDetector::new(DetectorConfig::default()).expect("default config is valid");

    c.bench_function("detect (640x480)", |b| {
        b.iter(|| black_box(detector.detect(black_box(&dynamic))));
    });
}

criterion_group!(benches, bench_locate_corners, bench_detect);
criterion_main!(benches);
