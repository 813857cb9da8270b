// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Debug overlay: what the detector saw, drawn over the source image.

use eckwerk_core::{ImageSize, Point, PolarLine};
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut};

use crate::detector::DetectionReport;

const HORIZONTAL_COLOR: Rgba<u8> = Rgba([255, 64, 64, 255]);
const VERTICAL_COLOR: Rgba<u8> = Rgba([64, 128, 255, 255]);
const OTHER_LINE_COLOR: Rgba<u8> = Rgba([160, 160, 160, 255]);
const QUAD_COLOR: Rgba<u8> = Rgba([0, 220, 0, 255]);

/// Render deduplicated lines, intersections (shaded from red to yellow by
/// relative score) and the chosen quadrilateral.
pub fn render(image: &DynamicImage, report: &DetectionReport) -> RgbaImage {
    let mut canvas = image.to_rgba8();
    let mapper = report.mapper();
    let radius = (report.source_size.width.max(report.source_size.height) / 150).max(3) as i32;

    for line in &report.lines {
        let color = if report.horizontal.iter().any(|s| s.line == *line) {
            HORIZONTAL_COLOR
        } else if report.vertical.iter().any(|s| s.line == *line) {
            VERTICAL_COLOR
        } else {
            OTHER_LINE_COLOR
        };
        if let Some((a, b)) = line_segment(line, report.raster_size) {
            let (a, b) = (mapper.to_source(a), mapper.to_source(b));
            draw_line_segment_mut(&mut canvas, as_f32(a), as_f32(b), color);
        }
    }

    let (lo, hi) = report
        .intersections
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.score), hi.max(p.score))
        });
    for p in &report.intersections {
        let t = if hi > lo { (p.score - lo) / (hi - lo) } else { 1.0 };
        let color = Rgba([255, (t * 255.0).round() as u8, 0, 255]);
        draw_filled_circle_mut(&mut canvas, as_i32(mapper.to_source(p.pt)), radius, color);
    }

    if let Some(corners) = report.corners() {
        let pts = corners.to_array();
        for (i, a) in pts.iter().enumerate() {
            let b = pts[(i + 1) % pts.len()];
            draw_line_segment_mut(&mut canvas, as_f32(*a), as_f32(b), QUAD_COLOR);
            draw_hollow_circle_mut(&mut canvas, as_i32(*a), radius * 2, QUAD_COLOR);
        }
    }

    canvas
}

/// The part of `line` inside the `[0, width] × [0, height]` rectangle.
pub fn line_segment(line: &PolarLine, size: ImageSize) -> Option<(Point, Point)> {
    const EPS: f64 = 1e-9;
    let (w, h) = (size.width as f64, size.height as f64);
    let (sin, cos) = line.theta.sin_cos();

    let mut hits: Vec<Point> = Vec::with_capacity(4);
    if sin.abs() > EPS {
        hits.push(Point::new(0.0, line.rho / sin));
        hits.push(Point::new(w, (line.rho - w * cos) / sin));
    }
    if cos.abs() > EPS {
        hits.push(Point::new(line.rho / cos, 0.0));
        hits.push(Point::new((line.rho - h * sin) / cos, h));
    }
    hits.retain(|p| (-EPS..=w + EPS).contains(&p.x) && (-EPS..=h + EPS).contains(&p.y));

    let first = *hits.first()?;
    let second = hits.iter().find(|p| p.distance(&first) > 0.5)?;
    Some((first, *second))
}

fn as_f32(p: Point) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

fn as_i32(p: Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}
