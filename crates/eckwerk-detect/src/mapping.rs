// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion between detection-raster and source-image coordinates.

use eckwerk_core::{Corners, ImageSize, Point};

/// Dimensions with roughly `target_area` pixels and the aspect ratio of
/// `source`. Sources that are already small enough are returned unchanged.
pub fn area_to_bounds(source: ImageSize, target_area: u32) -> ImageSize {
    let area = source.area();
    if source.is_empty() || area <= target_area as f64 {
        return source;
    }
    let scale = (target_area as f64 / area).sqrt();
    ImageSize::new(
        ((source.width as f64 * scale).round() as u32).max(1),
        ((source.height as f64 * scale).round() as u32).max(1),
    )
}

/// Per-axis scale between the source image and the detection raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    source: ImageSize,
    raster: ImageSize,
    sx: f64,
    sy: f64,
}

impl CoordinateMapper {
    pub fn new(source: ImageSize, raster: ImageSize) -> Self {
        let ratio = |s: u32, r: u32| if r == 0 { 1.0 } else { s as f64 / r as f64 };
        Self {
            source,
            raster,
            sx: ratio(source.width, raster.width),
            sy: ratio(source.height, raster.height),
        }
    }

    /// Mapper for the raster `area_to_bounds` would produce.
    pub fn for_target_area(source: ImageSize, target_area: u32) -> Self {
        Self::new(source, area_to_bounds(source, target_area))
    }

    pub fn source_size(&self) -> ImageSize {
        self.source
    }

    pub fn raster_size(&self) -> ImageSize {
        self.raster
    }

    pub fn to_source(&self, pt: Point) -> Point {
        Point::new(pt.x * self.sx, pt.y * self.sy)
    }

    pub fn to_raster(&self, pt: Point) -> Point {
        Point::new(pt.x / self.sx, pt.y / self.sy)
    }

    pub fn corners_to_source(&self, corners: &Corners) -> Corners {
        corners.map(|p| self.to_source(p))
    }
}
