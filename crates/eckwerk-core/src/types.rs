// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core geometric types for the Eckwerk corner detector.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

/// A 2D point. Which coordinate space it lives in (detection raster or
/// source image) is determined by the producer; conversions go through the
/// coordinate mapper only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new(
            self.x + (other.x - self.x) / 2.0,
            self.y + (other.y - self.y) / 2.0,
        )
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An infinite line in polar (Hough) form: `x·cos(theta) + y·sin(theta) = rho`.
///
/// `theta` is kept in `[0, π)`; `rho` may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarLine {
    pub rho: f64,
    pub theta: f64,
}

impl PolarLine {
    /// Build a line, folding `theta` into `[0, π)`.
    ///
    /// `(rho, θ)` and `(-rho, θ + π)` describe the same line, so folding a
    /// half turn flips the sign of `rho`.
    pub fn new(rho: f64, theta: f64) -> Self {
        let mut rho = rho;
        let mut theta = theta.rem_euclid(2.0 * PI);
        // rem_euclid may round up to exactly 2π, hence two passes.
        for _ in 0..2 {
            if theta >= PI {
                theta -= PI;
                rho = -rho;
            }
        }
        Self { rho, theta }
    }

    /// The line passing through `p0` and `p1`.
    pub fn through(p0: Point, p1: Point) -> Self {
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let theta = dy.atan2(dx) + FRAC_PI_2;
        let rho = p0.x * theta.cos() + p0.y * theta.sin();
        Self::new(rho, theta)
    }

    /// Orthogonal projection of `pt` onto the line.
    pub fn closest_point(&self, pt: Point) -> Point {
        let (sin, cos) = self.theta.sin_cos();
        // Unit direction along the line and the foot of the normal from the origin.
        let (dx, dy) = (-sin, cos);
        let (ax, ay) = (self.rho * cos, self.rho * sin);
        let along = dx * (pt.x - ax) + dy * (pt.y - ay);
        Point::new(ax + dx * along, ay + dy * along)
    }

    /// Unsigned perpendicular distance from `pt` to the line.
    pub fn distance_to(&self, pt: Point) -> f64 {
        (pt.x * self.theta.cos() + pt.y * self.theta.sin() - self.rho).abs()
    }
}

/// Width and height of a raster in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }

    pub fn diagonal(&self) -> f64 {
        (self.width as f64).hypot(self.height as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// `true` when `pt` lies in `[0, width) × [0, height)`.
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= 0.0 && pt.y >= 0.0 && pt.x < self.width as f64 && pt.y < self.height as f64
    }
}

/// The four corners of a document quadrilateral, clockwise from top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corners {
    pub tl: Point,
    pub tr: Point,
    pub br: Point,
    pub bl: Point,
}

/// Midpoints of the four quadrilateral edges (top, right, bottom, left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeCenters {
    pub t: Point,
    pub r: Point,
    pub b: Point,
    pub l: Point,
}

/// A quarter turn of the crop view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Left,
    Right,
}

impl Corners {
    pub const fn new(tl: Point, tr: Point, br: Point, bl: Point) -> Self {
        Self { tl, tr, br, bl }
    }

    /// The unrotated full-image rectangle, used when detection yields nothing.
    pub fn full_image(size: ImageSize) -> Self {
        let (w, h) = (size.width as f64, size.height as f64);
        Self {
            tl: Point::new(0.0, 0.0),
            tr: Point::new(w, 0.0),
            br: Point::new(w, h),
            bl: Point::new(0.0, h),
        }
    }

    pub fn from_array([tl, tr, br, bl]: [Point; 4]) -> Self {
        Self { tl, tr, br, bl }
    }

    /// Corners in clockwise order `[tl, tr, br, bl]`.
    pub fn to_array(&self) -> [Point; 4] {
        [self.tl, self.tr, self.br, self.bl]
    }

    /// Apply `f` to every corner.
    pub fn map(&self, mut f: impl FnMut(Point) -> Point) -> Self {
        Self {
            tl: f(self.tl),
            tr: f(self.tr),
            br: f(self.br),
            bl: f(self.bl),
        }
    }

    /// Polygon area by the shoelace formula.
    pub fn area(&self) -> f64 {
        let pts = self.to_array();
        let twice: f64 = (0..pts.len())
            .map(|i| {
                let (a, b) = (pts[i], pts[(i + 1) % pts.len()]);
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice.abs() / 2.0
    }

    /// Mean of the four corners.
    pub fn center(&self) -> Point {
        let pts = self.to_array();
        Point::new(
            pts.iter().map(|p| p.x).sum::<f64>() / 4.0,
            pts.iter().map(|p| p.y).sum::<f64>() / 4.0,
        )
    }

    pub fn edge_centers(&self) -> EdgeCenters {
        EdgeCenters {
            t: self.tl.midpoint(&self.tr),
            r: self.tr.midpoint(&self.br),
            b: self.br.midpoint(&self.bl),
            l: self.bl.midpoint(&self.tl),
        }
    }

    /// Relabel the corners after turning the view by a quarter.
    ///
    /// Points keep their source-image coordinates; only their roles change.
    pub fn turned(&self, turn: Turn) -> Self {
        let Corners { tl, tr, br, bl } = *self;
        match turn {
            Turn::Left => Self::new(tr, br, bl, tl),
            Turn::Right => Self::new(bl, tl, tr, br),
        }
    }

    /// Clip every corner into `[0, width] × [0, height]`.
    pub fn clamped(&self, size: ImageSize) -> Self {
        let (w, h) = (size.width as f64, size.height as f64);
        self.map(|p| Point::new(p.x.clamp(0.0, w), p.y.clamp(0.0, h)))
    }
}

/// Shortest distance between `a` and `b` on the circular interval `[min, max)`.
///
/// Used for angles: `loop_diff(θa, θb, 0.0, π)` compares line directions.
pub fn loop_diff(a: f64, b: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    let d = (a - b).abs().rem_euclid(span);
    d.min(span - d)
}
