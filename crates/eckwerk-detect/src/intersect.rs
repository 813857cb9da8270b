// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner candidates from horizontal × vertical line pairs.

use eckwerk_core::config::ScoreWeights;
use eckwerk_core::{ImageSize, Point, PolarLine};
use serde::Serialize;
use tracing::trace;

use crate::lines::ScoredLine;
use crate::lines::score::{angle_score, rank_score};

/// Determinant magnitude below which two lines count as parallel.
const PARALLEL_EPSILON: f64 = 1e-6;

/// A candidate corner. `h` and `v` index the horizontal and vertical line
/// sets the point was built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Intersection {
    pub pt: Point,
    pub score: f64,
    pub h: usize,
    pub v: usize,
}

/// Solve `x·cosθ + y·sinθ = ρ` for both lines.
///
/// Returns `None` if the lines are (nearly) parallel.
pub fn intersect_lines(h: &PolarLine, v: &PolarLine) -> Option<Point> {
    let (sin_h, cos_h) = h.theta.sin_cos();
    let (sin_v, cos_v) = v.theta.sin_cos();

    let det = cos_h * sin_v - sin_h * cos_v;
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }

    let x = (sin_v * h.rho - sin_h * v.rho) / det;
    let y = (cos_h * v.rho - cos_v * h.rho) / det;
    Some(Point::new(x, y))
}

/// Intersect every horizontal with every vertical line and keep the points
/// that land inside the raster, scored by line quality, corner angle and
/// detection rank.
///
/// Output order is horizontal-major: all points of `horizontal[0]` first.
pub fn build_intersections(
    horizontal: &[ScoredLine],
    vertical: &[ScoredLine],
    size: ImageSize,
    weights: &ScoreWeights,
) -> Vec<Intersection> {
    let mut out = Vec::with_capacity(horizontal.len() * vertical.len());
    for (hi, h) in horizontal.iter().enumerate() {
        for (vi, v) in vertical.iter().enumerate() {
            let Some(pt) = intersect_lines(&h.line, &v.line) else {
                trace!(h = hi, v = vi, "skipping degenerate line pair");
                continue;
            };
            if !size.contains(pt) {
                continue;
            }
            let score = weights.parallel * (h.score + v.score)
                + weights.angle * angle_score(&h.line, &v.line)
                + weights.rank * rank_score(h, horizontal.len(), v, vertical.len());
            out.push(Intersection {
                pt,
                score,
                h: hi,
                v: vi,
            });
        }
    }
    out
}
