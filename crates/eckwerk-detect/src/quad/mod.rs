// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quadrilateral selection: pick four intersections as document corners.
//
// Two strategies share one entry point. `Adjacency` enumerates corner sets
// whose neighbours share a detected line; `NearestBoundary` snaps each image
// corner to the closest intersection and is used when there are too few
// candidates to search, or the search finds nothing.

pub mod fallback;
pub mod search;

use eckwerk_core::{Corners, DetectionFailure, DetectorConfig, ImageSize};
use serde::Serialize;
use tracing::debug;

use crate::intersect::Intersection;

/// How a set of corners was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerStrategy {
    Adjacency,
    NearestBoundary,
}

/// A chosen quadrilateral with its aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredCorners {
    pub corners: Corners,
    pub score: f64,
    pub strategy: CornerStrategy,
    /// Corners taken from real intersections; the rest sit on the image
    /// boundary. Always 4 for `Adjacency`.
    pub assigned: usize,
}

/// Geometry shared by both strategies.
#[derive(Debug, Clone, Copy)]
pub struct SelectionInput<'a> {
    pub intersections: &'a [Intersection],
    pub horizontal_count: usize,
    pub vertical_count: usize,
    pub size: ImageSize,
}

impl CornerStrategy {
    /// Run the strategy and apply its acceptance policy.
    pub fn select(
        self,
        input: SelectionInput<'_>,
        config: &DetectorConfig,
    ) -> Result<ScoredCorners, DetectionFailure> {
        match self {
            Self::Adjacency => {
                let outcome = search::search_quadrilaterals(input, config);
                debug!(
                    examined = outcome.examined,
                    capped = outcome.capped,
                    found = outcome.best.is_some(),
                    "adjacency search finished"
                );
                outcome.best.ok_or(DetectionFailure::NoPlausibleQuadrilateral {
                    best_area_fraction: outcome.best_area_fraction,
                })
            }
            Self::NearestBoundary => {
                let chosen = fallback::nearest_boundary(input.intersections, input.size);
                if chosen.assigned < config.min_fallback_corners {
                    return Err(DetectionFailure::TooFewIntersections {
                        found: chosen.assigned,
                        required: config.min_fallback_corners,
                    });
                }
                let fraction = chosen.corners.area() / input.size.area();
                if fraction < config.min_area_fraction {
                    return Err(DetectionFailure::NoPlausibleQuadrilateral {
                        best_area_fraction: fraction,
                    });
                }
                Ok(chosen)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use eckwerk_core::Point;

    use super::*;

    fn at(x: f64, y: f64, h: usize, v: usize) -> Intersection {
        Intersection {
            pt: Point::new(x, y),
            score: 1.0,
            h,
            v,
        }
    }

    /// Exactly four corners enclosing too little of the image.
    #[test]
    fn small_fallback_quad_is_rejected() {
        let pts = [
            at(40.0, 40.0, 0, 0),
            at(60.0, 40.0, 0, 1),
            at(40.0, 60.0, 1, 0),
            at(60.0, 60.0, 1, 1),
        ];
        let input = SelectionInput {
            intersections: &pts,
            horizontal_count: 2,
            vertical_count: 2,
            size: ImageSize::new(100, 100),
        };
        let err = CornerStrategy::NearestBoundary
            .select(input, &DetectorConfig::default())
            .expect_err("quad covers 4% of the image");
        assert!(matches!(
            err,
            DetectionFailure::NoPlausibleQuadrilateral { best_area_fraction } if (best_area_fraction - 0.04).abs() < 1e-9
        ));
    }

    #[test]
    fn partial_fallback_needs_enough_corners() {
        let pts = [at(5.0, 5.0, 0, 0), at(95.0, 95.0, 1, 1)];
        let input = SelectionInput {
            intersections: &pts,
            horizontal_count: 2,
            vertical_count: 2,
            size: ImageSize::new(100, 100),
        };
        let err = CornerStrategy::NearestBoundary
            .select(input, &DetectorConfig::default())
            .expect_err("only two corners assigned");
        assert_eq!(
            err,
            DetectionFailure::TooFewIntersections {
                found: 2,
                required: 4
            }
        );

        let lenient = DetectorConfig {
            min_fallback_corners: 2,
            ..DetectorConfig::default()
        };
        let chosen = CornerStrategy::NearestBoundary
            .select(input, &lenient)
            .expect("two corners are enough");
        assert_eq!(chosen.assigned, 2);
        assert_eq!(chosen.strategy, CornerStrategy::NearestBoundary);
    }
}
