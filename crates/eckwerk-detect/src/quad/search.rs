// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared-line adjacency search over candidate quadrilaterals.

use eckwerk_core::{Corners, DetectorConfig};
use tracing::warn;

use super::{CornerStrategy, ScoredCorners, SelectionInput};
use crate::intersect::Intersection;

/// Result of one enumeration pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub best: Option<ScoredCorners>,
    /// Candidates whose four corners were all found.
    pub examined: usize,
    /// Largest area fraction seen, accepted or not.
    pub best_area_fraction: f64,
    /// Enumeration stopped at `max_quadrilaterals`.
    pub capped: bool,
}

/// Dense `(h, v) -> intersection` table.
struct CornerTable {
    slots: Vec<Option<usize>>,
    vertical_count: usize,
}

impl CornerTable {
    fn new(intersections: &[Intersection], horizontal_count: usize, vertical_count: usize) -> Self {
        let mut slots = vec![None; horizontal_count * vertical_count];
        for (i, p) in intersections.iter().enumerate() {
            if p.h < horizontal_count && p.v < vertical_count {
                slots[p.h * vertical_count + p.v] = Some(i);
            }
        }
        Self {
            slots,
            vertical_count,
        }
    }

    fn get(&self, h: usize, v: usize) -> Option<usize> {
        self.slots.get(h * self.vertical_count + v).copied().flatten()
    }
}

/// Enumerate `tl → (tr, bl) → br` where `tl`/`tr` share a horizontal line,
/// `tl`/`bl` share a vertical line, and `br` closes both. The highest
/// scoring quad whose area fraction reaches `min_area_fraction` wins; on a
/// tie the first one found is kept.
pub fn search_quadrilaterals(input: SelectionInput<'_>, config: &DetectorConfig) -> SearchOutcome {
    let pts = input.intersections;
    let table = CornerTable::new(pts, input.horizontal_count, input.vertical_count);
    let image_area = input.size.area();

    let mut outcome = SearchOutcome {
        best: None,
        examined: 0,
        best_area_fraction: 0.0,
        capped: false,
    };

    'search: for tl in pts {
        for tr in pts.iter().filter(|p| p.h == tl.h && p.pt.x > tl.pt.x) {
            for bl in pts.iter().filter(|p| p.v == tl.v && p.pt.y > tl.pt.y) {
                let Some(br) = table.get(bl.h, tr.v).map(|i| &pts[i]) else {
                    continue;
                };
                if br.pt.x <= bl.pt.x || br.pt.y <= tr.pt.y {
                    continue;
                }

                if outcome.examined == config.max_quadrilaterals {
                    warn!(
                        cap = config.max_quadrilaterals,
                        "quadrilateral enumeration cap reached"
                    );
                    outcome.capped = true;
                    break 'search;
                }
                outcome.examined += 1;

                let corners = Corners::new(tl.pt, tr.pt, br.pt, bl.pt);
                let fraction = corners.area() / image_area;
                outcome.best_area_fraction = outcome.best_area_fraction.max(fraction);
                if fraction < config.min_area_fraction {
                    continue;
                }

                let score = tl.score
                    + tr.score
                    + br.score
                    + bl.score
                    + config.weights.area * fraction;
                if outcome.best.is_none_or(|best| score > best.score) {
                    outcome.best = Some(ScoredCorners {
                        corners,
                        score,
                        strategy: CornerStrategy::Adjacency,
                        assigned: 4,
                    });
                }
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use eckwerk_core::{ImageSize, Point};

    use super::*;

    /// Intersections of a regular grid of lines, `xs` vertical and `ys`
    /// horizontal, every point scoring `score`.
    fn grid(xs: &[f64], ys: &[f64], score: f64) -> Vec<Intersection> {
        let mut out = Vec::new();
        for (h, y) in ys.iter().enumerate() {
            for (v, x) in xs.iter().enumerate() {
                out.push(Intersection {
                    pt: Point::new(*x, *y),
                    score,
                    h,
                    v,
                });
            }
        }
        out
    }

    fn input(pts: &[Intersection], h: usize, v: usize) -> SelectionInput<'_> {
        SelectionInput {
            intersections: pts,
            horizontal_count: h,
            vertical_count: v,
            size: ImageSize::new(100, 100),
        }
    }

    #[test]
    fn picks_the_largest_quad_when_scores_are_equal() {
        let pts = grid(&[10.0, 50.0, 90.0], &[10.0, 90.0], 1.0);
        let outcome = search_quadrilaterals(input(&pts, 2, 3), &DetectorConfig::default());
        let best = outcome.best.expect("a quad should be found");
        assert_eq!(best.corners.tl, Point::new(10.0, 10.0));
        assert_eq!(best.corners.tr, Point::new(90.0, 10.0));
        assert_eq!(best.corners.br, Point::new(90.0, 90.0));
        assert_eq!(best.corners.bl, Point::new(10.0, 90.0));
        assert_eq!(best.strategy, CornerStrategy::Adjacency);
        // Three quads: tl at (10,10) with tr at 50 or 90, and tl at (50,10).
        assert_eq!(outcome.examined, 3);
    }

    /// Corner quality can outweigh a larger area.
    #[test]
    fn strong_corners_beat_area() {
        let mut pts = grid(&[10.0, 50.0, 90.0], &[10.0, 90.0], 1.0);
        for p in pts.iter_mut().filter(|p| p.v == 2) {
            p.score = 0.1;
        }
        let best = search_quadrilaterals(input(&pts, 2, 3), &DetectorConfig::default())
            .best
            .expect("a quad should be found");
        assert_eq!(best.corners.tr, Point::new(50.0, 10.0));
        assert!((best.score - (4.0 + 0.32)).abs() < 1e-9);
    }

    #[test]
    fn never_returns_a_quad_below_min_area() {
        let pts = grid(&[10.0, 30.0, 35.0], &[10.0, 30.0], 1.0);
        let outcome = search_quadrilaterals(input(&pts, 2, 3), &DetectorConfig::default());
        assert!(outcome.best.is_none());
        assert!((outcome.best_area_fraction - 0.05).abs() < 1e-9);

        let config = DetectorConfig {
            min_area_fraction: 0.5,
            ..DetectorConfig::default()
        };
        let pts = grid(&[5.0, 40.0, 95.0], &[5.0, 60.0, 95.0], 1.0);
        let outcome = search_quadrilaterals(input(&pts, 3, 3), &config);
        let best = outcome.best.expect("the full quad qualifies");
        assert!(best.corners.area() / 10_000.0 >= 0.5);
    }

    #[test]
    fn ties_keep_the_first_candidate() {
        let pts = grid(&[0.0, 45.0, 50.0, 95.0], &[10.0, 90.0], 1.0);
        let mut config = DetectorConfig {
            min_area_fraction: 0.0,
            ..DetectorConfig::default()
        };
        // Without the area term every quad scores exactly 4.
        config.weights.area = 0.0;
        let best = search_quadrilaterals(input(&pts, 2, 4), &config)
            .best
            .expect("found");
        assert_eq!(best.corners.tl, Point::new(0.0, 10.0));
        assert_eq!(best.corners.tr, Point::new(45.0, 10.0));
        assert_eq!(best.score, 4.0);
    }

    #[test]
    fn enumeration_stops_at_the_cap() {
        let xs: Vec<f64> = (0..8).map(|i| 5.0 + i as f64 * 12.0).collect();
        let ys: Vec<f64> = (0..8).map(|i| 5.0 + i as f64 * 12.0).collect();
        let pts = grid(&xs, &ys, 1.0);
        let config = DetectorConfig {
            max_quadrilaterals: 10,
            min_area_fraction: 0.0,
            ..DetectorConfig::default()
        };
        let outcome = search_quadrilaterals(input(&pts, 8, 8), &config);
        assert!(outcome.capped);
        assert_eq!(outcome.examined, 10);
        assert!(outcome.best.is_some());
    }

    #[test]
    fn missing_bottom_right_breaks_the_quad() {
        let mut pts = grid(&[10.0, 90.0], &[10.0, 90.0], 1.0);
        pts.retain(|p| !(p.h == 1 && p.v == 1));
        let outcome = search_quadrilaterals(input(&pts, 2, 2), &DetectorConfig::default());
        assert_eq!(outcome.examined, 0);
        assert!(outcome.best.is_none());
    }
}
