// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Nearest-boundary corner assignment.

use eckwerk_core::{Corners, ImageSize, Point};

use super::{CornerStrategy, ScoredCorners};
use crate::intersect::Intersection;

/// Pull each image corner onto its nearest intersection.
///
/// Corners are visited tl, tr, br, bl and every intersection is used at most
/// once. While there are at least as many intersections left as corners to
/// visit this is plain greedy assignment. With a shortfall, a corner only
/// takes its nearest intersection if no later corner is closer to it, so a
/// lone point near the bottom-right is not stolen by the top-right. Corners
/// left without an intersection stay on the image boundary.
pub fn nearest_boundary(intersections: &[Intersection], size: ImageSize) -> ScoredCorners {
    let boundary = Corners::full_image(size).to_array();
    let mut chosen = boundary;
    let mut remaining: Vec<&Intersection> = intersections.iter().collect();
    let mut score = 0.0;
    let mut assigned = 0;

    for (slot, corner) in boundary.iter().enumerate() {
        let Some(pos) = nearest(&remaining, corner) else {
            break;
        };
        let candidate = remaining[pos];
        let corners_left = boundary.len() - slot;

        let take = remaining.len() >= corners_left || {
            let closest_corner = (slot..boundary.len())
                .min_by(|a, b| {
                    boundary[*a]
                        .distance(&candidate.pt)
                        .total_cmp(&boundary[*b].distance(&candidate.pt))
                })
                .unwrap_or(slot);
            closest_corner == slot
        };

        if take {
            chosen[slot] = candidate.pt;
            score += candidate.score;
            assigned += 1;
            remaining.remove(pos);
        }
    }

    ScoredCorners {
        corners: Corners::from_array(chosen),
        score,
        strategy: CornerStrategy::NearestBoundary,
        assigned,
    }
}

/// Index of the intersection closest to `target`; the first one on ties.
fn nearest(candidates: &[&Intersection], target: &Point) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.pt.distance(target).total_cmp(&b.pt.distance(target)))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64, score: f64) -> Intersection {
        Intersection {
            pt: Point::new(x, y),
            score,
            h: 0,
            v: 0,
        }
    }

    #[test]
    fn four_points_map_to_four_corners() {
        let pts = [
            at(88.0, 12.0, 1.0),
            at(10.0, 10.0, 1.0),
            at(12.0, 85.0, 1.0),
            at(90.0, 90.0, 1.0),
        ];
        let chosen = nearest_boundary(&pts, ImageSize::new(100, 100));
        assert_eq!(chosen.assigned, 4);
        assert_eq!(chosen.corners.tl, Point::new(10.0, 10.0));
        assert_eq!(chosen.corners.tr, Point::new(88.0, 12.0));
        assert_eq!(chosen.corners.br, Point::new(90.0, 90.0));
        assert_eq!(chosen.corners.bl, Point::new(12.0, 85.0));
        assert_eq!(chosen.score, 4.0);
    }

    #[test]
    fn each_intersection_is_used_once() {
        // Everything clusters near the top-left.
        let pts = [
            at(5.0, 5.0, 1.0),
            at(6.0, 5.0, 1.0),
            at(5.0, 6.0, 1.0),
            at(7.0, 7.0, 1.0),
        ];
        let chosen = nearest_boundary(&pts, ImageSize::new(100, 100));
        let corners = chosen.corners.to_array();
        for (i, a) in corners.iter().enumerate() {
            for b in &corners[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(chosen.assigned, 4);
    }

    /// Two intersections near opposite image corners: those two corners are
    /// assigned, the other two stay on the boundary, and only the assigned
    /// pair counts towards the score.
    #[test]
    fn partial_assignment_keeps_boundary_corners() {
        let pts = [at(10.0, 10.0, 1.5), at(190.0, 90.0, 2.0)];
        let chosen = nearest_boundary(&pts, ImageSize::new(200, 100));
        assert_eq!(chosen.assigned, 2);
        assert_eq!(chosen.corners.tl, Point::new(10.0, 10.0));
        assert_eq!(chosen.corners.tr, Point::new(200.0, 0.0));
        assert_eq!(chosen.corners.br, Point::new(190.0, 90.0));
        assert_eq!(chosen.corners.bl, Point::new(0.0, 100.0));
        assert_eq!(chosen.score, 3.5);
    }

    #[test]
    fn no_intersections_leaves_the_full_image() {
        let size = ImageSize::new(64, 48);
        let chosen = nearest_boundary(&[], size);
        assert_eq!(chosen.assigned, 0);
        assert_eq!(chosen.corners, Corners::full_image(size));
        assert_eq!(chosen.score, 0.0);
    }
}
