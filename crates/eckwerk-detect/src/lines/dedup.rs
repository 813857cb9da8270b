// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Near-duplicate line suppression.

use std::f64::consts::{FRAC_PI_2, PI};

use eckwerk_core::{PolarLine, loop_diff};

/// Keep the first of every group of near-identical lines.
///
/// `lines` must be ordered strongest first; the output preserves that order
/// and holds at most `max_lines` entries. A line is a duplicate of an
/// accepted one when both its rho gap is below `rho_tolerance` and its angle
/// gap is below `theta_tolerance` (radians).
pub fn dedup_lines(
    lines: &[PolarLine],
    rho_tolerance: f64,
    theta_tolerance: f64,
    max_lines: usize,
) -> Vec<PolarLine> {
    let mut unique: Vec<PolarLine> = Vec::with_capacity(max_lines.min(lines.len()));
    for line in lines {
        if unique.len() >= max_lines {
            break;
        }
        let duplicate = unique.iter().any(|kept| {
            rho_gap(kept, line) < rho_tolerance
                && loop_diff(kept.theta, line.theta, 0.0, PI) < theta_tolerance
        });
        if !duplicate {
            unique.push(*line);
        }
    }
    unique
}

/// Rho distance between two lines whose angles may sit on opposite ends of
/// `[0, π)`. Across the wrap the same line has the opposite rho sign.
fn rho_gap(a: &PolarLine, b: &PolarLine) -> f64 {
    if (a.theta - b.theta).abs() > FRAC_PI_2 {
        (a.rho + b.rho).abs()
    } else {
        (a.rho - b.rho).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deg(d: f64) -> f64 {
        d.to_radians()
    }

    #[test]
    fn drops_lines_close_in_rho_and_theta() {
        let lines = [
            PolarLine::new(100.0, deg(90.0)),
            PolarLine::new(103.0, deg(91.0)),
            PolarLine::new(100.0, deg(0.0)),
            PolarLine::new(250.0, deg(90.0)),
        ];
        let unique = dedup_lines(&lines, 10.0, deg(4.0), 8);
        assert_eq!(unique, vec![lines[0], lines[2], lines[3]]);
    }

    /// Same rho but a different angle is not a duplicate, nor is the converse.
    #[test]
    fn both_conditions_are_required() {
        let lines = [
            PolarLine::new(100.0, deg(90.0)),
            PolarLine::new(100.0, deg(100.0)),
            PolarLine::new(150.0, deg(90.0)),
        ];
        assert_eq!(dedup_lines(&lines, 10.0, deg(4.0), 8).len(), 3);
    }

    #[test]
    fn matches_across_the_angle_wrap() {
        // Nearly vertical lines at x ≈ 50, one just above 0 and one just below π.
        let a = PolarLine::new(50.0, deg(1.0));
        let b = PolarLine::new(-50.0, deg(179.0));
        assert_eq!(dedup_lines(&[a, b], 5.0, deg(4.0), 8), vec![a]);
    }

    #[test]
    fn respects_cap_and_order() {
        let lines: Vec<PolarLine> = (0..20)
            .map(|i| PolarLine::new(i as f64 * 40.0, deg(90.0)))
            .collect();
        let unique = dedup_lines(&lines, 10.0, deg(4.0), 8);
        assert_eq!(unique.len(), 8);
        assert_eq!(unique[..], lines[..8]);
    }

    #[test]
    fn dedup_is_idempotent() {
        let lines = [
            PolarLine::new(10.0, deg(2.0)),
            PolarLine::new(12.0, deg(3.0)),
            PolarLine::new(200.0, deg(88.0)),
            PolarLine::new(201.0, deg(90.0)),
            PolarLine::new(90.0, deg(45.0)),
            PolarLine::new(-30.0, deg(178.0)),
        ];
        let once = dedup_lines(&lines, 8.0, deg(4.0), 8);
        let twice = dedup_lines(&once, 8.0, deg(4.0), 8);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input() {
        assert!(dedup_lines(&[], 10.0, 0.1, 8).is_empty());
    }
}
