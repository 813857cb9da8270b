// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Split lines into horizontal-like and vertical-like document edges.

use std::f64::consts::{FRAC_PI_2, PI};

use eckwerk_core::{PolarLine, loop_diff};

/// Lines grouped by orientation, each set in detection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedLines {
    pub horizontal: Vec<PolarLine>,
    pub vertical: Vec<PolarLine>,
}

/// A horizontal edge has its normal close to the y axis (theta near π/2).
pub fn is_horizontal(line: &PolarLine, max_tilt: f64) -> bool {
    loop_diff(line.theta, FRAC_PI_2, 0.0, PI) < max_tilt
}

/// A vertical edge has its normal close to the x axis (theta near 0 or π).
pub fn is_vertical(line: &PolarLine, max_tilt: f64) -> bool {
    loop_diff(line.theta, 0.0, 0.0, PI) < max_tilt
}

/// Classify `lines` by tilt, keeping at most `per_orientation` of each kind.
///
/// Lines tilted too far from both axes are dropped.
pub fn classify_lines(lines: &[PolarLine], max_tilt: f64, per_orientation: usize) -> ClassifiedLines {
    let mut out = ClassifiedLines::default();
    for line in lines {
        if is_horizontal(line, max_tilt) {
            if out.horizontal.len() < per_orientation {
                out.horizontal.push(*line);
            }
        } else if is_vertical(line, max_tilt) && out.vertical.len() < per_orientation {
            out.vertical.push(*line);
        }
    }
    out
}
