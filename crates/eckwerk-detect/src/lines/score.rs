// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line and corner quality criteria.
//
// Every criterion maps into [0, 1]; weights are applied by the caller.

use std::f64::consts::{FRAC_PI_2, PI};

use eckwerk_core::{PolarLine, loop_diff};

use super::ScoredLine;

/// How well `line` is matched by its most parallel partner in `others`.
///
/// `(1 - Δθ/π)²` for the best partner; 0 when there is no other line.
pub fn parallel_score(line: &PolarLine, others: &[PolarLine]) -> f64 {
    others
        .iter()
        .filter(|other| *other != line)
        .map(|other| (1.0 - loop_diff(line.theta, other.theta, 0.0, PI) / PI).powi(2))
        .fold(0.0, f64::max)
}

/// Score every line of one orientation set against the full deduplicated set.
pub fn score_lines(set: &[PolarLine], all: &[PolarLine]) -> Vec<ScoredLine> {
    set.iter()
        .enumerate()
        .map(|(rank, line)| ScoredLine {
            line: *line,
            score: parallel_score(line, all),
            rank,
        })
        .collect()
}

/// Reward for corners built from early (high-vote) lines.
pub fn rank_score(h: &ScoredLine, h_count: usize, v: &ScoredLine, v_count: usize) -> f64 {
    let h_part = h.rank as f64 / h_count.max(1) as f64;
    let v_part = v.rank as f64 / v_count.max(1) as f64;
    1.0 - (h_part + v_part) / 2.0
}

/// 1 for a right-angle corner, falling linearly to 0 for parallel lines.
pub fn angle_score(h: &PolarLine, v: &PolarLine) -> f64 {
    let angle = loop_diff(v.theta, h.theta, 0.0, PI);
    (1.0 - 2.0 * loop_diff(angle, FRAC_PI_2, 0.0, PI) / PI).max(0.0)
}
