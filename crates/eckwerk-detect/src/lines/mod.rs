// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line-level stages: duplicate suppression, orientation split, scoring.

pub mod classify;
pub mod dedup;
pub mod score;

use eckwerk_core::PolarLine;
use serde::Serialize;

pub use classify::{ClassifiedLines, classify_lines};
pub use dedup::dedup_lines;
pub use score::score_lines;

/// A deduplicated line with its quality score and its position in the
/// orientation set it belongs to (0 = strongest detection).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredLine {
    pub line: PolarLine,
    pub score: f64,
    pub rank: usize,
}
