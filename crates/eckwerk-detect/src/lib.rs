// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// eckwerk-detect: Document corner detection. Turns Hough lines into the four crop
// handles of a photographed page.

pub mod detector;
pub mod intersect;
pub mod lines;
pub mod mapping;
pub mod overlay;
pub mod quad;
pub mod raster;
pub mod rectify;
pub mod worker;

pub use detector::{CornerDetector, CornerSearch, DetectionReport, locate_corners};
pub use quad::{CornerStrategy, ScoredCorners};
pub use raster::{ImageprocOps, RasterOps};
