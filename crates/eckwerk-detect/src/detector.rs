// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner detector, the public entry point.
//
// Raster work (grayscale, downsample, edge map, line detection) goes through
// a `RasterOps` backend; everything after line detection is the pure
// `locate_corners` core, which works in detection-raster coordinates. The
// winning quad is mapped back to source-image coordinates at the end.

use std::time::Instant;

use eckwerk_core::error::Result;
use eckwerk_core::{Corners, DetectionFailure, DetectorConfig, ImageSize, PolarLine};
use image::DynamicImage;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::intersect::{Intersection, build_intersections};
use crate::lines::{ScoredLine, classify_lines, dedup_lines, score_lines};
use crate::mapping::CoordinateMapper;
use crate::quad::{CornerStrategy, ScoredCorners, SelectionInput};
use crate::raster::{ImageprocOps, RasterOps};

/// Intersections needed before the adjacency search is attempted.
const SEARCH_MIN_INTERSECTIONS: usize = 5;

/// Every intermediate of the line-level core, in detection-raster space.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerSearch {
    /// Deduplicated lines, strongest first.
    pub lines: Vec<PolarLine>,
    pub horizontal: Vec<ScoredLine>,
    pub vertical: Vec<ScoredLine>,
    pub intersections: Vec<Intersection>,
    pub outcome: std::result::Result<ScoredCorners, DetectionFailure>,
}

/// Choose document corners from vote-ordered `lines` detected on a raster of
/// `size`. No image is needed; this is the whole selection engine.
pub fn locate_corners(lines: &[PolarLine], size: ImageSize, config: &DetectorConfig) -> CornerSearch {
    let unique = dedup_lines(
        lines,
        config.rho_threshold * size.diagonal(),
        config.theta_threshold(),
        config.max_lines,
    );
    let classified = classify_lines(&unique, config.max_tilt(), config.max_lines_per_orientation);
    debug!(
        raw = lines.len(),
        unique = unique.len(),
        horizontal = classified.horizontal.len(),
        vertical = classified.vertical.len(),
        "lines classified"
    );

    if classified.horizontal.len() < 2 || classified.vertical.len() < 2 {
        let failure = DetectionFailure::InsufficientLines {
            horizontal: classified.horizontal.len(),
            vertical: classified.vertical.len(),
        };
        return CornerSearch {
            horizontal: score_lines(&classified.horizontal, &unique),
            vertical: score_lines(&classified.vertical, &unique),
            lines: unique,
            intersections: Vec::new(),
            outcome: Err(failure),
        };
    }

    let horizontal = score_lines(&classified.horizontal, &unique);
    let vertical = score_lines(&classified.vertical, &unique);
    let intersections = build_intersections(&horizontal, &vertical, size, &config.weights);
    debug!(intersections = intersections.len(), "intersections built");

    let input = SelectionInput {
        intersections: &intersections,
        horizontal_count: horizontal.len(),
        vertical_count: vertical.len(),
        size,
    };
    let outcome = if intersections.len() >= SEARCH_MIN_INTERSECTIONS {
        CornerStrategy::Adjacency
            .select(input, config)
            .or_else(|failure| {
                debug!(%failure, "adjacency search found nothing, trying nearest boundary");
                CornerStrategy::NearestBoundary.select(input, config)
            })
    } else {
        CornerStrategy::NearestBoundary.select(input, config)
    };

    CornerSearch {
        lines: unique,
        horizontal,
        vertical,
        intersections,
        outcome,
    }
}

/// Wall-clock time spent per stage, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StageTimings {
    pub raster_ms: f64,
    pub lines_ms: f64,
    pub selection_ms: f64,
}

/// Diagnostic record of one detection pass.
///
/// Lines and intersections are in detection-raster space; `selected` and
/// `corners` are in source-image space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionReport {
    pub source_size: ImageSize,
    pub raster_size: ImageSize,
    pub raw_line_count: usize,
    pub lines: Vec<PolarLine>,
    pub horizontal: Vec<ScoredLine>,
    pub vertical: Vec<ScoredLine>,
    pub intersections: Vec<Intersection>,
    pub selected: Option<ScoredCorners>,
    pub failure: Option<DetectionFailure>,
    pub timings: StageTimings,
}

impl DetectionReport {
    /// Detected corners in source-image space.
    pub fn corners(&self) -> Option<Corners> {
        self.selected.map(|s| s.corners)
    }

    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.source_size, self.raster_size)
    }

    fn empty(size: ImageSize) -> Self {
        Self {
            source_size: size,
            raster_size: size,
            raw_line_count: 0,
            lines: Vec::new(),
            horizontal: Vec::new(),
            vertical: Vec::new(),
            intersections: Vec::new(),
            selected: None,
            failure: Some(DetectionFailure::EmptyImage),
            timings: StageTimings::default(),
        }
    }
}

/// Locates the quadrilateral outline of a document in a photo.
///
/// Holds no per-call state; share one instance behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CornerDetector<R = ImageprocOps> {
    config: DetectorConfig,
    raster: R,
}

impl CornerDetector<ImageprocOps> {
    /// Detector with the default `imageproc` backend.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        let raster = ImageprocOps::new(&config);
        Self::with_raster(config, raster)
    }
}

impl<R: RasterOps> CornerDetector<R> {
    /// Detector with a custom raster backend.
    pub fn with_raster(config: DetectorConfig, raster: R) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, raster })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Best-guess document corners in source-image coordinates, or `None`
    /// when no plausible quadrilateral was found.
    pub fn detect(&self, image: &DynamicImage) -> Result<Option<Corners>> {
        Ok(self.detect_with_report(image)?.corners())
    }

    /// Like [`detect`](Self::detect) but falls back to the full-image
    /// rectangle, ready to seed crop handles.
    pub fn detect_or_full_image(&self, image: &DynamicImage) -> Result<Corners> {
        let size = ImageSize::new(image.width(), image.height());
        Ok(self
            .detect(image)?
            .unwrap_or_else(|| Corners::full_image(size)))
    }

    /// Run the full pipeline and keep every intermediate.
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn detect_with_report(&self, image: &DynamicImage) -> Result<DetectionReport> {
        let source = ImageSize::new(image.width(), image.height());
        if source.is_empty() {
            warn!("empty image, nothing to detect");
            return Ok(DetectionReport::empty(source));
        }

        let mapper = CoordinateMapper::for_target_area(source, self.config.target_area);
        let raster = mapper.raster_size();

        let started = Instant::now();
        let gray = self.raster.to_grayscale(image);
        let gray = if raster == source {
            gray
        } else {
            self.raster.resize(&gray, raster.width, raster.height)
        };
        let edges = self.raster.edge_map(&gray);
        let raster_ms = elapsed_ms(started);

        let started = Instant::now();
        let raw = self.raster.detect_lines(&edges);
        let lines_ms = elapsed_ms(started);
        debug!(
            raster_width = raster.width,
            raster_height = raster.height,
            lines = raw.len(),
            "raster stage complete"
        );

        let started = Instant::now();
        let search = locate_corners(&raw, raster, &self.config);
        let selection_ms = elapsed_ms(started);

        let (selected, failure) = match search.outcome {
            Ok(chosen) => {
                let mapped = ScoredCorners {
                    corners: mapper.corners_to_source(&chosen.corners),
                    ..chosen
                };
                info!(
                    strategy = ?mapped.strategy,
                    score = mapped.score,
                    assigned = mapped.assigned,
                    "document corners detected"
                );
                (Some(mapped), None)
            }
            Err(failure) => {
                warn!(%failure, "no document quadrilateral found");
                (None, Some(failure))
            }
        };

        Ok(DetectionReport {
            source_size: source,
            raster_size: raster,
            raw_line_count: raw.len(),
            lines: search.lines,
            horizontal: search.horizontal,
            vertical: search.vertical,
            intersections: search.intersections,
            selected,
            failure,
            timings: StageTimings {
                raster_ms,
                lines_ms,
                selection_ms,
            },
        })
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}
