// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Eckwerk.
//
// Two layers: `EckwerkError` is returned for caller mistakes and I/O, while
// `DetectionFailure` explains why a well-formed image produced no corners.
// The latter is never fatal: the crop tool falls back to the full image.

use serde::Serialize;
use thiserror::Error;

/// Top-level error type for all Eckwerk operations.
#[derive(Debug, Error)]
pub enum EckwerkError {
    // -- Configuration --
    #[error("invalid detector configuration: {0}")]
    InvalidConfig(String),

    // -- Raster --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("invalid corners: {0}")]
    InvalidCorners(String),

    // -- Background execution --
    #[error("background detection task failed: {0}")]
    Worker(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, EckwerkError>;

/// Why a detection pass ended without a quadrilateral.
///
/// Every variant is recoverable: the caller seeds the crop handles with the
/// full-image rectangle instead.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectionFailure {
    #[error("input image has no pixels")]
    EmptyImage,

    #[error("not enough usable lines ({horizontal} horizontal, {vertical} vertical)")]
    InsufficientLines { horizontal: usize, vertical: usize },

    #[error("only {found} corner(s) could be placed, {required} required")]
    TooFewIntersections { found: usize, required: usize },

    #[error("no candidate quadrilateral is large enough (best area fraction {best_area_fraction:.3})")]
    NoPlausibleQuadrilateral { best_area_fraction: f64 },
}
