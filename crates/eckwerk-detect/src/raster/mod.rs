// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster collaborators consumed by the corner detector.

pub mod edges;
pub mod hough;

use eckwerk_core::config::{EdgeConfig, HoughConfig};
use eckwerk_core::{DetectorConfig, PolarLine};
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage};

/// Image operations the detector needs but does not implement itself.
///
/// The corner engine only ever sees the grayscale raster dimensions and the
/// lines returned by `detect_lines`, so any backend producing a binary edge
/// map and vote-ordered polar lines can be plugged in.
pub trait RasterOps: Send + Sync {
    fn to_grayscale(&self, image: &DynamicImage) -> GrayImage;

    fn resize(&self, image: &GrayImage, width: u32, height: u32) -> GrayImage;

    /// Binary edge raster of the same size as `image`.
    fn edge_map(&self, image: &GrayImage) -> GrayImage;

    /// Straight lines in `edges`, strongest first.
    fn detect_lines(&self, edges: &GrayImage) -> Vec<PolarLine>;
}

/// Default backend built on `image` and `imageproc`.
#[derive(Debug, Clone, Default)]
pub struct ImageprocOps {
    edges: EdgeConfig,
    hough: HoughConfig,
}

impl ImageprocOps {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            edges: config.edges.clone(),
            hough: config.hough.clone(),
        }
    }
}

impl RasterOps for ImageprocOps {
    fn to_grayscale(&self, image: &DynamicImage) -> GrayImage {
        image.to_luma8()
    }

    fn resize(&self, image: &GrayImage, width: u32, height: u32) -> GrayImage {
        image::imageops::resize(image, width, height, FilterType::Triangle)
    }

    fn edge_map(&self, image: &GrayImage) -> GrayImage {
        edges::edge_map(image, &self.edges)
    }

    fn detect_lines(&self, edges: &GrayImage) -> Vec<PolarLine> {
        hough::hough_lines(edges, &self.hough)
            .into_iter()
            .map(|peak| peak.line)
            .collect()
    }
}
