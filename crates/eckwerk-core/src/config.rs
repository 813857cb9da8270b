// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detector configuration.
//
// Every tunable of the corner pipeline lives here so a single value can be
// passed into the detector, persisted as JSON, and tweaked per device.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EckwerkError, Result};

/// Settings for one detection pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Pixel count of the downsampled detection raster.
    pub target_area: u32,
    /// Duplicate-line rho tolerance as a fraction of the raster diagonal.
    pub rho_threshold: f64,
    /// Duplicate-line angle tolerance in degrees.
    pub theta_threshold_deg: f64,
    /// Maximum deviation from horizontal/vertical in degrees.
    pub max_tilt_deg: f64,
    /// Number of deduplicated lines kept overall.
    pub max_lines: usize,
    /// Number of lines kept in each orientation set.
    pub max_lines_per_orientation: usize,
    /// Smallest quad area, as a fraction of the raster, accepted as a document.
    pub min_area_fraction: f64,
    /// Upper bound on enumerated candidate quadrilaterals.
    pub max_quadrilaterals: usize,
    /// Corners the fallback must place from real intersections.
    pub min_fallback_corners: usize,
    pub weights: ScoreWeights,
    pub edges: EdgeConfig,
    pub hough: HoughConfig,
}

/// Relative weight of each scoring criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub parallel: f64,
    pub rank: f64,
    pub angle: f64,
    pub area: f64,
}

/// How the grayscale raster is turned into an edge map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeConfig {
    pub mode: EdgeMode,
    pub canny_low: f32,
    pub canny_high: f32,
}

/// Pre-filter applied before Canny.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EdgeMode {
    /// Local-mean binarisation followed by erosion. Robust against uneven
    /// lighting and paper texture.
    AdaptiveThreshold {
        block_radius: u32,
        offset: i16,
        erode_radius: u8,
    },
    /// Plain Gaussian smoothing.
    GaussianBlur { sigma: f32 },
}

/// Hough accumulator parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughConfig {
    /// Angular bins over `[0, π)`.
    pub theta_steps: u32,
    /// Minimum votes for a peak to count as a line.
    pub vote_threshold: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            target_area: 100_000,
            rho_threshold: 0.05,
            theta_threshold_deg: 4.0,
            max_tilt_deg: 35.0,
            max_lines: 8,
            max_lines_per_orientation: 4,
            min_area_fraction: 0.2,
            max_quadrilaterals: 4096,
            min_fallback_corners: 4,
            weights: ScoreWeights::default(),
            edges: EdgeConfig::default(),
            hough: HoughConfig::default(),
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            parallel: 1.0,
            rank: 0.5,
            angle: 1.0,
            area: 1.0,
        }
    }
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            mode: EdgeMode::default(),
            canny_low: 20.0,
            canny_high: 160.0,
        }
    }
}

impl Default for EdgeMode {
    fn default() -> Self {
        Self::AdaptiveThreshold {
            block_radius: 7,
            offset: 0,
            erode_radius: 2,
        }
    }
}

impl Default for HoughConfig {
    fn default() -> Self {
        Self {
            theta_steps: 360,
            vote_threshold: 50,
        }
    }
}

impl DetectorConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        debug!(path = %path.display(), "detector config loaded");
        Ok(config)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn theta_threshold(&self) -> f64 {
        self.theta_threshold_deg.to_radians()
    }

    pub fn max_tilt(&self) -> f64 {
        self.max_tilt_deg.to_radians()
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        fn invalid(msg: impl Into<String>) -> Result<()> {
            Err(EckwerkError::InvalidConfig(msg.into()))
        }

        if self.target_area == 0 {
            return invalid("target_area must be positive");
        }
        if !(self.rho_threshold.is_finite() && self.rho_threshold >= 0.0) {
            return invalid("rho_threshold must be a non-negative number");
        }
        if !(self.theta_threshold_deg.is_finite() && self.theta_threshold_deg >= 0.0) {
            return invalid("theta_threshold_deg must be a non-negative number");
        }
        if !(self.max_tilt_deg > 0.0 && self.max_tilt_deg <= 45.0) {
            return invalid(format!(
                "max_tilt_deg must be in (0, 45], got {}",
                self.max_tilt_deg
            ));
        }
        if self.max_lines == 0 || self.max_lines_per_orientation == 0 {
            return invalid("line caps must be positive");
        }
        if !(0.0..=1.0).contains(&self.min_area_fraction) {
            return invalid(format!(
                "min_area_fraction must be in [0, 1], got {}",
                self.min_area_fraction
            ));
        }
        if self.max_quadrilaterals == 0 {
            return invalid("max_quadrilaterals must be positive");
        }
        if !(1..=4).contains(&self.min_fallback_corners) {
            return invalid("min_fallback_corners must be between 1 and 4");
        }
        let w = &self.weights;
        if [w.parallel, w.rank, w.angle, w.area]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return invalid("score weights must be non-negative numbers");
        }
        let (low, high) = (self.edges.canny_low, self.edges.canny_high);
        // Hysteresis walks past the raster border when the low threshold is zero.
        if !(low.is_finite() && low > 0.0) {
            return invalid(format!("canny_low must be a positive number, got {low}"));
        }
        if !high.is_finite() {
            return invalid("canny_high must be a finite number");
        }
        if high < low {
            return invalid("canny_high must not be below canny_low");
        }
        match self.edges.mode {
            EdgeMode::AdaptiveThreshold { block_radius, .. } if block_radius == 0 => {
                return invalid("adaptive threshold block_radius must be positive");
            }
            EdgeMode::GaussianBlur { sigma } if sigma.is_nan() || sigma <= 0.0 => {
                return invalid("gaussian sigma must be positive");
            }
            _ => {}
        }
        if self.hough.theta_steps == 0 {
            return invalid("hough.theta_steps must be positive");
        }
        Ok(())
    }
}
