// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Subcommand implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, ValueEnum};
use eckwerk_core::error::{EckwerkError, Result};
use eckwerk_core::{Corners, DetectionFailure, DetectorConfig, Turn};
use eckwerk_detect::worker::report_in_background;
use eckwerk_detect::{CornerDetector, ImageprocOps, overlay, rectify};
use image::DynamicImage;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Args)]
pub struct DetectCommand {
    /// Input image (JPEG, PNG, ...)
    image: PathBuf,

    /// Detector configuration file (JSON); defaults apply to missing fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the full detection report as JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// Write a debug overlay image
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Print the full-image rectangle instead of null when nothing is found
    #[arg(long)]
    full_image_fallback: bool,

    /// Relabel corners for a view turned by a quarter
    #[arg(long, value_enum)]
    turn: Option<TurnArg>,
}

#[derive(Args)]
pub struct RectifyCommand {
    /// Input image
    image: PathBuf,

    /// Where to write the rectified page
    #[arg(short, long)]
    output: PathBuf,

    /// Detector configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum TurnArg {
    Left,
    Right,
}

impl From<TurnArg> for Turn {
    fn from(arg: TurnArg) -> Self {
        match arg {
            TurnArg::Left => Turn::Left,
            TurnArg::Right => Turn::Right,
        }
    }
}

/// What `detect` prints on stdout.
#[derive(Serialize)]
struct DetectOutput {
    corners: Option<Corners>,
    failure: Option<DetectionFailure>,
}

impl DetectCommand {
    pub async fn execute(self) -> Result<()> {
        let detector = Arc::new(build_detector(self.config.as_deref())?);
        let image = open_image(&self.image)?;

        let report = report_in_background(Arc::clone(&detector), image.clone()).await?;

        if let Some(path) = &self.report {
            std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
            info!(path = %path.display(), "report written");
        }
        if let Some(path) = &self.overlay {
            save_image(&DynamicImage::ImageRgba8(overlay::render(&image, &report)), path)?;
            info!(path = %path.display(), "overlay written");
        }

        let mut corners = report.corners();
        if corners.is_none() && self.full_image_fallback {
            corners = Some(Corners::full_image(report.source_size));
        }
        if let Some(turn) = self.turn {
            corners = corners.map(|c| c.turned(turn.into()));
        }

        let output = DetectOutput {
            corners,
            failure: report.failure,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

impl RectifyCommand {
    pub async fn execute(self) -> Result<()> {
        let detector = Arc::new(build_detector(self.config.as_deref())?);
        let image = open_image(&self.image)?;

        let report = report_in_background(detector, image.clone()).await?;
        let corners = match report.corners() {
            Some(c) => c,
            None => {
                warn!("no document found, rectifying the full image");
                Corners::full_image(report.source_size)
            }
        };

        let page = rectify::rectify(&image, &corners)?;
        save_image(&DynamicImage::ImageRgba8(page), &self.output)?;
        info!(path = %self.output.display(), "rectified page written");
        Ok(())
    }
}

pub fn print_default_config() -> Result<()> {
    println!("{}", DetectorConfig::default().to_json()?);
    Ok(())
}

fn build_detector(config: Option<&Path>) -> Result<CornerDetector<ImageprocOps>> {
    let config = match config {
        Some(path) => DetectorConfig::load(path)?,
        None => DetectorConfig::default(),
    };
    CornerDetector::new(config)
}

fn open_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|err| {
        EckwerkError::ImageError(format!("failed to open image {}: {}", path.display(), err))
    })
}

fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    // JPEG has no alpha channel.
    let image = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") => {
            DynamicImage::ImageRgb8(image.to_rgb8())
        }
        _ => image.clone(),
    };
    image.save(path).map_err(|err| {
        EckwerkError::ImageError(format!("failed to write image {}: {}", path.display(), err))
    })
}
