// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Off-thread detection so a UI or async service never blocks on raster work.

use std::sync::Arc;

use eckwerk_core::Corners;
use eckwerk_core::error::{EckwerkError, Result};
use image::DynamicImage;
use tracing::debug;

use crate::detector::{CornerDetector, DetectionReport};
use crate::raster::RasterOps;

/// Run [`CornerDetector::detect`] on tokio's blocking pool and await the
/// single result.
pub async fn detect_in_background<R>(
    detector: Arc<CornerDetector<R>>,
    image: DynamicImage,
) -> Result<Option<Corners>>
where
    R: RasterOps + 'static,
{
    Ok(report_in_background(detector, image).await?.corners())
}

/// Background variant of [`CornerDetector::detect_with_report`].
pub async fn report_in_background<R>(
    detector: Arc<CornerDetector<R>>,
    image: DynamicImage,
) -> Result<DetectionReport>
where
    R: RasterOps + 'static,
{
    debug!(width = image.width(), height = image.height(), "dispatching detection");
    tokio::task::spawn_blocking(move || detector.detect_with_report(&image))
        .await
        .map_err(|e| EckwerkError::Worker(format!("detection task join error: {e}")))?
}

#[cfg(test)]
mod tests {
    use eckwerk_core::DetectorConfig;
    use image::{GrayImage, Luma};

    use super::*;

    #[tokio::test]
    async fn background_detection_matches_inline() {
        let detector = Arc::new(CornerDetector::new(DetectorConfig::default()).expect("detector"));
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(64, 48, Luma([90u8])));

        let inline = detector.detect(&image).expect("inline");
        let background = detect_in_background(Arc::clone(&detector), image)
            .await
            .expect("background");
        assert_eq!(inline, background);
    }

    #[tokio::test]
    async fn one_detector_serves_concurrent_calls() {
        let detector = Arc::new(CornerDetector::new(DetectorConfig::default()).expect("detector"));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let image =
                    DynamicImage::ImageLuma8(GrayImage::from_pixel(32 + i, 32, Luma([10u8])));
                tokio::spawn(report_in_background(Arc::clone(&detector), image))
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let report = handle.await.expect("join").expect("report");
            assert_eq!(report.source_size.width, 32 + i as u32);
        }
    }
}
