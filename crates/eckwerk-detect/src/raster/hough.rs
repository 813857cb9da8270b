// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Hough voting accumulator for straight lines in a binary edge map.
//
// `imageproc::hough::detect_lines` does not expose vote counts, and the
// corner engine ranks lines by detection strength, so peaks are extracted
// here and returned strongest first.

use std::f64::consts::PI;

use eckwerk_core::PolarLine;
use eckwerk_core::config::HoughConfig;
use image::GrayImage;

/// An accumulator peak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoughPeak {
    pub line: PolarLine,
    pub votes: u32,
}

/// Vote every non-zero pixel of `edges` into `(rho, theta)` bins and return
/// the local maxima above `config.vote_threshold`, ordered by votes.
///
/// Rho bins are one pixel wide. A bin is a peak when none of its eight
/// neighbours has more votes; plateaus yield several adjacent peaks, which
/// duplicate suppression downstream collapses.
pub fn hough_lines(edges: &GrayImage, config: &HoughConfig) -> Vec<HoughPeak> {
    let (width, height) = edges.dimensions();
    let theta_steps = config.theta_steps.max(1) as usize;
    let max_rho = (width as f64).hypot(height as f64).ceil() as i64;
    let rho_bins = (2 * max_rho + 1) as usize;

    let trig: Vec<(f64, f64)> = (0..theta_steps)
        .map(|t| (t as f64 * PI / theta_steps as f64).sin_cos())
        .collect();

    // Laid out theta-major: `acc[t * rho_bins + r]`.
    let mut acc = vec![0u32; theta_steps * rho_bins];
    for (x, y, pixel) in edges.enumerate_pixels() {
        if pixel.0[0] == 0 {
            continue;
        }
        let (fx, fy) = (x as f64, y as f64);
        for (t, (sin, cos)) in trig.iter().enumerate() {
            let rho = (fx * cos + fy * sin).round() as i64 + max_rho;
            acc[t * rho_bins + rho as usize] += 1;
        }
    }

    let at = |t: i64, r: i64| -> u32 {
        if t < 0 || r < 0 || t >= theta_steps as i64 || r >= rho_bins as i64 {
            0
        } else {
            acc[t as usize * rho_bins + r as usize]
        }
    };

    let mut peaks = Vec::new();
    for t in 0..theta_steps as i64 {
        for r in 0..rho_bins as i64 {
            let votes = at(t, r);
            if votes < config.vote_threshold.max(1) {
                continue;
            }
            let dominated = (-1..=1)
                .flat_map(|dt| (-1..=1).map(move |dr| (dt, dr)))
                .filter(|&(dt, dr)| dt != 0 || dr != 0)
                .any(|(dt, dr)| at(t + dt, r + dr) > votes);
            if !dominated {
                peaks.push(HoughPeak {
                    line: PolarLine::new(
                        (r - max_rho) as f64,
                        t as f64 * PI / theta_steps as f64,
                    ),
                    votes,
                });
            }
        }
    }

    // Stable: equal votes keep accumulator order.
    peaks.sort_by(|a, b| b.votes.cmp(&a.votes));
    peaks
}
