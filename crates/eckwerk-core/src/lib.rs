// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// eckwerk-core: Core types, configuration and errors shared across all crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::DetectorConfig;
pub use error::{DetectionFailure, EckwerkError};
pub use types::*;
