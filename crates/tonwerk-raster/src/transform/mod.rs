// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transform engine — point-wise tonal operations, histogram operations, and
// the box blur. Every transform rewrites the working raster in place and
// leaves the original untouched.

pub mod blur;
pub mod histogram;
pub mod point;

use serde::{Deserialize, Serialize};
use tonwerk_core::error::{Result, TonwerkError};
use tonwerk_core::types::TransformOutcome;
use tracing::{info, instrument, warn};

use crate::raster::RasterImage;

/// A single operation on the working raster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Transform {
    /// Add `value` to every pixel in `start..=end`.
    Lighten { value: i32, start: i32, end: i32 },
    /// Subtract `value` from every pixel in `start..=end`.
    Darken { value: i32, start: i32, end: i32 },
    Negative,
    /// `255 * (p / 255)^gamma`, rounded.
    PowerLaw { gamma: f64 },
    HistogramStretch,
    HistogramEqualization,
    /// Zero-padded box filter with an odd side length.
    Blur { level: u32 },
}

impl Transform {
    /// Short name used in logs and by the command interface.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lighten { .. } => "lighten",
            Self::Darken { .. } => "darken",
            Self::Negative => "negative",
            Self::PowerLaw { .. } => "powerlaw",
            Self::HistogramStretch => "stretch",
            Self::HistogramEqualization => "equalize",
            Self::Blur { .. } => "blur",
        }
    }

    /// Check parameters without touching any raster.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::PowerLaw { gamma } if !gamma.is_finite() => Err(
                TonwerkError::invalid_parameter("gamma", gamma.to_string(), "must be a finite number"),
            ),
            Self::Blur { level } => blur::validate_level(level),
            _ => Ok(()),
        }
    }

    /// Apply this transform to `raster`.
    ///
    /// Parameters are validated first; on error the raster is unchanged.
    #[instrument(skip(raster), fields(op = self.name()))]
    pub fn apply(&self, raster: &mut RasterImage) -> Result<TransformOutcome> {
        self.validate()?;

        let outcome = match *self {
            Self::Lighten { value, start, end } => {
                let changed = point::lighten(raster.pixels_mut(), value, start, end);
                info!(value, start, end, changed, "Lighten applied");
                TransformOutcome::Applied
            }
            Self::Darken { value, start, end } => {
                let changed = point::darken(raster.pixels_mut(), value, start, end);
                info!(value, start, end, changed, "Darken applied");
                TransformOutcome::Applied
            }
            Self::Negative => {
                point::negative(raster.pixels_mut());
                info!("Negative applied");
                TransformOutcome::Applied
            }
            Self::PowerLaw { gamma } => {
                point::power_law(raster.pixels_mut(), gamma);
                info!(gamma, "Power-law applied");
                TransformOutcome::Applied
            }
            Self::HistogramStretch => histogram::stretch(raster.pixels_mut()),
            Self::HistogramEqualization => histogram::equalize(raster.pixels_mut()),
            Self::Blur { level } => {
                let blurred = blur::box_blur(raster.pixels(), level)?;
                raster.replace_pixels(blurred);
                info!(level, "Blur applied");
                TransformOutcome::Applied
            }
        };

        if outcome == TransformOutcome::NoContrast {
            warn!(op = self.name(), "No contrast; raster left unchanged");
        }
        Ok(outcome)
    }
}

/// Clamp an integer intermediate to a sample.
pub(crate) fn clamp_sample(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}

/// Clamp a floating-point intermediate to a sample (NaN maps to 0).
pub(crate) fn clamp_sample_f64(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Map every pixel through a 256-entry lookup table.
pub(crate) fn remap(image: &mut image::GrayImage, lut: &[u8; 256]) {
    for pixel in image.pixels_mut() {
        pixel.0[0] = lut[pixel.0[0] as usize];
    }
}
