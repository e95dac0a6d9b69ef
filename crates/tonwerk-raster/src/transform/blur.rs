// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Box blur — uniform square kernel with zero padding outside the raster.

use image::{GrayImage, Luma};
use tonwerk_core::error::{Result, TonwerkError};
use tracing::{debug, instrument};

use super::clamp_sample_f64;

/// Reject even or zero kernel sizes.
pub fn validate_level(level: u32) -> Result<()> {
    if level == 0 || level % 2 == 0 {
        return Err(TonwerkError::InvalidKernelSize(level));
    }
    Ok(())
}

/// Blur with a `level x level` box kernel of weight `1 / level²`.
///
/// Neighbours outside the raster count as zero, so the border darkens. The
/// result is computed from the unmodified input into a new buffer.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn box_blur(image: &GrayImage, level: u32) -> Result<GrayImage> {
    validate_level(level)?;

    let (width, height) = image.dimensions();
    let radius = (level - 1) / 2;
    let weight = 1.0 / (f64::from(level) * f64::from(level));
    let integral = compute_integral_image(image);
    debug!(radius, weight, "Box kernel prepared");

    let mut output = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let sum = window_sum(&integral, width, height, x, y, radius);
            let value = (sum as f64 * weight).round_ties_even();
            output.put_pixel(x, y, Luma([clamp_sample_f64(value)]));
        }
    }
    Ok(output)
}

// -- Integral image helpers ---------------------------------------------------

/// Compute the summed-area table of a grayscale image.
///
/// `table[y * (width+1) + x]` holds the sum of all pixels in `[0, x) x [0, y)`.
/// The extra zero row and column make window lookups branch-free.
fn compute_integral_image(gray: &GrayImage) -> Vec<u64> {
    let (w, h) = gray.dimensions();
    let stride = w as usize + 1;
    let mut table = vec![0u64; stride * (h as usize + 1)];

    for y in 0..h as usize {
        let mut row_sum: u64 = 0;
        for x in 0..w as usize {
            row_sum += u64::from(gray.get_pixel(x as u32, y as u32).0[0]);
            table[(y + 1) * stride + x + 1] = row_sum + table[y * stride + x + 1];
        }
    }

    table
}

/// Sum of the window of `radius` around `(cx, cy)`, restricted to the
/// raster. Out-of-bounds cells contribute nothing, which is exactly zero
/// padding.
fn window_sum(integral: &[u64], width: u32, height: u32, cx: u32, cy: u32, radius: u32) -> u64 {
    let stride = width as usize + 1;
    let reach = u64::from(radius) + 1;

    let x1 = cx.saturating_sub(radius) as usize;
    let y1 = cy.saturating_sub(radius) as usize;
    let x2 = (u64::from(cx) + reach).min(u64::from(width)) as usize;
    let y2 = (u64::from(cy) + reach).min(u64::from(height)) as usize;

    integral[y2 * stride + x2] + integral[y1 * stride + x1]
        - integral[y1 * stride + x2]
        - integral[y2 * stride + x1]
}
