// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Point transforms — each output sample depends only on the input sample at
// the same position.

use image::GrayImage;

use super::{clamp_sample, clamp_sample_f64, remap};

/// Add `value` to every pixel whose intensity lies in `start..=end`.
///
/// Returns the number of pixels that fell inside the range.
pub fn lighten(image: &mut GrayImage, value: i32, start: i32, end: i32) -> usize {
    shift_range(image, i64::from(value), start, end)
}

/// Subtract `value` from every pixel whose intensity lies in `start..=end`.
pub fn darken(image: &mut GrayImage, value: i32, start: i32, end: i32) -> usize {
    shift_range(image, -i64::from(value), start, end)
}

fn shift_range(image: &mut GrayImage, delta: i64, start: i32, end: i32) -> usize {
    let mut changed = 0;
    for pixel in image.pixels_mut() {
        let current = pixel.0[0];
        if (start..=end).contains(&i32::from(current)) {
            pixel.0[0] = clamp_sample(i64::from(current) + delta);
            changed += 1;
        }
    }
    changed
}

/// Invert every pixel: `p -> 255 - p`.
pub fn negative(image: &mut GrayImage) {
    for pixel in image.pixels_mut() {
        pixel.0[0] = clamp_sample(255 - i64::from(pixel.0[0]));
    }
}

/// Gamma correction. `gamma == 0` maps every pixel to 255 (`0^0 == 1`).
pub fn power_law(image: &mut GrayImage, gamma: f64) {
    let lut: [u8; 256] = std::array::from_fn(|p| gamma_sample(p as u8, gamma));
    remap(image, &lut);
}

fn gamma_sample(pixel: u8, gamma: f64) -> u8 {
    let normalized = f64::from(pixel) / 255.0;
    let transformed = normalized.powf(gamma);
    // Half-way values round to even.
    clamp_sample_f64((transformed * 255.0).round_ties_even())
}
