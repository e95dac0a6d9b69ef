// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Histogram transforms — contrast stretching and equalization over the global
// intensity distribution.

use image::GrayImage;
use imageproc::stats::cumulative_histogram;
use tonwerk_core::types::TransformOutcome;
use tracing::{debug, info, instrument};

use super::{clamp_sample_f64, remap};

/// Darkest and brightest intensity in the image.
pub fn min_max(image: &GrayImage) -> (u8, u8) {
    image
        .as_raw()
        .iter()
        .fold((u8::MAX, u8::MIN), |(lo, hi), &p| (lo.min(p), hi.max(p)))
}

/// Linearly remap `[min, max]` onto `[0, 255]`, truncating.
///
/// A single-level image is left untouched and reported as `NoContrast`.
#[instrument(skip(image))]
pub fn stretch(image: &mut GrayImage) -> TransformOutcome {
    let (min, max) = min_max(image);
    debug!(min, max, "Stretch input range");
    if min == max {
        return TransformOutcome::NoContrast;
    }

    let range = f64::from(max - min);
    for pixel in image.pixels_mut() {
        let offset = f64::from(pixel.0[0] - min);
        pixel.0[0] = clamp_sample_f64((255.0 * (offset / range)).trunc());
    }

    let (new_min, new_max) = min_max(image);
    info!(min, max, new_min, new_max, "Histogram stretched");
    TransformOutcome::Applied
}

/// Build the equalization lookup table from a cumulative histogram.
///
/// Returns `None` when every pixel shares the darkest level, where the
/// normalisation denominator would be zero.
pub fn equalization_lut(cdf: &[u32; 256], total: u64) -> Option<[u8; 256]> {
    let cdf_min = cdf.iter().copied().min().unwrap_or(0);
    let denominator = total.checked_sub(u64::from(cdf_min)).filter(|d| *d > 0)? as f64;

    Some(std::array::from_fn(|level| {
        let numerator = f64::from(cdf[level] - cdf_min);
        clamp_sample_f64((numerator / denominator * 255.0).trunc())
    }))
}

/// Histogram equalization through the normalised cumulative distribution.
#[instrument(skip(image))]
pub fn equalize(image: &mut GrayImage) -> TransformOutcome {
    let cdf = cumulative_histogram(image).channels[0];
    let total = u64::from(image.width()) * u64::from(image.height());

    let Some(lut) = equalization_lut(&cdf, total) else {
        return TransformOutcome::NoContrast;
    };
    debug!(lut_min = lut[0], lut_max = lut[255], "Equalization table built");

    remap(image, &lut);
    info!("Histogram equalized");
    TransformOutcome::Applied
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: u32, height: u32, pixels: &[u8]) -> GrayImage {
        GrayImage::from_raw(width, height, pixels.to_vec()).unwrap()
    }

    #[test]
    fn min_max_scans_all_pixels() {
        assert_eq!(min_max(&image(2, 2, &[9, 3, 200, 17])), (3, 200));
    }

    #[test]
    fn stretch_reaches_full_range() {
        let mut img = image(3, 2, &[50, 60, 70, 80, 90, 100]);
        assert_eq!(stretch(&mut img), TransformOutcome::Applied);
        assert_eq!(min_max(&img), (0, 255));
        // 255 * 10/50 = 51, 255 * 20/50 = 102 ...
        assert_eq!(img.as_raw(), &vec![0, 51, 102, 153, 204, 255]);
    }

    #[test]
    fn stretch_truncates_rather_than_rounds() {
        let mut img = image(3, 1, &[0, 2, 3]);
        stretch(&mut img);
        // 255 * 2/3 = 170.0, 255 * 0/3 = 0
        assert_eq!(img.as_raw(), &vec![0, 170, 255]);

        let mut img = image(3, 1, &[0, 1, 7]);
        stretch(&mut img);
        // 255 * 1/7 = 36.43 -> 36
        assert_eq!(img.get_pixel(1, 0).0[0], 36);
    }

    #[test]
    fn stretch_flat_image_is_untouched() {
        let mut img = image(2, 2, &[7; 4]);
        assert_eq!(stretch(&mut img), TransformOutcome::NoContrast);
        assert_eq!(img.as_raw(), &vec![7; 4]);
    }

    #[test]
    fn equalize_spreads_levels() {
        // Four levels, one pixel each: cdf = 1, 2, 3, 4; cdf_min = 0 because
        // level 0 is empty.
        let mut img = image(2, 2, &[10, 20, 30, 40]);
        assert_eq!(equalize(&mut img), TransformOutcome::Applied);
        // (1/4)*255 = 63.75, (2/4)*255 = 127.5, (3/4)*255 = 191.25
        assert_eq!(img.as_raw(), &vec![63, 127, 191, 255]);
    }

    #[test]
    fn equalize_uses_true_cdf_minimum() {
        // Level 0 is populated, so cdf_min = cdf[0] = 2.
        let mut img = image(2, 2, &[0, 0, 100, 200]);
        equalize(&mut img);
        // level 100: (3-2)/(4-2)*255 = 127.5 -> 127
        assert_eq!(img.as_raw(), &vec![0, 0, 127, 255]);
    }

    #[test]
    fn equalize_all_black_is_a_no_op() {
        let mut img = image(2, 2, &[0; 4]);
        assert_eq!(equalize(&mut img), TransformOutcome::NoContrast);
        assert_eq!(img.as_raw(), &vec![0; 4]);
    }

    #[test]
    fn equalize_flat_non_black_maps_to_white() {
        let mut img = image(2, 2, &[128; 4]);
        assert_eq!(equalize(&mut img), TransformOutcome::Applied);
        assert_eq!(img.as_raw(), &vec![255; 4]);
    }

    #[test]
    fn lut_guard_on_zero_denominator() {
        let mut cdf = [0u32; 256];
        cdf.iter_mut().for_each(|c| *c = 9);
        assert!(equalization_lut(&cdf, 9).is_none());
    }
}
