// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster store — the working pixel grid plus a frozen copy of the decoded
// original for reset and show-original.

use std::path::{Path, PathBuf};

use image::GrayImage;
use tonwerk_core::error::{Result, TonwerkError};
use tonwerk_core::types::{ContainerLayout, RasterInfo};
use tracing::{debug, info, instrument};

use crate::container::{DecodedContainer, decode};
use crate::integrity::{fingerprint, verify_fingerprint};
use crate::transform::histogram::min_max;

/// A decoded grayscale raster and its pristine original.
///
/// `image` is mutated in place by every transform. `original` is a deep copy
/// taken at decode time and is never handed out mutably.
#[derive(Debug, Clone)]
pub struct RasterImage {
    image: GrayImage,
    original: GrayImage,
    source_path: Option<PathBuf>,
    source_digest: String,
    layout: Option<ContainerLayout>,
}

impl RasterImage {
    // -- Construction ---------------------------------------------------------

    /// Read and decode a container from disk.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| TonwerkError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let mut raster = Self::from_bytes(&data)?;
        raster.source_path = Some(path.to_path_buf());
        info!(
            width = raster.width(),
            height = raster.height(),
            "Raster opened"
        );
        Ok(raster)
    }

    /// Decode a container already held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let digest = fingerprint(data);
        let DecodedContainer {
            width,
            height,
            samples,
            layout,
        } = decode(data)?;
        let mut raster = Self::from_pixels(width, height, samples)?;
        raster.source_digest = digest;
        raster.layout = Some(layout);
        Ok(raster)
    }

    /// Wrap a row-major sample buffer. `samples.len()` must equal
    /// `width * height`.
    pub fn from_pixels(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        let len = samples.len();
        let mismatch = TonwerkError::InvalidDimensions { width, height, len };
        if width == 0 || height == 0 || len as u64 != u64::from(width) * u64::from(height) {
            return Err(mismatch);
        }
        let image = GrayImage::from_raw(width, height, samples).ok_or(mismatch)?;
        let source_digest = fingerprint(image.as_raw());
        Ok(Self {
            original: image.clone(),
            image,
            source_path: None,
            source_digest,
            layout: None,
        })
    }

    /// Re-read the source file and decode it afresh.
    ///
    /// Fails with `IntegrityMismatch` if the file no longer matches the bytes
    /// this raster was decoded from.
    #[instrument(skip(self))]
    pub fn reload(&self) -> Result<Self> {
        let path = self.source_path.as_deref().ok_or_else(|| {
            TonwerkError::invalid_parameter("source", "", "raster was not opened from a file")
        })?;
        let data = std::fs::read(path).map_err(|source| TonwerkError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        verify_fingerprint(&data, &self.source_digest)?;
        let mut fresh = Self::from_bytes(&data)?;
        fresh.source_path = Some(path.to_path_buf());
        debug!("Raster reloaded from source");
        Ok(fresh)
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Current intensity at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        self.image.get_pixel(x, y).0[0]
    }

    /// Borrow the working raster.
    pub fn pixels(&self) -> &GrayImage {
        &self.image
    }

    /// Mutable access for in-place transforms.
    pub(crate) fn pixels_mut(&mut self) -> &mut GrayImage {
        &mut self.image
    }

    /// Swap in a freshly computed grid of the same dimensions.
    pub(crate) fn replace_pixels(&mut self, image: GrayImage) {
        debug_assert_eq!(image.dimensions(), self.image.dimensions());
        self.image = image;
    }

    /// Borrow the pristine decoded raster.
    pub fn original(&self) -> &GrayImage {
        &self.original
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// SHA-256 of the bytes this raster was decoded from.
    pub fn source_digest(&self) -> &str {
        &self.source_digest
    }

    pub fn layout(&self) -> Option<ContainerLayout> {
        self.layout
    }

    /// Whether the working raster still equals the original.
    pub fn is_pristine(&self) -> bool {
        self.image == self.original
    }

    /// Display snapshot including current min/max.
    pub fn info(&self) -> RasterInfo {
        let (min, max) = min_max(&self.image);
        RasterInfo {
            width: self.width(),
            height: self.height(),
            source_path: self.source_path.clone(),
            source_digest: self.source_digest.clone(),
            layout: self.layout,
            min,
            max,
            pristine: self.is_pristine(),
        }
    }

    // -- Restore --------------------------------------------------------------

    /// Replace the working raster with a fresh copy of the original.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.image = self.original.clone();
        info!("Raster reset to original");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::decoder::tests::le_container;
    use crate::transform::Transform;

    fn sample_raster() -> RasterImage {
        RasterImage::from_pixels(3, 2, vec![0, 50, 100, 150, 200, 250]).unwrap()
    }

    #[test]
    fn from_pixels_rejects_wrong_length() {
        let err = RasterImage::from_pixels(3, 3, vec![0; 8]).unwrap_err();
        assert!(matches!(
            err,
            TonwerkError::InvalidDimensions { width: 3, height: 3, len: 8 }
        ));
    }

    #[test]
    fn from_pixels_rejects_empty_raster() {
        assert!(RasterImage::from_pixels(0, 0, Vec::new()).is_err());
    }

    #[test]
    fn original_is_independent_of_working_copy() {
        let mut raster = sample_raster();
        Transform::Negative.apply(&mut raster).unwrap();

        assert_eq!(raster.pixel(0, 0), 255);
        assert_eq!(raster.original().get_pixel(0, 0).0[0], 0);
        assert!(!raster.is_pristine());
    }

    #[test]
    fn reset_restores_decoded_pixels() {
        let mut raster = sample_raster();
        let decoded = raster.original().clone();
        for transform in [
            Transform::Lighten { value: 40, start: 0, end: 255 },
            Transform::Blur { level: 3 },
            Transform::HistogramEqualization,
            Transform::PowerLaw { gamma: 0.4 },
        ] {
            transform.apply(&mut raster).unwrap();
        }
        assert!(!raster.is_pristine());

        raster.reset();
        assert_eq!(raster.pixels(), &decoded);
        assert!(raster.is_pristine());

        // The restored grid is a copy: mutating it leaves the original intact.
        Transform::Negative.apply(&mut raster).unwrap();
        assert_eq!(raster.original(), &decoded);
    }

    #[test]
    fn from_bytes_records_layout_and_digest() {
        let bytes = le_container(&[(256, 4, 1, 2), (257, 4, 1, 2)], &[]);
        let raster = RasterImage::from_bytes(&bytes).unwrap();
        assert_eq!(raster.source_digest(), fingerprint(&bytes));
        assert_eq!(raster.layout().map(|l| l.directory_offset), Some(8));
        assert!(raster.source_path().is_none());
    }

    #[test]
    fn open_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.tif");
        let bytes = le_container(&[(256, 4, 1, 3), (257, 4, 1, 2)], &[]);
        std::fs::write(&path, &bytes).unwrap();

        let mut raster = RasterImage::open(&path).unwrap();
        assert_eq!(raster.source_path(), Some(path.as_path()));
        Transform::Negative.apply(&mut raster).unwrap();

        let fresh = raster.reload().unwrap();
        assert!(fresh.is_pristine());
        assert_eq!(fresh.pixels(), raster.original());
    }

    #[test]
    fn reload_refuses_changed_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.tif");
        let bytes = le_container(&[(256, 4, 1, 3), (257, 4, 1, 2)], &[]);
        std::fs::write(&path, &bytes).unwrap();
        let raster = RasterImage::open(&path).unwrap();

        let mut changed = bytes.clone();
        changed.push(0);
        std::fs::write(&path, &changed).unwrap();

        assert!(matches!(
            raster.reload().unwrap_err(),
            TonwerkError::IntegrityMismatch { .. }
        ));
    }

    #[test]
    fn open_missing_file_is_read_failure() {
        let err = RasterImage::open("/nonexistent/scan.tif").unwrap_err();
        assert!(matches!(err, TonwerkError::ReadFailed { .. }));
    }

    #[test]
    fn info_reports_min_max() {
        let info = sample_raster().info();
        assert_eq!((info.width, info.height), (3, 2));
        assert_eq!((info.min, info.max), (0, 250));
        assert!(info.pristine);
    }
}
