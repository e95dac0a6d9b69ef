// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output encoder — serializes a grayscale raster as PNG or binary PGM and
// writes it to disk atomically.

use std::io::Write;
use std::path::{Path, PathBuf};

use image::GrayImage;
use image::codecs::png::PngEncoder;
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use tonwerk_core::AppConfig;
use tonwerk_core::error::{Result, TonwerkError};
use tonwerk_core::types::OutputFormat;
use tracing::{debug, info, instrument};

use crate::raster::RasterImage;

/// Encode a grayscale image in the requested format, returning the raw bytes.
pub fn encode(image: &GrayImage, format: OutputFormat) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let written = match format {
        OutputFormat::Png => image.write_with_encoder(PngEncoder::new(&mut buffer)),
        OutputFormat::Pgm => image.write_with_encoder(
            PnmEncoder::new(&mut buffer)
                .with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary)),
        ),
    };
    written.map_err(|err| {
        TonwerkError::Encode(format!("{} encoding failed: {}", format.extension(), err))
    })?;
    Ok(buffer)
}

/// Write `bytes` to `path` through a temporary file in the same directory,
/// so readers see either the old file or the complete new one.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let write_failed = |source: std::io::Error| TonwerkError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_failed)?;
    file.write_all(bytes).map_err(write_failed)?;
    file.as_file().sync_all().map_err(write_failed)?;
    file.persist(path).map_err(|err| write_failed(err.error))?;
    Ok(())
}

/// Reject labels that would escape the output directory or name nothing.
pub fn validate_label(label: &str) -> Result<()> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(TonwerkError::invalid_parameter("label", label, "must not be empty"));
    }
    if trimmed.contains(['/', '\\']) || trimmed == "." || trimmed == ".." {
        return Err(TonwerkError::invalid_parameter(
            "label",
            label,
            "must be a plain file name",
        ));
    }
    Ok(())
}

/// Encode the working raster under `label` and write it to the configured
/// output directory. Returns the path written.
#[instrument(skip(raster, config), fields(format = ?config.output_format))]
pub fn save(raster: &RasterImage, label: &str, config: &AppConfig) -> Result<PathBuf> {
    write_labelled(raster.pixels(), label, config)
}

/// Encode the pristine original under the configured original label.
#[instrument(skip(raster, config))]
pub fn save_original(raster: &RasterImage, config: &AppConfig) -> Result<PathBuf> {
    write_labelled(raster.original(), &config.original_label, config)
}

fn write_labelled(image: &GrayImage, label: &str, config: &AppConfig) -> Result<PathBuf> {
    validate_label(label)?;
    let path = config.output_path(label.trim());
    let bytes = encode(image, config.output_format)?;
    debug!(bytes = bytes.len(), "Raster encoded");
    write_atomic(&path, &bytes)?;
    info!(path = %path.display(), width = image.width(), height = image.height(), "Raster saved");
    Ok(path)
}
