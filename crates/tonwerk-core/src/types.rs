// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Tonwerk raster engine.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Multi-byte integer encoding selected by the container magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ByteOrder {
    /// `II*\0`
    LittleEndian,
    /// `MM\0*`
    BigEndian,
}

impl ByteOrder {
    /// Read a `u16` from exactly two bytes.
    pub fn u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Self::LittleEndian => u16::from_le_bytes(bytes),
            Self::BigEndian => u16::from_be_bytes(bytes),
        }
    }

    /// Read a `u32` from exactly four bytes.
    pub fn u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Self::LittleEndian => u32::from_le_bytes(bytes),
            Self::BigEndian => u32::from_be_bytes(bytes),
        }
    }
}

/// Supported output encodings. Both are uncompressed single-channel 8-bit
/// rasters as far as the pixel model is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    /// Binary PGM (`P5`).
    Pgm,
}

impl OutputFormat {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pgm => "pgm",
        }
    }
}

/// Result of a transform that completed without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformOutcome {
    /// The raster was rewritten.
    Applied,
    /// The raster has a single intensity level; nothing was changed.
    NoContrast,
}

/// Header facts recovered while decoding a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerLayout {
    pub byte_order: ByteOrder,
    /// Absolute offset of the image directory.
    pub directory_offset: u32,
    /// Number of entries the directory declared.
    pub entry_count: u16,
}

/// Snapshot of an open raster, suitable for display or JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterInfo {
    pub width: u32,
    pub height: u32,
    pub source_path: Option<PathBuf>,
    /// SHA-256 of the source bytes, hex encoded.
    pub source_digest: String,
    pub layout: Option<ContainerLayout>,
    pub min: u8,
    pub max: u8,
    /// Whether the working raster still equals the decoded original.
    pub pristine: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_order_reads_both_encodings() {
        assert_eq!(ByteOrder::LittleEndian.u16([0x00, 0x01]), 256);
        assert_eq!(ByteOrder::BigEndian.u16([0x01, 0x00]), 256);
        assert_eq!(ByteOrder::LittleEndian.u32([8, 0, 0, 0]), 8);
        assert_eq!(ByteOrder::BigEndian.u32([0, 0, 0, 8]), 8);
    }

    #[test]
    fn output_format_extensions() {
        assert_eq!(OutputFormat::default(), OutputFormat::Png);
        assert_eq!(OutputFormat::Pgm.extension(), "pgm");
    }

    #[test]
    fn output_format_serializes_lowercase() {
        let json = serde_json::to_string(&OutputFormat::Pgm).unwrap();
        assert_eq!(json, "\"pgm\"");
    }
}
