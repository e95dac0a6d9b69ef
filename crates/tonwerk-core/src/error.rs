// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Tonwerk.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Tonwerk operations.
#[derive(Debug, Error)]
pub enum TonwerkError {
    // -- Decode errors --
    #[error("invalid TIFF magic number: {found:02x?}")]
    InvalidMagic { found: [u8; 4] },

    #[error("unexpected end of data reading {field} at offset {offset} (need {needed} bytes, have {available})")]
    TruncatedRead {
        field: &'static str,
        offset: u64,
        needed: u64,
        available: u64,
    },

    #[error("image directory is missing {}", missing_dimensions(.width, .height))]
    MissingDimensions {
        width: Option<u32>,
        height: Option<u32>,
    },

    #[error("pixel buffer of {len} bytes does not match {width}x{height}")]
    InvalidDimensions { width: u32, height: u32, len: usize },

    // -- Validation errors --
    #[error("blur: mask size should be a positive odd number, got {0}")]
    InvalidKernelSize(u32),

    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("no image is open")]
    NoImageLoaded,

    // -- I/O errors --
    #[error("failed to read {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image encoding failed: {0}")]
    Encode(String),

    #[error("source changed since it was opened: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TonwerkError {
    /// Build an `InvalidParameter` from anything displayable.
    pub fn invalid_parameter(
        name: &'static str,
        value: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::InvalidParameter {
            name,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

fn missing_dimensions(width: &Option<u32>, height: &Option<u32>) -> &'static str {
    match (width, height) {
        (None, None) => "width and height",
        (None, Some(_)) => "width",
        (Some(_), None) => "height",
        (Some(_), Some(_)) => "nothing",
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TonwerkError>;
