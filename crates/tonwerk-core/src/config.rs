// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TonwerkError};
use crate::types::OutputFormat;

/// Output settings. Every field has a default, so a config file only needs
/// to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory saved images are written to.
    pub output_dir: PathBuf,
    /// Appended to the label to form the file stem.
    pub output_suffix: String,
    /// Encoding used by `save` and `show-original`.
    pub output_format: OutputFormat,
    /// Label used when rendering the pristine original.
    pub original_label: String,
    /// Label used when `save` is called without one.
    pub default_label: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            output_suffix: "_output_image".into(),
            output_format: OutputFormat::Png,
            original_label: "Original".into(),
            default_label: "Processed_IMG".into(),
        }
    }
}

impl AppConfig {
    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|source| TonwerkError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Full output path for an image saved under `label`.
    pub fn output_path(&self, label: &str) -> PathBuf {
        self.output_dir.join(format!(
            "{label}{}.{}",
            self.output_suffix,
            self.output_format.extension()
        ))
    }
}
