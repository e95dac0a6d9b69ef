// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Editing session — owns the one open raster and dispatches commands to it.
//
// The raster sits behind `Arc<Mutex<>>` so the session can be cloned into
// any front-end. A command holds the lock for its whole duration, so
// commands on one session never interleave.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tonwerk_core::AppConfig;
use tonwerk_core::error::{Result, TonwerkError};
use tonwerk_core::types::{RasterInfo, TransformOutcome};
use tonwerk_raster::{RasterImage, Transform, output};
use tracing::{info, instrument};

use crate::commands::{Command, HELP};

/// What a successfully executed command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandReport {
    Opened(RasterInfo),
    Transformed {
        op: &'static str,
        outcome: TransformOutcome,
    },
    Saved(PathBuf),
    OriginalSaved(PathBuf),
    Reset,
    Reloaded(RasterInfo),
    Info(RasterInfo),
    Help,
    Quit,
}

impl fmt::Display for CommandReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opened(info) | Self::Reloaded(info) | Self::Info(info) => {
                write!(
                    f,
                    "{}x{} pixels, intensity {}..={}",
                    info.width, info.height, info.min, info.max
                )?;
                if let Some(path) = &info.source_path {
                    write!(f, " from {}", path.display())?;
                }
                if !info.pristine {
                    write!(f, " (edited)")?;
                }
                Ok(())
            }
            Self::Transformed { op, outcome: TransformOutcome::Applied } => {
                write!(f, "{op} applied")
            }
            Self::Transformed { op, outcome: TransformOutcome::NoContrast } => {
                write!(f, "{op}: image has a single intensity level, nothing changed")
            }
            Self::Saved(path) => write!(f, "saved {}", path.display()),
            Self::OriginalSaved(path) => write!(f, "original saved to {}", path.display()),
            Self::Reset => write!(f, "restored original"),
            Self::Help => f.write_str(HELP),
            Self::Quit => write!(f, "bye"),
        }
    }
}

/// Shared editing session. Cheap to clone.
#[derive(Clone)]
pub struct EditorSession {
    raster: Arc<Mutex<Option<RasterImage>>>,
    config: Arc<AppConfig>,
}

impl EditorSession {
    pub fn new(config: AppConfig) -> Self {
        Self {
            raster: Arc::new(Mutex::new(None)),
            config: Arc::new(config),
        }
    }

    /// Run one parsed command.
    #[instrument(skip(self))]
    pub fn execute(&self, command: Command) -> Result<CommandReport> {
        match command {
            Command::Open(path) => self.open(&path).map(CommandReport::Opened),
            Command::Apply(transform) => {
                let outcome = self.apply(&transform)?;
                Ok(CommandReport::Transformed {
                    op: transform.name(),
                    outcome,
                })
            }
            Command::Save(label) => self.save(label.as_deref()).map(CommandReport::Saved),
            Command::ShowOriginal => self.show_original().map(CommandReport::OriginalSaved),
            Command::Reset => self.reset().map(|()| CommandReport::Reset),
            Command::Reload => self.reload().map(CommandReport::Reloaded),
            Command::Info => self.info().map(CommandReport::Info),
            Command::Help => Ok(CommandReport::Help),
            Command::Quit => Ok(CommandReport::Quit),
        }
    }

    /// Parse a text command and run it.
    pub fn execute_line(&self, line: &str) -> Result<CommandReport> {
        self.execute(Command::parse(line)?)
    }

    // -- Lifecycle -----------------------------------------------------------

    /// Decode `path` and make it the session raster. A failed decode keeps
    /// whatever was open before.
    pub fn open(&self, path: &Path) -> Result<RasterInfo> {
        let raster = RasterImage::open(path)?;
        let info = raster.info();
        let mut guard = self.raster.lock().expect("raster lock poisoned");
        if guard.is_some() {
            info!("Replacing previously open raster");
        }
        *guard = Some(raster);
        Ok(info)
    }

    /// Re-read the source file. The session is untouched if the file changed
    /// since it was opened.
    pub fn reload(&self) -> Result<RasterInfo> {
        self.with_raster(|raster| {
            let fresh = raster.reload()?;
            *raster = fresh;
            Ok(raster.info())
        })
    }

    pub fn reset(&self) -> Result<()> {
        self.with_raster(|raster| {
            raster.reset();
            Ok(())
        })
    }

    pub fn info(&self) -> Result<RasterInfo> {
        self.with_raster(|raster| Ok(raster.info()))
    }

    pub fn is_open(&self) -> bool {
        self.raster.lock().expect("raster lock poisoned").is_some()
    }

    // -- Editing -------------------------------------------------------------

    pub fn apply(&self, transform: &Transform) -> Result<TransformOutcome> {
        self.with_raster(|raster| transform.apply(raster))
    }

    // -- Output --------------------------------------------------------------

    /// Write the working raster. `None` uses the configured default label.
    pub fn save(&self, label: Option<&str>) -> Result<PathBuf> {
        let label = label.unwrap_or(self.config.default_label.as_str());
        self.with_raster(|raster| output::save(raster, label, &self.config))
    }

    /// Write the unedited original.
    pub fn show_original(&self) -> Result<PathBuf> {
        self.with_raster(|raster| output::save_original(raster, &self.config))
    }

    fn with_raster<T>(&self, f: impl FnOnce(&mut RasterImage) -> Result<T>) -> Result<T> {
        let mut guard = self.raster.lock().expect("raster lock poisoned");
        let raster = guard.as_mut().ok_or(TonwerkError::NoImageLoaded)?;
        f(raster)
    }
}
