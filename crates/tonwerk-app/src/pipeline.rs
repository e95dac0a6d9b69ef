// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One-shot front-end: open, apply a list of operations, save.

use std::io::Write;
use std::path::PathBuf;

use tonwerk_core::error::Result;
use tracing::{info, instrument};

use crate::commands::Command;
use crate::services::session::EditorSession;

/// Everything `tonwerk apply` was asked to do.
#[derive(Debug, Clone)]
pub struct ApplyRequest {
    pub input: PathBuf,
    pub ops: Vec<String>,
    pub label: Option<String>,
    /// Also write the unedited original.
    pub original: bool,
}

/// Run `request` against `session`, writing one report line per step.
///
/// Every operation is parsed before the input is opened, so a typo in the
/// last operation fails before any work is done.
#[instrument(skip(session, output), fields(input = %request.input.display(), ops = request.ops.len()))]
pub fn run<W: Write>(session: &EditorSession, request: ApplyRequest, mut output: W) -> Result<()> {
    let commands = request
        .ops
        .iter()
        .map(String::as_str)
        .map(Command::parse)
        .collect::<Result<Vec<_>>>()?;

    writeln!(output, "{}", session.execute(Command::Open(request.input))?)?;
    if request.original {
        writeln!(output, "{}", session.execute(Command::ShowOriginal)?)?;
    }
    for command in commands {
        writeln!(output, "{}", session.execute(command)?)?;
    }
    writeln!(output, "{}", session.execute(Command::Save(request.label))?)?;
    info!("Pipeline finished");
    Ok(())
}
