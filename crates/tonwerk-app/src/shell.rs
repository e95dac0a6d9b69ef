// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Interactive front-end: one command per input line, one report per output
// line. Errors are shown and the loop carries on.

use std::io::{BufRead, Write};

use tonwerk_core::error::Result;
use tonwerk_core::human_errors::humanize_error;
use tracing::debug;

use crate::services::session::{CommandReport, EditorSession};

const PROMPT: &str = "tonwerk> ";

/// Drive `session` from `input` until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(session: &EditorSession, input: R, mut output: W) -> Result<()> {
    write!(output, "{PROMPT}")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            write!(output, "{PROMPT}")?;
            output.flush()?;
            continue;
        }

        match session.execute_line(trimmed) {
            Ok(CommandReport::Quit) => {
                writeln!(output, "{}", CommandReport::Quit)?;
                return Ok(());
            }
            Ok(report) => writeln!(output, "{report}")?,
            Err(err) => {
                debug!(error = %err, "Command failed");
                let human = humanize_error(&err);
                writeln!(output, "{}: {}", human.severity.label(), human.message)?;
                writeln!(output, "  {}", human.suggestion)?;
            }
        }
        write!(output, "{PROMPT}")?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}
