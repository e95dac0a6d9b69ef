// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tonwerk — grayscale TIFF editor
//
// Entry point. Initialises logging, loads configuration, and hands control to
// the one-shot `apply` pipeline, the interactive shell, or `info`.

mod cli;
mod commands;
mod pipeline;
mod services;
mod shell;

use std::process::ExitCode;

use clap::Parser;
use tonwerk_core::AppConfig;
use tonwerk_core::error::Result;
use tonwerk_core::human_errors::humanize_error;

use cli::{Args, Mode};
use commands::Command;
use pipeline::ApplyRequest;
use services::session::EditorSession;

fn main() -> ExitCode {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?args, "Tonwerk starting");

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            let human = humanize_error(&err);
            eprintln!("{}: {}\n  {}", human.severity.label(), human.message, human.suggestion);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let session = EditorSession::new(config);

    match args.command {
        Mode::Apply { input, ops, label, original } => {
            let request = ApplyRequest { input, ops, label, original };
            pipeline::run(&session, request, std::io::stdout())
        }
        Mode::Shell { input } => {
            if let Some(path) = input {
                println!("{}", session.execute(Command::Open(path))?);
            }
            if !session.is_open() {
                println!("No image open. Start with: open <path>");
            }
            let stdin = std::io::stdin();
            shell::run(&session, stdin.lock(), std::io::stdout())
        }
        Mode::Info { input } => {
            session.execute(Command::Open(input))?;
            let info = session.info()?;
            println!("{}", serde_json::to_string_pretty(&info)?);
            Ok(())
        }
    }
}
