// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command interface — turns one line of user text into a validated command.
//
// Every numeric parameter arrives as text. Parsing and validation happen
// here, before anything reaches the raster, so a bad value never leaves the
// image half-processed.

use std::path::PathBuf;
use std::str::FromStr;

use tonwerk_core::error::{Result, TonwerkError};
use tonwerk_raster::Transform;

/// One request from a front-end.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open(PathBuf),
    Apply(Transform),
    /// Save the working raster; `None` uses the configured default label.
    Save(Option<String>),
    ShowOriginal,
    Reset,
    Reload,
    Info,
    Help,
    Quit,
}

/// Usage text shown by `help`.
pub const HELP: &str = "\
Commands:
  open <path>                     open an 8-bit grayscale TIFF
  lighten <value> <start> <end>   add value to pixels in [start, end]
  darken <value> <start> <end>    subtract value from pixels in [start, end]
  negative                        invert every pixel
  powerlaw <gamma>                gamma correction
  stretch                         histogram stretch to 0..255
  equalize                        histogram equalization
  blur <level>                    box blur, level must be odd
  save [label]                    write <label>_output_image
  original                        write the unedited original
  reset                           discard all edits
  reload                          re-read the source file
  info                            dimensions, range and source digest
  help                            this text
  quit                            leave the shell";

impl Command {
    /// Parse a whitespace-separated command line.
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(TonwerkError::UnknownCommand(String::new()));
        };
        let args: Vec<&str> = words.collect();

        let command = match name.to_ascii_lowercase().as_str() {
            "open" => {
                // Paths may contain spaces; keep everything after the verb.
                let path = line.trim_start()[name.len()..].trim();
                if path.is_empty() {
                    return Err(arity(name, 1, 0));
                }
                Self::Open(PathBuf::from(path))
            }
            "lighten" | "darken" => {
                expect_args(name, &args, 3)?;
                let value = parse_number("value", args[0])?;
                let start = parse_number("start", args[1])?;
                let end = parse_number("end", args[2])?;
                if name.eq_ignore_ascii_case("lighten") {
                    Self::Apply(Transform::Lighten { value, start, end })
                } else {
                    Self::Apply(Transform::Darken { value, start, end })
                }
            }
            "negative" => no_args(name, &args, Self::Apply(Transform::Negative))?,
            "powerlaw" | "gamma" => {
                expect_args(name, &args, 1)?;
                Self::Apply(Transform::PowerLaw {
                    gamma: parse_number("gamma", args[0])?,
                })
            }
            "stretch" | "histogram-stretch" => {
                no_args(name, &args, Self::Apply(Transform::HistogramStretch))?
            }
            "equalize" | "histogram-equalize" => {
                no_args(name, &args, Self::Apply(Transform::HistogramEqualization))?
            }
            "blur" => {
                expect_args(name, &args, 1)?;
                Self::Apply(Transform::Blur {
                    level: parse_number("level", args[0])?,
                })
            }
            "save" => match args.as_slice() {
                [] => Self::Save(None),
                [label] => Self::Save(Some((*label).to_owned())),
                _ => return Err(arity(name, 1, args.len())),
            },
            "original" | "show-original" => no_args(name, &args, Self::ShowOriginal)?,
            "reset" => no_args(name, &args, Self::Reset)?,
            "reload" => no_args(name, &args, Self::Reload)?,
            "info" => no_args(name, &args, Self::Info)?,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => return Err(TonwerkError::UnknownCommand(name.to_owned())),
        };

        if let Self::Apply(transform) = &command {
            transform.validate()?;
        }
        Ok(command)
    }
}

impl FromStr for Command {
    type Err = TonwerkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_number<T>(name: &'static str, text: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    text.parse::<T>()
        .map_err(|err| TonwerkError::invalid_parameter(name, text, err))
}

fn expect_args(name: &str, args: &[&str], expected: usize) -> Result<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(arity(name, expected, args.len()))
    }
}

fn no_args(name: &str, args: &[&str], command: Command) -> Result<Command> {
    expect_args(name, args, 0).map(|()| command)
}

fn arity(name: &str, expected: usize, got: usize) -> TonwerkError {
    TonwerkError::invalid_parameter(
        "arguments",
        name,
        format!("expected {expected} argument(s), got {got}"),
    )
}
