// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tonwerk")]
#[command(about = "Decode, edit, and save 8-bit grayscale TIFF images")]
#[command(version)]
pub struct Args {
    /// JSON configuration file (default: built-in settings)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// Apply operations in order, then save the result
    Apply {
        /// Input TIFF path
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Operation, e.g. "lighten 10 50 100" or "blur 5" (repeatable)
        #[arg(short, long = "op", value_name = "OPERATION")]
        ops: Vec<String>,

        /// Output label (default: from config)
        #[arg(short, long, value_name = "LABEL")]
        label: Option<String>,

        /// Also save the unedited original
        #[arg(long)]
        original: bool,
    },

    /// Interactive command shell reading one command per line
    Shell {
        /// TIFF to open on start
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Print image dimensions, layout, and statistics as JSON
    Info {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_collects_operations_in_order() {
        let args = Args::try_parse_from([
            "tonwerk", "apply", "scan.tif", "--op", "negative", "-o", "blur 3", "--label", "out",
        ])
        .unwrap();
        match args.command {
            Mode::Apply { input, ops, label, original } => {
                assert_eq!(input, PathBuf::from("scan.tif"));
                assert_eq!(ops, ["negative", "blur 3"]);
                assert_eq!(label.as_deref(), Some("out"));
                assert!(!original);
            }
            other => panic!("unexpected mode: {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let args =
            Args::try_parse_from(["tonwerk", "shell", "--config", "cfg.json", "-v"]).unwrap();
        assert!(args.verbose);
        assert_eq!(args.config, Some(PathBuf::from("cfg.json")));
        assert!(matches!(args.command, Mode::Shell { input: None }));
    }

    #[test]
    fn info_requires_input() {
        assert!(Args::try_parse_from(["tonwerk", "info"]).is_err());
    }
}
