// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for front-ends.
//
// Every technical error is mapped to a short message plus a suggestion the
// user can act on. Severity drives how a front-end presents it.

use crate::error::TonwerkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The user typed something we can't use; asking again fixes it.
    ActionRequired,
    /// The file itself is unusable; retrying won't help.
    Permanent,
    /// Something outside the engine failed (disk, permissions).
    Environment,
}

impl Severity {
    /// Prefix a front-end shows before the message.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ActionRequired => "error",
            Self::Permanent => "unusable file",
            Self::Environment => "system error",
        }
    }
}

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Short summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    pub severity: Severity,
}

/// Convert a `TonwerkError` into a `HumanError`.
pub fn humanize_error(err: &TonwerkError) -> HumanError {
    match err {
        // -- Decode --
        TonwerkError::InvalidMagic { .. } => HumanError {
            message: "This isn't a TIFF image.".into(),
            suggestion: "Choose a .tif file. Only uncompressed 8-bit grayscale TIFFs can be opened.".into(),
            severity: Severity::Permanent,
        },

        TonwerkError::TruncatedRead { field, .. } => HumanError {
            message: "The image file ends too early.".into(),
            suggestion: format!("The file may be damaged or only partly copied. (Stopped while reading {field}.)"),
            severity: Severity::Permanent,
        },

        TonwerkError::MissingDimensions { .. } => HumanError {
            message: "The image doesn't say how big it is.".into(),
            suggestion: "The TIFF is missing its width or height tag. Re-export it from another program.".into(),
            severity: Severity::Permanent,
        },

        TonwerkError::InvalidDimensions { .. } => HumanError {
            message: "The pixel data doesn't match the image size.".into(),
            suggestion: "The image is inconsistent and can't be processed.".into(),
            severity: Severity::Permanent,
        },

        // -- Validation --
        TonwerkError::InvalidKernelSize(size) => {
            let (lower, upper) = match *size {
                0 => (1, 3),
                n => (n - 1, n.saturating_add(1)),
            };
            HumanError {
                message: "The blur level must be an odd number.".into(),
                suggestion: format!("Try {lower} or {upper} instead of {size}."),
                severity: Severity::ActionRequired,
            }
        }

        TonwerkError::InvalidParameter { name, value, .. } => HumanError {
            message: format!("\"{value}\" isn't a valid {name}."),
            suggestion: "Enter a whole number (or a decimal number for gamma) and try again.".into(),
            severity: Severity::ActionRequired,
        },

        TonwerkError::UnknownCommand(name) => HumanError {
            message: format!("There's no command called \"{name}\"."),
            suggestion: "Type \"help\" to see the available commands.".into(),
            severity: Severity::ActionRequired,
        },

        TonwerkError::NoImageLoaded => HumanError {
            message: "No image is open yet.".into(),
            suggestion: "Open a TIFF image first, then apply the operation.".into(),
            severity: Severity::ActionRequired,
        },

        // -- I/O --
        TonwerkError::ReadFailed { source, .. } => humanize_io(source, "read", "read"),
        TonwerkError::WriteFailed { source, .. } => humanize_io(source, "write", "written"),
        TonwerkError::Io(source) => humanize_io(source, "access", "accessed"),

        TonwerkError::Encode(_) => HumanError {
            message: "The image couldn't be encoded.".into(),
            suggestion: "Try saving in the other output format.".into(),
            severity: Severity::Environment,
        },

        TonwerkError::IntegrityMismatch { .. } => HumanError {
            message: "The original file has changed since it was opened.".into(),
            suggestion: "Use reset to go back to the pristine copy, or open the file again.".into(),
            severity: Severity::ActionRequired,
        },

        TonwerkError::Serialization(_) => HumanError {
            message: "The settings file couldn't be understood.".into(),
            suggestion: "Check the config file is valid JSON.".into(),
            severity: Severity::ActionRequired,
        },
    }
}

fn humanize_io(err: &std::io::Error, verb: &str, participle: &str) -> HumanError {
    match err.kind() {
        std::io::ErrorKind::NotFound => HumanError {
            message: "The file couldn't be found.".into(),
            suggestion: "It may have been moved or deleted. Check the path and try again.".into(),
            severity: Severity::ActionRequired,
        },
        std::io::ErrorKind::PermissionDenied => HumanError {
            message: format!("There's no permission to {verb} that file."),
            suggestion: "Check the file and folder permissions.".into(),
            severity: Severity::Environment,
        },
        _ => HumanError {
            message: format!("The file couldn't be {participle}."),
            suggestion: format!("Try again. If this keeps happening, the disk may be full. ({err})"),
            severity: Severity::Environment,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_magic_is_permanent() {
        let human = humanize_error(&TonwerkError::InvalidMagic { found: *b"\x89PNG" });
        assert_eq!(human.severity, Severity::Permanent);
    }

    #[test]
    fn even_kernel_suggests_neighbours() {
        let human = humanize_error(&TonwerkError::InvalidKernelSize(4));
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.suggestion.contains('3'));
        assert!(human.suggestion.contains('5'));
    }

    #[test]
    fn zero_kernel_suggests_smallest_odd_sizes() {
        let human = humanize_error(&TonwerkError::InvalidKernelSize(0));
        assert_eq!(human.suggestion, "Try 1 or 3 instead of 0.");
    }

    #[test]
    fn io_failures_read_as_sentences() {
        let write = TonwerkError::WriteFailed {
            path: "out.png".into(),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(humanize_error(&write).message, "The file couldn't be written.");

        let io = TonwerkError::Io(std::io::Error::from(std::io::ErrorKind::Interrupted));
        assert_eq!(humanize_error(&io).message, "The file couldn't be accessed.");

        let denied = TonwerkError::WriteFailed {
            path: "out.png".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(humanize_error(&denied).message, "There's no permission to write that file.");
    }

    #[test]
    fn severity_labels_are_distinct() {
        let labels = [
            Severity::ActionRequired.label(),
            Severity::Permanent.label(),
            Severity::Environment.label(),
        ];
        assert_eq!(labels, ["error", "unusable file", "system error"]);
    }

    #[test]
    fn missing_file_is_action_required() {
        let err = TonwerkError::ReadFailed {
            path: "scan.tif".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(humanize_error(&err).severity, Severity::ActionRequired);
    }

    #[test]
    fn parse_failure_names_parameter() {
        let err = TonwerkError::invalid_parameter("gamma", "x", "not a number");
        let human = humanize_error(&err);
        assert!(human.message.contains("gamma"));
    }
}
