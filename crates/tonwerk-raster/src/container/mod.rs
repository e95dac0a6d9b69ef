// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Container module — decoding of the minimal grayscale TIFF subset.

pub mod decoder;

pub use decoder::{DecodedContainer, DirectoryEntry, decode};
