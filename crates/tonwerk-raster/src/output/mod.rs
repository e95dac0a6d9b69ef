// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output module — single-channel raster encoding and atomic saves.

pub mod encoder;

pub use encoder::{encode, save, save_original};
