// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// tonwerk-raster — Grayscale raster engine for Tonwerk.
//
// Decodes the minimal 8-bit grayscale TIFF subset, holds the working raster
// next to a pristine original, applies tonal, histogram, and blur transforms
// in place, and writes the result as PNG or PGM.

pub mod container;
pub mod integrity;
pub mod output;
pub mod raster;
pub mod transform;

// Re-export the primary types so callers can use `tonwerk_raster::RasterImage` etc.
pub use container::decode;
pub use raster::RasterImage;
pub use transform::Transform;
