// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the tonwerk-raster transform engine: the box blur
// at a few kernel sizes and histogram equalization, on a synthetic
// 512x512 raster.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use tonwerk_raster::{RasterImage, Transform};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Deterministic pseudo-noise so every run sees the same histogram.
fn synthetic_raster(width: u32, height: u32) -> RasterImage {
    let pixels = (0..height)
        .flat_map(|y| (0..width).map(move |x| ((x * 37 + y * 91 + x * y) % 256) as u8))
        .collect();
    RasterImage::from_pixels(width, height, pixels).expect("synthetic raster dimensions")
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Blur cost should stay flat as the kernel grows (summed-area table).
fn bench_blur(c: &mut Criterion) {
    let raster = synthetic_raster(512, 512);
    let mut group = c.benchmark_group("blur (512x512)");
    for level in [3u32, 9, 31] {
        group.bench_with_input(BenchmarkId::from_parameter(level), &level, |b, &level| {
            b.iter(|| {
                let mut working = raster.clone();
                Transform::Blur { level }
                    .apply(black_box(&mut working))
                    .expect("odd kernel");
                black_box(working);
            });
        });
    }
    group.finish();
}

fn bench_equalize(c: &mut Criterion) {
    let raster = synthetic_raster(512, 512);
    c.bench_function("histogram_equalization (512x512)", |b| {
        b.iter(|| {
            let mut working = raster.clone();
            Transform::HistogramEqualization
                .apply(black_box(&mut working))
                .expect("equalization");
            black_box(working);
        });
    });
}

criterion_group!(benches, bench_blur, bench_equalize);
criterion_main!(benches);
