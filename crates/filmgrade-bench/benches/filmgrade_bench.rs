//! Benchmarks for filmgrade operators.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use filmgrade_core::Image;
use filmgrade_lut::build_channel_lut;
use filmgrade_ops::preset::PresetRegistry;
use filmgrade_ops::{apply, FilmStock, OpParams, Operator};

fn frame(width: u32, height: u32) -> Image {
    let len = (width * height * 3) as usize;
    let data = (0..len).map(|i| (i * 37 % 256) as u8).collect();
    Image::from_raw(width, height, 3, data).expect("valid frame")
}

const SIZES: [(u32, u32); 3] = [(320, 240), (1280, 720), (1920, 1080)];

/// LUT construction and application.
fn bench_lut(c: &mut Criterion) {
    let mut group = c.benchmark_group("lut");

    group.bench_function("build_channel_lut", |b| {
        b.iter(|| build_channel_lut(|i| 0.95 * black_box(i) as f64 + 12.0))
    });
    group.bench_function("registry_new", |b| b.iter(PresetRegistry::new));

    let registry = PresetRegistry::new();
    for (w, h) in SIZES {
        let img = frame(w, h);
        group.throughput(Throughput::Elements((w * h) as u64));
        group.bench_with_input(BenchmarkId::new("portra400", format!("{w}x{h}")), &img, |b, img| {
            b.iter(|| registry.apply(black_box(img), FilmStock::KodakPortra400))
        });
    }

    group.finish();
}

/// Pixel filters and convolution.
fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");
    group.sample_size(20);

    let params = OpParams::default();
    for (w, h) in SIZES {
        let img = frame(w, h);
        let id = format!("{w}x{h}");
        group.throughput(Throughput::Elements((w * h) as u64));

        for op in [Operator::Grayscale, Operator::Sepia, Operator::Blur, Operator::EdgeDetection] {
            group.bench_with_input(BenchmarkId::new(op.name(), &id), &img, |b, img| {
                b.iter(|| apply(op, black_box(img), &params))
            });
        }
    }

    group.finish();
}

/// Full vintage chain with a fixed seed.
fn bench_vintage(c: &mut Criterion) {
    let mut group = c.benchmark_group("vintage");
    group.sample_size(10);

    let params = OpParams::seeded(7);
    for (w, h) in SIZES {
        let img = frame(w, h);
        group.throughput(Throughput::Elements((w * h) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format!("{w}x{h}")), &img, |b, img| {
            b.iter(|| apply(Operator::VintageEffect, black_box(img), &params))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lut, bench_filters, bench_vintage);
criterion_main!(benches);
