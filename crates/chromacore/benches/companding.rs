//! Companding Benchmarks
//!
//! Scalar per-channel calls against the multiversioned slice helpers.

use chromacore::companding::{compress_slice, expand_slice};
use chromacore::{Companding, Rec709Companding, Rec2020Companding, SRgbCompanding};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn generate_channels(count: usize) -> Vec<f32> {
    (0..count).map(|i| (i % 4096) as f32 / 4095.0).collect()
}

fn bench_scalar(c: &mut Criterion) {
    let mut group = c.benchmark_group("companding_scalar");

    group.bench_function("rec709_expand", |b| {
        b.iter(|| Rec709Companding.expand(black_box(0.42)))
    });
    group.bench_function("rec709_compress", |b| {
        b.iter(|| Rec709Companding.compress(black_box(0.42)))
    });
    group.bench_function("srgb_expand", |b| {
        b.iter(|| SRgbCompanding.expand(black_box(0.42)))
    });

    group.finish();
}

fn bench_slices(c: &mut Criterion) {
    let mut group = c.benchmark_group("companding_slice");

    for size in [1024usize, 65536, 1 << 20] {
        let input = generate_channels(size);
        let mut buf = input.clone();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("rec709_expand", size), &size, |b, _| {
            b.iter(|| {
                buf.copy_from_slice(&input);
                expand_slice(&Rec709Companding, black_box(&mut buf));
            })
        });

        group.bench_with_input(BenchmarkId::new("rec2020_roundtrip", size), &size, |b, _| {
            b.iter(|| {
                buf.copy_from_slice(&input);
                compress_slice(&Rec2020Companding, black_box(&mut buf));
                expand_slice(&Rec2020Companding, black_box(&mut buf));
            })
        });

        // Per-element loop without dispatch for comparison
        group.bench_with_input(BenchmarkId::new("srgb_expand_loop", size), &size, |b, _| {
            b.iter(|| {
                buf.copy_from_slice(&input);
                for v in black_box(&mut buf).iter_mut() {
                    *v = SRgbCompanding.expand(*v);
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scalar, bench_slices);
criterion_main!(benches);
