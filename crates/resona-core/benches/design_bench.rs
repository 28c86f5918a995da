//! Criterion benchmarks for resona-core coefficient design
//!
//! Run with: cargo bench -p resona-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use resona_core::{BiquadDesign, Effect, FilterType, SampleRateHub};

const SAMPLE_RATE: f64 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE;
            (2.0 * std::f64::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("BiquadDesign");
    let hub = SampleRateHub::new(SAMPLE_RATE);

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("process", block_size),
            &block_size,
            |b, _| {
                let mut filter = BiquadDesign::new(&hub);
                filter
                    .set_filter_type(FilterType::LowPass, 1000.0, 0.707)
                    .unwrap();
                b.iter(|| {
                    for &sample in &input {
                        black_box(filter.process(black_box(sample)));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_design(c: &mut Criterion) {
    let mut group = c.benchmark_group("Design");
    let hub = SampleRateHub::new(SAMPLE_RATE);
    let mut filter = BiquadDesign::new(&hub);

    group.bench_function("set_resonance", |b| {
        b.iter(|| {
            filter
                .set_resonance(black_box(1000.0), black_box(0.99), true)
                .unwrap();
        });
    });

    group.bench_function("set_notch", |b| {
        b.iter(|| {
            filter.set_notch(black_box(60.0), black_box(0.999)).unwrap();
        });
    });

    for kind in FilterType::ALL {
        group.bench_with_input(
            BenchmarkId::new("set_filter_type", format!("{kind:?}")),
            &kind,
            |b, &kind| {
                b.iter(|| {
                    filter
                        .set_filter_type(kind, black_box(2000.0), black_box(0.707))
                        .unwrap();
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_process, bench_design);
criterion_main!(benches);
