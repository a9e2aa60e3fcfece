use criterion::{black_box, criterion_group, criterion_main, Criterion};
use okpack::PackedColor;

pub fn run_benchmarks(c: &mut Criterion) {
    let colors: Vec<PackedColor> = (0..1_024_u32)
        .map(|index| PackedColor::from_rgba8888(index.wrapping_mul(0x9E37_79B9) | 0xff))
        .collect();

    let mut group = c.benchmark_group("packed-color");

    group.bench_function("from-rgba8888", |b| {
        b.iter(|| {
            for index in 0..1_024_u32 {
                black_box(PackedColor::from_rgba8888(
                    black_box(index.wrapping_mul(0x9E37_79B9) | 0xff),
                ));
            }
        })
    });

    group.bench_function("to-rgba8888", |b| {
        b.iter(|| {
            for color in &colors {
                black_box(black_box(color).to_rgba8888());
            }
        })
    });

    group.bench_function("in-gamut", |b| {
        b.iter(|| {
            for color in &colors {
                black_box(black_box(color).in_gamut());
            }
        })
    });

    group.bench_function("limit-to-gamut", |b| {
        b.iter(|| {
            for color in &colors {
                black_box(black_box(color).limit_to_gamut());
            }
        })
    });

    group.bench_function("enrich", |b| {
        b.iter(|| {
            for color in &colors {
                black_box(black_box(color).enrich(0.5));
            }
        })
    });

    group.bench_function("random-edit", |b| {
        b.iter(|| {
            for (seed, color) in colors.iter().enumerate() {
                black_box(black_box(color).random_edit(seed as u64, 0.05));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, run_benchmarks);
criterion_main!(benches);
