use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(avx2)]
use vectra::ops::trig::{par_sin_f32, sin_f32, sincos_f64};

const SIZES: [usize; 3] = [1 << 12, 1 << 16, 1 << 20];

fn bench_sin_f32(c: &mut Criterion) {
    let mut group = c.benchmark_group("sin_f32");
    let mut rng = StdRng::seed_from_u64(7);

    for size in SIZES {
        let src: Vec<f32> = (0..size).map(|_| rng.random_range(-30.0f32..30.0)).collect();
        let mut dst = vec![0.0f32; size];
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("scalar", size), &src, |b, src| {
            b.iter(|| {
                for (d, s) in dst.iter_mut().zip(src.iter()) {
                    *d = s.sin();
                }
            })
        });

        #[cfg(avx2)]
        group.bench_with_input(BenchmarkId::new("simd", size), &src, |b, src| {
            b.iter(|| sin_f32(src, &mut dst))
        });

        #[cfg(avx2)]
        group.bench_with_input(BenchmarkId::new("parallel", size), &src, |b, src| {
            b.iter(|| par_sin_f32(src, &mut dst))
        });
    }
    group.finish();
}

fn bench_sincos_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("sincos_f64");
    let mut rng = StdRng::seed_from_u64(8);

    for size in SIZES {
        let src: Vec<f64> = (0..size).map(|_| rng.random_range(-30.0f64..30.0)).collect();
        let mut sin_dst = vec![0.0f64; size];
        let mut cos_dst = vec![0.0f64; size];
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("scalar", size), &src, |b, src| {
            b.iter(|| {
                for i in 0..src.len() {
                    let (s, c) = src[i].sin_cos();
                    sin_dst[i] = s;
                    cos_dst[i] = c;
                }
            })
        });

        #[cfg(avx2)]
        group.bench_with_input(BenchmarkId::new("simd", size), &src, |b, src| {
            b.iter(|| sincos_f64(src, &mut sin_dst, &mut cos_dst))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sin_f32, bench_sincos_f64);
criterion_main!(benches);
