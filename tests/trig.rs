#![cfg(avx2)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vectra::ops::trig::*;

const F32_TOL: f32 = 2e-6;
const F64_TOL: f64 = 1e-13;

fn assert_close_f32(actual: f32, expected: f32, ctx: &str) {
    if expected.is_nan() {
        assert!(actual.is_nan(), "{ctx}: expected NaN, got {actual}");
        return;
    }
    let err = (actual - expected).abs();
    let bound = F32_TOL * expected.abs().max(1.0);
    assert!(err <= bound, "{ctx}: {actual} vs {expected} (err {err:e})");
}

fn assert_close_f64(actual: f64, expected: f64, ctx: &str) {
    if expected.is_nan() {
        assert!(actual.is_nan(), "{ctx}: expected NaN, got {actual}");
        return;
    }
    let err = (actual - expected).abs();
    let bound = F64_TOL * expected.abs().max(1.0);
    assert!(err <= bound, "{ctx}: {actual} vs {expected} (err {err:e})");
}

fn random_f32(n: usize, lo: f32, hi: f32, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(lo..hi)).collect()
}

fn random_f64(n: usize, lo: f64, hi: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(lo..hi)).collect()
}

#[test]
fn sin_cos_accuracy_f32() {
    let src = random_f32(4096, -30.0, 30.0, 1);
    let mut s = vec![0.0f32; src.len()];
    let mut c = vec![0.0f32; src.len()];
    sin_f32(&src, &mut s);
    cos_f32(&src, &mut c);
    for i in 0..src.len() {
        assert_close_f32(s[i], src[i].sin(), &format!("sin({})", src[i]));
        assert_close_f32(c[i], src[i].cos(), &format!("cos({})", src[i]));
    }
}

#[test]
fn sin_cos_accuracy_f64() {
    let src = random_f64(4096, -100.0, 100.0, 2);
    let mut s = vec![0.0f64; src.len()];
    let mut c = vec![0.0f64; src.len()];
    sin_f64(&src, &mut s);
    cos_f64(&src, &mut c);
    for i in 0..src.len() {
        assert_close_f64(s[i], src[i].sin(), &format!("sin({})", src[i]));
        assert_close_f64(c[i], src[i].cos(), &format!("cos({})", src[i]));
    }
}

#[test]
fn sincos_matches_separate_calls() {
    let src = random_f64(257, -50.0, 50.0, 3);
    let mut s1 = vec![0.0f64; src.len()];
    let mut c1 = vec![0.0f64; src.len()];
    let mut s2 = vec![0.0f64; src.len()];
    let mut c2 = vec![0.0f64; src.len()];
    sincos_f64(&src, &mut s1, &mut c1);
    sin_f64(&src, &mut s2);
    cos_f64(&src, &mut c2);
    assert_eq!(s1, s2);
    assert_eq!(c1, c2);
}

#[test]
fn tan_accuracy_avoiding_poles() {
    let src = random_f32(2048, -1.4, 1.4, 4);
    let mut dst = vec![0.0f32; src.len()];
    tan_f32(&src, &mut dst);
    for i in 0..src.len() {
        assert_close_f32(dst[i], src[i].tan(), &format!("tan({})", src[i]));
    }

    let src = random_f64(2048, -1.5, 1.5, 5);
    let mut dst = vec![0.0f64; src.len()];
    tan_f64(&src, &mut dst);
    for i in 0..src.len() {
        assert_close_f64(dst[i], src[i].tan(), &format!("tan({})", src[i]));
    }
}

#[test]
fn inverse_trig_accuracy() {
    let src = random_f32(2048, -0.999, 0.999, 6);
    let mut dst = vec![0.0f32; src.len()];
    asin_f32(&src, &mut dst);
    for i in 0..src.len() {
        assert_close_f32(dst[i], src[i].asin(), &format!("asin({})", src[i]));
    }
    acos_f32(&src, &mut dst);
    for i in 0..src.len() {
        assert_close_f32(dst[i], src[i].acos(), &format!("acos({})", src[i]));
    }

    let src = random_f64(2048, -0.999, 0.999, 7);
    let mut dst = vec![0.0f64; src.len()];
    asin_f64(&src, &mut dst);
    for i in 0..src.len() {
        assert_close_f64(dst[i], src[i].asin(), &format!("asin({})", src[i]));
    }
    acos_f64(&src, &mut dst);
    for i in 0..src.len() {
        assert_close_f64(dst[i], src[i].acos(), &format!("acos({})", src[i]));
    }
}

#[test]
fn atan_accuracy_across_reduction_bands() {
    // Covers all three reduction branches: below 0.66, the middle band,
    // and above tan(3π/8).
    let src = random_f64(2048, -50.0, 50.0, 8);
    let mut dst = vec![0.0f64; src.len()];
    atan_f64(&src, &mut dst);
    for i in 0..src.len() {
        assert_close_f64(dst[i], src[i].atan(), &format!("atan({})", src[i]));
    }

    let src = random_f32(2048, -50.0, 50.0, 9);
    let mut dst = vec![0.0f32; src.len()];
    atan_f32(&src, &mut dst);
    for i in 0..src.len() {
        assert_close_f32(dst[i], src[i].atan(), &format!("atan({})", src[i]));
    }
}

#[test]
fn asin_out_of_domain_is_exactly_zero_both_signs() {
    let src = [2.0f32, -2.0, 1.5, -1000.0, 1.0000001, -1.0000001, 0.5, -0.5];
    let mut dst = [0.0f32; 8];
    asin_f32(&src, &mut dst);
    for i in 0..6 {
        assert_eq!(dst[i].to_bits(), 0.0f32.to_bits(), "asin({})", src[i]);
    }

    let src = [2.0f64, -2.0, 1e6, -1e6];
    let mut dst = [0.0f64; 4];
    asin_f64(&src, &mut dst);
    for i in 0..4 {
        assert_eq!(dst[i].to_bits(), 0.0f64.to_bits(), "asin({})", src[i]);
    }
}

#[test]
fn atan2_special_cases_are_exact() {
    let y32 = [0.0f32, -3.0, 0.0, 3.0, 0.0, 1.0, -1.0, 1.0];
    let x32 = [-5.0f32, 0.0, 0.0, 0.0, 5.0, 1.0, -1.0, -1.0];
    let mut dst = [0.0f32; 8];
    atan2_f32(&y32, &x32, &mut dst);
    assert_eq!(dst[0], std::f32::consts::PI);
    assert_eq!(dst[1], -std::f32::consts::FRAC_PI_2);
    assert_eq!(dst[2], 0.0);
    assert_eq!(dst[3], std::f32::consts::FRAC_PI_2);
    assert_eq!(dst[4], 0.0);
    assert_close_f32(dst[5], 1.0f32.atan2(1.0), "atan2(1,1)");
    assert_close_f32(dst[6], (-1.0f32).atan2(-1.0), "atan2(-1,-1)");
    assert_close_f32(dst[7], 1.0f32.atan2(-1.0), "atan2(1,-1)");

    let y64 = [0.0f64, -3.0, 0.0, 2.0];
    let x64 = [-5.0f64, 0.0, 0.0, -2.0];
    let mut dst = [0.0f64; 4];
    atan2_f64(&y64, &x64, &mut dst);
    assert_eq!(dst[0], std::f64::consts::PI);
    assert_eq!(dst[1], -std::f64::consts::FRAC_PI_2);
    assert_eq!(dst[2], 0.0);
    assert_close_f64(dst[3], 2.0f64.atan2(-2.0), "atan2(2,-2)");
}

#[test]
fn atan2_quadrants_random() {
    let y = random_f64(1024, -10.0, 10.0, 10);
    let x = random_f64(1024, -10.0, 10.0, 11);
    let mut dst = vec![0.0f64; y.len()];
    atan2_f64(&y, &x, &mut dst);
    for i in 0..y.len() {
        assert_close_f64(dst[i], y[i].atan2(x[i]), &format!("atan2({}, {})", y[i], x[i]));
    }
}

#[test]
fn tail_element_is_bit_equal_to_std() {
    // One element past a full lane group lands in the scalar tail.
    let n32 = 8 + 1;
    let src: Vec<f32> = (0..n32).map(|i| 0.37 * i as f32 - 1.1).collect();
    let mut dst = vec![0.0f32; n32];
    sin_f32(&src, &mut dst);
    assert_eq!(dst[n32 - 1].to_bits(), src[n32 - 1].sin().to_bits());

    let n64 = 4 + 1;
    let src: Vec<f64> = (0..n64).map(|i| 0.37 * i as f64 - 1.1).collect();
    let mut dst = vec![0.0f64; n64];
    cos_f64(&src, &mut dst);
    assert_eq!(dst[n64 - 1].to_bits(), src[n64 - 1].cos().to_bits());
}

#[test]
fn aligned_and_unaligned_paths_are_bit_identical() {
    #[repr(align(32))]
    struct Aligned([f32; 64]);

    let mut src_a = Aligned([0.0f32; 64]);
    let mut rng = StdRng::seed_from_u64(12);
    for x in src_a.0.iter_mut() {
        *x = rng.random_range(-20.0..20.0);
    }

    // Same values at an offset that breaks 32-byte alignment.
    let mut shifted = [0.0f32; 65];
    shifted[1..].copy_from_slice(&src_a.0);

    let mut dst_a = Aligned([0.0f32; 64]);
    let mut dst_u = [0.0f32; 64];
    sin_f32(&src_a.0, &mut dst_a.0);
    sin_f32(&shifted[1..], &mut dst_u);

    for i in 0..64 {
        assert_eq!(dst_a.0[i].to_bits(), dst_u[i].to_bits(), "lane {i}");
    }
}

#[test]
fn parallel_matches_serial() {
    let src = random_f32(100_003, -25.0, 25.0, 13);
    let mut serial = vec![0.0f32; src.len()];
    let mut parallel = vec![0.0f32; src.len()];
    sin_f32(&src, &mut serial);
    par_sin_f32(&src, &mut parallel);
    for i in 0..src.len() {
        assert_eq!(serial[i].to_bits(), parallel[i].to_bits(), "index {i}");
    }

    let src = random_f64(50_001, -25.0, 25.0, 14);
    let mut serial = vec![0.0f64; src.len()];
    let mut parallel = vec![0.0f64; src.len()];
    atan_f64(&src, &mut serial);
    par_atan_f64(&src, &mut parallel);
    for i in 0..src.len() {
        assert_eq!(serial[i].to_bits(), parallel[i].to_bits(), "index {i}");
    }
}

#[test]
fn empty_slices_are_a_noop() {
    let src: [f32; 0] = [];
    let mut dst: [f32; 0] = [];
    sin_f32(&src, &mut dst);
    tan_f32(&src, &mut dst);
}
