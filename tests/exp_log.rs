#![cfg(avx2)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vectra::ops::exp::*;

fn assert_rel_f32(actual: f32, expected: f32, tol: f32, ctx: &str) {
    if expected.is_nan() {
        assert!(actual.is_nan(), "{ctx}: expected NaN, got {actual}");
        return;
    }
    let err = (actual - expected).abs();
    let bound = tol * expected.abs().max(f32::MIN_POSITIVE);
    assert!(err <= bound, "{ctx}: {actual} vs {expected} (err {err:e})");
}

fn assert_rel_f64(actual: f64, expected: f64, tol: f64, ctx: &str) {
    if expected.is_nan() {
        assert!(actual.is_nan(), "{ctx}: expected NaN, got {actual}");
        return;
    }
    let err = (actual - expected).abs();
    let bound = tol * expected.abs().max(f64::MIN_POSITIVE);
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
fn exp_accuracy() {
    let src = random_f32(4096, -80.0, 80.0, 20);
    let mut dst = vec![0.0f32; src.len()];
    exp_f32(&src, &mut dst);
    for i in 0..src.len() {
        assert_rel_f32(dst[i], src[i].exp(), 2e-6, &format!("exp({})", src[i]));
    }

    let src = random_f64(4096, -600.0, 600.0, 21);
    let mut dst = vec![0.0f64; src.len()];
    exp_f64(&src, &mut dst);
    for i in 0..src.len() {
        assert_rel_f64(dst[i], src[i].exp(), 1e-13, &format!("exp({})", src[i]));
    }
}

#[test]
fn exp_f32_clamps_instead_of_overflowing() {
    let src = [1000.0f32, -1000.0, 88.0, -88.0];
    let mut dst = [0.0f32; 4];
    exp_f32(&src, &mut dst);
    assert!(dst[0].is_finite());
    assert!(dst[1] >= 0.0 && dst[1] < 1e-37);
    assert_rel_f32(dst[2], 88.0f32.exp(), 2e-6, "exp(88)");
    assert_rel_f32(dst[3], (-88.0f32).exp(), 2e-6, "exp(-88)");

    // Overflowing input must saturate finite on the tail too.
    let src = [1000.0f32; 9];
    let mut dst = [0.0f32; 9];
    exp_f32(&src, &mut dst);
    for (i, v) in dst.iter().enumerate() {
        assert!(v.is_finite(), "index {i}: {v}");
    }
}

#[test]
fn ln_accuracy_near_and_far_from_one() {
    let mut src = random_f32(2048, 1e-30, 1e30, 22);
    src.extend(random_f32(2048, 0.5, 2.0, 23));
    let mut dst = vec![0.0f32; src.len()];
    ln_f32(&src, &mut dst);
    for i in 0..src.len() {
        // Near 1 the true log goes through 0, so bound the absolute error.
        let err = (dst[i] - src[i].ln()).abs();
        assert!(err <= 2e-6 * src[i].ln().abs().max(1.0), "ln({}): {err:e}", src[i]);
    }

    let mut src = random_f64(2048, 1e-300, 1e300, 24);
    src.extend(random_f64(2048, 0.5, 2.0, 25));
    let mut dst = vec![0.0f64; src.len()];
    ln_f64(&src, &mut dst);
    for i in 0..src.len() {
        let err = (dst[i] - src[i].ln()).abs();
        assert!(err <= 1e-13 * src[i].ln().abs().max(1.0), "ln({}): {err:e}", src[i]);
    }
}

#[test]
fn ln_of_non_positive_is_nan() {
    let src = [-1.0f32, -1e30, 0.5, 3.0];
    let mut dst = [0.0f32; 4];
    ln_f32(&src, &mut dst);
    assert!(dst[0].is_nan());
    assert!(dst[1].is_nan());
    assert!(dst[2].is_finite());
    assert!(dst[3].is_finite());

    let src = [-1.0f64, -1e300, 0.5, 3.0];
    let mut dst = [0.0f64; 4];
    ln_f64(&src, &mut dst);
    assert!(dst[0].is_nan());
    assert!(dst[1].is_nan());
    assert!(dst[2].is_finite());
    assert!(dst[3].is_finite());
}

#[test]
fn ln_of_zero_is_nan_on_both_paths() {
    // Zeros in the lane positions and in the tail must agree.
    let mut src = [1.0f32; 9];
    src[0] = 0.0;
    src[3] = -0.0;
    src[8] = 0.0;
    let mut dst = [0.0f32; 9];
    ln_f32(&src, &mut dst);
    assert!(dst[0].is_nan());
    assert!(dst[3].is_nan());
    assert!(dst[8].is_nan());

    let mut src = [1.0f64; 5];
    src[0] = 0.0;
    src[4] = -0.0;
    let mut dst = [0.0f64; 5];
    ln_f64(&src, &mut dst);
    assert!(dst[0].is_nan());
    assert!(dst[4].is_nan());

    let mut src = [1.0f32; 9];
    src[2] = 0.0;
    src[8] = 0.0;
    let mut dst = [0.0f32; 9];
    log10_f32(&src, &mut dst);
    assert!(dst[2].is_nan());
    assert!(dst[8].is_nan());
}

#[test]
fn log10_accuracy() {
    let src = random_f32(2048, 1e-20, 1e20, 26);
    let mut dst = vec![0.0f32; src.len()];
    log10_f32(&src, &mut dst);
    for i in 0..src.len() {
        let err = (dst[i] - src[i].log10()).abs();
        assert!(
            err <= 2e-6 * src[i].log10().abs().max(1.0),
            "log10({}): {err:e}",
            src[i]
        );
    }
}

#[test]
fn pow_identity_and_square() {
    let x = random_f64(1024, 1e-3, 1e3, 27);
    let ones = vec![1.0f64; x.len()];
    let twos = vec![2.0f64; x.len()];
    let mut dst = vec![0.0f64; x.len()];

    pow_f64(&x, &ones, &mut dst);
    for i in 0..x.len() {
        assert_rel_f64(dst[i], x[i], 1e-12, &format!("pow({}, 1)", x[i]));
    }

    pow_f64(&x, &twos, &mut dst);
    for i in 0..x.len() {
        assert_rel_f64(dst[i], x[i] * x[i], 1e-12, &format!("pow({}, 2)", x[i]));
    }

    let x = random_f32(1024, 1e-3, 1e3, 28);
    let ones = vec![1.0f32; x.len()];
    let mut dst = vec![0.0f32; x.len()];
    pow_f32(&x, &ones, &mut dst);
    for i in 0..x.len() {
        assert_rel_f32(dst[i], x[i], 1e-5, &format!("pow({}, 1)", x[i]));
    }
}

#[test]
fn pow_random_against_std() {
    let x = random_f64(1024, 0.1, 50.0, 29);
    let y = random_f64(1024, -4.0, 4.0, 30);
    let mut dst = vec![0.0f64; x.len()];
    pow_f64(&x, &y, &mut dst);
    for i in 0..x.len() {
        assert_rel_f64(dst[i], x[i].powf(y[i]), 1e-12, &format!("pow({}, {})", x[i], y[i]));
    }
}

#[test]
fn tail_element_is_bit_equal_to_std() {
    let src: Vec<f32> = (0..9).map(|i| 0.21 * i as f32 + 0.1).collect();
    let mut dst = vec![0.0f32; 9];
    ln_f32(&src, &mut dst);
    assert_eq!(dst[8].to_bits(), src[8].ln().to_bits());

    let src: Vec<f64> = (0..5).map(|i| 0.21 * i as f64 - 0.5).collect();
    let mut dst = vec![0.0f64; 5];
    exp_f64(&src, &mut dst);
    assert_eq!(dst[4].to_bits(), src[4].exp().to_bits());
}

#[test]
fn parallel_matches_serial() {
    let src = random_f64(80_005, 1e-3, 1e3, 31);
    let mut serial = vec![0.0f64; src.len()];
    let mut parallel = vec![0.0f64; src.len()];
    ln_f64(&src, &mut serial);
    par_ln_f64(&src, &mut parallel);
    for i in 0..src.len() {
        assert_eq!(serial[i].to_bits(), parallel[i].to_bits(), "index {i}");
    }
}
