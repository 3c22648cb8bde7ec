#![cfg(avx2)]

use num::complex::{Complex32, Complex64};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vectra::ops::cplx::*;

fn random_c64(n: usize, seed: u64) -> Vec<Complex64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Complex64::new(rng.random_range(-5.0..5.0), rng.random_range(-5.0..5.0)))
        .collect()
}

#[test]
fn pow_c64_matches_num() {
    let x: Vec<Complex64> = random_c64(1027, 40)
        .into_iter()
        // Keep the base away from the origin, where log(x) blows up.
        .map(|c| if c.norm() < 0.1 { c + Complex64::new(1.0, 0.0) } else { c })
        .collect();
    let y = random_c64(x.len(), 41);
    let mut dst = vec![Complex64::new(0.0, 0.0); x.len()];

    pow_c64(&x, &y, &mut dst);
    for i in 0..x.len() {
        let expected = x[i].powc(y[i]);
        let err = (dst[i] - expected).norm();
        assert!(
            err <= 1e-10 * expected.norm().max(1.0),
            "({})^({}): {} vs {expected}",
            x[i],
            y[i],
            dst[i]
        );
    }
}

#[test]
fn pow_c64_real_base_real_exponent() {
    let x: Vec<Complex64> = (1..9).map(|i| Complex64::new(i as f64, 0.0)).collect();
    let y = vec![Complex64::new(2.0, 0.0); x.len()];
    let mut dst = vec![Complex64::new(0.0, 0.0); x.len()];
    pow_c64(&x, &y, &mut dst);
    for i in 0..x.len() {
        let expected = (x[i].re * x[i].re, 0.0);
        assert!((dst[i].re - expected.0).abs() <= 1e-10 * expected.0);
        assert!(dst[i].im.abs() <= 1e-10 * expected.0);
    }
}

#[test]
fn magnitude_matches_scalar() {
    let mut rng = StdRng::seed_from_u64(42);
    let re: Vec<f64> = (0..515).map(|_| rng.random_range(-100.0..100.0)).collect();
    let im: Vec<f64> = (0..515).map(|_| rng.random_range(-100.0..100.0)).collect();
    let mut dst = vec![0.0f64; re.len()];
    magnitude_f64(&re, &im, &mut dst);
    for i in 0..re.len() {
        let expected = re[i].mul_add(re[i], im[i] * im[i]).sqrt();
        assert_eq!(dst[i].to_bits(), expected.to_bits(), "index {i}");
    }

    let re: Vec<f32> = (0..261).map(|_| rng.random_range(-100.0f32..100.0)).collect();
    let im: Vec<f32> = (0..261).map(|_| rng.random_range(-100.0f32..100.0)).collect();
    let mut dst = vec![0.0f32; re.len()];
    magnitude_f32(&re, &im, &mut dst);
    for i in 0..re.len() {
        let expected = re[i].mul_add(re[i], im[i] * im[i]).sqrt();
        assert_eq!(dst[i].to_bits(), expected.to_bits(), "index {i}");
    }
}

#[test]
fn atan2_interleaved_matches_arg() {
    let xy = random_c64(333, 43);
    let mut dst = vec![0.0f64; xy.len()];
    atan2_interleaved_f64(&xy, &mut dst);
    for i in 0..xy.len() {
        let expected = xy[i].im.atan2(xy[i].re);
        let err = (dst[i] - expected).abs();
        assert!(err <= 1e-13, "arg({}): {} vs {expected}", xy[i], dst[i]);
    }
}

#[test]
fn interleave_roundtrip_f64_is_exact() {
    let mut rng = StdRng::seed_from_u64(44);
    let re: Vec<f64> = (0..101).map(|_| rng.random_range(-1.0..1.0)).collect();
    let im: Vec<f64> = (0..101).map(|_| rng.random_range(-1.0..1.0)).collect();

    let mut packed = vec![Complex64::new(0.0, 0.0); re.len()];
    interleave_f64(&re, &im, &mut packed);
    for i in 0..re.len() {
        assert_eq!(packed[i], Complex64::new(re[i], im[i]), "index {i}");
    }

    let mut re2 = vec![0.0f64; re.len()];
    let mut im2 = vec![0.0f64; re.len()];
    deinterleave_f64(&packed, &mut re2, &mut im2);
    assert_eq!(re, re2);
    assert_eq!(im, im2);
}

#[test]
fn interleave_roundtrip_f32_is_exact() {
    let mut rng = StdRng::seed_from_u64(45);
    let re: Vec<f32> = (0..203).map(|_| rng.random_range(-1.0f32..1.0)).collect();
    let im: Vec<f32> = (0..203).map(|_| rng.random_range(-1.0f32..1.0)).collect();

    let mut packed = vec![Complex32::new(0.0, 0.0); re.len()];
    interleave_f32(&re, &im, &mut packed);
    for i in 0..re.len() {
        assert_eq!(packed[i], Complex32::new(re[i], im[i]), "index {i}");
    }

    let mut re2 = vec![0.0f32; re.len()];
    let mut im2 = vec![0.0f32; re.len()];
    deinterleave_f32(&packed, &mut re2, &mut im2);
    assert_eq!(re, re2);
    assert_eq!(im, im2);
}
