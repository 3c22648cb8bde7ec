//! Trigonometric slice operations.
//!
//! All functions compute elementwise over `src` into the caller-provided
//! `dst`. Accuracy follows the underlying kernels: a few ULP over the
//! validated argument range (|x| up to ~10^4 for f32 trig, ~2^40 for f64).
//! The scalar tail uses the `std` functions, so trailing elements are
//! bit-equal to `std`.

use crate::ops::dispatch;
use crate::simd::avx2::{math, math64};

/// `asin` with the clamped domain policy: any `|x| > 1.0` yields exactly
/// `0.0`, matching the lane kernels on both the vector path and the tail.
#[inline(always)]
fn asin_scalar_f32(x: f32) -> f32 {
    if x.abs() > 1.0 {
        0.0
    } else {
        x.asin()
    }
}

#[inline(always)]
fn asin_scalar_f64(x: f64) -> f64 {
    if x.abs() > 1.0 {
        0.0
    } else {
        x.asin()
    }
}

#[inline(always)]
fn acos_scalar_f32(x: f32) -> f32 {
    std::f32::consts::FRAC_PI_2 - asin_scalar_f32(x)
}

#[inline(always)]
fn acos_scalar_f64(x: f64) -> f64 {
    std::f64::consts::FRAC_PI_2 - asin_scalar_f64(x)
}

/// Elementwise sine.
pub fn sin_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::unary_f32(src, dst, |v| unsafe { math::_mm256_sin_ps(v.elements) }.into(), f32::sin);
}

/// Elementwise cosine.
pub fn cos_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::unary_f32(src, dst, |v| unsafe { math::_mm256_cos_ps(v.elements) }.into(), f32::cos);
}

/// Sine and cosine in one pass, sharing the range reduction.
pub fn sincos_f32(src: &[f32], sin_dst: &mut [f32], cos_dst: &mut [f32]) {
    dispatch::sincos_f32(
        src,
        sin_dst,
        cos_dst,
        |v| {
            let (s, c) = unsafe { math::_mm256_sincos_ps(v.elements) };
            (s.into(), c.into())
        },
        f32::sin_cos,
    );
}

/// Elementwise tangent.
pub fn tan_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::unary_f32(src, dst, |v| unsafe { math::_mm256_tan_ps(v.elements) }.into(), f32::tan);
}

/// Elementwise arcsine. Out-of-domain inputs (`|x| > 1`) produce `0.0`.
pub fn asin_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::unary_f32(
        src,
        dst,
        |v| unsafe { math::_mm256_asin_ps(v.elements) }.into(),
        asin_scalar_f32,
    );
}

/// Elementwise arccosine. Out-of-domain inputs produce `π/2`.
pub fn acos_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::unary_f32(
        src,
        dst,
        |v| unsafe { math::_mm256_acos_ps(v.elements) }.into(),
        acos_scalar_f32,
    );
}

/// Elementwise arctangent.
pub fn atan_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::unary_f32(src, dst, |v| unsafe { math::_mm256_atan_ps(v.elements) }.into(), f32::atan);
}

/// Elementwise two-argument arctangent of `y[i], x[i]`.
///
/// The zero-argument cases are exact: `atan2(0, -x) = π`, `atan2(±y, 0) =
/// ±π/2`, `atan2(0, 0) = 0`.
pub fn atan2_f32(y: &[f32], x: &[f32], dst: &mut [f32]) {
    dispatch::binary_f32(
        y,
        x,
        dst,
        |vy, vx| unsafe { math::_mm256_atan2_ps(vy.elements, vx.elements) }.into(),
        f32::atan2,
    );
}

/// Elementwise sine (f64).
pub fn sin_f64(src: &[f64], dst: &mut [f64]) {
    dispatch::unary_f64(src, dst, |v| unsafe { math64::_mm256_sin_pd(v.elements) }.into(), f64::sin);
}

/// Elementwise cosine (f64).
pub fn cos_f64(src: &[f64], dst: &mut [f64]) {
    dispatch::unary_f64(src, dst, |v| unsafe { math64::_mm256_cos_pd(v.elements) }.into(), f64::cos);
}

/// Sine and cosine in one pass (f64).
pub fn sincos_f64(src: &[f64], sin_dst: &mut [f64], cos_dst: &mut [f64]) {
    dispatch::sincos_f64(
        src,
        sin_dst,
        cos_dst,
        |v| {
            let (s, c) = unsafe { math64::_mm256_sincos_pd(v.elements) };
            (s.into(), c.into())
        },
        f64::sin_cos,
    );
}

/// Elementwise tangent (f64).
pub fn tan_f64(src: &[f64], dst: &mut [f64]) {
    dispatch::unary_f64(src, dst, |v| unsafe { math64::_mm256_tan_pd(v.elements) }.into(), f64::tan);
}

/// Elementwise arcsine (f64). Out-of-domain inputs produce `0.0`.
pub fn asin_f64(src: &[f64], dst: &mut [f64]) {
    dispatch::unary_f64(
        src,
        dst,
        |v| unsafe { math64::_mm256_asin_pd(v.elements) }.into(),
        asin_scalar_f64,
    );
}

/// Elementwise arccosine (f64).
pub fn acos_f64(src: &[f64], dst: &mut [f64]) {
    dispatch::unary_f64(
        src,
        dst,
        |v| unsafe { math64::_mm256_acos_pd(v.elements) }.into(),
        acos_scalar_f64,
    );
}

/// Elementwise arctangent (f64).
pub fn atan_f64(src: &[f64], dst: &mut [f64]) {
    dispatch::unary_f64(src, dst, |v| unsafe { math64::_mm256_atan_pd(v.elements) }.into(), f64::atan);
}

/// Elementwise two-argument arctangent (f64).
pub fn atan2_f64(y: &[f64], x: &[f64], dst: &mut [f64]) {
    dispatch::binary_f64(
        y,
        x,
        dst,
        |vy, vx| unsafe { math64::_mm256_atan2_pd(vy.elements, vx.elements) }.into(),
        f64::atan2,
    );
}

/// Parallel [`sin_f32`].
pub fn par_sin_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::par_unary_f32(src, dst, |v| unsafe { math::_mm256_sin_ps(v.elements) }.into(), f32::sin);
}

/// Parallel [`cos_f32`].
pub fn par_cos_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::par_unary_f32(src, dst, |v| unsafe { math::_mm256_cos_ps(v.elements) }.into(), f32::cos);
}

/// Parallel [`tan_f32`].
pub fn par_tan_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::par_unary_f32(src, dst, |v| unsafe { math::_mm256_tan_ps(v.elements) }.into(), f32::tan);
}

/// Parallel [`asin_f32`].
pub fn par_asin_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::par_unary_f32(
        src,
        dst,
        |v| unsafe { math::_mm256_asin_ps(v.elements) }.into(),
        asin_scalar_f32,
    );
}

/// Parallel [`acos_f32`].
pub fn par_acos_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::par_unary_f32(
        src,
        dst,
        |v| unsafe { math::_mm256_acos_ps(v.elements) }.into(),
        acos_scalar_f32,
    );
}

/// Parallel [`atan_f32`].
pub fn par_atan_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::par_unary_f32(src, dst, |v| unsafe { math::_mm256_atan_ps(v.elements) }.into(), f32::atan);
}

/// Parallel [`sin_f64`].
pub fn par_sin_f64(src: &[f64], dst: &mut [f64]) {
    dispatch::par_unary_f64(src, dst, |v| unsafe { math64::_mm256_sin_pd(v.elements) }.into(), f64::sin);
}

/// Parallel [`cos_f64`].
pub fn par_cos_f64(src: &[f64], dst: &mut [f64]) {
    dispatch::par_unary_f64(src, dst, |v| unsafe { math64::_mm256_cos_pd(v.elements) }.into(), f64::cos);
}

/// Parallel [`tan_f64`].
pub fn par_tan_f64(src: &[f64], dst: &mut [f64]) {
    dispatch::par_unary_f64(src, dst, |v| unsafe { math64::_mm256_tan_pd(v.elements) }.into(), f64::tan);
}

/// Parallel [`asin_f64`].
pub fn par_asin_f64(src: &[f64], dst: &mut [f64]) {
    dispatch::par_unary_f64(
        src,
        dst,
        |v| unsafe { math64::_mm256_asin_pd(v.elements) }.into(),
        asin_scalar_f64,
    );
}

/// Parallel [`acos_f64`].
pub fn par_acos_f64(src: &[f64], dst: &mut [f64]) {
    dispatch::par_unary_f64(
        src,
        dst,
        |v| unsafe { math64::_mm256_acos_pd(v.elements) }.into(),
        acos_scalar_f64,
    );
}

/// Parallel [`atan_f64`].
pub fn par_atan_f64(src: &[f64], dst: &mut [f64]) {
    dispatch::par_unary_f64(src, dst, |v| unsafe { math64::_mm256_atan_pd(v.elements) }.into(), f64::atan);
}
