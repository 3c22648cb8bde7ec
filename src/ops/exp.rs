//! Exponential and logarithmic slice operations.
//!
//! Validated domains: `exp_f32` clamps its argument to ±88.376, `exp_f64`
//! expects |x| ≤ 708; the logarithms return NaN for any input ≤ 0. Both
//! policies hold on the vector path and the scalar tail alike.
//! `pow` composes `exp(y·ln(x))` and therefore requires `x > 0`.

use crate::ops::dispatch;
use crate::simd::avx2::{math, math64};

/// `exp` with the lane kernel's clamped range, so tail elements saturate
/// to the same finite values instead of overflowing to infinity.
#[inline(always)]
fn exp_scalar_f32(x: f32) -> f32 {
    x.clamp(math::EXP_LO, math::EXP_HI).exp()
}

/// `ln` with the lane kernel's domain policy: any `x <= 0.0` (including
/// `0.0` itself) yields NaN on both the vector path and the tail.
#[inline(always)]
fn ln_scalar_f32(x: f32) -> f32 {
    if x <= 0.0 {
        f32::NAN
    } else {
        x.ln()
    }
}

#[inline(always)]
fn ln_scalar_f64(x: f64) -> f64 {
    if x <= 0.0 {
        f64::NAN
    } else {
        x.ln()
    }
}

#[inline(always)]
fn log10_scalar_f32(x: f32) -> f32 {
    if x <= 0.0 {
        f32::NAN
    } else {
        x.log10()
    }
}

/// Elementwise natural exponential.
pub fn exp_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::unary_f32(
        src,
        dst,
        |v| unsafe { math::_mm256_exp_ps(v.elements) }.into(),
        exp_scalar_f32,
    );
}

/// Elementwise natural logarithm.
pub fn ln_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::unary_f32(
        src,
        dst,
        |v| unsafe { math::_mm256_ln_ps(v.elements) }.into(),
        ln_scalar_f32,
    );
}

/// Elementwise base-10 logarithm.
pub fn log10_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::unary_f32(
        src,
        dst,
        |v| unsafe { math::_mm256_log10_ps(v.elements) }.into(),
        log10_scalar_f32,
    );
}

/// Elementwise `x[i]^y[i]` for positive bases.
pub fn pow_f32(x: &[f32], y: &[f32], dst: &mut [f32]) {
    dispatch::binary_f32(
        x,
        y,
        dst,
        |vx, vy| unsafe { math::_mm256_pow_ps(vx.elements, vy.elements) }.into(),
        f32::powf,
    );
}

/// Elementwise natural exponential (f64).
pub fn exp_f64(src: &[f64], dst: &mut [f64]) {
    dispatch::unary_f64(src, dst, |v| unsafe { math64::_mm256_exp_pd(v.elements) }.into(), f64::exp);
}

/// Elementwise natural logarithm (f64).
pub fn ln_f64(src: &[f64], dst: &mut [f64]) {
    dispatch::unary_f64(
        src,
        dst,
        |v| unsafe { math64::_mm256_ln_pd(v.elements) }.into(),
        ln_scalar_f64,
    );
}

/// Elementwise `x[i]^y[i]` for positive bases (f64).
pub fn pow_f64(x: &[f64], y: &[f64], dst: &mut [f64]) {
    dispatch::binary_f64(
        x,
        y,
        dst,
        |vx, vy| unsafe { math64::_mm256_pow_pd(vx.elements, vy.elements) }.into(),
        f64::powf,
    );
}

/// Parallel [`exp_f32`].
pub fn par_exp_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::par_unary_f32(
        src,
        dst,
        |v| unsafe { math::_mm256_exp_ps(v.elements) }.into(),
        exp_scalar_f32,
    );
}

/// Parallel [`ln_f32`].
pub fn par_ln_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::par_unary_f32(
        src,
        dst,
        |v| unsafe { math::_mm256_ln_ps(v.elements) }.into(),
        ln_scalar_f32,
    );
}

/// Parallel [`log10_f32`].
pub fn par_log10_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::par_unary_f32(
        src,
        dst,
        |v| unsafe { math::_mm256_log10_ps(v.elements) }.into(),
        log10_scalar_f32,
    );
}

/// Parallel [`exp_f64`].
pub fn par_exp_f64(src: &[f64], dst: &mut [f64]) {
    dispatch::par_unary_f64(src, dst, |v| unsafe { math64::_mm256_exp_pd(v.elements) }.into(), f64::exp);
}

/// Parallel [`ln_f64`].
pub fn par_ln_f64(src: &[f64], dst: &mut [f64]) {
    dispatch::par_unary_f64(
        src,
        dst,
        |v| unsafe { math64::_mm256_ln_pd(v.elements) }.into(),
        ln_scalar_f64,
    );
}
