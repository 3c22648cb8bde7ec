//! Elementwise arithmetic, fills, thresholds, and reductions.
//!
//! The routine DSP bookkeeping that surrounds the transcendental kernels:
//! copies, constant fills, slice arithmetic, clipping against a constant,
//! and horizontal reductions. Same buffer contract as the rest of `ops`.

use crate::ops::dispatch;
use crate::simd::avx2::f32x8::{self, F32x8};
use crate::simd::avx2::f64x4::{self, F64x4};
use crate::simd::{Alignment, SimdLoad, SimdStore};

/// `dst[i] = src[i]`.
pub fn copy_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::unary_f32(src, dst, |v| v, |x| x);
}

/// `dst[i] = src[i]` (f64).
pub fn copy_f64(src: &[f64], dst: &mut [f64]) {
    dispatch::unary_f64(src, dst, |v| v, |x| x);
}

/// Fills `dst` with `value`.
pub fn set_f32(dst: &mut [f32], value: f32) {
    let len = dst.len();
    let vec_len = len - len % f32x8::LANE_COUNT;
    let v = F32x8::splat(value);

    if F32x8::is_aligned(dst.as_ptr()) {
        for i in (0..vec_len).step_by(f32x8::LANE_COUNT) {
            unsafe { v.store_aligned_at(dst.as_mut_ptr().add(i)) };
        }
    } else {
        for i in (0..vec_len).step_by(f32x8::LANE_COUNT) {
            unsafe { v.store_unaligned_at(dst.as_mut_ptr().add(i)) };
        }
    }
    for x in &mut dst[vec_len..] {
        *x = value;
    }
}

/// Fills `dst` with `value` (f64).
pub fn set_f64(dst: &mut [f64], value: f64) {
    let len = dst.len();
    let vec_len = len - len % f64x4::LANE_COUNT;
    let v = F64x4::splat(value);

    if F64x4::is_aligned(dst.as_ptr()) {
        for i in (0..vec_len).step_by(f64x4::LANE_COUNT) {
            unsafe { v.store_aligned_at(dst.as_mut_ptr().add(i)) };
        }
    } else {
        for i in (0..vec_len).step_by(f64x4::LANE_COUNT) {
            unsafe { v.store_unaligned_at(dst.as_mut_ptr().add(i)) };
        }
    }
    for x in &mut dst[vec_len..] {
        *x = value;
    }
}

/// Fills `dst` with zeros.
pub fn zero_f32(dst: &mut [f32]) {
    set_f32(dst, 0.0);
}

/// Fills `dst` with zeros (f64).
pub fn zero_f64(dst: &mut [f64]) {
    set_f64(dst, 0.0);
}

/// `dst[i] = a[i] + b[i]`.
pub fn add_f32(a: &[f32], b: &[f32], dst: &mut [f32]) {
    dispatch::binary_f32(a, b, dst, |x, y| x + y, |x, y| x + y);
}

/// `dst[i] = a[i] - b[i]`.
pub fn sub_f32(a: &[f32], b: &[f32], dst: &mut [f32]) {
    dispatch::binary_f32(a, b, dst, |x, y| x - y, |x, y| x - y);
}

/// `dst[i] = a[i] * b[i]`.
pub fn mul_f32(a: &[f32], b: &[f32], dst: &mut [f32]) {
    dispatch::binary_f32(a, b, dst, |x, y| x * y, |x, y| x * y);
}

/// `dst[i] = a[i] / b[i]`.
pub fn div_f32(a: &[f32], b: &[f32], dst: &mut [f32]) {
    dispatch::binary_f32(a, b, dst, |x, y| x / y, |x, y| x / y);
}

/// `dst[i] = src[i] + value`.
pub fn addc_f32(src: &[f32], value: f32, dst: &mut [f32]) {
    let c = F32x8::splat(value);
    dispatch::unary_f32(src, dst, move |v| v + c, move |x| x + value);
}

/// `dst[i] = src[i] * value`.
pub fn mulc_f32(src: &[f32], value: f32, dst: &mut [f32]) {
    let c = F32x8::splat(value);
    dispatch::unary_f32(src, dst, move |v| v * c, move |x| x * value);
}

/// `dst[i] = a[i] * b[i] + c[i]`, fused on the lane path.
pub fn muladd_f32(a: &[f32], b: &[f32], c: &[f32], dst: &mut [f32]) {
    dispatch::ternary_f32(a, b, c, dst, |x, y, z| x.fmadd(y, z), |x, y, z| x.mul_add(y, z));
}

/// Clips from below: `dst[i] = max(src[i], bound)`.
pub fn threshold_lt_f32(src: &[f32], bound: f32, dst: &mut [f32]) {
    let c = F32x8::splat(bound);
    dispatch::unary_f32(src, dst, move |v| v.max(c), move |x| x.max(bound));
}

/// Clips from above: `dst[i] = min(src[i], bound)`.
pub fn threshold_gt_f32(src: &[f32], bound: f32, dst: &mut [f32]) {
    let c = F32x8::splat(bound);
    dispatch::unary_f32(src, dst, move |v| v.min(c), move |x| x.min(bound));
}

/// `dst[i] = |src[i]|`.
pub fn abs_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::unary_f32(src, dst, |v| v.abs(), f32::abs);
}

/// `dst[i] = sqrt(src[i])`.
pub fn sqrt_f32(src: &[f32], dst: &mut [f32]) {
    dispatch::unary_f32(src, dst, |v| v.sqrt(), f32::sqrt);
}

/// `dst[i] = a[i] + b[i]` (f64).
pub fn add_f64(a: &[f64], b: &[f64], dst: &mut [f64]) {
    dispatch::binary_f64(a, b, dst, |x, y| x + y, |x, y| x + y);
}

/// `dst[i] = a[i] - b[i]` (f64).
pub fn sub_f64(a: &[f64], b: &[f64], dst: &mut [f64]) {
    dispatch::binary_f64(a, b, dst, |x, y| x - y, |x, y| x - y);
}

/// `dst[i] = a[i] * b[i]` (f64).
pub fn mul_f64(a: &[f64], b: &[f64], dst: &mut [f64]) {
    dispatch::binary_f64(a, b, dst, |x, y| x * y, |x, y| x * y);
}

/// `dst[i] = a[i] / b[i]` (f64).
pub fn div_f64(a: &[f64], b: &[f64], dst: &mut [f64]) {
    dispatch::binary_f64(a, b, dst, |x, y| x / y, |x, y| x / y);
}

/// `dst[i] = src[i] + value` (f64).
pub fn addc_f64(src: &[f64], value: f64, dst: &mut [f64]) {
    let c = F64x4::splat(value);
    dispatch::unary_f64(src, dst, move |v| v + c, move |x| x + value);
}

/// `dst[i] = src[i] * value` (f64).
pub fn mulc_f64(src: &[f64], value: f64, dst: &mut [f64]) {
    let c = F64x4::splat(value);
    dispatch::unary_f64(src, dst, move |v| v * c, move |x| x * value);
}

/// `dst[i] = a[i] * b[i] + c[i]`, fused on the lane path (f64).
pub fn muladd_f64(a: &[f64], b: &[f64], c: &[f64], dst: &mut [f64]) {
    dispatch::ternary_f64(a, b, c, dst, |x, y, z| x.fmadd(y, z), |x, y, z| x.mul_add(y, z));
}

/// Clips from below (f64).
pub fn threshold_lt_f64(src: &[f64], bound: f64, dst: &mut [f64]) {
    let c = F64x4::splat(bound);
    dispatch::unary_f64(src, dst, move |v| v.max(c), move |x| x.max(bound));
}

/// Clips from above (f64).
pub fn threshold_gt_f64(src: &[f64], bound: f64, dst: &mut [f64]) {
    let c = F64x4::splat(bound);
    dispatch::unary_f64(src, dst, move |v| v.min(c), move |x| x.min(bound));
}

/// `dst[i] = |src[i]|` (f64).
pub fn abs_f64(src: &[f64], dst: &mut [f64]) {
    dispatch::unary_f64(src, dst, |v| v.abs(), f64::abs);
}

/// `dst[i] = sqrt(src[i])` (f64).
pub fn sqrt_f64(src: &[f64], dst: &mut [f64]) {
    dispatch::unary_f64(src, dst, |v| v.sqrt(), f64::sqrt);
}

/// Horizontal sum. Lane accumulation changes the summation order relative
/// to a scalar left-to-right loop, so results can differ in the last bits.
pub fn sum_f32(src: &[f32]) -> f32 {
    let len = src.len();
    let vec_len = len - len % f32x8::LANE_COUNT;

    let mut acc = F32x8::splat(0.0);
    for i in (0..vec_len).step_by(f32x8::LANE_COUNT) {
        acc = acc + unsafe { F32x8::load_unaligned(src.as_ptr().add(i)) };
    }
    let mut total: f32 = acc.to_array().iter().sum();
    for &x in &src[vec_len..] {
        total += x;
    }
    total
}

/// Horizontal sum (f64).
pub fn sum_f64(src: &[f64]) -> f64 {
    let len = src.len();
    let vec_len = len - len % f64x4::LANE_COUNT;

    let mut acc = F64x4::splat(0.0);
    for i in (0..vec_len).step_by(f64x4::LANE_COUNT) {
        acc = acc + unsafe { F64x4::load_unaligned(src.as_ptr().add(i)) };
    }
    let mut total: f64 = acc.to_array().iter().sum();
    for &x in &src[vec_len..] {
        total += x;
    }
    total
}

/// Arithmetic mean. NaN on an empty slice.
pub fn mean_f32(src: &[f32]) -> f32 {
    sum_f32(src) / src.len() as f32
}

/// Arithmetic mean (f64). NaN on an empty slice.
pub fn mean_f64(src: &[f64]) -> f64 {
    sum_f64(src) / src.len() as f64
}

/// Smallest element; `f32::INFINITY` on an empty slice.
pub fn min_f32(src: &[f32]) -> f32 {
    let len = src.len();
    let vec_len = len - len % f32x8::LANE_COUNT;

    let mut acc = F32x8::splat(f32::INFINITY);
    for i in (0..vec_len).step_by(f32x8::LANE_COUNT) {
        acc = acc.min(unsafe { F32x8::load_unaligned(src.as_ptr().add(i)) });
    }
    let mut best = acc.to_array().iter().fold(f32::INFINITY, |a, &b| a.min(b));
    for &x in &src[vec_len..] {
        best = best.min(x);
    }
    best
}

/// Largest element; `f32::NEG_INFINITY` on an empty slice.
pub fn max_f32(src: &[f32]) -> f32 {
    let len = src.len();
    let vec_len = len - len % f32x8::LANE_COUNT;

    let mut acc = F32x8::splat(f32::NEG_INFINITY);
    for i in (0..vec_len).step_by(f32x8::LANE_COUNT) {
        acc = acc.max(unsafe { F32x8::load_unaligned(src.as_ptr().add(i)) });
    }
    let mut best = acc
        .to_array()
        .iter()
        .fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    for &x in &src[vec_len..] {
        best = best.max(x);
    }
    best
}

/// Smallest element (f64); `f64::INFINITY` on an empty slice.
pub fn min_f64(src: &[f64]) -> f64 {
    let len = src.len();
    let vec_len = len - len % f64x4::LANE_COUNT;

    let mut acc = F64x4::splat(f64::INFINITY);
    for i in (0..vec_len).step_by(f64x4::LANE_COUNT) {
        acc = acc.min(unsafe { F64x4::load_unaligned(src.as_ptr().add(i)) });
    }
    let mut best = acc.to_array().iter().fold(f64::INFINITY, |a, &b| a.min(b));
    for &x in &src[vec_len..] {
        best = best.min(x);
    }
    best
}

/// Largest element (f64); `f64::NEG_INFINITY` on an empty slice.
pub fn max_f64(src: &[f64]) -> f64 {
    let len = src.len();
    let vec_len = len - len % f64x4::LANE_COUNT;

    let mut acc = F64x4::splat(f64::NEG_INFINITY);
    for i in (0..vec_len).step_by(f64x4::LANE_COUNT) {
        acc = acc.max(unsafe { F64x4::load_unaligned(src.as_ptr().add(i)) });
    }
    let mut best = acc
        .to_array()
        .iter()
        .fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    for &x in &src[vec_len..] {
        best = best.max(x);
    }
    best
}
