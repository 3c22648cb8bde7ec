//! Slice-loop drivers shared by every public operation.
//!
//! A driver walks the source in lane groups, applies a lane kernel, and
//! finishes the sub-group remainder with a scalar function. The aligned
//! load/store loop is selected by a single alignment probe at entry; no
//! per-iteration branching on pointers, no mask in control flow.

use rayon::prelude::*;

use crate::simd::avx2::f32x8::{self, F32x8};
use crate::simd::avx2::f64x4::{self, F64x4};
use crate::simd::{Alignment, SimdLoad, SimdStore};

#[inline(always)]
pub(crate) fn unary_f32<K, S>(src: &[f32], dst: &mut [f32], kernel: K, scalar: S)
where
    K: Fn(F32x8) -> F32x8,
    S: Fn(f32) -> f32,
{
    debug_assert_eq!(src.len(), dst.len(), "length mismatch");
    let len = src.len().min(dst.len());
    let vec_len = len - len % f32x8::LANE_COUNT;

    let aligned = F32x8::is_aligned(src.as_ptr()) && F32x8::is_aligned(dst.as_ptr());
    if aligned {
        for i in (0..vec_len).step_by(f32x8::LANE_COUNT) {
            unsafe {
                let v = F32x8::load_aligned(src.as_ptr().add(i));
                kernel(v).store_aligned_at(dst.as_mut_ptr().add(i));
            }
        }
    } else {
        for i in (0..vec_len).step_by(f32x8::LANE_COUNT) {
            unsafe {
                let v = F32x8::load_unaligned(src.as_ptr().add(i));
                kernel(v).store_unaligned_at(dst.as_mut_ptr().add(i));
            }
        }
    }

    for i in vec_len..len {
        dst[i] = scalar(src[i]);
    }
}

#[inline(always)]
pub(crate) fn unary_f64<K, S>(src: &[f64], dst: &mut [f64], kernel: K, scalar: S)
where
    K: Fn(F64x4) -> F64x4,
    S: Fn(f64) -> f64,
{
    debug_assert_eq!(src.len(), dst.len(), "length mismatch");
    let len = src.len().min(dst.len());
    let vec_len = len - len % f64x4::LANE_COUNT;

    let aligned = F64x4::is_aligned(src.as_ptr()) && F64x4::is_aligned(dst.as_ptr());
    if aligned {
        for i in (0..vec_len).step_by(f64x4::LANE_COUNT) {
            unsafe {
                let v = F64x4::load_aligned(src.as_ptr().add(i));
                kernel(v).store_aligned_at(dst.as_mut_ptr().add(i));
            }
        }
    } else {
        for i in (0..vec_len).step_by(f64x4::LANE_COUNT) {
            unsafe {
                let v = F64x4::load_unaligned(src.as_ptr().add(i));
                kernel(v).store_unaligned_at(dst.as_mut_ptr().add(i));
            }
        }
    }

    for i in vec_len..len {
        dst[i] = scalar(src[i]);
    }
}

#[inline(always)]
pub(crate) fn binary_f32<K, S>(a: &[f32], b: &[f32], dst: &mut [f32], kernel: K, scalar: S)
where
    K: Fn(F32x8, F32x8) -> F32x8,
    S: Fn(f32, f32) -> f32,
{
    debug_assert_eq!(a.len(), b.len(), "length mismatch");
    debug_assert_eq!(a.len(), dst.len(), "length mismatch");
    let len = a.len().min(b.len()).min(dst.len());
    let vec_len = len - len % f32x8::LANE_COUNT;

    let aligned = F32x8::is_aligned(a.as_ptr())
        && F32x8::is_aligned(b.as_ptr())
        && F32x8::is_aligned(dst.as_ptr());
    if aligned {
        for i in (0..vec_len).step_by(f32x8::LANE_COUNT) {
            unsafe {
                let va = F32x8::load_aligned(a.as_ptr().add(i));
                let vb = F32x8::load_aligned(b.as_ptr().add(i));
                kernel(va, vb).store_aligned_at(dst.as_mut_ptr().add(i));
            }
        }
    } else {
        for i in (0..vec_len).step_by(f32x8::LANE_COUNT) {
            unsafe {
                let va = F32x8::load_unaligned(a.as_ptr().add(i));
                let vb = F32x8::load_unaligned(b.as_ptr().add(i));
                kernel(va, vb).store_unaligned_at(dst.as_mut_ptr().add(i));
            }
        }
    }

    for i in vec_len..len {
        dst[i] = scalar(a[i], b[i]);
    }
}

#[inline(always)]
pub(crate) fn binary_f64<K, S>(a: &[f64], b: &[f64], dst: &mut [f64], kernel: K, scalar: S)
where
    K: Fn(F64x4, F64x4) -> F64x4,
    S: Fn(f64, f64) -> f64,
{
    debug_assert_eq!(a.len(), b.len(), "length mismatch");
    debug_assert_eq!(a.len(), dst.len(), "length mismatch");
    let len = a.len().min(b.len()).min(dst.len());
    let vec_len = len - len % f64x4::LANE_COUNT;

    let aligned = F64x4::is_aligned(a.as_ptr())
        && F64x4::is_aligned(b.as_ptr())
        && F64x4::is_aligned(dst.as_ptr());
    if aligned {
        for i in (0..vec_len).step_by(f64x4::LANE_COUNT) {
            unsafe {
                let va = F64x4::load_aligned(a.as_ptr().add(i));
                let vb = F64x4::load_aligned(b.as_ptr().add(i));
                kernel(va, vb).store_aligned_at(dst.as_mut_ptr().add(i));
            }
        }
    } else {
        for i in (0..vec_len).step_by(f64x4::LANE_COUNT) {
            unsafe {
                let va = F64x4::load_unaligned(a.as_ptr().add(i));
                let vb = F64x4::load_unaligned(b.as_ptr().add(i));
                kernel(va, vb).store_unaligned_at(dst.as_mut_ptr().add(i));
            }
        }
    }

    for i in vec_len..len {
        dst[i] = scalar(a[i], b[i]);
    }
}

/// Two-output driver for the fused sine/cosine kernels.
#[inline(always)]
pub(crate) fn sincos_f32<K, S>(src: &[f32], sin_dst: &mut [f32], cos_dst: &mut [f32], kernel: K, scalar: S)
where
    K: Fn(F32x8) -> (F32x8, F32x8),
    S: Fn(f32) -> (f32, f32),
{
    debug_assert_eq!(src.len(), sin_dst.len(), "length mismatch");
    debug_assert_eq!(src.len(), cos_dst.len(), "length mismatch");
    let len = src.len().min(sin_dst.len()).min(cos_dst.len());
    let vec_len = len - len % f32x8::LANE_COUNT;

    let aligned = F32x8::is_aligned(src.as_ptr())
        && F32x8::is_aligned(sin_dst.as_ptr())
        && F32x8::is_aligned(cos_dst.as_ptr());
    if aligned {
        for i in (0..vec_len).step_by(f32x8::LANE_COUNT) {
            unsafe {
                let (s, c) = kernel(F32x8::load_aligned(src.as_ptr().add(i)));
                s.store_aligned_at(sin_dst.as_mut_ptr().add(i));
                c.store_aligned_at(cos_dst.as_mut_ptr().add(i));
            }
        }
    } else {
        for i in (0..vec_len).step_by(f32x8::LANE_COUNT) {
            unsafe {
                let (s, c) = kernel(F32x8::load_unaligned(src.as_ptr().add(i)));
                s.store_unaligned_at(sin_dst.as_mut_ptr().add(i));
                c.store_unaligned_at(cos_dst.as_mut_ptr().add(i));
            }
        }
    }

    for i in vec_len..len {
        let (s, c) = scalar(src[i]);
        sin_dst[i] = s;
        cos_dst[i] = c;
    }
}

#[inline(always)]
pub(crate) fn sincos_f64<K, S>(src: &[f64], sin_dst: &mut [f64], cos_dst: &mut [f64], kernel: K, scalar: S)
where
    K: Fn(F64x4) -> (F64x4, F64x4),
    S: Fn(f64) -> (f64, f64),
{
    debug_assert_eq!(src.len(), sin_dst.len(), "length mismatch");
    debug_assert_eq!(src.len(), cos_dst.len(), "length mismatch");
    let len = src.len().min(sin_dst.len()).min(cos_dst.len());
    let vec_len = len - len % f64x4::LANE_COUNT;

    let aligned = F64x4::is_aligned(src.as_ptr())
        && F64x4::is_aligned(sin_dst.as_ptr())
        && F64x4::is_aligned(cos_dst.as_ptr());
    if aligned {
        for i in (0..vec_len).step_by(f64x4::LANE_COUNT) {
            unsafe {
                let (s, c) = kernel(F64x4::load_aligned(src.as_ptr().add(i)));
                s.store_aligned_at(sin_dst.as_mut_ptr().add(i));
                c.store_aligned_at(cos_dst.as_mut_ptr().add(i));
            }
        }
    } else {
        for i in (0..vec_len).step_by(f64x4::LANE_COUNT) {
            unsafe {
                let (s, c) = kernel(F64x4::load_unaligned(src.as_ptr().add(i)));
                s.store_unaligned_at(sin_dst.as_mut_ptr().add(i));
                c.store_unaligned_at(cos_dst.as_mut_ptr().add(i));
            }
        }
    }

    for i in vec_len..len {
        let (s, c) = scalar(src[i]);
        sin_dst[i] = s;
        cos_dst[i] = c;
    }
}

#[inline(always)]
pub(crate) fn ternary_f32<K, S>(
    a: &[f32],
    b: &[f32],
    c: &[f32],
    dst: &mut [f32],
    kernel: K,
    scalar: S,
) where
    K: Fn(F32x8, F32x8, F32x8) -> F32x8,
    S: Fn(f32, f32, f32) -> f32,
{
    debug_assert_eq!(a.len(), b.len(), "length mismatch");
    debug_assert_eq!(a.len(), c.len(), "length mismatch");
    debug_assert_eq!(a.len(), dst.len(), "length mismatch");
    let len = a.len().min(b.len()).min(c.len()).min(dst.len());
    let vec_len = len - len % f32x8::LANE_COUNT;

    let aligned = F32x8::is_aligned(a.as_ptr())
        && F32x8::is_aligned(b.as_ptr())
        && F32x8::is_aligned(c.as_ptr())
        && F32x8::is_aligned(dst.as_ptr());
    if aligned {
        for i in (0..vec_len).step_by(f32x8::LANE_COUNT) {
            unsafe {
                let va = F32x8::load_aligned(a.as_ptr().add(i));
                let vb = F32x8::load_aligned(b.as_ptr().add(i));
                let vc = F32x8::load_aligned(c.as_ptr().add(i));
                kernel(va, vb, vc).store_aligned_at(dst.as_mut_ptr().add(i));
            }
        }
    } else {
        for i in (0..vec_len).step_by(f32x8::LANE_COUNT) {
            unsafe {
                let va = F32x8::load_unaligned(a.as_ptr().add(i));
                let vb = F32x8::load_unaligned(b.as_ptr().add(i));
                let vc = F32x8::load_unaligned(c.as_ptr().add(i));
                kernel(va, vb, vc).store_unaligned_at(dst.as_mut_ptr().add(i));
            }
        }
    }

    for i in vec_len..len {
        dst[i] = scalar(a[i], b[i], c[i]);
    }
}

#[inline(always)]
pub(crate) fn ternary_f64<K, S>(
    a: &[f64],
    b: &[f64],
    c: &[f64],
    dst: &mut [f64],
    kernel: K,
    scalar: S,
) where
    K: Fn(F64x4, F64x4, F64x4) -> F64x4,
    S: Fn(f64, f64, f64) -> f64,
{
    debug_assert_eq!(a.len(), b.len(), "length mismatch");
    debug_assert_eq!(a.len(), c.len(), "length mismatch");
    debug_assert_eq!(a.len(), dst.len(), "length mismatch");
    let len = a.len().min(b.len()).min(c.len()).min(dst.len());
    let vec_len = len - len % f64x4::LANE_COUNT;

    let aligned = F64x4::is_aligned(a.as_ptr())
        && F64x4::is_aligned(b.as_ptr())
        && F64x4::is_aligned(c.as_ptr())
        && F64x4::is_aligned(dst.as_ptr());
    if aligned {
        for i in (0..vec_len).step_by(f64x4::LANE_COUNT) {
            unsafe {
                let va = F64x4::load_aligned(a.as_ptr().add(i));
                let vb = F64x4::load_aligned(b.as_ptr().add(i));
                let vc = F64x4::load_aligned(c.as_ptr().add(i));
                kernel(va, vb, vc).store_aligned_at(dst.as_mut_ptr().add(i));
            }
        }
    } else {
        for i in (0..vec_len).step_by(f64x4::LANE_COUNT) {
            unsafe {
                let va = F64x4::load_unaligned(a.as_ptr().add(i));
                let vb = F64x4::load_unaligned(b.as_ptr().add(i));
                let vc = F64x4::load_unaligned(c.as_ptr().add(i));
                kernel(va, vb, vc).store_unaligned_at(dst.as_mut_ptr().add(i));
            }
        }
    }

    for i in vec_len..len {
        dst[i] = scalar(a[i], b[i], c[i]);
    }
}

/// Parallel unary driver: lane groups are distributed over the rayon pool,
/// the trailing remainder runs on the calling thread.
#[inline(always)]
pub(crate) fn par_unary_f32<K, S>(src: &[f32], dst: &mut [f32], kernel: K, scalar: S)
where
    K: Fn(F32x8) -> F32x8 + Sync,
    S: Fn(f32) -> f32 + Sync,
{
    debug_assert_eq!(src.len(), dst.len(), "length mismatch");
    let len = src.len().min(dst.len());
    let vec_len = len - len % f32x8::LANE_COUNT;

    dst[..vec_len]
        .par_chunks_exact_mut(f32x8::LANE_COUNT)
        .zip(src[..vec_len].par_chunks_exact(f32x8::LANE_COUNT))
        .for_each(|(d, s)| unsafe {
            let v = F32x8::load_unaligned(s.as_ptr());
            kernel(v).store_unaligned_at(d.as_mut_ptr());
        });

    for i in vec_len..len {
        dst[i] = scalar(src[i]);
    }
}

#[inline(always)]
pub(crate) fn par_unary_f64<K, S>(src: &[f64], dst: &mut [f64], kernel: K, scalar: S)
where
    K: Fn(F64x4) -> F64x4 + Sync,
    S: Fn(f64) -> f64 + Sync,
{
    debug_assert_eq!(src.len(), dst.len(), "length mismatch");
    let len = src.len().min(dst.len());
    let vec_len = len - len % f64x4::LANE_COUNT;

    dst[..vec_len]
        .par_chunks_exact_mut(f64x4::LANE_COUNT)
        .zip(src[..vec_len].par_chunks_exact(f64x4::LANE_COUNT))
        .for_each(|(d, s)| unsafe {
            let v = F64x4::load_unaligned(s.as_ptr());
            kernel(v).store_unaligned_at(d.as_mut_ptr());
        });

    for i in vec_len..len {
        dst[i] = scalar(src[i]);
    }
}
