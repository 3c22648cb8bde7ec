//! 256-bit lane group of 8 packed single-precision floats.
//!
//! [`F32x8`] wraps an `__m256` register and exposes the operations the
//! kernels and dispatchers are written against: broadcast, aligned/unaligned
//! load/store, elementwise arithmetic, fused multiply-add, comparisons that
//! produce lane masks, and the branch-free [`F32x8::select`] blend.
//!
//! Masks are ordinary `F32x8` values whose lanes are all-ones (true) or
//! all-zeros (false) bit patterns, exactly as AVX2 comparison instructions
//! produce them. They carry no numeric meaning and must only feed `select`
//! or bitwise ops.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::{Alignment, SimdLoad, SimdStore};

/// Number of f32 lanes in one AVX2 register.
pub const LANE_COUNT: usize = 8;

/// Native alignment of an AVX2 register, in bytes.
pub const AVX_ALIGNMENT: usize = 32;

/// 8 packed single-precision lanes.
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct F32x8 {
    pub elements: __m256,
}

impl Alignment<f32> for F32x8 {
    #[inline(always)]
    fn is_aligned(ptr: *const f32) -> bool {
        (ptr as usize) % AVX_ALIGNMENT == 0
    }
}

impl SimdLoad<f32> for F32x8 {
    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self {
            elements: unsafe { _mm256_set1_ps(value) },
        }
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self {
        debug_assert!(Self::is_aligned(ptr), "pointer must be 32-byte aligned");
        Self {
            elements: _mm256_load_ps(ptr),
        }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self {
        Self {
            elements: _mm256_loadu_ps(ptr),
        }
    }
}

impl SimdStore<f32> for F32x8 {
    #[inline(always)]
    unsafe fn store_aligned_at(&self, ptr: *mut f32) {
        debug_assert!(Self::is_aligned(ptr), "pointer must be 32-byte aligned");
        _mm256_store_ps(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut f32) {
        _mm256_storeu_ps(ptr, self.elements)
    }
}

impl From<__m256> for F32x8 {
    #[inline(always)]
    fn from(elements: __m256) -> Self {
        Self { elements }
    }
}

impl F32x8 {
    /// Copies the lanes into an array, lowest lane first.
    #[inline(always)]
    pub fn to_array(self) -> [f32; LANE_COUNT] {
        let mut out = [0.0f32; LANE_COUNT];
        unsafe { _mm256_storeu_ps(out.as_mut_ptr(), self.elements) };
        out
    }

    /// Lane-wise square root.
    #[inline(always)]
    pub fn sqrt(self) -> Self {
        unsafe { _mm256_sqrt_ps(self.elements).into() }
    }

    /// Lane-wise `self * a + b` with a single rounding (FMA).
    #[inline(always)]
    pub fn fmadd(self, a: Self, b: Self) -> Self {
        unsafe { _mm256_fmadd_ps(self.elements, a.elements, b.elements).into() }
    }

    /// Lane-wise absolute value (clears the sign bit).
    #[inline(always)]
    pub fn abs(self) -> Self {
        unsafe { _mm256_andnot_ps(_mm256_set1_ps(-0.0), self.elements).into() }
    }

    /// Lane-wise minimum.
    #[inline(always)]
    pub fn min(self, rhs: Self) -> Self {
        unsafe { _mm256_min_ps(self.elements, rhs.elements).into() }
    }

    /// Lane-wise maximum.
    #[inline(always)]
    pub fn max(self, rhs: Self) -> Self {
        unsafe { _mm256_max_ps(self.elements, rhs.elements).into() }
    }

    /// Lane-wise floor.
    #[inline(always)]
    pub fn floor(self) -> Self {
        unsafe { _mm256_floor_ps(self.elements).into() }
    }

    /// Lane-wise round to nearest, ties to even.
    #[inline(always)]
    pub fn round(self) -> Self {
        unsafe {
            _mm256_round_ps(self.elements, _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC).into()
        }
    }

    /// Lane-wise truncation toward zero.
    #[inline(always)]
    pub fn trunc(self) -> Self {
        unsafe { _mm256_round_ps(self.elements, _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC).into() }
    }

    /// Lane mask of `self < rhs`.
    #[inline(always)]
    pub fn lt(self, rhs: Self) -> Self {
        unsafe { _mm256_cmp_ps(self.elements, rhs.elements, _CMP_LT_OQ).into() }
    }

    /// Lane mask of `self <= rhs`.
    #[inline(always)]
    pub fn le(self, rhs: Self) -> Self {
        unsafe { _mm256_cmp_ps(self.elements, rhs.elements, _CMP_LE_OQ).into() }
    }

    /// Lane mask of `self > rhs`.
    #[inline(always)]
    pub fn gt(self, rhs: Self) -> Self {
        unsafe { _mm256_cmp_ps(self.elements, rhs.elements, _CMP_GT_OQ).into() }
    }

    /// Lane mask of `self >= rhs`.
    #[inline(always)]
    pub fn ge(self, rhs: Self) -> Self {
        unsafe { _mm256_cmp_ps(self.elements, rhs.elements, _CMP_GE_OQ).into() }
    }

    /// Lane mask of `self == rhs` (ordered, quiet).
    #[inline(always)]
    pub fn eq(self, rhs: Self) -> Self {
        unsafe { _mm256_cmp_ps(self.elements, rhs.elements, _CMP_EQ_OQ).into() }
    }

    /// Branch-free blend: lanes where `mask` is true take `a`, others `b`.
    #[inline(always)]
    pub fn select(mask: Self, a: Self, b: Self) -> Self {
        unsafe { _mm256_blendv_ps(b.elements, a.elements, mask.elements).into() }
    }
}

impl std::ops::Add for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { _mm256_add_ps(self.elements, rhs.elements).into() }
    }
}

impl std::ops::Sub for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { _mm256_sub_ps(self.elements, rhs.elements).into() }
    }
}

impl std::ops::Mul for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { _mm256_mul_ps(self.elements, rhs.elements).into() }
    }
}

impl std::ops::Div for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { _mm256_div_ps(self.elements, rhs.elements).into() }
    }
}
