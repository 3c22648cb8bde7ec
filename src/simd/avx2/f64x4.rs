//! 256-bit lane group of 4 packed double-precision floats.
//!
//! Same surface as [`crate::simd::avx2::f32x8::F32x8`], re-derived for
//! `__m256d`.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::{Alignment, SimdLoad, SimdStore};

/// Number of f64 lanes in one AVX2 register.
pub const LANE_COUNT: usize = 4;

/// Native alignment of an AVX2 register, in bytes.
pub const AVX_ALIGNMENT: usize = 32;

/// 4 packed double-precision lanes.
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct F64x4 {
    pub elements: __m256d,
}

impl Alignment<f64> for F64x4 {
    #[inline(always)]
    fn is_aligned(ptr: *const f64) -> bool {
        (ptr as usize) % AVX_ALIGNMENT == 0
    }
}

impl SimdLoad<f64> for F64x4 {
    #[inline(always)]
    fn splat(value: f64) -> Self {
        Self {
            elements: unsafe { _mm256_set1_pd(value) },
        }
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f64) -> Self {
        debug_assert!(Self::is_aligned(ptr), "pointer must be 32-byte aligned");
        Self {
            elements: _mm256_load_pd(ptr),
        }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f64) -> Self {
        Self {
            elements: _mm256_loadu_pd(ptr),
        }
    }
}

impl SimdStore<f64> for F64x4 {
    #[inline(always)]
    unsafe fn store_aligned_at(&self, ptr: *mut f64) {
        debug_assert!(Self::is_aligned(ptr), "pointer must be 32-byte aligned");
        _mm256_store_pd(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut f64) {
        _mm256_storeu_pd(ptr, self.elements)
    }
}

impl From<__m256d> for F64x4 {
    #[inline(always)]
    fn from(elements: __m256d) -> Self {
        Self { elements }
    }
}

impl F64x4 {
    #[inline(always)]
    pub fn to_array(self) -> [f64; LANE_COUNT] {
        let mut out = [0.0f64; LANE_COUNT];
        unsafe { _mm256_storeu_pd(out.as_mut_ptr(), self.elements) };
        out
    }

    #[inline(always)]
    pub fn sqrt(self) -> Self {
        unsafe { _mm256_sqrt_pd(self.elements).into() }
    }

    /// `self * a + b` with a single rounding (FMA).
    #[inline(always)]
    pub fn fmadd(self, a: Self, b: Self) -> Self {
        unsafe { _mm256_fmadd_pd(self.elements, a.elements, b.elements).into() }
    }

    #[inline(always)]
    pub fn abs(self) -> Self {
        unsafe { _mm256_andnot_pd(_mm256_set1_pd(-0.0), self.elements).into() }
    }

    #[inline(always)]
    pub fn min(self, rhs: Self) -> Self {
        unsafe { _mm256_min_pd(self.elements, rhs.elements).into() }
    }

    #[inline(always)]
    pub fn max(self, rhs: Self) -> Self {
        unsafe { _mm256_max_pd(self.elements, rhs.elements).into() }
    }

    #[inline(always)]
    pub fn floor(self) -> Self {
        unsafe { _mm256_floor_pd(self.elements).into() }
    }

    /// Round to nearest, ties to even.
    #[inline(always)]
    pub fn round(self) -> Self {
        unsafe {
            _mm256_round_pd(self.elements, _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC).into()
        }
    }

    #[inline(always)]
    pub fn trunc(self) -> Self {
        unsafe { _mm256_round_pd(self.elements, _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC).into() }
    }

    #[inline(always)]
    pub fn lt(self, rhs: Self) -> Self {
        unsafe { _mm256_cmp_pd(self.elements, rhs.elements, _CMP_LT_OQ).into() }
    }

    #[inline(always)]
    pub fn le(self, rhs: Self) -> Self {
        unsafe { _mm256_cmp_pd(self.elements, rhs.elements, _CMP_LE_OQ).into() }
    }

    #[inline(always)]
    pub fn gt(self, rhs: Self) -> Self {
        unsafe { _mm256_cmp_pd(self.elements, rhs.elements, _CMP_GT_OQ).into() }
    }

    #[inline(always)]
    pub fn ge(self, rhs: Self) -> Self {
        unsafe { _mm256_cmp_pd(self.elements, rhs.elements, _CMP_GE_OQ).into() }
    }

    #[inline(always)]
    pub fn eq(self, rhs: Self) -> Self {
        unsafe { _mm256_cmp_pd(self.elements, rhs.elements, _CMP_EQ_OQ).into() }
    }

    /// Branch-free blend: lanes where `mask` is true take `a`, others `b`.
    #[inline(always)]
    pub fn select(mask: Self, a: Self, b: Self) -> Self {
        unsafe { _mm256_blendv_pd(b.elements, a.elements, mask.elements).into() }
    }
}

impl std::ops::Add for F64x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { _mm256_add_pd(self.elements, rhs.elements).into() }
    }
}

impl std::ops::Sub for F64x4 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { _mm256_sub_pd(self.elements, rhs.elements).into() }
    }
}

impl std::ops::Mul for F64x4 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { _mm256_mul_pd(self.elements, rhs.elements).into() }
    }
}

impl std::ops::Div for F64x4 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { _mm256_div_pd(self.elements, rhs.elements).into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f64x4_from(values: [f64; LANE_COUNT]) -> F64x4 {
        unsafe { F64x4::load_unaligned(values.as_ptr()) }
    }

    #[test]
    fn test_splat_and_roundtrip() {
        assert_eq!(F64x4::splat(-1.25).to_array(), [-1.25; LANE_COUNT]);

        let data = [1.0f64, -2.5, 1e300, -1e-300];
        assert_eq!(f64x4_from(data).to_array(), data);
    }

    #[test]
    fn test_aligned_roundtrip() {
        #[repr(align(32))]
        struct Aligned([f64; LANE_COUNT]);

        let src = Aligned([0.5f64, 1.5, 2.5, 3.5]);
        let mut dst = Aligned([0.0f64; LANE_COUNT]);

        assert!(F64x4::is_aligned(src.0.as_ptr()));

        let v = unsafe { F64x4::load_aligned(src.0.as_ptr()) };
        unsafe { v.store_aligned_at(dst.0.as_mut_ptr()) };
        assert_eq!(dst.0, src.0);
    }

    #[test]
    fn test_arithmetic_and_fma() {
        let a = f64x4_from([1.0, 2.0, 3.0, 4.0]);
        let b = F64x4::splat(0.5);

        assert_eq!((a + b).to_array(), [1.5, 2.5, 3.5, 4.5]);
        assert_eq!((a * b).to_array(), [0.5, 1.0, 1.5, 2.0]);
        assert_eq!((a - b).to_array(), [0.5, 1.5, 2.5, 3.5]);
        assert_eq!((a / b).to_array(), [2.0, 4.0, 6.0, 8.0]);
        assert_eq!(a.fmadd(b, b).to_array(), [1.0, 1.5, 2.0, 2.5]);
    }

    #[test]
    fn test_select_and_compares() {
        let x = f64x4_from([-2.0, -0.5, 0.5, 2.0]);
        let mask = x.ge(F64x4::splat(0.0));
        let blended = F64x4::select(mask, F64x4::splat(1.0), F64x4::splat(0.0));
        assert_eq!(blended.to_array(), [0.0, 0.0, 1.0, 1.0]);
    }
}
