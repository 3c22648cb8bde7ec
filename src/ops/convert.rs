//! Numeric conversions and explicit rounding modes.
//!
//! Rounding is always an explicit per-call computation; nothing here reads
//! or writes the floating-point environment (MXCSR stays untouched), so the
//! mode is scoped to the call and concurrent callers cannot observe each
//! other. The vector path and the scalar tail use the same formula per
//! mode, so tie-breaking agrees between them.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// How to round a float to an integral value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round to nearest, ties to even (IEEE default).
    NearestEven,
    /// Truncate toward zero.
    TowardZero,
    /// `floor(x + 0.5)`: nearest with ties away from negative infinity.
    Nearest,
}

impl RoundingMode {
    /// Scalar counterpart of the lane rounding, same tie behavior.
    #[inline(always)]
    pub fn apply_f32(self, x: f32) -> f32 {
        match self {
            RoundingMode::NearestEven => x.round_ties_even(),
            RoundingMode::TowardZero => x.trunc(),
            RoundingMode::Nearest => (x + 0.5).floor(),
        }
    }

    #[inline(always)]
    pub fn apply_f64(self, x: f64) -> f64 {
        match self {
            RoundingMode::NearestEven => x.round_ties_even(),
            RoundingMode::TowardZero => x.trunc(),
            RoundingMode::Nearest => (x + 0.5).floor(),
        }
    }

    #[inline(always)]
    unsafe fn round_ps(self, v: __m256) -> __m256 {
        match self {
            RoundingMode::NearestEven => {
                _mm256_round_ps::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(v)
            }
            RoundingMode::TowardZero => {
                _mm256_round_ps::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(v)
            }
            RoundingMode::Nearest => _mm256_floor_ps(_mm256_add_ps(v, _mm256_set1_ps(0.5))),
        }
    }
}

/// Fixed-point narrowing: `dst[i] = sat_u8(round(src[i] * 2^scale_factor))`.
///
/// Values round per `mode`, then saturate to `0..=255` (negatives clamp to
/// 0, NaN becomes 0). The lanes are clamped to the byte range while still
/// floats, before the f32→i32 conversion, so inputs past i32 range take the
/// same saturated value as the scalar tail. The `max` runs first: maxps
/// returns its second operand on a NaN lane, turning NaN into 0 like the
/// tail does.
pub fn f32_to_u8(src: &[f32], dst: &mut [u8], mode: RoundingMode, scale_factor: i32) {
    debug_assert_eq!(src.len(), dst.len(), "length mismatch");
    let len = src.len().min(dst.len());
    let vec_len = len - len % 16;

    let scale = (scale_factor as f32).exp2();
    let scale_v = unsafe { _mm256_set1_ps(scale) };
    let lo_v = unsafe { _mm256_setzero_ps() };
    let hi_v = unsafe { _mm256_set1_ps(255.0) };

    for i in (0..vec_len).step_by(16) {
        unsafe {
            let v0 = _mm256_mul_ps(_mm256_loadu_ps(src.as_ptr().add(i)), scale_v);
            let v1 = _mm256_mul_ps(_mm256_loadu_ps(src.as_ptr().add(i + 8)), scale_v);
            let r0 = _mm256_min_ps(_mm256_max_ps(mode.round_ps(v0), lo_v), hi_v);
            let r1 = _mm256_min_ps(_mm256_max_ps(mode.round_ps(v1), lo_v), hi_v);
            let i0 = _mm256_cvttps_epi32(r0);
            let i1 = _mm256_cvttps_epi32(r1);

            // packs interleaves 128-bit halves; the permutes restore element order.
            let words = _mm256_permute4x64_epi64::<0b11011000>(_mm256_packs_epi32(i0, i1));
            let bytes = _mm256_permute4x64_epi64::<0b11011000>(_mm256_packus_epi16(words, words));
            _mm_storeu_si128(
                dst.as_mut_ptr().add(i) as *mut __m128i,
                _mm256_castsi256_si128(bytes),
            );
        }
    }

    for i in vec_len..len {
        let r = mode.apply_f32(src[i] * scale);
        dst[i] = if r.is_nan() { 0 } else { r.clamp(0.0, 255.0) as u8 };
    }
}

/// Fixed-point widening: `dst[i] = src[i] as f32 * 2^-scale_factor`.
pub fn i16_to_f32(src: &[i16], dst: &mut [f32], scale_factor: i32) {
    debug_assert_eq!(src.len(), dst.len(), "length mismatch");
    let len = src.len().min(dst.len());
    let vec_len = len - len % 8;

    let scale = (-scale_factor as f32).exp2();
    let scale_v = unsafe { _mm256_set1_ps(scale) };

    for i in (0..vec_len).step_by(8) {
        unsafe {
            let halves = _mm_loadu_si128(src.as_ptr().add(i) as *const __m128i);
            let wide = _mm256_cvtepi16_epi32(halves);
            let f = _mm256_mul_ps(_mm256_cvtepi32_ps(wide), scale_v);
            _mm256_storeu_ps(dst.as_mut_ptr().add(i), f);
        }
    }

    for i in vec_len..len {
        dst[i] = src[i] as f32 * scale;
    }
}

/// Precision narrowing, round to nearest even (same as an `as f32` cast).
pub fn f64_to_f32(src: &[f64], dst: &mut [f32]) {
    debug_assert_eq!(src.len(), dst.len(), "length mismatch");
    let len = src.len().min(dst.len());
    let vec_len = len - len % 4;

    for i in (0..vec_len).step_by(4) {
        unsafe {
            let narrow = _mm256_cvtpd_ps(_mm256_loadu_pd(src.as_ptr().add(i)));
            _mm_storeu_ps(dst.as_mut_ptr().add(i), narrow);
        }
    }

    for i in vec_len..len {
        dst[i] = src[i] as f32;
    }
}

/// Precision widening (exact).
pub fn f32_to_f64(src: &[f32], dst: &mut [f64]) {
    debug_assert_eq!(src.len(), dst.len(), "length mismatch");
    let len = src.len().min(dst.len());
    let vec_len = len - len % 4;

    for i in (0..vec_len).step_by(4) {
        unsafe {
            let wide = _mm256_cvtps_pd(_mm_loadu_ps(src.as_ptr().add(i)));
            _mm256_storeu_pd(dst.as_mut_ptr().add(i), wide);
        }
    }

    for i in vec_len..len {
        dst[i] = src[i] as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_and_scalar_rounding_agree() {
        let inputs: [f32; 8] = [0.5, 1.5, 2.5, -0.5, -1.5, -2.5, 7.49, -7.51];
        for mode in [
            RoundingMode::NearestEven,
            RoundingMode::TowardZero,
            RoundingMode::Nearest,
        ] {
            let mut out = [0.0f32; 8];
            unsafe {
                let v = _mm256_loadu_ps(inputs.as_ptr());
                _mm256_storeu_ps(out.as_mut_ptr(), mode.round_ps(v));
            }
            for i in 0..8 {
                assert_eq!(
                    out[i].to_bits(),
                    mode.apply_f32(inputs[i]).to_bits(),
                    "{mode:?} lane {i} ({})",
                    inputs[i]
                );
            }
        }
    }

    #[test]
    fn test_tie_behavior_per_mode() {
        assert_eq!(RoundingMode::NearestEven.apply_f32(2.5), 2.0);
        assert_eq!(RoundingMode::NearestEven.apply_f32(-2.5), -2.0);
        assert_eq!(RoundingMode::TowardZero.apply_f32(2.5), 2.0);
        assert_eq!(RoundingMode::TowardZero.apply_f32(-2.5), -2.0);
        assert_eq!(RoundingMode::Nearest.apply_f32(2.5), 3.0);
        assert_eq!(RoundingMode::Nearest.apply_f32(-2.5), -2.0);
    }
}
