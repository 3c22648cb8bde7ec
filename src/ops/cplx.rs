//! Complex-valued operations.
//!
//! Interleaved layout is a `&[Complex<T>]` slice (re, im adjacent in
//! memory); split layout is two plain slices. The lane paths deinterleave
//! pairs into separate re/im registers with unpack + cross-lane permute
//! shuffles, run the real kernels, and interleave back on the way out.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use num::complex::{Complex32, Complex64};

use crate::ops::dispatch;
use crate::simd::avx2::{math64, f32x8, f64x4};

// [re0 im0 re1 im1], [re2 im2 re3 im3] -> [re0..re3], [im0..im3].
#[inline(always)]
unsafe fn deinterleave_pd(a: __m256d, b: __m256d) -> (__m256d, __m256d) {
    let re = _mm256_permute4x64_pd::<0b11011000>(_mm256_unpacklo_pd(a, b));
    let im = _mm256_permute4x64_pd::<0b11011000>(_mm256_unpackhi_pd(a, b));
    (re, im)
}

#[inline(always)]
unsafe fn interleave_pd(re: __m256d, im: __m256d) -> (__m256d, __m256d) {
    let rp = _mm256_permute4x64_pd::<0b11011000>(re);
    let ip = _mm256_permute4x64_pd::<0b11011000>(im);
    (_mm256_unpacklo_pd(rp, ip), _mm256_unpackhi_pd(rp, ip))
}

#[inline(always)]
unsafe fn deinterleave_ps(a: __m256, b: __m256) -> (__m256, __m256) {
    let re = _mm256_shuffle_ps::<0b10_00_10_00>(a, b);
    let im = _mm256_shuffle_ps::<0b11_01_11_01>(a, b);
    let re = _mm256_castpd_ps(_mm256_permute4x64_pd::<0b11011000>(_mm256_castps_pd(re)));
    let im = _mm256_castpd_ps(_mm256_permute4x64_pd::<0b11011000>(_mm256_castps_pd(im)));
    (re, im)
}

#[inline(always)]
unsafe fn interleave_ps(re: __m256, im: __m256) -> (__m256, __m256) {
    let rp = _mm256_castpd_ps(_mm256_permute4x64_pd::<0b11011000>(_mm256_castps_pd(re)));
    let ip = _mm256_castpd_ps(_mm256_permute4x64_pd::<0b11011000>(_mm256_castps_pd(im)));
    (_mm256_unpacklo_ps(rp, ip), _mm256_unpackhi_ps(rp, ip))
}

/// Elementwise complex power `x[i]^y[i]` for double-precision complex
/// slices.
///
/// `x^y = exp(y·log(x))` with `log(x) = (ln|x|, atan2(im, re))` and the
/// final complex exponential expanded through the fused sincos kernel.
/// Requires `x[i] != 0`.
pub fn pow_c64(x: &[Complex64], y: &[Complex64], dst: &mut [Complex64]) {
    debug_assert_eq!(x.len(), y.len(), "length mismatch");
    debug_assert_eq!(x.len(), dst.len(), "length mismatch");
    let len = x.len().min(y.len()).min(dst.len());
    let vec_len = len - len % f64x4::LANE_COUNT;

    let xp = x.as_ptr() as *const f64;
    let yp = y.as_ptr() as *const f64;
    let dp = dst.as_mut_ptr() as *mut f64;

    for i in (0..vec_len).step_by(f64x4::LANE_COUNT) {
        unsafe {
            let (x_re, x_im) = deinterleave_pd(
                _mm256_loadu_pd(xp.add(2 * i)),
                _mm256_loadu_pd(xp.add(2 * i + 4)),
            );
            let (y_re, y_im) = deinterleave_pd(
                _mm256_loadu_pd(yp.add(2 * i)),
                _mm256_loadu_pd(yp.add(2 * i + 4)),
            );

            let modulus = _mm256_sqrt_pd(_mm256_fmadd_pd(x_re, x_re, _mm256_mul_pd(x_im, x_im)));
            let log_re = math64::_mm256_ln_pd(modulus);
            let log_im = math64::_mm256_atan2_pd(x_im, x_re);

            // y · log(x)
            let ac = _mm256_mul_pd(log_re, y_re);
            let ad = _mm256_mul_pd(log_re, y_im);
            let w_re = _mm256_fnmadd_pd(log_im, y_im, ac);
            let w_im = _mm256_fmadd_pd(log_im, y_re, ad);

            // exp(w) = e^re · (cos im, sin im)
            let scale = math64::_mm256_exp_pd(w_re);
            let (s, c) = math64::_mm256_sincos_pd(w_im);
            let (out_a, out_b) =
                interleave_pd(_mm256_mul_pd(scale, c), _mm256_mul_pd(scale, s));
            _mm256_storeu_pd(dp.add(2 * i), out_a);
            _mm256_storeu_pd(dp.add(2 * i + 4), out_b);
        }
    }

    for i in vec_len..len {
        dst[i] = x[i].powc(y[i]);
    }
}

/// Elementwise magnitude `sqrt(re² + im²)` over split slices.
pub fn magnitude_f32(re: &[f32], im: &[f32], dst: &mut [f32]) {
    dispatch::binary_f32(
        re,
        im,
        dst,
        |r, i| r.fmadd(r, i * i).sqrt(),
        |r, i| r.mul_add(r, i * i).sqrt(),
    );
}

/// Elementwise magnitude `sqrt(re² + im²)` over split slices (f64).
pub fn magnitude_f64(re: &[f64], im: &[f64], dst: &mut [f64]) {
    dispatch::binary_f64(
        re,
        im,
        dst,
        |r, i| r.fmadd(r, i * i).sqrt(),
        |r, i| r.mul_add(r, i * i).sqrt(),
    );
}

/// Argument of each interleaved complex value: `dst[i] = atan2(im, re)`.
pub fn atan2_interleaved_f64(xy: &[Complex64], dst: &mut [f64]) {
    debug_assert_eq!(xy.len(), dst.len(), "length mismatch");
    let len = xy.len().min(dst.len());
    let vec_len = len - len % f64x4::LANE_COUNT;

    let sp = xy.as_ptr() as *const f64;
    for i in (0..vec_len).step_by(f64x4::LANE_COUNT) {
        unsafe {
            let (re, im) = deinterleave_pd(
                _mm256_loadu_pd(sp.add(2 * i)),
                _mm256_loadu_pd(sp.add(2 * i + 4)),
            );
            _mm256_storeu_pd(dst.as_mut_ptr().add(i), math64::_mm256_atan2_pd(im, re));
        }
    }

    for i in vec_len..len {
        dst[i] = xy[i].im.atan2(xy[i].re);
    }
}

/// Split re/im slices into an interleaved complex slice.
pub fn interleave_f64(re: &[f64], im: &[f64], dst: &mut [Complex64]) {
    debug_assert_eq!(re.len(), im.len(), "length mismatch");
    debug_assert_eq!(re.len(), dst.len(), "length mismatch");
    let len = re.len().min(im.len()).min(dst.len());
    let vec_len = len - len % f64x4::LANE_COUNT;

    let dp = dst.as_mut_ptr() as *mut f64;
    for i in (0..vec_len).step_by(f64x4::LANE_COUNT) {
        unsafe {
            let (a, b) = interleave_pd(
                _mm256_loadu_pd(re.as_ptr().add(i)),
                _mm256_loadu_pd(im.as_ptr().add(i)),
            );
            _mm256_storeu_pd(dp.add(2 * i), a);
            _mm256_storeu_pd(dp.add(2 * i + 4), b);
        }
    }

    for i in vec_len..len {
        dst[i] = Complex64::new(re[i], im[i]);
    }
}

/// Interleaved complex slice into split re/im slices.
pub fn deinterleave_f64(src: &[Complex64], re: &mut [f64], im: &mut [f64]) {
    debug_assert_eq!(src.len(), re.len(), "length mismatch");
    debug_assert_eq!(src.len(), im.len(), "length mismatch");
    let len = src.len().min(re.len()).min(im.len());
    let vec_len = len - len % f64x4::LANE_COUNT;

    let sp = src.as_ptr() as *const f64;
    for i in (0..vec_len).step_by(f64x4::LANE_COUNT) {
        unsafe {
            let (r, m) = deinterleave_pd(
                _mm256_loadu_pd(sp.add(2 * i)),
                _mm256_loadu_pd(sp.add(2 * i + 4)),
            );
            _mm256_storeu_pd(re.as_mut_ptr().add(i), r);
            _mm256_storeu_pd(im.as_mut_ptr().add(i), m);
        }
    }

    for i in vec_len..len {
        re[i] = src[i].re;
        im[i] = src[i].im;
    }
}

/// Split re/im slices into an interleaved complex slice (f32).
pub fn interleave_f32(re: &[f32], im: &[f32], dst: &mut [Complex32]) {
    debug_assert_eq!(re.len(), im.len(), "length mismatch");
    debug_assert_eq!(re.len(), dst.len(), "length mismatch");
    let len = re.len().min(im.len()).min(dst.len());
    let vec_len = len - len % f32x8::LANE_COUNT;

    let dp = dst.as_mut_ptr() as *mut f32;
    for i in (0..vec_len).step_by(f32x8::LANE_COUNT) {
        unsafe {
            let (a, b) = interleave_ps(
                _mm256_loadu_ps(re.as_ptr().add(i)),
                _mm256_loadu_ps(im.as_ptr().add(i)),
            );
            _mm256_storeu_ps(dp.add(2 * i), a);
            _mm256_storeu_ps(dp.add(2 * i + 8), b);
        }
    }

    for i in vec_len..len {
        dst[i] = Complex32::new(re[i], im[i]);
    }
}

/// Interleaved complex slice into split re/im slices (f32).
pub fn deinterleave_f32(src: &[Complex32], re: &mut [f32], im: &mut [f32]) {
    debug_assert_eq!(src.len(), re.len(), "length mismatch");
    debug_assert_eq!(src.len(), im.len(), "length mismatch");
    let len = src.len().min(re.len()).min(im.len());
    let vec_len = len - len % f32x8::LANE_COUNT;

    let sp = src.as_ptr() as *const f32;
    for i in (0..vec_len).step_by(f32x8::LANE_COUNT) {
        unsafe {
            let (r, m) = deinterleave_ps(
                _mm256_loadu_ps(sp.add(2 * i)),
                _mm256_loadu_ps(sp.add(2 * i + 8)),
            );
            _mm256_storeu_ps(re.as_mut_ptr().add(i), r);
            _mm256_storeu_ps(im.as_mut_ptr().add(i), m);
        }
    }

    for i in vec_len..len {
        re[i] = src[i].re;
        im[i] = src[i].im;
    }
}
