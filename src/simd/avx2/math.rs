//! AVX2 single-precision transcendental kernels.
//!
//! Each kernel maps 8 packed f32 lanes through the classic Cephes-derived
//! scheme: extract and stash the sign, reduce the magnitude into the
//! polynomial's validated interval (tracking octant/exponent side
//! information in integer lanes), evaluate a minimax polynomial or rational
//! in Horner form with FMA, then undo the reduction with mask-and-blend
//! selection only — no lane ever takes a data-dependent branch.
//!
//! Coefficient tables are reproduced bit-for-bit from the Cephes single
//! precision fits; evaluation order follows the tables (highest degree
//! first) and must not be reassociated.
//!
//! # Accuracy
//!
//! | Kernel | Validated domain | Peak error |
//! |--------|------------------|------------|
//! | `_mm256_sincos_ps` | \|x\| ≲ 8192 | ~1 ULP |
//! | `_mm256_tan_ps` | \|x\| ≲ 8192 | ~2 ULP |
//! | `_mm256_asin_ps` / `_mm256_acos_ps` | [-1, 1] | ~1 ULP |
//! | `_mm256_atan_ps` / `_mm256_atan2_ps` | all finite | ~2 ULP |
//! | `_mm256_exp_ps` | [-87.3, 88.7] | ~1 ULP |
//! | `_mm256_ln_ps` | (0, +∞) | ~1 ULP |
//! | `_mm256_pow_ps` | x > 0 | ~4 ULP (exp∘ln) |
//!
//! Outside the validated trig domain the octant index overflows its integer
//! lane and the result is meaningless; the slice dispatchers keep the scalar
//! tail consistent but do not mask this.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

// --- Range reduction: 4/π and π/4 split over three f32 terms ---
const FOPI: f32 = 1.27323954473516;
const MINUS_DP1: f32 = -0.78515625;
const MINUS_DP2: f32 = -2.4187564849853515625e-4;
const MINUS_DP3: f32 = -3.77489497744594108e-8;

// sin(x)/x - 1 and cos(x) minimax coefficients on [-π/4, π/4], in z = x².
const SINCOF_P0: f32 = -1.9515295891e-4;
const SINCOF_P1: f32 = 8.3321608736e-3;
const SINCOF_P2: f32 = -1.6666654611e-1;
const COSCOF_P0: f32 = 2.443315711809948e-5;
const COSCOF_P1: f32 = -1.388731625493765e-3;
const COSCOF_P2: f32 = 4.166664568298827e-2;

// tan(x)/x polynomial on [0, π/4], in z = x².
const TAN_P0: f32 = 9.38540185543e-3;
const TAN_P1: f32 = 3.11992232697e-3;
const TAN_P2: f32 = 2.44301354525e-2;
const TAN_P3: f32 = 5.34112807005e-2;
const TAN_P4: f32 = 1.33387994085e-1;
const TAN_P5: f32 = 3.33331568548e-1;

// asin polynomial on the reduced argument, in z.
const ASIN_P0: f32 = 4.2163199048e-2;
const ASIN_P1: f32 = 2.4181311049e-2;
const ASIN_P2: f32 = 4.5470025998e-2;
const ASIN_P3: f32 = 7.4953002686e-2;
const ASIN_P4: f32 = 1.6666752422e-1;

// atan polynomial and reduction thresholds tan(π/8), tan(3π/8).
const ATAN_P0: f32 = 8.05374449538e-2;
const ATAN_P1: f32 = -1.38776856032e-1;
const ATAN_P2: f32 = 1.99777106478e-1;
const ATAN_P3: f32 = -3.33329491539e-1;
const TANPI8F: f32 = 0.414213562373095;
const TAN3PI8F: f32 = 2.414213562373095;

const PIF: f32 = std::f32::consts::PI;
const PIO2F: f32 = std::f32::consts::FRAC_PI_2;
const PIO4F: f32 = std::f32::consts::FRAC_PI_4;

// exp: clamp bounds, log2(e), ln2 split, expm1 polynomial.
pub(crate) const EXP_HI: f32 = 88.3762626647949;
pub(crate) const EXP_LO: f32 = -88.3762626647949;
const LOG2EF: f32 = 1.44269504088896341;
const EXP_C1: f32 = 0.693359375;
const EXP_C2: f32 = -2.12194440e-4;
const EXP_P0: f32 = 1.9875691500e-4;
const EXP_P1: f32 = 1.3981999507e-3;
const EXP_P2: f32 = 8.3334519073e-3;
const EXP_P3: f32 = 4.1665795894e-2;
const EXP_P4: f32 = 1.6666665459e-1;
const EXP_P5: f32 = 5.0000001201e-1;

// log: mantissa split threshold √0.5, log(1+x) polynomial, ln2 split.
const SQRTHF: f32 = 0.707106781186547524;
const LOG_P0: f32 = 7.0376836292e-2;
const LOG_P1: f32 = -1.1514610310e-1;
const LOG_P2: f32 = 1.1676998740e-1;
const LOG_P3: f32 = -1.2420140846e-1;
const LOG_P4: f32 = 1.4249322787e-1;
const LOG_P5: f32 = -1.6668057665e-1;
const LOG_P6: f32 = 2.0000714765e-1;
const LOG_P7: f32 = -2.4999993993e-1;
const LOG_P8: f32 = 3.3333331174e-1;
const LOG_Q1: f32 = -2.12194440e-4;
const LOG_Q2: f32 = 0.693359375;

const INVLN10: f32 = 0.4342944819032518;

/// Clears the sign bit of every lane.
#[inline(always)]
unsafe fn _mm256_abs_ps(x: __m256) -> __m256 {
    _mm256_andnot_ps(_mm256_set1_ps(-0.0), x)
}

/// Sign bits of `x`, isolated.
#[inline(always)]
unsafe fn sign_bits_ps(x: __m256) -> __m256 {
    _mm256_and_ps(x, _mm256_set1_ps(-0.0))
}

/// `magnitude` carrying the sign of `sign_source`.
#[inline(always)]
unsafe fn copy_sign_ps(magnitude: __m256, sign_source: __m256) -> __m256 {
    _mm256_or_ps(_mm256_abs_ps(magnitude), sign_bits_ps(sign_source))
}

/// Computes sine and cosine of 8 packed f32 lanes in one reduction pass.
///
/// Range reduction multiplies |x| by 4/π, rounds the quotient up to the next
/// even octant index, and subtracts that many π/4 in three extended-precision
/// steps (DP1/DP2/DP3) so cancellation does not eat the reduced argument.
/// The low octant bits drive polynomial choice (sine-form vs cosine-form)
/// and the two output signs, all applied through blends.
pub(crate) unsafe fn _mm256_sincos_ps(x: __m256) -> (__m256, __m256) {
    let mut sign_bit_sin = sign_bits_ps(x);
    let x_abs = _mm256_abs_ps(x);

    // Octant index j, forced even: j = (trunc(|x|·4/π) + 1) & ~1.
    let y = _mm256_mul_ps(x_abs, _mm256_set1_ps(FOPI));
    let mut emm2 = _mm256_cvttps_epi32(y);
    emm2 = _mm256_add_epi32(emm2, _mm256_set1_epi32(1));
    emm2 = _mm256_and_si256(emm2, _mm256_set1_epi32(!1));
    let y = _mm256_cvtepi32_ps(emm2);

    let emm4 = emm2;

    // Sine sign flips on bit 2 of the octant; shift it up to the f32 sign bit.
    let emm0 = _mm256_and_si256(emm2, _mm256_set1_epi32(4));
    let swap_sign_bit_sin = _mm256_castsi256_ps(_mm256_slli_epi32(emm0, 29));
    sign_bit_sin = _mm256_xor_ps(sign_bit_sin, swap_sign_bit_sin);

    // Octant bit 1 selects which polynomial feeds which output.
    let emm2 = _mm256_and_si256(emm2, _mm256_set1_epi32(2));
    let poly_mask = _mm256_castsi256_ps(_mm256_cmpeq_epi32(emm2, _mm256_setzero_si256()));

    // Cosine sign: ~(j - 2) & 4, shifted to the sign bit.
    let emm4 = _mm256_sub_epi32(emm4, _mm256_set1_epi32(2));
    let emm4 = _mm256_andnot_si256(emm4, _mm256_set1_epi32(4));
    let sign_bit_cos = _mm256_castsi256_ps(_mm256_slli_epi32(emm4, 29));

    // Extended-precision reduction: x - j·π/4 without catastrophic rounding.
    let mut x_red = _mm256_fmadd_ps(y, _mm256_set1_ps(MINUS_DP1), x_abs);
    x_red = _mm256_fmadd_ps(y, _mm256_set1_ps(MINUS_DP2), x_red);
    x_red = _mm256_fmadd_ps(y, _mm256_set1_ps(MINUS_DP3), x_red);

    let z = _mm256_mul_ps(x_red, x_red);

    // Cosine-form polynomial: 1 - z/2 + z²·C(z).
    let mut c = _mm256_set1_ps(COSCOF_P0);
    c = _mm256_fmadd_ps(c, z, _mm256_set1_ps(COSCOF_P1));
    c = _mm256_fmadd_ps(c, z, _mm256_set1_ps(COSCOF_P2));
    c = _mm256_mul_ps(_mm256_mul_ps(c, z), z);
    c = _mm256_fnmadd_ps(z, _mm256_set1_ps(0.5), c);
    c = _mm256_add_ps(c, _mm256_set1_ps(1.0));

    // Sine-form polynomial: x + x·z·S(z).
    let mut s = _mm256_set1_ps(SINCOF_P0);
    s = _mm256_fmadd_ps(s, z, _mm256_set1_ps(SINCOF_P1));
    s = _mm256_fmadd_ps(s, z, _mm256_set1_ps(SINCOF_P2));
    s = _mm256_mul_ps(s, z);
    s = _mm256_fmadd_ps(s, x_red, x_red);

    let sin_val = _mm256_blendv_ps(c, s, poly_mask);
    let cos_val = _mm256_blendv_ps(s, c, poly_mask);

    (
        _mm256_xor_ps(sin_val, sign_bit_sin),
        _mm256_xor_ps(cos_val, sign_bit_cos),
    )
}

/// Sine of 8 packed f32 lanes.
pub(crate) unsafe fn _mm256_sin_ps(x: __m256) -> __m256 {
    _mm256_sincos_ps(x).0
}

/// Cosine of 8 packed f32 lanes.
pub(crate) unsafe fn _mm256_cos_ps(x: __m256) -> __m256 {
    _mm256_sincos_ps(x).1
}

/// Tangent of 8 packed f32 lanes.
///
/// Same octant reduction as `_mm256_sincos_ps` but with a floor-style index
/// (odd octants bumped by one); octant bit 1 swaps in the cotangent identity
/// `-1/t` after the polynomial.
pub(crate) unsafe fn _mm256_tan_ps(x: __m256) -> __m256 {
    let sign_bit = sign_bits_ps(x);
    let x_abs = _mm256_abs_ps(x);

    let y = _mm256_mul_ps(x_abs, _mm256_set1_ps(FOPI));
    let mut j = _mm256_cvttps_epi32(y);
    let mut y = _mm256_cvtepi32_ps(j);

    // Map odd octants onto the next even one.
    let j_and_one = _mm256_and_si256(j, _mm256_set1_epi32(1));
    let odd_mask_i = _mm256_cmpeq_epi32(j_and_one, _mm256_set1_epi32(1));
    let odd_mask = _mm256_castsi256_ps(odd_mask_i);
    j = _mm256_sub_epi32(j, odd_mask_i); // mask lanes are -1: j += 1
    y = _mm256_add_ps(y, _mm256_and_ps(odd_mask, _mm256_set1_ps(1.0)));

    let mut z = _mm256_fmadd_ps(y, _mm256_set1_ps(MINUS_DP1), x_abs);
    z = _mm256_fmadd_ps(y, _mm256_set1_ps(MINUS_DP2), z);
    z = _mm256_fmadd_ps(y, _mm256_set1_ps(MINUS_DP3), z);

    let zz = _mm256_mul_ps(z, z);

    let mut poly = _mm256_set1_ps(TAN_P0);
    poly = _mm256_fmadd_ps(poly, zz, _mm256_set1_ps(TAN_P1));
    poly = _mm256_fmadd_ps(poly, zz, _mm256_set1_ps(TAN_P2));
    poly = _mm256_fmadd_ps(poly, zz, _mm256_set1_ps(TAN_P3));
    poly = _mm256_fmadd_ps(poly, zz, _mm256_set1_ps(TAN_P4));
    poly = _mm256_fmadd_ps(poly, zz, _mm256_set1_ps(TAN_P5));
    poly = _mm256_mul_ps(poly, zz);
    poly = _mm256_fmadd_ps(poly, z, z);

    // Below 1e-4 the reduced argument is its own tangent.
    let tiny_mask = _mm256_cmp_ps(x_abs, _mm256_set1_ps(1.0e-4), _CMP_LE_OQ);
    let t = _mm256_blendv_ps(poly, z, tiny_mask);

    // Octant bit 1: tan(x) = -1/tan(x - π/2).
    let j_and_two = _mm256_cmpeq_epi32(
        _mm256_and_si256(j, _mm256_set1_epi32(2)),
        _mm256_set1_epi32(2),
    );
    let recip = _mm256_div_ps(_mm256_set1_ps(-1.0), t);
    let t = _mm256_blendv_ps(t, recip, _mm256_castsi256_ps(j_and_two));

    _mm256_xor_ps(t, sign_bit)
}

/// Arcsine of 8 packed f32 lanes.
///
/// Two-branch reduction at |x| = 0.5: above it the identity
/// `asin(x) = π/2 - 2·asin(√((1-x)/2))` maps the argument back under the
/// polynomial's interval. Inputs below 1e-4 short-circuit to the identity
/// function.
///
/// Domain policy: lanes with |x| > 1 produce exactly `0.0` (both signs),
/// not NaN. Callers relying on IEEE domain errors must pre-filter.
pub(crate) unsafe fn _mm256_asin_ps(x: __m256) -> __m256 {
    let a = _mm256_abs_ps(x);
    let sign_bit = sign_bits_ps(x);

    let tiny_mask = _mm256_cmp_ps(a, _mm256_set1_ps(1.0e-4), _CMP_LT_OQ);
    let big_mask = _mm256_cmp_ps(a, _mm256_set1_ps(0.5), _CMP_GT_OQ);

    // Branch arguments, both computed: z = (1-a)/2, x = √z above 0.5;
    // z = a², x = a below.
    let z_big = _mm256_mul_ps(
        _mm256_set1_ps(0.5),
        _mm256_sub_ps(_mm256_set1_ps(1.0), a),
    );
    let x_big = _mm256_sqrt_ps(z_big);
    let z_small = _mm256_mul_ps(a, a);

    let z = _mm256_blendv_ps(z_small, z_big, big_mask);
    let xr = _mm256_blendv_ps(a, x_big, big_mask);

    let mut p = _mm256_set1_ps(ASIN_P0);
    p = _mm256_fmadd_ps(p, z, _mm256_set1_ps(ASIN_P1));
    p = _mm256_fmadd_ps(p, z, _mm256_set1_ps(ASIN_P2));
    p = _mm256_fmadd_ps(p, z, _mm256_set1_ps(ASIN_P3));
    p = _mm256_fmadd_ps(p, z, _mm256_set1_ps(ASIN_P4));
    p = _mm256_mul_ps(p, z);
    p = _mm256_fmadd_ps(p, xr, xr);

    // Undo the big-branch identity: asin = π/2 - 2p.
    let p_big = _mm256_fnmadd_ps(_mm256_set1_ps(2.0), p, _mm256_set1_ps(PIO2F));
    let mut res = _mm256_blendv_ps(p, p_big, big_mask);

    res = _mm256_blendv_ps(res, a, tiny_mask);
    res = _mm256_xor_ps(res, sign_bit);

    // |x| > 1 clamps to +0.0 exactly, overriding everything above.
    let out_of_domain = _mm256_cmp_ps(a, _mm256_set1_ps(1.0), _CMP_GT_OQ);
    _mm256_blendv_ps(res, _mm256_setzero_ps(), out_of_domain)
}

/// Arccosine of 8 packed f32 lanes, via `acos(x) = π/2 - asin(x)`.
///
/// Inherits the asin domain policy: |x| > 1 yields exactly π/2.
pub(crate) unsafe fn _mm256_acos_ps(x: __m256) -> __m256 {
    _mm256_sub_ps(_mm256_set1_ps(PIO2F), _mm256_asin_ps(x))
}

/// Arctangent of 8 packed f32 lanes.
///
/// Three-way reduction: above tan(3π/8) take `atan(x) = π/2 - atan(1/x)`;
/// between tan(π/8) and tan(3π/8) take `atan(x) = π/4 + atan((x-1)/(x+1))`;
/// below, the polynomial applies directly. The blends add the matching
/// correction (π/2, π/4, 0).
pub(crate) unsafe fn _mm256_atan_ps(x: __m256) -> __m256 {
    let sign_bit = sign_bits_ps(x);
    let a = _mm256_abs_ps(x);

    let hi_mask = _mm256_cmp_ps(a, _mm256_set1_ps(TAN3PI8F), _CMP_GT_OQ);
    let mid_mask = _mm256_cmp_ps(a, _mm256_set1_ps(TANPI8F), _CMP_GT_OQ);

    let one = _mm256_set1_ps(1.0);
    let xr_hi = _mm256_div_ps(_mm256_set1_ps(-1.0), a);
    let xr_mid = _mm256_div_ps(_mm256_sub_ps(a, one), _mm256_add_ps(a, one));

    let xr = _mm256_blendv_ps(a, xr_mid, mid_mask);
    let xr = _mm256_blendv_ps(xr, xr_hi, hi_mask);

    let offset = _mm256_blendv_ps(_mm256_setzero_ps(), _mm256_set1_ps(PIO4F), mid_mask);
    let offset = _mm256_blendv_ps(offset, _mm256_set1_ps(PIO2F), hi_mask);

    let z = _mm256_mul_ps(xr, xr);
    let mut p = _mm256_set1_ps(ATAN_P0);
    p = _mm256_fmadd_ps(p, z, _mm256_set1_ps(ATAN_P1));
    p = _mm256_fmadd_ps(p, z, _mm256_set1_ps(ATAN_P2));
    p = _mm256_fmadd_ps(p, z, _mm256_set1_ps(ATAN_P3));
    p = _mm256_mul_ps(p, z);
    p = _mm256_fmadd_ps(p, xr, xr);

    let res = _mm256_add_ps(offset, p);
    _mm256_xor_ps(res, sign_bit)
}

/// Two-argument arctangent of 8 packed (y, x) lane pairs.
///
/// Delegates to `atan(y/x)` and patches quadrants with a fixed blend
/// precedence (later rows override earlier ones):
/// 1. x < 0 adds ±π (sign of y);
/// 2. x == 0 forces ±π/2 (sign of y);
/// 3. x == 0 and y == 0 forces 0.
///
/// `atan2(0, -5) = π`, `atan2(-3, 0) = -π/2` and `atan2(0, 0) = 0` hold
/// exactly since the overriding lanes come from constants.
pub(crate) unsafe fn _mm256_atan2_ps(y: __m256, x: __m256) -> __m256 {
    let zero = _mm256_setzero_ps();

    let x_neg = _mm256_cmp_ps(x, zero, _CMP_LT_OQ);
    let x_zero = _mm256_cmp_ps(x, zero, _CMP_EQ_OQ);
    let y_zero = _mm256_cmp_ps(y, zero, _CMP_EQ_OQ);

    let q = _mm256_atan_ps(_mm256_div_ps(y, x));

    // x < 0: shift into the second/third quadrant.
    let shifted = _mm256_add_ps(q, copy_sign_ps(_mm256_set1_ps(PIF), y));
    let mut z = _mm256_blendv_ps(q, shifted, x_neg);

    // x == 0: ±π/2 regardless of the division result.
    z = _mm256_blendv_ps(z, copy_sign_ps(_mm256_set1_ps(PIO2F), y), x_zero);

    // Origin: conventionally 0.
    let origin = _mm256_and_ps(x_zero, y_zero);
    _mm256_blendv_ps(z, zero, origin)
}

/// Exponential of 8 packed f32 lanes.
///
/// n = floor(x·log2(e) + 0.5) splits out the power of two; the remainder is
/// reduced by n·ln2 in two constants (C1 exact in f32, C2 the residue) and
/// run through a degree-5 polynomial. Reconstruction builds 2^n directly in
/// the exponent field instead of multiplying n times.
pub(crate) unsafe fn _mm256_exp_ps(x: __m256) -> __m256 {
    // NaN lanes would otherwise be clamped into range; remember them.
    let nan_mask = _mm256_cmp_ps(x, x, _CMP_UNORD_Q);

    let mut x = _mm256_min_ps(x, _mm256_set1_ps(EXP_HI));
    x = _mm256_max_ps(x, _mm256_set1_ps(EXP_LO));

    let fx = _mm256_fmadd_ps(x, _mm256_set1_ps(LOG2EF), _mm256_set1_ps(0.5));
    let fx = _mm256_floor_ps(fx);

    x = _mm256_fnmadd_ps(fx, _mm256_set1_ps(EXP_C1), x);
    x = _mm256_fnmadd_ps(fx, _mm256_set1_ps(EXP_C2), x);

    let z = _mm256_mul_ps(x, x);

    let mut y = _mm256_set1_ps(EXP_P0);
    y = _mm256_fmadd_ps(y, x, _mm256_set1_ps(EXP_P1));
    y = _mm256_fmadd_ps(y, x, _mm256_set1_ps(EXP_P2));
    y = _mm256_fmadd_ps(y, x, _mm256_set1_ps(EXP_P3));
    y = _mm256_fmadd_ps(y, x, _mm256_set1_ps(EXP_P4));
    y = _mm256_fmadd_ps(y, x, _mm256_set1_ps(EXP_P5));
    y = _mm256_fmadd_ps(y, z, x);
    y = _mm256_add_ps(y, _mm256_set1_ps(1.0));

    // 2^n assembled in the exponent field.
    let mut emm0 = _mm256_cvttps_epi32(fx);
    emm0 = _mm256_add_epi32(emm0, _mm256_set1_epi32(0x7f));
    emm0 = _mm256_slli_epi32(emm0, 23);
    let pow2n = _mm256_castsi256_ps(emm0);

    let res = _mm256_mul_ps(y, pow2n);
    _mm256_blendv_ps(res, _mm256_set1_ps(f32::NAN), nan_mask)
}

/// Natural logarithm of 8 packed f32 lanes.
///
/// The exponent comes straight out of the IEEE representation; the mantissa
/// is forced into [0.5, 1) and nudged below/above √0.5 to keep the log(1+m)
/// polynomial centered. Recombination splits ln2 into 0.693359375 and
/// -2.12194440e-4 so e·ln2 rounds the same way the reference tables did.
///
/// Non-positive lanes return NaN; subnormals are flushed up to the smallest
/// normal before the exponent split.
pub(crate) unsafe fn _mm256_ln_ps(x: __m256) -> __m256 {
    let invalid_mask = _mm256_cmp_ps(x, _mm256_setzero_ps(), _CMP_LE_OQ);

    let min_norm_pos = _mm256_castsi256_ps(_mm256_set1_epi32(0x0080_0000));
    let mut x = _mm256_max_ps(x, min_norm_pos);

    let mut emm0 = _mm256_srli_epi32(_mm256_castps_si256(x), 23);
    emm0 = _mm256_sub_epi32(emm0, _mm256_set1_epi32(0x7f));
    let mut e = _mm256_cvtepi32_ps(emm0);
    e = _mm256_add_ps(e, _mm256_set1_ps(1.0));

    // Mantissa into [0.5, 1).
    let inv_mant_mask = _mm256_castsi256_ps(_mm256_set1_epi32(!0x7f80_0000));
    x = _mm256_and_ps(x, inv_mant_mask);
    x = _mm256_or_ps(x, _mm256_set1_ps(0.5));

    // Below √0.5: halve the exponent's claim and double the mantissa.
    let mask = _mm256_cmp_ps(x, _mm256_set1_ps(SQRTHF), _CMP_LT_OQ);
    let tmp = _mm256_and_ps(x, mask);
    x = _mm256_sub_ps(x, _mm256_set1_ps(1.0));
    e = _mm256_sub_ps(e, _mm256_and_ps(_mm256_set1_ps(1.0), mask));
    x = _mm256_add_ps(x, tmp);

    let z = _mm256_mul_ps(x, x);

    let mut y = _mm256_set1_ps(LOG_P0);
    y = _mm256_fmadd_ps(y, x, _mm256_set1_ps(LOG_P1));
    y = _mm256_fmadd_ps(y, x, _mm256_set1_ps(LOG_P2));
    y = _mm256_fmadd_ps(y, x, _mm256_set1_ps(LOG_P3));
    y = _mm256_fmadd_ps(y, x, _mm256_set1_ps(LOG_P4));
    y = _mm256_fmadd_ps(y, x, _mm256_set1_ps(LOG_P5));
    y = _mm256_fmadd_ps(y, x, _mm256_set1_ps(LOG_P6));
    y = _mm256_fmadd_ps(y, x, _mm256_set1_ps(LOG_P7));
    y = _mm256_fmadd_ps(y, x, _mm256_set1_ps(LOG_P8));

    y = _mm256_mul_ps(y, x);
    y = _mm256_mul_ps(y, z);

    y = _mm256_fmadd_ps(e, _mm256_set1_ps(LOG_Q1), y);
    y = _mm256_fnmadd_ps(z, _mm256_set1_ps(0.5), y);

    x = _mm256_add_ps(x, y);
    x = _mm256_fmadd_ps(e, _mm256_set1_ps(LOG_Q2), x);

    // All-ones is a NaN pattern: poison the out-of-domain lanes.
    _mm256_or_ps(x, invalid_mask)
}

/// Base-10 logarithm of 8 packed f32 lanes (`ln(x)·log10(e)`).
pub(crate) unsafe fn _mm256_log10_ps(x: __m256) -> __m256 {
    _mm256_mul_ps(_mm256_ln_ps(x), _mm256_set1_ps(INVLN10))
}

/// `x^y` of 8 packed f32 lane pairs, as `exp(y·ln(x))`.
///
/// x ≤ 0 propagates the NaN from the logarithm regardless of y.
pub(crate) unsafe fn _mm256_pow_ps(x: __m256, y: __m256) -> __m256 {
    _mm256_exp_ps(_mm256_mul_ps(y, _mm256_ln_ps(x)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(f: unsafe fn(__m256) -> __m256, input: [f32; 8]) -> [f32; 8] {
        let mut out = [0.0f32; 8];
        unsafe {
            let v = _mm256_loadu_ps(input.as_ptr());
            _mm256_storeu_ps(out.as_mut_ptr(), f(v));
        }
        out
    }

    fn assert_close(actual: f32, expected: f32, rel_tol: f32) {
        if expected == 0.0 {
            assert!(
                actual.abs() < 1e-6,
                "expected ~0, got {actual}"
            );
            return;
        }
        let rel = ((actual - expected) / expected).abs();
        assert!(
            rel < rel_tol,
            "expected {expected}, got {actual} (rel err {rel})"
        );
    }

    #[test]
    fn test_sincos_matches_std() {
        let input = [0.0f32, 0.5, 1.0, -1.5, 3.0, -3.0, 10.0, -42.5];
        let mut s = [0.0f32; 8];
        let mut c = [0.0f32; 8];
        unsafe {
            let (sv, cv) = _mm256_sincos_ps(_mm256_loadu_ps(input.as_ptr()));
            _mm256_storeu_ps(s.as_mut_ptr(), sv);
            _mm256_storeu_ps(c.as_mut_ptr(), cv);
        }
        for i in 0..8 {
            assert_close(s[i], input[i].sin(), 1e-5);
            assert_close(c[i], input[i].cos(), 1e-5);
        }
    }

    #[test]
    fn test_tan_matches_std() {
        let input = [0.0f32, 0.3, -0.3, 1.0, -1.4, 2.0, 4.0, -7.7];
        let out = apply(_mm256_tan_ps, input);
        for i in 0..8 {
            assert_close(out[i], input[i].tan(), 1e-4);
        }
    }

    #[test]
    fn test_asin_clamps_out_of_domain_to_zero() {
        let input = [2.0f32, -2.0, 1.5, -1.5, 100.0, -100.0, 1.0, -1.0];
        let out = apply(_mm256_asin_ps, input);
        for &v in &out[..6] {
            assert_eq!(v.to_bits(), 0.0f32.to_bits());
        }
        assert_close(out[6], std::f32::consts::FRAC_PI_2, 1e-6);
        assert_close(out[7], -std::f32::consts::FRAC_PI_2, 1e-6);
    }

    #[test]
    fn test_atan_matches_std() {
        let input = [0.0f32, 0.2, -0.6, 1.0, -2.0, 10.0, -100.0, 1e6];
        let out = apply(_mm256_atan_ps, input);
        for i in 0..8 {
            assert_close(out[i], input[i].atan(), 1e-5);
        }
    }

    #[test]
    fn test_atan2_special_cases_exact() {
        let y = [0.0f32, -3.0, 0.0, 1.0, -1.0, 0.0, 5.0, -5.0];
        let x = [-5.0f32, 0.0, 0.0, 1.0, -1.0, 7.0, 0.0, -0.0];
        let mut out = [0.0f32; 8];
        unsafe {
            let r = _mm256_atan2_ps(_mm256_loadu_ps(y.as_ptr()), _mm256_loadu_ps(x.as_ptr()));
            _mm256_storeu_ps(out.as_mut_ptr(), r);
        }
        assert_eq!(out[0], std::f32::consts::PI);
        assert_eq!(out[1], -std::f32::consts::FRAC_PI_2);
        assert_eq!(out[2], 0.0);
        assert_close(out[3], std::f32::consts::FRAC_PI_4, 1e-6);
        assert_close(out[4], -3.0 * std::f32::consts::FRAC_PI_4, 1e-6);
        assert_eq!(out[5], 0.0);
        assert_eq!(out[6], std::f32::consts::FRAC_PI_2);
        assert_eq!(out[7], -std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_exp_ln_roundtrip() {
        let input = [0.001f32, 0.1, 0.5, 1.0, 2.0, 10.0, 80.0, 1e-3];
        let out = apply(_mm256_exp_ps, input);
        for i in 0..8 {
            assert_close(out[i], input[i].exp(), 1e-5);
        }

        let pos = [1e-30f32, 0.25, 1.0, std::f32::consts::E, 10.0, 1e10, 1e30, 3.5];
        let out = apply(_mm256_ln_ps, pos);
        for i in 0..8 {
            if pos[i] == 1.0 {
                assert!(out[i].abs() < 1e-7);
            } else {
                assert_close(out[i], pos[i].ln(), 1e-5);
            }
        }
    }

    #[test]
    fn test_ln_of_non_positive_is_nan() {
        let input = [-1.0f32, 0.0, -0.0, -1e30, 2.0, 4.0, 8.0, 16.0];
        let out = apply(_mm256_ln_ps, input);
        for v in &out[..4] {
            assert!(v.is_nan());
        }
    }

    #[test]
    fn test_pow_composition() {
        let x = [0.5f32, 1.0, 2.0, 3.0, 4.0, 10.0, 0.1, 7.0];
        let y = [2.0f32, 5.0, 0.5, 3.0, -1.0, 0.0, 2.0, 1.0];
        let mut out = [0.0f32; 8];
        unsafe {
            let r = _mm256_pow_ps(_mm256_loadu_ps(x.as_ptr()), _mm256_loadu_ps(y.as_ptr()));
            _mm256_storeu_ps(out.as_mut_ptr(), r);
        }
        for i in 0..8 {
            assert_close(out[i], x[i].powf(y[i]), 1e-4);
        }
    }
}
