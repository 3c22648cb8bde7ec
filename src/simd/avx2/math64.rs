//! AVX2 double-precision transcendental kernels.
//!
//! Same architecture as the f32 kernels in [`super::math`], using the Cephes
//! double-precision fits: rational approximations (ratio of two Horner
//! chains, denominators with an implicit leading 1) instead of the short
//! single-precision polynomials, and an extra MOREBITS correction term
//! wherever π/4 or π/2 is added back so the last ~53rd bit of the constant
//! is not lost.
//!
//! AVX2 has no 64-bit lane conversions or scalef, so octant indices travel
//! through the 2^52 magic-constant trick (`cvt_pd_epi64` / `cvt_epi64_pd`,
//! exact for |v| < 2^51) and exp's power-of-two reconstruction assembles the
//! biased exponent field with integer shifts.
//!
//! Validated domains: trig |x| ≲ 2^40 (octant fits the magic conversion),
//! exp |x| ≤ 708, log x > 0, pow x > 0. Peak error ≲ 2 ULP per the Cephes
//! error tables; pow composes exp∘ln and lands near 4 ULP.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

const FOPI: f64 = 1.2732395447351626862;

// sincos range reduction: π/4 over three doubles.
const MINUS_DP1: f64 = -7.85398125648498535156e-1;
const MINUS_DP2: f64 = -3.77489470793079817668e-8;
const MINUS_DP3: f64 = -2.69515142907905952645e-15;

const SINCOF_P0: f64 = 1.58962301576546568060e-10;
const SINCOF_P1: f64 = -2.50507477628578072866e-8;
const SINCOF_P2: f64 = 2.75573136213857245213e-6;
const SINCOF_P3: f64 = -1.98412698295895385996e-4;
const SINCOF_P4: f64 = 8.33333333332211858878e-3;
const SINCOF_P5: f64 = -1.66666666666666307295e-1;

const COSCOF_P0: f64 = -1.13585365213876817300e-11;
const COSCOF_P1: f64 = 2.08757008419747316778e-9;
const COSCOF_P2: f64 = -2.75573141792967388112e-7;
const COSCOF_P3: f64 = 2.48015872888517179954e-5;
const COSCOF_P4: f64 = -1.38888888888730564116e-3;
const COSCOF_P5: f64 = 4.16666666666666019037e-2;

// tan: its own π/4 split (more trailing bits) and rational tables.
const TAN_MDP1: f64 = -7.853981554508209228515625e-1;
const TAN_MDP2: f64 = -7.94662735614792836714e-9;
const TAN_MDP3: f64 = -3.06161699786838294307e-17;
const TAN_P0: f64 = -1.30936939181383777646e4;
const TAN_P1: f64 = 1.15351664838587416140e6;
const TAN_P2: f64 = -1.79565251976484877988e7;
const TAN_Q0: f64 = 1.36812963470692954678e4;
const TAN_Q1: f64 = -1.32089234440210967447e6;
const TAN_Q2: f64 = 2.50083801823357915839e7;
const TAN_Q3: f64 = -5.38695755929454629881e7;

// asin: R/S rational above 0.625, P/Q rational below.
const ASIN_R0: f64 = 2.967721961301243206100e-3;
const ASIN_R1: f64 = -5.634242780008963776856e-1;
const ASIN_R2: f64 = 6.968710824104713396794e0;
const ASIN_R3: f64 = -2.556901049652824852289e1;
const ASIN_R4: f64 = 2.853665548261061424989e1;
const ASIN_S0: f64 = -2.194779531642920639778e1;
const ASIN_S1: f64 = 1.470656354026814941758e2;
const ASIN_S2: f64 = -3.838770957603691357202e2;
const ASIN_S3: f64 = 3.424398657913078477438e2;
const ASIN_P0: f64 = 4.253011369004428248960e-3;
const ASIN_P1: f64 = -6.019598008014123785661e-1;
const ASIN_P2: f64 = 5.444622390564711410273e0;
const ASIN_P3: f64 = -1.626247967210700244449e1;
const ASIN_P4: f64 = 1.956261983317594840803e1;
const ASIN_P5: f64 = -8.198089802484824371615e0;
const ASIN_Q0: f64 = -1.474091372988853791896e1;
const ASIN_Q1: f64 = 7.049610280856842141659e1;
const ASIN_Q2: f64 = -1.471791292232726029859e2;
const ASIN_Q3: f64 = 1.395105614657485689735e2;
const ASIN_Q4: f64 = -4.918853881490881290097e1;

// atan: reduction thresholds tan(3π/8) and 0.66, flag-indexed corrections.
const ATAN_P0: f64 = -8.750608600031904122785e-1;
const ATAN_P1: f64 = -1.615753718733365076637e1;
const ATAN_P2: f64 = -7.500855792314704667340e1;
const ATAN_P3: f64 = -1.228866684490136173410e2;
const ATAN_P4: f64 = -6.485021904942025371773e1;
const ATAN_Q0: f64 = 2.485846490142306297962e1;
const ATAN_Q1: f64 = 1.650270098316988542046e2;
const ATAN_Q2: f64 = 4.328810604912902668951e2;
const ATAN_Q3: f64 = 4.853903996359136964868e2;
const ATAN_Q4: f64 = 1.945506571482613964425e2;
const TAN3PI8: f64 = 2.41421356237309504880;

// Trailing bits of π/2 beyond the f64 constant.
const MOREBITS: f64 = 6.123233995736765886130e-17;

const PIO4: f64 = std::f64::consts::FRAC_PI_4;
const PIO2: f64 = std::f64::consts::FRAC_PI_2;
const PID: f64 = std::f64::consts::PI;

// exp: log2(e), ln2 split, rational P/Q.
const LOG2E: f64 = 1.4426950408889634073599;
const EXP_MINC1: f64 = -6.93145751953125e-1;
const EXP_MINC2: f64 = -1.42860682030941723212e-6;
const EXP_P0: f64 = 1.26177193074810590878e-4;
const EXP_P1: f64 = 3.02994407707441961300e-2;
const EXP_P2: f64 = 9.99999999999999999910e-1;
const EXP_Q0: f64 = 3.00198505138664455042e-6;
const EXP_Q1: f64 = 2.52448340349684104192e-3;
const EXP_Q2: f64 = 2.27265548208155028766e-1;
const EXP_Q3: f64 = 2.00000000000000000005e0;

// log: P/Q rational for |e| ≤ 2, R/S shortcut in 2(x-1)/(x+1) otherwise.
const LOG_P0: f64 = 1.01875663804580931796e-4;
const LOG_P1: f64 = 4.97494994976747001425e-1;
const LOG_P2: f64 = 4.70579119878881725854e0;
const LOG_P3: f64 = 1.44989225341610930846e1;
const LOG_P4: f64 = 1.79368678507819816313e1;
const LOG_P5: f64 = 7.70838733755885391666e0;
const LOG_Q0: f64 = 1.12873587189167450590e1;
const LOG_Q1: f64 = 4.52279145837532221105e1;
const LOG_Q2: f64 = 8.29875266912776603211e1;
const LOG_Q3: f64 = 7.11544750618563894466e1;
const LOG_Q4: f64 = 2.31251620126765340583e1;
const LOG_R0: f64 = -7.89580278884799154124e-1;
const LOG_R1: f64 = 1.63866645699558079767e1;
const LOG_R2: f64 = -6.41409952958715622951e1;
const LOG_S0: f64 = -3.56722798256324312549e1;
const LOG_S1: f64 = 3.12093766372244180303e2;
const LOG_S2: f64 = -7.69691943550460008604e2;
const SQRTH: f64 = 0.70710678118654752440;
const LOG_MIN212E4: f64 = -2.121944400546905827679e-4;
const LOG_0P69: f64 = 0.693359375;

// 1.5 * 2^52: pins the integer part of a double in the low mantissa bits.
const EPI64_MAGIC: f64 = 6755399441055744.0;

#[inline(always)]
unsafe fn _mm256_abs_pd(x: __m256d) -> __m256d {
    _mm256_andnot_pd(_mm256_set1_pd(-0.0), x)
}

#[inline(always)]
unsafe fn sign_bits_pd(x: __m256d) -> __m256d {
    _mm256_and_pd(x, _mm256_set1_pd(-0.0))
}

#[inline(always)]
unsafe fn copy_sign_pd(magnitude: __m256d, sign_source: __m256d) -> __m256d {
    _mm256_or_pd(_mm256_abs_pd(magnitude), sign_bits_pd(sign_source))
}

/// Integral double lanes to i64 lanes. Exact for |v| < 2^51.
#[inline(always)]
unsafe fn cvt_pd_epi64(x: __m256d) -> __m256i {
    let magic = _mm256_set1_pd(EPI64_MAGIC);
    let shifted = _mm256_add_pd(x, magic);
    _mm256_sub_epi64(_mm256_castpd_si256(shifted), _mm256_castpd_si256(magic))
}

/// i64 lanes to double lanes. Exact for |v| < 2^51.
#[inline(always)]
unsafe fn cvt_epi64_pd(x: __m256i) -> __m256d {
    let magic = _mm256_set1_pd(EPI64_MAGIC);
    let bits = _mm256_add_epi64(x, _mm256_castpd_si256(magic));
    _mm256_sub_pd(_mm256_castsi256_pd(bits), magic)
}

/// Computes sine and cosine of 4 packed f64 lanes in one reduction pass.
///
/// Mirrors the f32 version with 64-bit octant lanes: the octant bit that
/// drives a sign lands on bit 2, so the shift up to the f64 sign bit is 61.
pub(crate) unsafe fn _mm256_sincos_pd(x: __m256d) -> (__m256d, __m256d) {
    let mut sign_bit_sin = sign_bits_pd(x);
    let x_abs = _mm256_abs_pd(x);

    let y = _mm256_floor_pd(_mm256_mul_pd(x_abs, _mm256_set1_pd(FOPI)));

    let mut emm2 = cvt_pd_epi64(y);
    emm2 = _mm256_add_epi64(emm2, _mm256_set1_epi64x(1));
    emm2 = _mm256_and_si256(emm2, _mm256_set1_epi64x(!1));
    let y = cvt_epi64_pd(emm2);

    let emm4 = emm2;

    let emm0 = _mm256_and_si256(emm2, _mm256_set1_epi64x(4));
    let swap_sign_bit_sin = _mm256_castsi256_pd(_mm256_slli_epi64(emm0, 61));
    sign_bit_sin = _mm256_xor_pd(sign_bit_sin, swap_sign_bit_sin);

    let emm2 = _mm256_and_si256(emm2, _mm256_set1_epi64x(2));
    let poly_mask = _mm256_castsi256_pd(_mm256_cmpeq_epi64(emm2, _mm256_setzero_si256()));

    let emm4 = _mm256_sub_epi64(emm4, _mm256_set1_epi64x(2));
    let emm4 = _mm256_andnot_si256(emm4, _mm256_set1_epi64x(4));
    let sign_bit_cos = _mm256_castsi256_pd(_mm256_slli_epi64(emm4, 61));

    let mut x_red = _mm256_fmadd_pd(y, _mm256_set1_pd(MINUS_DP1), x_abs);
    x_red = _mm256_fmadd_pd(y, _mm256_set1_pd(MINUS_DP2), x_red);
    x_red = _mm256_fmadd_pd(y, _mm256_set1_pd(MINUS_DP3), x_red);

    let z = _mm256_mul_pd(x_red, x_red);

    let mut c = _mm256_set1_pd(COSCOF_P0);
    c = _mm256_fmadd_pd(c, z, _mm256_set1_pd(COSCOF_P1));
    c = _mm256_fmadd_pd(c, z, _mm256_set1_pd(COSCOF_P2));
    c = _mm256_fmadd_pd(c, z, _mm256_set1_pd(COSCOF_P3));
    c = _mm256_fmadd_pd(c, z, _mm256_set1_pd(COSCOF_P4));
    c = _mm256_fmadd_pd(c, z, _mm256_set1_pd(COSCOF_P5));
    c = _mm256_mul_pd(_mm256_mul_pd(c, z), z);
    c = _mm256_fnmadd_pd(z, _mm256_set1_pd(0.5), c);
    c = _mm256_add_pd(c, _mm256_set1_pd(1.0));

    let mut s = _mm256_set1_pd(SINCOF_P0);
    s = _mm256_fmadd_pd(s, z, _mm256_set1_pd(SINCOF_P1));
    s = _mm256_fmadd_pd(s, z, _mm256_set1_pd(SINCOF_P2));
    s = _mm256_fmadd_pd(s, z, _mm256_set1_pd(SINCOF_P3));
    s = _mm256_fmadd_pd(s, z, _mm256_set1_pd(SINCOF_P4));
    s = _mm256_fmadd_pd(s, z, _mm256_set1_pd(SINCOF_P5));
    s = _mm256_mul_pd(s, z);
    s = _mm256_fmadd_pd(s, x_red, x_red);

    let sin_val = _mm256_blendv_pd(c, s, poly_mask);
    let cos_val = _mm256_blendv_pd(s, c, poly_mask);

    (
        _mm256_xor_pd(sin_val, sign_bit_sin),
        _mm256_xor_pd(cos_val, sign_bit_cos),
    )
}

/// Sine of 4 packed f64 lanes.
pub(crate) unsafe fn _mm256_sin_pd(x: __m256d) -> __m256d {
    _mm256_sincos_pd(x).0
}

/// Cosine of 4 packed f64 lanes.
pub(crate) unsafe fn _mm256_cos_pd(x: __m256d) -> __m256d {
    _mm256_sincos_pd(x).1
}

/// Tangent of 4 packed f64 lanes.
///
/// The octant index is kept modulo 8 (the high part is peeled off with a
/// floor-by-0.125 pass) so it fits the magic i64 conversion even for large
/// arguments; the rational P/Q core only runs when the reduced square is
/// above 1e-14, below that `tan(z) = z` to machine precision.
pub(crate) unsafe fn _mm256_tan_pd(x: __m256d) -> __m256d {
    let sign_bit = sign_bits_pd(x);
    let x_abs = _mm256_abs_pd(x);

    let mut y = _mm256_floor_pd(_mm256_mul_pd(x_abs, _mm256_set1_pd(FOPI)));

    // Octant modulo 8, so the integer lane only ever sees 0..=8.
    let z8 = _mm256_floor_pd(_mm256_mul_pd(y, _mm256_set1_pd(0.125)));
    let zmod = _mm256_fmadd_pd(z8, _mm256_set1_pd(-8.0), y);

    let mut j = cvt_pd_epi64(zmod);

    // Odd octants map onto the next even one.
    let odd_mask_i = _mm256_cmpeq_epi64(
        _mm256_and_si256(j, _mm256_set1_epi64x(1)),
        _mm256_set1_epi64x(1),
    );
    j = _mm256_sub_epi64(j, odd_mask_i);
    y = _mm256_add_pd(
        y,
        _mm256_and_pd(_mm256_castsi256_pd(odd_mask_i), _mm256_set1_pd(1.0)),
    );

    let mut z = _mm256_fmadd_pd(y, _mm256_set1_pd(TAN_MDP1), x_abs);
    z = _mm256_fmadd_pd(y, _mm256_set1_pd(TAN_MDP2), z);
    z = _mm256_fmadd_pd(y, _mm256_set1_pd(TAN_MDP3), z);

    let zz = _mm256_mul_pd(z, z);

    let mut num = _mm256_fmadd_pd(zz, _mm256_set1_pd(TAN_P0), _mm256_set1_pd(TAN_P1));
    num = _mm256_fmadd_pd(zz, num, _mm256_set1_pd(TAN_P2));

    let mut den = _mm256_add_pd(zz, _mm256_set1_pd(TAN_Q0));
    den = _mm256_fmadd_pd(zz, den, _mm256_set1_pd(TAN_Q1));
    den = _mm256_fmadd_pd(zz, den, _mm256_set1_pd(TAN_Q2));
    den = _mm256_fmadd_pd(zz, den, _mm256_set1_pd(TAN_Q3));

    let ratio = _mm256_mul_pd(zz, _mm256_div_pd(num, den));
    let poly = _mm256_fmadd_pd(z, ratio, z);

    let big_mask = _mm256_cmp_pd(zz, _mm256_set1_pd(1.0e-14), _CMP_GT_OQ);
    let t = _mm256_blendv_pd(z, poly, big_mask);

    let j_and_two = _mm256_cmpeq_epi64(
        _mm256_and_si256(j, _mm256_set1_epi64x(2)),
        _mm256_set1_epi64x(2),
    );
    let recip = _mm256_div_pd(_mm256_set1_pd(-1.0), t);
    let t = _mm256_blendv_pd(t, recip, _mm256_castsi256_pd(j_and_two));

    _mm256_xor_pd(t, sign_bit)
}

/// Arcsine of 4 packed f64 lanes.
///
/// Above |x| = 0.625 the R/S rational runs on 1-|x| and the result folds
/// back through π/4 twice, patching the MOREBITS tail of π/2; below, the
/// P/Q rational runs on x². |x| < 1e-8 short-circuits to the identity.
///
/// Domain policy: |x| > 1 yields exactly `0.0` for both signs.
pub(crate) unsafe fn _mm256_asin_pd(x: __m256d) -> __m256d {
    let a = _mm256_abs_pd(x);
    let sign_bit = sign_bits_pd(x);

    let tiny_mask = _mm256_cmp_pd(a, _mm256_set1_pd(1.0e-8), _CMP_LT_OQ);
    let big_mask = _mm256_cmp_pd(a, _mm256_set1_pd(0.625), _CMP_GT_OQ);

    // First branch (|x| > 0.625): zz = 1 - a, p = zz·R(zz)/S(zz).
    let zz1 = _mm256_sub_pd(_mm256_set1_pd(1.0), a);
    let mut p = _mm256_fmadd_pd(_mm256_set1_pd(ASIN_R0), zz1, _mm256_set1_pd(ASIN_R1));
    p = _mm256_fmadd_pd(p, zz1, _mm256_set1_pd(ASIN_R2));
    p = _mm256_fmadd_pd(p, zz1, _mm256_set1_pd(ASIN_R3));
    p = _mm256_fmadd_pd(p, zz1, _mm256_set1_pd(ASIN_R4));
    p = _mm256_mul_pd(p, zz1);

    let mut s = _mm256_add_pd(zz1, _mm256_set1_pd(ASIN_S0));
    s = _mm256_fmadd_pd(s, zz1, _mm256_set1_pd(ASIN_S1));
    s = _mm256_fmadd_pd(s, zz1, _mm256_set1_pd(ASIN_S2));
    s = _mm256_fmadd_pd(s, zz1, _mm256_set1_pd(ASIN_S3));
    p = _mm256_div_pd(p, s);

    let zz1_sqrt = _mm256_sqrt_pd(_mm256_add_pd(zz1, zz1));
    let z_big = _mm256_sub_pd(_mm256_set1_pd(PIO4), zz1_sqrt);
    let corr = _mm256_fmadd_pd(zz1_sqrt, p, _mm256_set1_pd(-MOREBITS));
    let z_big = _mm256_sub_pd(z_big, corr);
    let z_big = _mm256_add_pd(z_big, _mm256_set1_pd(PIO4));

    // Second branch (|x| <= 0.625): zz = a², p = zz·P(zz)/Q(zz).
    let zz2 = _mm256_mul_pd(a, a);
    let mut p2 = _mm256_fmadd_pd(_mm256_set1_pd(ASIN_P0), zz2, _mm256_set1_pd(ASIN_P1));
    p2 = _mm256_fmadd_pd(p2, zz2, _mm256_set1_pd(ASIN_P2));
    p2 = _mm256_fmadd_pd(p2, zz2, _mm256_set1_pd(ASIN_P3));
    p2 = _mm256_fmadd_pd(p2, zz2, _mm256_set1_pd(ASIN_P4));
    p2 = _mm256_fmadd_pd(p2, zz2, _mm256_set1_pd(ASIN_P5));
    p2 = _mm256_mul_pd(p2, zz2);

    let mut q = _mm256_add_pd(zz2, _mm256_set1_pd(ASIN_Q0));
    q = _mm256_fmadd_pd(q, zz2, _mm256_set1_pd(ASIN_Q1));
    q = _mm256_fmadd_pd(q, zz2, _mm256_set1_pd(ASIN_Q2));
    q = _mm256_fmadd_pd(q, zz2, _mm256_set1_pd(ASIN_Q3));
    q = _mm256_fmadd_pd(q, zz2, _mm256_set1_pd(ASIN_Q4));
    p2 = _mm256_div_pd(p2, q);
    let z_small = _mm256_fmadd_pd(a, p2, a);

    let mut z = _mm256_blendv_pd(z_small, z_big, big_mask);
    z = _mm256_xor_pd(z, sign_bit);
    z = _mm256_blendv_pd(z, x, tiny_mask);

    let out_of_domain = _mm256_cmp_pd(a, _mm256_set1_pd(1.0), _CMP_GT_OQ);
    _mm256_blendv_pd(z, _mm256_setzero_pd(), out_of_domain)
}

/// Arccosine of 4 packed f64 lanes, via `acos(x) = π/2 - asin(x)`.
pub(crate) unsafe fn _mm256_acos_pd(x: __m256d) -> __m256d {
    _mm256_sub_pd(_mm256_set1_pd(PIO2), _mm256_asin_pd(x))
}

/// Arctangent of 4 packed f64 lanes.
///
/// Three-way reduction at tan(3π/8) and 0.66; the flag-indexed MOREBITS
/// corrections (full above tan(3π/8), half in the middle band) keep the
/// re-added π/2 and π/4 good to the last bit.
pub(crate) unsafe fn _mm256_atan_pd(x: __m256d) -> __m256d {
    let sign_bit = sign_bits_pd(x);
    let a = _mm256_abs_pd(x);

    let hi_mask = _mm256_cmp_pd(a, _mm256_set1_pd(TAN3PI8), _CMP_GT_OQ);
    let mid_mask = _mm256_andnot_pd(hi_mask, _mm256_cmp_pd(a, _mm256_set1_pd(0.66), _CMP_GT_OQ));

    let one = _mm256_set1_pd(1.0);
    let xr_hi = _mm256_div_pd(_mm256_set1_pd(-1.0), a);
    let xr_mid = _mm256_div_pd(_mm256_sub_pd(a, one), _mm256_add_pd(a, one));

    let xr = _mm256_blendv_pd(a, xr_mid, mid_mask);
    let xr = _mm256_blendv_pd(xr, xr_hi, hi_mask);

    let offset = _mm256_blendv_pd(_mm256_setzero_pd(), _mm256_set1_pd(PIO4), mid_mask);
    let offset = _mm256_blendv_pd(offset, _mm256_set1_pd(PIO2), hi_mask);

    let morebits = _mm256_blendv_pd(
        _mm256_setzero_pd(),
        _mm256_set1_pd(0.5 * MOREBITS),
        mid_mask,
    );
    let morebits = _mm256_blendv_pd(morebits, _mm256_set1_pd(MOREBITS), hi_mask);

    let z = _mm256_mul_pd(xr, xr);

    let mut num = _mm256_fmadd_pd(_mm256_set1_pd(ATAN_P0), z, _mm256_set1_pd(ATAN_P1));
    num = _mm256_fmadd_pd(num, z, _mm256_set1_pd(ATAN_P2));
    num = _mm256_fmadd_pd(num, z, _mm256_set1_pd(ATAN_P3));
    num = _mm256_fmadd_pd(num, z, _mm256_set1_pd(ATAN_P4));
    num = _mm256_mul_pd(z, num);

    let mut den = _mm256_add_pd(z, _mm256_set1_pd(ATAN_Q0));
    den = _mm256_fmadd_pd(den, z, _mm256_set1_pd(ATAN_Q1));
    den = _mm256_fmadd_pd(den, z, _mm256_set1_pd(ATAN_Q2));
    den = _mm256_fmadd_pd(den, z, _mm256_set1_pd(ATAN_Q3));
    den = _mm256_fmadd_pd(den, z, _mm256_set1_pd(ATAN_Q4));

    let r = _mm256_div_pd(num, den);
    let mut zr = _mm256_fmadd_pd(xr, r, xr);
    zr = _mm256_add_pd(zr, morebits);

    let res = _mm256_add_pd(offset, zr);
    _mm256_xor_pd(res, sign_bit)
}

/// Two-argument arctangent of 4 packed (y, x) f64 lane pairs.
///
/// Same cascade and precedence as the f32 version; the exact-constant
/// special cases (`atan2(0, -x) = π`, `atan2(-y, 0) = -π/2`,
/// `atan2(0, 0) = 0`) hold bit-exactly.
pub(crate) unsafe fn _mm256_atan2_pd(y: __m256d, x: __m256d) -> __m256d {
    let zero = _mm256_setzero_pd();

    let x_neg = _mm256_cmp_pd(x, zero, _CMP_LT_OQ);
    let x_zero = _mm256_cmp_pd(x, zero, _CMP_EQ_OQ);
    let y_zero = _mm256_cmp_pd(y, zero, _CMP_EQ_OQ);

    let q = _mm256_atan_pd(_mm256_div_pd(y, x));

    let shifted = _mm256_add_pd(q, copy_sign_pd(_mm256_set1_pd(PID), y));
    let mut z = _mm256_blendv_pd(q, shifted, x_neg);

    z = _mm256_blendv_pd(z, copy_sign_pd(_mm256_set1_pd(PIO2), y), x_zero);

    let origin = _mm256_and_pd(x_zero, y_zero);
    _mm256_blendv_pd(z, zero, origin)
}

/// Exponential of 4 packed f64 lanes.
///
/// Cephes rational form: `e^x = 1 + 2x·P(x²)/(Q(x²) - x·P(x²))` after
/// peeling n = floor(x·log2(e) + 0.5) ln2's off the argument; the final
/// 2^n scale is the biased exponent assembled in integer lanes (replacing
/// a hardware scalef). No under/overflow clamp: |x| ≤ 708 is the caller's
/// contract, NaN lanes are passed through.
pub(crate) unsafe fn _mm256_exp_pd(x: __m256d) -> __m256d {
    let nan_mask = _mm256_cmp_pd(x, x, _CMP_UNORD_Q);

    let px = _mm256_floor_pd(_mm256_fmadd_pd(
        _mm256_set1_pd(LOG2E),
        x,
        _mm256_set1_pd(0.5),
    ));
    let n = px;

    let mut x = _mm256_fmadd_pd(_mm256_set1_pd(EXP_MINC1), px, x);
    x = _mm256_fmadd_pd(_mm256_set1_pd(EXP_MINC2), px, x);

    let xx = _mm256_mul_pd(x, x);

    let mut p = _mm256_fmadd_pd(xx, _mm256_set1_pd(EXP_P0), _mm256_set1_pd(EXP_P1));
    p = _mm256_fmadd_pd(xx, p, _mm256_set1_pd(EXP_P2));
    let px_poly = _mm256_mul_pd(p, x);

    let mut q = _mm256_fmadd_pd(xx, _mm256_set1_pd(EXP_Q0), _mm256_set1_pd(EXP_Q1));
    q = _mm256_fmadd_pd(xx, q, _mm256_set1_pd(EXP_Q2));
    q = _mm256_fmadd_pd(xx, q, _mm256_set1_pd(EXP_Q3));
    let den = _mm256_sub_pd(q, px_poly);

    let r = _mm256_div_pd(px_poly, den);
    let r = _mm256_fmadd_pd(r, _mm256_set1_pd(2.0), _mm256_set1_pd(1.0));

    // 2^n: biased exponent field built with 64-bit integer lanes.
    let n_i = cvt_pd_epi64(n);
    let biased = _mm256_add_epi64(n_i, _mm256_set1_epi64x(1023));
    let pow2n = _mm256_castsi256_pd(_mm256_slli_epi64(biased, 52));

    let res = _mm256_mul_pd(r, pow2n);
    _mm256_blendv_pd(res, _mm256_set1_pd(f64::NAN), nan_mask)
}

/// Natural logarithm of 4 packed f64 lanes.
///
/// frexp-style mantissa/exponent split in integer lanes, then two
/// approximations blended on |e| < 2: near one the P/Q rational in m-1
/// carries the accuracy, away from one the R/S shortcut in 2(m-1)/(m+1)
/// is enough because e·ln2 dominates. ln2 recombines as 0.693359375
/// - 2.121944400546905827679e-4.
///
/// Non-positive lanes return NaN; subnormals are flushed up to the
/// smallest normal first.
pub(crate) unsafe fn _mm256_ln_pd(x: __m256d) -> __m256d {
    let invalid_mask = _mm256_cmp_pd(x, _mm256_setzero_pd(), _CMP_LE_OQ);

    let min_norm_pos = _mm256_castsi256_pd(_mm256_set1_epi64x(0x0010_0000_0000_0000));
    let x = _mm256_max_pd(x, min_norm_pos);

    // frexp: e such that x = m·2^e with m in [0.5, 1).
    let bits = _mm256_castpd_si256(x);
    let e_i = _mm256_sub_epi64(
        _mm256_and_si256(_mm256_srli_epi64::<52>(bits), _mm256_set1_epi64x(0x7ff)),
        _mm256_set1_epi64x(1022),
    );
    let mut e = cvt_epi64_pd(e_i);

    let mant_mask = _mm256_castsi256_pd(_mm256_set1_epi64x(0x000F_FFFF_FFFF_FFFF));
    let m = _mm256_or_pd(_mm256_and_pd(x, mant_mask), _mm256_set1_pd(0.5));

    let m_small = _mm256_cmp_pd(m, _mm256_set1_pd(SQRTH), _CMP_LT_OQ);
    e = _mm256_sub_pd(e, _mm256_and_pd(_mm256_set1_pd(1.0), m_small));

    // R/S shortcut in w = 2(m-1)/(m+1), used when |e| >= 2.
    let zw = _mm256_blendv_pd(
        _mm256_sub_pd(m, _mm256_set1_pd(1.0)),
        _mm256_sub_pd(m, _mm256_set1_pd(0.5)),
        m_small,
    );
    let half = _mm256_set1_pd(0.5);
    let yw = _mm256_blendv_pd(
        _mm256_fmadd_pd(m, half, half),
        _mm256_fmadd_pd(zw, half, half),
        m_small,
    );
    let w = _mm256_div_pd(zw, yw);
    let ww = _mm256_mul_pd(w, w);

    let mut rn = _mm256_fmadd_pd(ww, _mm256_set1_pd(LOG_R0), _mm256_set1_pd(LOG_R1));
    rn = _mm256_fmadd_pd(ww, rn, _mm256_set1_pd(LOG_R2));
    let mut rd = _mm256_add_pd(ww, _mm256_set1_pd(LOG_S0));
    rd = _mm256_fmadd_pd(ww, rd, _mm256_set1_pd(LOG_S1));
    rd = _mm256_fmadd_pd(ww, rd, _mm256_set1_pd(LOG_S2));

    let mut z_far = _mm256_mul_pd(w, _mm256_mul_pd(ww, _mm256_div_pd(rn, rd)));
    z_far = _mm256_fmadd_pd(e, _mm256_set1_pd(LOG_MIN212E4), z_far);
    z_far = _mm256_add_pd(z_far, w);

    // P/Q rational in u = m - 1 (or 2m - 1 below √0.5), used when |e| < 2.
    let u = _mm256_blendv_pd(
        _mm256_sub_pd(m, _mm256_set1_pd(1.0)),
        _mm256_fmadd_pd(m, _mm256_set1_pd(2.0), _mm256_set1_pd(-1.0)),
        m_small,
    );
    let uu = _mm256_mul_pd(u, u);

    let mut pn = _mm256_fmadd_pd(u, _mm256_set1_pd(LOG_P0), _mm256_set1_pd(LOG_P1));
    pn = _mm256_fmadd_pd(u, pn, _mm256_set1_pd(LOG_P2));
    pn = _mm256_fmadd_pd(u, pn, _mm256_set1_pd(LOG_P3));
    pn = _mm256_fmadd_pd(u, pn, _mm256_set1_pd(LOG_P4));
    pn = _mm256_fmadd_pd(u, pn, _mm256_set1_pd(LOG_P5));

    let mut pd = _mm256_add_pd(u, _mm256_set1_pd(LOG_Q0));
    pd = _mm256_fmadd_pd(u, pd, _mm256_set1_pd(LOG_Q1));
    pd = _mm256_fmadd_pd(u, pd, _mm256_set1_pd(LOG_Q2));
    pd = _mm256_fmadd_pd(u, pd, _mm256_set1_pd(LOG_Q3));
    pd = _mm256_fmadd_pd(u, pd, _mm256_set1_pd(LOG_Q4));

    let mut y_near = _mm256_mul_pd(u, _mm256_mul_pd(uu, _mm256_div_pd(pn, pd)));
    y_near = _mm256_fmadd_pd(e, _mm256_set1_pd(LOG_MIN212E4), y_near);
    y_near = _mm256_fnmadd_pd(uu, half, y_near);
    let z_near = _mm256_add_pd(u, y_near);

    let abs_e_small = _mm256_cmp_pd(_mm256_abs_pd(e), _mm256_set1_pd(2.0), _CMP_LT_OQ);
    let mut z = _mm256_blendv_pd(z_far, z_near, abs_e_small);
    z = _mm256_fmadd_pd(e, _mm256_set1_pd(LOG_0P69), z);

    // All-ones is a NaN pattern: poison the out-of-domain lanes.
    _mm256_or_pd(z, invalid_mask)
}

/// `x^y` of 4 packed f64 lane pairs, as `exp(y·ln(x))`.
pub(crate) unsafe fn _mm256_pow_pd(x: __m256d, y: __m256d) -> __m256d {
    _mm256_exp_pd(_mm256_mul_pd(_mm256_ln_pd(x), y))
}
