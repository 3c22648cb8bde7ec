//! AVX2 implementations: 256-bit lane types and transcendental kernels.
//!
//! Everything in this module assumes the binary was compiled with
//! `-C target-feature=+avx2,+avx,+fma` (arranged by the build script when it
//! detects AVX2 on the host). The lane types are [`f32x8::F32x8`] (8 × f32)
//! and [`f64x4::F64x4`] (4 × f64); the math kernels in [`math`] and
//! [`math64`] operate directly on `__m256`/`__m256d` registers and are
//! composed into slice operations by the `ops` module.

pub mod f32x8;

pub mod f64x4;

#[allow(clippy::excessive_precision)]
pub mod math;

#[allow(clippy::excessive_precision)]
pub mod math64;
