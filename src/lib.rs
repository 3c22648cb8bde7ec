//! Vectorized elementwise math over contiguous `f32`/`f64` slices.
//!
//! The crate evaluates transcendental functions (`sin`, `cos`, `tan`, `asin`,
//! `atan`, `atan2`, `exp`, `ln`, `pow`, complex `pow`, ...) over flat arrays
//! using 256-bit AVX2 lane groups. Each function runs Cephes-derived range
//! reduction and Horner/FMA polynomial evaluation entirely branch-free inside
//! a lane group; elements that do not fill a complete group go through a
//! scalar tail calling the standard-library function, so results never depend
//! on where the vector/tail split falls.
//!
//! Entry points live in [`ops`]: every function takes caller-owned source and
//! destination slices and never allocates. Parallel variants (`par_*`) split
//! the work across the Rayon thread pool.
//!
//! ```rust
//! # #[cfg(avx2)]
//! # {
//! let x = [0.0f32, 0.5, 1.0, 1.5, 2.0];
//! let mut y = [0.0f32; 5];
//! vectra::ops::sin_f32(&x, &mut y);
//! # }
//! ```
//!
//! The build script probes the host CPU and compiles the AVX2 kernels only
//! when the feature is available; on unsupported hosts the crate builds with
//! an empty vector surface.

pub mod simd;

#[cfg(avx2)]
pub mod ops;
