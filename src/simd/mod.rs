//! SIMD lane abstraction: fixed-width vector types and the traits they share.
//!
//! A lane group is an opaque container of `LANE_COUNT` floating-point values
//! processed by one vector instruction. Comparisons produce lane masks (full
//! set/clear bit patterns per lane) that are consumed exclusively by
//! `select`-style blends, never by control flow.

#[cfg(avx2)]
pub mod avx2;

/// Alignment queries for a lane type over element type `T`.
pub trait Alignment<T> {
    /// Returns `true` when `ptr` satisfies the native vector alignment
    /// (32 bytes for AVX2 types).
    fn is_aligned(ptr: *const T) -> bool;
}

/// Construction of a lane group from memory or a broadcast scalar.
pub trait SimdLoad<T>: Sized {
    /// Broadcasts `value` into every lane.
    fn splat(value: T) -> Self;

    /// Loads `LANE_COUNT` elements from a 32-byte aligned pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be aligned to the vector width and valid for reading
    /// `LANE_COUNT` elements.
    unsafe fn load_aligned(ptr: *const T) -> Self;

    /// Loads `LANE_COUNT` elements from an arbitrarily aligned pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading `LANE_COUNT` elements.
    unsafe fn load_unaligned(ptr: *const T) -> Self;
}

/// Write-back of a lane group to memory.
pub trait SimdStore<T> {
    /// Stores `LANE_COUNT` elements to a 32-byte aligned pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be aligned to the vector width and valid for writing
    /// `LANE_COUNT` elements.
    unsafe fn store_aligned_at(&self, ptr: *mut T);

    /// Stores `LANE_COUNT` elements to an arbitrarily aligned pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing `LANE_COUNT` elements.
    unsafe fn store_unaligned_at(&self, ptr: *mut T);
}
