//! Public slice operations.
//!
//! Every function here follows the same contract: the caller owns both
//! buffers, lengths must agree (`debug_assert!`ed), zero length is a no-op,
//! and nothing allocates. Pointer alignment is probed once per call to pick
//! the aligned or unaligned lane loop; the `len % LANE_COUNT` trailing
//! elements go through a scalar tail.
//!
//! `par_*` variants fan the lane groups out over the rayon pool and are
//! worthwhile from roughly a few hundred thousand elements up.

mod dispatch;

pub mod cplx;
pub mod convert;
pub mod elementwise;
pub mod exp;
pub mod trig;

pub use exp::*;
pub use trig::*;
