//! Mid-anchored address arithmetic.
//!
//! ## Design
//!
//! A price hashes to a position on the fast ring by its signed tick offset
//! from the hashing anchor:
//!
//! ```text
//! raw     = N/2 + (key - anchor) / tick     (signed)
//! primary = raw mod N                       (normalized to [0, N))
//! tier    = how many ring-widths away raw is
//! ```
//!
//! Tier 0 is the fast ring itself. Tiers 1..C-1 land in a bucket's collision
//! slots, and everything at or beyond C spills into the bucket's overflow
//! chain. The tier function is piecewise on the sign of `raw` so that the
//! first ring-width below zero maps to tier 1, keeping tier 0 exclusively
//! for at-or-above-mid positions:
//!
//! ```text
//! raw >= 0:  tier = raw / N
//! raw <  0:  tier = |raw + 1| / N + 1
//! ```
//!
//! so tier 1 covers `[-N, -1]`, tier 2 covers `[-2N, -N-1]`, and so on.
//!
//! The full `(primary, tier)` computation, including the side-aware wrap
//! rejection, lives on [`HashBook::address`](crate::HashBook::address)
//! because it needs the container's `TICK`/`N`/`C` parameters.

/// Normalize `x mod modulus` into `[0, modulus)`.
///
/// Rust's `%` keeps the sign of the dividend, so negative raw indices need
/// the correction before they can index the ring.
#[inline]
pub(crate) fn positive_mod(x: i64, modulus: i64) -> usize {
    debug_assert!(modulus > 0, "modulus must be non-zero");
    let rem = x % modulus;
    if rem < 0 {
        (rem + modulus) as usize
    } else {
        rem as usize
    }
}

/// Collision tier for a signed raw ring index.
///
/// Positive raws divide straight down; negative raws shift by one before
/// dividing so that `[-size, -1]` is tier 1 rather than sharing tier 0 with
/// at-mid positions.
#[inline]
pub(crate) fn collision_tier(raw: i64, size: i64) -> usize {
    debug_assert!(size > 0, "ring size must be non-zero");
    if raw >= 0 {
        (raw / size) as usize
    } else {
        ((raw + 1).unsigned_abs() / size as u64) as usize + 1
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
