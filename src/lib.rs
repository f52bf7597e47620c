//! # tickbook
//!
//! Mid-anchored hashed price-level order book, built to keep the hot band
//! around the mid resident in L1.
//!
//! ## Architecture
//!
//! The crate is one container plus the types it speaks:
//!
//! - **Types**: `Side` and fixed-point price helpers (10^8 scaling)
//! - **Book**: `HashBook`, a fixed ring of cache-padded buckets addressed
//!   by tick offset from a hashing anchor, with collision slots and
//!   overflow chains behind each ring position
//!
//! ## Design Principles
//!
//! 1. **Hash, don't compare**: prices near the mid resolve to a ring slot
//!    in O(1) expected time; no tree walk on the hot path
//! 2. **No floating point**: prices are u64 fixed-point (10^8 scaling)
//! 3. **Pre-allocated memory**: every tier exists from construction; ring
//!    and collision-slot operations never allocate
//! 4. **Single-threaded, synchronous**: one value per (side, price), no
//!    locks, no async, caller-driven control flow
//!
//! ## What it is not
//!
//! `HashBook` is a price-level container, not a matching engine: it stores
//! one value per (side, price) and knows nothing of order queues, fills, or
//! trades. It is also strictly single-threaded and memory-only.
//!
//! ## Example
//!
//! ```
//! use tickbook::{HashBook, Side};
//!
//! let mut book: HashBook<u64, 1, 64, 4> = HashBook::new(110);
//!
//! book.insert(Side::Bid, 109, 500);
//! book.insert(Side::Ask, 111, 750);
//!
//! assert_eq!(book.best_bid(), Some(109));
//! assert_eq!(book.best_offer(), Some(111));
//!
//! let levels: Vec<(u64, &u64)> = book.asks().collect();
//! assert_eq!(levels, vec![(111, &750)]);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Side, fixed-point prices
pub mod types;

/// The book: hashed ring, collision slots, overflow chains
pub mod book;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use book::{Bucket, HashBook, OverflowNode, SideIter, Slot};
pub use types::Side;
