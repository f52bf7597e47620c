//! The hashed price-level book.
//!
//! ## Architecture
//!
//! The book trades the usual tree-ordered price ladder for a mid-anchored
//! hash over a fixed ring of cache-padded buckets:
//!
//! - `address`: tick-offset hash and collision-tier arithmetic
//! - [`Slot`]: one address worth of storage, a bid cell and an ask cell
//! - [`OverflowNode`]: a slot tagged with its tier, linked into a chain
//! - [`Bucket`]: one ring position - first slot, collision slots, chain
//! - [`HashBook`]: the container - insert / find / erase / rehash / clear
//! - [`SideIter`]: per-side walk from the BBO outward
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Insert / find / erase (ring or collision slot) | O(1) |
//! | Insert / find / erase (overflow) | O(chain length) |
//! | Rehash | O(len) |
//!
//! Ring and collision paths allocate nothing after construction.

pub(crate) mod address;
pub mod bucket;
pub mod hashbook;
pub mod iter;
pub mod slot;

pub use bucket::Bucket;
pub use hashbook::HashBook;
pub use iter::SideIter;
pub use slot::{OverflowNode, Slot};
