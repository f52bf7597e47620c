//! Hashed, mid-anchored price-level book.
//!
//! ## Architecture
//!
//! `HashBook` replaces a balanced-tree price ladder with a fixed ring of
//! cache-padded buckets addressed by tick offset from a hashing anchor:
//!
//! - **Fast ring**: `N` buckets, one cache line each. Prices within half a
//!   ring of the anchor hit the inline first slot - one indirection, no
//!   allocation, no tree walk.
//! - **Collision slots**: each bucket owns `C` secondary slots absorbing
//!   prices a few ring-widths out.
//! - **Overflow chains**: per-bucket linked lists threaded through one
//!   slab for everything farther out, and for side-wrong wraps.
//!
//! Expected cost is O(1) for ring and collision addresses, O(chain) for
//! overflow, O(len) for `rehash`.
//!
//! ## Ring Geometry
//!
//! The ring is two half-rings: positions below the mid are bid-shaped,
//! positions at or above it are ask-shaped. A bid hashing above the ring or
//! an ask hashing below it would wrap onto the wrong half and collide with
//! legitimate addresses there, so those are tagged `C + 1` and routed to
//! overflow instead.
//!
//! ## Example
//!
//! ```
//! use tickbook::{HashBook, Side};
//!
//! // Tick 1, ring of 64, 4 collision slots, anchored at 110.
//! let mut book: HashBook<u64, 1, 64, 4> = HashBook::new(110);
//!
//! assert!(book.insert(Side::Bid, 109, 250));
//! assert!(book.insert(Side::Ask, 111, 300));
//!
//! assert_eq!(book.best_bid(), Some(109));
//! assert_eq!(book.best_offer(), Some(111));
//! assert_eq!(book.find(Side::Bid, 109), Some(&250));
//! assert_eq!(book.len(), 2);
//! ```

use std::mem;

use crossbeam_utils::CachePadded;
use slab::Slab;

use crate::book::address::{collision_tier, positive_mod};
use crate::book::{Bucket, OverflowNode, Slot};
use crate::types::Side;

/// Price-indexed limit-level container, hashed around a mid anchor.
///
/// Stores at most one value per `(side, price)`. Parameters fix the
/// container's shape at compile time:
///
/// - `V`: payload per price level (commonly aggregate volume)
/// - `TICK`: smallest price increment, in fixed-point units, nonzero
/// - `N`: fast-ring length, even and nonzero
/// - `C`: collision slots per bucket, may be zero
///
/// The book is single-threaded; every operation is synchronous and
/// caller-driven.
#[derive(Debug)]
pub struct HashBook<V, const TICK: u64, const N: usize, const C: usize> {
    /// The fast ring; one cache-padded bucket per primary index
    pub(crate) ring: Box<[CachePadded<Bucket<V, C>>; N]>,

    /// Overflow-chain nodes for every bucket (chains never cross buckets)
    pub(crate) overflow: Slab<OverflowNode<V>>,

    /// Anchor all addresses are computed against
    pub(crate) anchor: u64,

    /// Ring position of the latest observed mid (advisory, for consumers)
    pub(crate) mid_index: usize,

    /// Highest bid price ever inserted (not re-scanned after erase)
    pub(crate) best_bid: Option<u64>,

    /// Lowest ask price ever inserted (not re-scanned after erase)
    pub(crate) best_offer: Option<u64>,

    /// Occupied cells across all tiers
    pub(crate) len: usize,
}

impl<V, const TICK: u64, const N: usize, const C: usize> HashBook<V, TICK, N, C> {
    /// Create an empty book anchored at `anchor`.
    ///
    /// All tiers are allocated up front; ring and collision-slot operations
    /// never allocate afterwards.
    ///
    /// # Panics
    ///
    /// Panics if `TICK` is zero or `N` is zero or odd.
    pub fn new(anchor: u64) -> Self {
        assert!(TICK > 0, "tick size must be non-zero");
        assert!(N > 0 && N % 2 == 0, "ring length must be even and non-zero");

        Self {
            ring: Self::empty_ring(),
            overflow: Slab::new(),
            anchor,
            mid_index: N / 2,
            best_bid: None,
            best_offer: None,
            len: 0,
        }
    }

    fn empty_ring() -> Box<[CachePadded<Bucket<V, C>>; N]> {
        let ring: Box<[CachePadded<Bucket<V, C>>]> =
            (0..N).map(|_| CachePadded::new(Bucket::new())).collect();
        match ring.try_into() {
            Ok(ring) => ring,
            // The iterator above yields exactly N buckets
            Err(_) => unreachable!(),
        }
    }

    // ========================================================================
    // Address arithmetic
    // ========================================================================

    /// Compute the `(primary_index, collision_index)` address of a price.
    ///
    /// Total: every price has an address. A collision index of zero is the
    /// fast ring, `1..C` are a bucket's collision slots, and anything at or
    /// beyond `C` routes to the bucket's overflow chain. Side-wrong wraps
    /// (bid above the ring, ask below it) are tagged `C + 1`.
    #[inline]
    pub fn address(&self, side: Side, key: u64) -> (usize, usize) {
        Self::address_for(side, key, self.anchor)
    }

    #[inline]
    fn address_for(side: Side, key: u64, anchor: u64) -> (usize, usize) {
        let offset_ticks = (key as i64 - anchor as i64) / TICK as i64;
        let raw = N as i64 / 2 + offset_ticks;
        let primary = positive_mod(raw, N as i64);

        // A bid hashing past the top of the ring (or an ask below the
        // bottom) would land on the wrong half-ring; route it to overflow.
        let wrapped = match side {
            Side::Bid => raw > N as i64,
            Side::Ask => raw < 0,
        };
        let tier = if wrapped {
            C + 1
        } else {
            collision_tier(raw, N as i64)
        };
        (primary, tier)
    }

    // ========================================================================
    // Core operations
    // ========================================================================

    /// Insert a value at `(side, key)`.
    ///
    /// # Returns
    ///
    /// `true` on success, `false` if that address already holds a value for
    /// the side.
    pub fn insert(&mut self, side: Side, key: u64, value: V) -> bool {
        let (_, tier) = self.address(side, key);
        let inserted =
            Self::insert_into(&mut self.ring, &mut self.overflow, self.anchor, side, key, value);
        if inserted {
            self.len += 1;
            // Overflow keys sit outside the tracked band and never move
            // the BBO.
            if tier < C || tier == 0 {
                self.update_bbo_and_mid(side, key);
            }
        }
        inserted
    }

    /// Look up the value stored at `(side, key)`.
    ///
    /// # Panics
    ///
    /// Panics if the addressed slot is occupied by a different price - the
    /// address arithmetic and the contents disagree, which means corruption
    /// or misuse.
    pub fn find(&self, side: Side, key: u64) -> Option<&V> {
        let (primary, tier) = self.address(side, key);
        let bucket = &self.ring[primary];

        if tier < C || tier == 0 {
            match bucket.slot(tier).cell(side) {
                Some((stored, value)) => {
                    assert_eq!(*stored, key, "price mismatch at hashed slot");
                    Some(value)
                }
                None => None,
            }
        } else {
            let index = bucket.find_overflow(side, key, &self.overflow)?;
            self.overflow[index]
                .slot
                .cell(side)
                .as_ref()
                .map(|(_, value)| value)
        }
    }

    /// Remove and return the value stored at `(side, key)`.
    ///
    /// The best bid/offer are deliberately *not* re-scanned when the erased
    /// key was the best; they record the best ever observed.
    ///
    /// # Panics
    ///
    /// Panics on a price mismatch at an occupied slot, as [`find`].
    ///
    /// [`find`]: HashBook::find
    pub fn erase(&mut self, side: Side, key: u64) -> Option<V> {
        let (primary, tier) = self.address(side, key);
        let bucket = &mut self.ring[primary];

        let removed = if tier < C || tier == 0 {
            match bucket.slot_mut(tier).cell_mut(side).take() {
                Some((stored, value)) => {
                    assert_eq!(stored, key, "price mismatch at hashed slot");
                    Some(value)
                }
                None => None,
            }
        } else {
            bucket.erase_overflow(side, key, &mut self.overflow)
        };

        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Shared insert path, parameterized over the target storage so that
    /// `rehash` can reinsert into a fresh ring against the new anchor.
    fn insert_into(
        ring: &mut [CachePadded<Bucket<V, C>>; N],
        overflow: &mut Slab<OverflowNode<V>>,
        anchor: u64,
        side: Side,
        key: u64,
        value: V,
    ) -> bool {
        let (primary, tier) = Self::address_for(side, key, anchor);
        let bucket = &mut ring[primary];

        if tier < C || tier == 0 {
            let cell = bucket.slot_mut(tier).cell_mut(side);
            if cell.is_some() {
                return false;
            }
            *cell = Some((key, value));
            true
        } else {
            bucket.insert_overflow(side, key, value, tier, overflow)
        }
    }

    // ========================================================================
    // BBO and mid tracking
    // ========================================================================

    /// Monotonic BBO update plus mid-index maintenance.
    ///
    /// Called on every successful ring or collision-slot insert. An unset
    /// best bid compares as minus infinity, an unset best offer as plus
    /// infinity.
    fn update_bbo_and_mid(&mut self, side: Side, key: u64) {
        let changed = match side {
            Side::Bid => {
                let improved = self.best_bid.map_or(true, |best| key > best);
                if improved {
                    self.best_bid = Some(key);
                }
                improved
            }
            Side::Ask => {
                let improved = self.best_offer.map_or(true, |best| key < best);
                if improved {
                    self.best_offer = Some(key);
                }
                improved
            }
        };
        if !changed {
            return;
        }

        if let (Some(bid), Some(offer)) = (self.best_bid, self.best_offer) {
            let mid = ((bid as u128 + offer as u128) / 2) as u64;
            let (primary, tier) = self.address(side, mid);
            if tier != 0 {
                // Mid drift policy is the caller's; a mid outside the fast
                // ring means the anchor is stale enough that addresses are
                // about to wrap.
                panic!("massive mid move: mid {} left the fast ring", mid);
            }
            self.mid_index = primary;
        } else {
            // One-sided book: track the side we just improved.
            let best = match side {
                Side::Bid => self.best_bid,
                Side::Ask => self.best_offer,
            };
            if let Some(best) = best {
                self.mid_index = self.address(side, best).0;
            }
        }
    }

    // ========================================================================
    // Rehash and clear
    // ========================================================================

    /// Migrate every occupied cell to a fresh ring anchored at `new_anchor`.
    ///
    /// O(len). This is the only way to move the anchor of a populated book;
    /// the book never rehashes on its own.
    ///
    /// Stored keys may land in different tiers under the new anchor - keys
    /// that fit the ring before can spill to overflow and vice versa. The
    /// advisory mid index is left alone; the next BBO change refreshes it.
    ///
    /// # Panics
    ///
    /// Panics if any reinsert fails (a duplicate in the source structure,
    /// i.e. a pre-existing invariant violation).
    pub fn rehash(&mut self, new_anchor: u64) {
        let mut ring = Self::empty_ring();
        let mut overflow = Slab::with_capacity(self.overflow.len());
        let mut migrated = 0usize;

        for bucket in self.ring.iter_mut() {
            // First slot plus collision slots.
            for slot_index in 0..=C {
                let slot: &mut Slot<V> = if slot_index == 0 {
                    &mut bucket.first
                } else {
                    &mut bucket.slots[slot_index - 1]
                };
                for side in [Side::Bid, Side::Ask] {
                    if let Some((key, value)) = slot.cell_mut(side).take() {
                        assert!(
                            Self::insert_into(&mut ring, &mut overflow, new_anchor, side, key, value),
                            "rehash failed: duplicate cell in source book"
                        );
                        migrated += 1;
                    }
                }
            }

            // Drain the overflow chain.
            while let Some(index) = bucket.overflow_head {
                let node = self.overflow.remove(index);
                bucket.overflow_head = node.next;
                let mut slot = node.slot;
                for side in [Side::Bid, Side::Ask] {
                    if let Some((key, value)) = slot.cell_mut(side).take() {
                        assert!(
                            Self::insert_into(&mut ring, &mut overflow, new_anchor, side, key, value),
                            "rehash failed: duplicate cell in source book"
                        );
                        migrated += 1;
                    }
                }
            }
        }

        self.ring = ring;
        self.overflow = overflow;
        self.len = migrated;
        self.anchor = new_anchor;
    }

    /// Empty every cell and reset the BBO, size, and mid index.
    ///
    /// The anchor is kept; use [`clear_with_anchor`] to move it as well.
    ///
    /// [`clear_with_anchor`]: HashBook::clear_with_anchor
    pub fn clear(&mut self) {
        for bucket in self.ring.iter_mut() {
            bucket.first.clear();
            for slot in bucket.slots.iter_mut() {
                slot.clear();
            }
            bucket.overflow_head = None;
        }
        self.overflow.clear();
        self.len = 0;
        self.best_bid = None;
        self.best_offer = None;
        self.mid_index = N / 2;
    }

    /// [`clear`], then re-anchor the empty book at `new_anchor`.
    ///
    /// [`clear`]: HashBook::clear
    pub fn clear_with_anchor(&mut self, new_anchor: u64) {
        self.clear();
        self.anchor = new_anchor;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of occupied `(side, price)` cells across all tiers
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no cell is occupied
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Highest bid price ever inserted, if any.
    ///
    /// Not re-scanned after an erase: treat as "best ever observed".
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.best_bid
    }

    /// Lowest ask price ever inserted, if any.
    ///
    /// Not re-scanned after an erase: treat as "best ever observed".
    #[inline]
    pub fn best_offer(&self) -> Option<u64> {
        self.best_offer
    }

    /// Best bid price and its value, or None if it was never set or has
    /// since been erased
    pub fn best_bid_entry(&self) -> Option<(u64, &V)> {
        let best = self.best_bid?;
        self.find(Side::Bid, best).map(|value| (best, value))
    }

    /// Best offer price and its value, or None if it was never set or has
    /// since been erased
    pub fn best_offer_entry(&self) -> Option<(u64, &V)> {
        let best = self.best_offer?;
        self.find(Side::Ask, best).map(|value| (best, value))
    }

    /// The anchor addresses are currently computed against
    #[inline]
    pub fn anchor(&self) -> u64 {
        self.anchor
    }

    /// Ring position of the latest observed mid (advisory)
    #[inline]
    pub fn mid_index(&self) -> usize {
        self.mid_index
    }

    /// Approximate heap footprint of the structure in bytes
    pub fn footprint_bytes(&self) -> usize {
        mem::size_of::<Self>()
            + N * mem::size_of::<CachePadded<Bucket<V, C>>>()
            + N * C * mem::size_of::<Slot<V>>()
            + self.overflow.capacity() * mem::size_of::<OverflowNode<V>>()
    }

    /// True when any overflow node on `side` holds a price strictly beyond
    /// `key` in that side's direction of travel (above for asks, below for
    /// bids). Used by the iterators' end-of-travel check.
    pub(crate) fn overflow_beyond(&self, side: Side, key: u64) -> bool {
        self.overflow.iter().any(|(_, node)| match node.key(side) {
            Some(stored) => match side {
                Side::Ask => stored > key,
                Side::Bid => stored < key,
            },
            None => false,
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
