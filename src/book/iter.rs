//! Per-side forward iteration from the BBO outward.
//!
//! ## Design
//!
//! An iterator starts at a side's best price and walks away from the mid
//! one tick at a time: ascending for asks, descending for bids. Each step
//! re-addresses the stepped price, inspects the targeted cell (ring slot,
//! collision slot, or overflow chain), and yields it if occupied for the
//! iterator's side.
//!
//! Stepping in price space is the same walk as stepping the signed raw ring
//! index - each tick moves the primary index by one with wrap and advances
//! the collision tier monotonically - but makes the occupancy check a plain
//! keyed lookup.
//!
//! ## Termination
//!
//! Inside the slotted band the walk always continues: a deeper occupied
//! slot may exist. Once the walk is past the collision slots, only overflow
//! chains can hold more cells, so each miss runs a bounded lookahead over
//! the node slab; when no same-side cell lies strictly beyond the current
//! price, the iterator ends.
//!
//! ## Caveats
//!
//! This is a partial iterator. Side-wrong wraps ("impossibly high" bids,
//! "impossibly low" asks) sit behind the BBO start in the direction of
//! travel and are never visited. A sparse overflow band is walked tick by
//! tick, so iterating far-out levels costs a slab scan per empty tick.

use crate::book::HashBook;
use crate::types::Side;

/// Lazy walk over one side's occupied cells, best price first.
///
/// Created by [`HashBook::bids`] and [`HashBook::asks`]. Yields
/// `(price, &value)` pairs.
#[derive(Debug)]
pub struct SideIter<'a, V, const TICK: u64, const N: usize, const C: usize> {
    book: &'a HashBook<V, TICK, N, C>,
    side: Side,
    /// Next price to probe; None once the walk is exhausted
    next_key: Option<u64>,
}

impl<V, const TICK: u64, const N: usize, const C: usize> HashBook<V, TICK, N, C> {
    /// Iterate occupied bid cells from the best bid downward.
    ///
    /// Empty when no best bid has been observed. Overflow bids are reached
    /// only past the collision band; see the module notes for the partial-
    /// order caveats.
    pub fn bids(&self) -> SideIter<'_, V, TICK, N, C> {
        SideIter {
            book: self,
            side: Side::Bid,
            next_key: self.best_bid,
        }
    }

    /// Iterate occupied ask cells from the best offer upward.
    pub fn asks(&self) -> SideIter<'_, V, TICK, N, C> {
        SideIter {
            book: self,
            side: Side::Ask,
            next_key: self.best_offer,
        }
    }
}

impl<'a, V, const TICK: u64, const N: usize, const C: usize> Iterator
    for SideIter<'a, V, TICK, N, C>
{
    type Item = (u64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let book = self.book;
        let side = self.side;
        loop {
            let key = self.next_key?;
            // Step now so every exit path below leaves the cursor advanced.
            // Hitting the edge of the key space ends the walk.
            self.next_key = match side {
                Side::Ask => key.checked_add(TICK),
                Side::Bid => key.checked_sub(TICK),
            };

            let (primary, tier) = book.address(side, key);
            let bucket = &book.ring[primary];

            let found = if tier < C || tier == 0 {
                match bucket.slot(tier).cell(side) {
                    Some((stored, value)) if *stored == key => Some(value),
                    _ => None,
                }
            } else {
                bucket
                    .find_overflow(side, key, &book.overflow)
                    .and_then(|index| book.overflow[index].slot.cell(side).as_ref())
                    .map(|(_, value)| value)
            };

            if let Some(value) = found {
                return Some((key, value));
            }

            // Past the slotted band, only overflow chains remain; stop as
            // soon as none holds a cell beyond this price.
            if tier >= C && tier != 0 && !book.overflow_beyond(side, key) {
                self.next_key = None;
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
