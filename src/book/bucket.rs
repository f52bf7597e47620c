//! Primary buckets: one fast-ring position and everything behind it.
//!
//! ## Design
//!
//! Each ring position owns three storage tiers:
//!
//! - the *first slot*, held inline so a tier-0 hit is one indirection
//!   through the ring array
//! - `C` *collision slots* behind a single owned allocation, absorbing
//!   prices within a few ring-widths of the mid
//! - an *overflow chain* for everything farther out (and for side-wrong
//!   wraps), a singly-linked list threaded through the book's node slab
//!
//! ## Chain Structure
//!
//! ```text
//! overflow_head -> node -> node -> None
//! ```
//!
//! - New nodes are prepended at the head (the chain is unordered)
//! - A node is freed back to the slab once both of its cells are empty
//! - Links are slab keys, so relinking never touches an allocator

use slab::Slab;

use crate::book::{OverflowNode, Slot};
use crate::types::Side;

/// A primary bucket: first slot, collision slots, overflow chain head.
///
/// The ring wraps every bucket in `CachePadded`, so a bucket never straddles
/// a cache line during random access; keeping the struct itself lean is what
/// makes that padding cheap.
#[derive(Debug, Clone)]
pub struct Bucket<V, const C: usize> {
    /// Tier-0 storage, inline for single-indirection access
    pub first: Slot<V>,

    /// Collision slots for tiers 1..C (one owned allocation)
    pub slots: Box<[Slot<V>; C]>,

    /// Head of this bucket's overflow chain (slab key)
    /// None if the chain is empty
    pub overflow_head: Option<usize>,
}

impl<V, const C: usize> Default for Bucket<V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, const C: usize> Bucket<V, C> {
    /// Create an empty bucket with its collision slots allocated
    pub fn new() -> Self {
        let slots: Box<[Slot<V>]> = (0..C).map(|_| Slot::default()).collect();
        let slots = match slots.try_into() {
            Ok(boxed) => boxed,
            // The iterator above yields exactly C slots
            Err(_) => unreachable!(),
        };
        Self {
            first: Slot::default(),
            slots,
            overflow_head: None,
        }
    }

    /// Borrow the slot for a tier-0 or collision-tier address.
    ///
    /// Callers guarantee `tier == 0` or `tier < C`.
    #[inline]
    pub fn slot(&self, tier: usize) -> &Slot<V> {
        if tier == 0 {
            &self.first
        } else {
            &self.slots[tier - 1]
        }
    }

    /// Mutably borrow the slot for a tier-0 or collision-tier address
    #[inline]
    pub fn slot_mut(&mut self, tier: usize) -> &mut Slot<V> {
        if tier == 0 {
            &mut self.first
        } else {
            &mut self.slots[tier - 1]
        }
    }

    // ========================================================================
    // Overflow chain operations
    // ========================================================================

    /// Find the chain node whose cell for `side` holds `key`
    ///
    /// # Returns
    ///
    /// The node's slab key, or None if no occupied cell matches
    pub fn find_overflow(
        &self,
        side: Side,
        key: u64,
        nodes: &Slab<OverflowNode<V>>,
    ) -> Option<usize> {
        let mut cursor = self.overflow_head;
        while let Some(index) = cursor {
            let node = nodes.get(index).expect("Invalid chain key");
            if node.key(side) == Some(key) {
                return Some(index);
            }
            cursor = node.next;
        }
        None
    }

    /// Insert into the overflow chain.
    ///
    /// Scans once: an occupied same-side cell with this key is a duplicate;
    /// a node already holding this key on the opposite side gets its empty
    /// cell repopulated (a bid and ask at one extreme price share a node);
    /// otherwise a fresh node is prepended.
    ///
    /// # Returns
    ///
    /// `true` on success, `false` on duplicate
    pub fn insert_overflow(
        &mut self,
        side: Side,
        key: u64,
        value: V,
        collision_index: usize,
        nodes: &mut Slab<OverflowNode<V>>,
    ) -> bool {
        let mut reusable = None;
        let mut cursor = self.overflow_head;
        while let Some(index) = cursor {
            let node = nodes.get(index).expect("Invalid chain key");
            if node.key(side) == Some(key) {
                return false;
            }
            if node.key(side.opposite()) == Some(key) && node.slot.cell(side).is_none() {
                reusable = Some(index);
            }
            cursor = node.next;
        }

        if let Some(index) = reusable {
            let node = nodes.get_mut(index).expect("Invalid chain key");
            *node.slot.cell_mut(side) = Some((key, value));
        } else {
            let mut node = OverflowNode::new(side, key, value, collision_index);
            node.next = self.overflow_head;
            self.overflow_head = Some(nodes.insert(node));
        }
        true
    }

    /// Erase `key` on `side` from the overflow chain.
    ///
    /// The node is unlinked and freed once both of its cells are empty.
    ///
    /// # Returns
    ///
    /// The removed value, or None if no occupied cell matched
    pub fn erase_overflow(
        &mut self,
        side: Side,
        key: u64,
        nodes: &mut Slab<OverflowNode<V>>,
    ) -> Option<V> {
        let mut prev: Option<usize> = None;
        let mut cursor = self.overflow_head;
        while let Some(index) = cursor {
            let node = nodes.get_mut(index).expect("Invalid chain key");
            if node.key(side) == Some(key) {
                let (_, value) = node.slot.cell_mut(side).take().expect("cell vanished");
                if node.slot.is_empty() {
                    let next = node.next;
                    match prev {
                        Some(prev_index) => {
                            nodes
                                .get_mut(prev_index)
                                .expect("Invalid chain key")
                                .next = next;
                        }
                        None => self.overflow_head = next,
                    }
                    nodes.remove(index);
                }
                return Some(value);
            }
            prev = Some(index);
            cursor = node.next;
        }
        None
    }

    /// Number of nodes in the overflow chain
    pub fn overflow_len(&self, nodes: &Slab<OverflowNode<V>>) -> usize {
        let mut count = 0;
        let mut cursor = self.overflow_head;
        while let Some(index) = cursor {
            count += 1;
            cursor = nodes.get(index).expect("Invalid chain key").next;
        }
        count
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
