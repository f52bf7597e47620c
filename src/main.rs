//! tickbook - Binary Entry Point
//!
//! A small walkthrough of the book's hot paths; useful as a smoke check
//! that the crate builds and behaves.

use tickbook::types::price::{from_fixed, from_fixed_trimmed, to_fixed, SCALE};
use tickbook::{HashBook, Side};

/// One cent in fixed-point units
const TICK: u64 = SCALE / 100;

/// Demo configuration: 256-wide ring, 4 collision slots per bucket
type Book = HashBook<u64, TICK, 256, 4>;

fn main() {
    println!("===========================================");
    println!("  tickbook - hashed price-level book");
    println!("===========================================");
    println!();

    let anchor = to_fixed("50000.00").expect("valid anchor price");
    let mut book = Book::new(anchor);

    println!("Anchored at {} (tick {})", from_fixed(anchor), from_fixed_trimmed(TICK));
    println!("Footprint: {} bytes, all tiers pre-allocated", book.footprint_bytes());
    println!();

    // Ladder ten levels a tick apart on each side of the anchor.
    println!("Inserting 10 bid and 10 ask levels...");
    for step in 1..=10u64 {
        let bid = anchor - step * TICK;
        let ask = anchor + step * TICK;
        book.insert(Side::Bid, bid, step * 100);
        book.insert(Side::Ask, ask, step * 100);
    }
    println!("  {} levels stored", book.len());

    let (bid, bid_size) = book.best_bid_entry().expect("bids were inserted");
    let (ask, ask_size) = book.best_offer_entry().expect("asks were inserted");
    println!("  best bid   {} x {}", from_fixed(bid), bid_size);
    println!("  best offer {} x {}", from_fixed(ask), ask_size);
    println!("  mid index  {}", book.mid_index());
    println!();

    // Top of book, walked outward from the BBO.
    println!("Top 3 asks:");
    for (price, size) in book.asks().take(3) {
        println!("  {} x {}", from_fixed(price), size);
    }
    println!("Top 3 bids:");
    for (price, size) in book.bids().take(3) {
        println!("  {} x {}", from_fixed(price), size);
    }
    println!();

    // A far-out price rides the overflow chain.
    let far = anchor + 5_000 * TICK;
    let (primary, tier) = book.address(Side::Ask, far);
    book.insert(Side::Ask, far, 1);
    println!(
        "Ask at {} routes to bucket {} tier {} (overflow)",
        from_fixed(far),
        primary,
        tier
    );
    println!("Found: {:?}", book.find(Side::Ask, far));
    println!();

    // Re-anchor once the mid has drifted.
    let new_anchor = to_fixed("50000.05").expect("valid anchor price");
    book.rehash(new_anchor);
    println!("Rehashed to {}; {} levels preserved", from_fixed(new_anchor), book.len());
    println!("  best bid still {}", from_fixed(book.best_bid().expect("kept")));
    println!();

    println!("Run 'cargo test' for the full suite, 'cargo bench' for numbers.");
}
