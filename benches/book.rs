//! Benchmarks for the hashed price-level book.
//!
//! The interesting comparison is between the three storage tiers: the
//! fast ring (one cache-padded indirection), the collision slots (one
//! more offset), and the overflow chains (linked-list walk).
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run a specific group
//! cargo bench -- insert
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};

use tickbook::{HashBook, Side};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// One cent in fixed-point units (10^8 scaling)
const TICK: u64 = 1_000_000;

/// 50000.00 in fixed-point
const ANCHOR: u64 = 5_000_000_000_000;

/// Bench configuration: 1024-wide ring, 4 collision slots per bucket
type Book = HashBook<u64, TICK, 1024, 4>;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Pre-populate a ladder of ask levels starting one tick above the anchor.
fn populate_asks(book: &mut Book, count: u64) {
    for step in 1..=count {
        book.insert(Side::Ask, ANCHOR + step * TICK, step);
    }
}

/// Pre-populate a ladder of bid levels starting one tick below the anchor.
fn populate_bids(book: &mut Book, count: u64) {
    for step in 1..=count {
        book.insert(Side::Bid, ANCHOR - step * TICK, step);
    }
}

/// Build a book with `count` levels per side in the fast ring.
fn populated_book(count: u64) -> Book {
    let mut book = Book::new(ANCHOR);
    populate_bids(&mut book, count);
    populate_asks(&mut book, count);
    book
}

// ============================================================================
// BENCHMARKS
// ============================================================================

/// Insert/erase cycle per storage tier.
///
/// The key offsets pick the tier: inside the ring for tier 0, a few
/// ring-widths out for the collision slots, far out for overflow.
fn bench_insert_erase(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_erase");
    group.throughput(Throughput::Elements(1));

    // Offsets chosen outside the populated ladder so the cycle always
    // starts from an empty cell.
    let cases = [
        ("fast_ring", ANCHOR + 300 * TICK),
        ("collision_slot", ANCHOR + 2_000 * TICK),
        ("overflow", ANCHOR + 10_000 * TICK),
    ];

    for (name, key) in cases {
        let mut book = populated_book(200);
        group.bench_function(name, |b| {
            b.iter(|| {
                book.insert(Side::Ask, black_box(key), 1);
                book.erase(Side::Ask, black_box(key))
            })
        });
    }

    group.finish();
}

/// Lookup cost per tier, hit and miss.
fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");
    group.throughput(Throughput::Elements(1));

    let mut book = populated_book(200);
    book.insert(Side::Ask, ANCHOR + 2_000 * TICK, 1);
    book.insert(Side::Ask, ANCHOR + 10_000 * TICK, 1);

    let cases = [
        ("fast_ring_hit", ANCHOR + 100 * TICK),
        ("fast_ring_miss", ANCHOR + 300 * TICK),
        ("collision_slot_hit", ANCHOR + 2_000 * TICK),
        ("overflow_hit", ANCHOR + 10_000 * TICK),
        ("overflow_miss", ANCHOR + 11_000 * TICK),
    ];

    for (name, key) in cases {
        group.bench_function(name, |b| {
            b.iter(|| book.find(Side::Ask, black_box(key)))
        });
    }

    group.finish();
}

/// Throughput of building a two-sided ladder from scratch.
fn bench_populate(c: &mut Criterion) {
    let mut group = c.benchmark_group("populate");

    for count in [64u64, 256] {
        group.throughput(Throughput::Elements(count * 2));
        group.bench_with_input(
            BenchmarkId::new("levels_per_side", count),
            &count,
            |b, &count| {
                b.iter_batched(
                    || Book::new(ANCHOR),
                    |mut book| {
                        populate_bids(&mut book, count);
                        populate_asks(&mut book, count);
                        book
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

/// Walking the ask side from the BBO outward.
fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");

    let book = populated_book(200);
    group.throughput(Throughput::Elements(200));
    group.bench_function("asks_200_levels", |b| {
        b.iter(|| book.asks().map(|(_, size)| *size).sum::<u64>())
    });

    group.finish();
}

/// Full drain-and-reinsert anchor migration.
fn bench_rehash(c: &mut Criterion) {
    let mut group = c.benchmark_group("rehash");
    group.sample_size(20);

    for count in [64u64, 256] {
        group.throughput(Throughput::Elements(count * 2));
        group.bench_with_input(
            BenchmarkId::new("levels_per_side", count),
            &count,
            |b, &count| {
                b.iter_batched(
                    || populated_book(count),
                    |mut book| {
                        book.rehash(ANCHOR + 10 * TICK);
                        book
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_erase,
    bench_find,
    bench_populate,
    bench_iterate,
    bench_rehash
);
criterion_main!(benches);
