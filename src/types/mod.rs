//! Core data types for tickbook
//!
//! All prices are fixed-point `u64` values (scaled by 10^8).
//!
//! ## Types
//!
//! - [`Side`]: Bid or Ask, selecting which cell of a slot an operation hits
//! - [`price`]: fixed-point conversion helpers for human-readable prices

mod side;
pub mod price;

// Re-export at module level
pub use side::Side;
