//! # Domain Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Pair`] | Supported currency pair from the closed catalog |
//! | [`PairSet`] | Ordered, de-duplicated pairs parsed from a pair list |
//! | [`Quote`] | Last traded price for a pair |
//!
//! All constructors validate their invariants, so a `Pair` outside the catalog or a
//! `Quote` with a negative amount cannot be built.

mod pair;
mod quote;

pub use pair::{Pair, PairSet};
pub use quote::Quote;
