//! Upstream provider adapters.

pub mod kraken;

pub use kraken::{KrakenAdapter, MatchStrategy};
