//! In-memory TTL cache for quotes.
//!
//! Entries are keyed by [`Pair`] and stamped with the time they were stored. An entry
//! older than the freshness window reads as absent and is overwritten by the next
//! store; nothing is evicted in the background.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::{Pair, Quote};

/// Default freshness window for cached quotes.
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(60);

/// Monotonic time source for entry ageing.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> Instant;
}

/// Clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Used to age entries without sleeping.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.elapsed.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.elapsed.lock()
    }
}

/// Quote cache contract used by [`QuoteService`](crate::QuoteService).
pub trait QuoteStore: Send + Sync {
    /// Return the quote for `pair` if one was stored within the freshness window.
    fn lookup(&self, pair: Pair) -> Option<Quote>;

    /// Create or overwrite the entry for `quote.pair`, stamped with the current time.
    fn store(&self, quote: Quote);
}

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    quote: Quote,
    stored_at: Instant,
}

/// Thread-safe quote cache behind a single readers-writer lock.
#[derive(Debug)]
pub struct MemoryQuoteStore {
    entries: RwLock<HashMap<Pair, CacheEntry>>,
    freshness_window: Duration,
    clock: Arc<dyn Clock>,
}

impl MemoryQuoteStore {
    pub fn new(freshness_window: Duration) -> Self {
        Self::with_clock(freshness_window, Arc::new(SystemClock))
    }

    pub fn with_clock(freshness_window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            freshness_window,
            clock,
        }
    }

    pub const fn freshness_window(&self) -> Duration {
        self.freshness_window
    }

    /// Drop every entry.
    pub fn reset(&self) {
        self.entries.write().clear();
    }

    /// Number of entries held, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for MemoryQuoteStore {
    fn default() -> Self {
        Self::new(DEFAULT_FRESHNESS_WINDOW)
    }
}

impl QuoteStore for MemoryQuoteStore {
    fn lookup(&self, pair: Pair) -> Option<Quote> {
        let entries = self.entries.read();
        let Some(entry) = entries.get(&pair) else {
            debug!(pair = %pair, "cache miss");
            return None;
        };

        let age = self.clock.now().saturating_duration_since(entry.stored_at);
        if age > self.freshness_window {
            debug!(pair = %pair, age_ms = age.as_millis() as u64, "cache entry expired");
            return None;
        }

        debug!(pair = %pair, age_ms = age.as_millis() as u64, "cache hit");
        Some(entry.quote)
    }

    fn store(&self, quote: Quote) {
        let entry = CacheEntry {
            quote,
            stored_at: self.clock.now(),
        };
        self.entries.write().insert(quote.pair, entry);
    }
}
