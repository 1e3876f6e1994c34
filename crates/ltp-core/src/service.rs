//! Quote orchestration: cache first, one batched upstream call for the rest.

use std::sync::Arc;

use tracing::{debug, info};

use crate::adapters::KrakenAdapter;
use crate::cache::{MemoryQuoteStore, QuoteStore};
use crate::config::QuoteServiceConfig;
use crate::data_source::QuoteFetcher;
use crate::{FetchError, Pair, PairSet, Quote, QuoteError};

/// Serves quotes for pair lists, refreshing stale pairs from upstream.
#[derive(Clone)]
pub struct QuoteService {
    store: Arc<dyn QuoteStore>,
    fetcher: Arc<dyn QuoteFetcher>,
}

impl QuoteService {
    pub fn new(store: Arc<dyn QuoteStore>, fetcher: Arc<dyn QuoteFetcher>) -> Self {
        Self { store, fetcher }
    }

    /// In-memory cache plus the Kraken adapter, both configured from `config`.
    pub fn from_config(config: &QuoteServiceConfig) -> Self {
        Self::new(
            Arc::new(MemoryQuoteStore::new(config.freshness_window)),
            Arc::new(KrakenAdapter::from_config(config)),
        )
    }

    /// Quotes for a comma-separated pair list, sorted by pair.
    ///
    /// An empty string means the whole catalog. Cached pairs are served as-is; every
    /// other pair is fetched in a single upstream batch and cached. If that batch
    /// fails nothing is cached or returned.
    ///
    /// # Errors
    ///
    /// [`QuoteError::InvalidPair`] when a token is outside the catalog (upstream is
    /// not contacted), [`QuoteError::UpstreamUnavailable`] when the batch fails.
    pub async fn get_quotes(&self, raw_pairs: &str) -> Result<Vec<Quote>, QuoteError> {
        let pairs = PairSet::parse(raw_pairs)?;
        self.quotes_for(&pairs).await
    }

    /// Same as [`get_quotes`](Self::get_quotes) for an already parsed set.
    pub async fn quotes_for(&self, pairs: &PairSet) -> Result<Vec<Quote>, QuoteError> {
        if pairs.is_empty() {
            return Err(QuoteError::EmptyPairSet);
        }

        let mut quotes = Vec::with_capacity(pairs.len());
        let mut missing = Vec::new();
        for pair in pairs.iter() {
            match self.store.lookup(pair) {
                Some(quote) => quotes.push(quote),
                None => missing.push(pair),
            }
        }
        debug!(hits = quotes.len(), misses = missing.len(), "partitioned request");

        if !missing.is_empty() {
            let fetched = self.fetcher.fetch_batch(&missing).await?;
            let fresh = match_requested(&missing, fetched)?;

            for quote in &fresh {
                self.store.store(*quote);
            }
            info!(provider = self.fetcher.id(), refreshed = fresh.len(), "cached upstream quotes");
            quotes.extend(fresh);
        }

        quotes.sort_by(|a, b| a.pair.cmp(&b.pair));
        Ok(quotes)
    }
}

/// One quote per requested pair, or the first pair the fetcher left out.
fn match_requested(requested: &[Pair], fetched: Vec<Quote>) -> Result<Vec<Quote>, FetchError> {
    requested
        .iter()
        .map(|&pair| {
            fetched
                .iter()
                .find(|quote| quote.pair == pair)
                .copied()
                .ok_or(FetchError::SymbolNotFound {
                    pair,
                    attempted: Vec::new(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::cache::DEFAULT_FRESHNESS_WINDOW;
    use parking_lot::Mutex;
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Fetcher answering from a fixed price list and recording each batch.
    struct RecordingFetcher {
        prices: Vec<(Pair, f64)>,
        failure: Option<FetchError>,
        batches: Mutex<Vec<Vec<Pair>>>,
    }

    impl RecordingFetcher {
        fn with_prices(prices: &[(Pair, f64)]) -> Self {
            Self {
                prices: prices.to_vec(),
                failure: None,
                batches: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: FetchError) -> Self {
            Self {
                prices: Vec::new(),
                failure: Some(error),
                batches: Mutex::new(Vec::new()),
            }
        }

        fn batches(&self) -> Vec<Vec<Pair>> {
            self.batches.lock().clone()
        }
    }

    impl QuoteFetcher for RecordingFetcher {
        fn id(&self) -> &'static str {
            "recording"
        }

        fn fetch_batch<'a>(
            &'a self,
            pairs: &'a [Pair],
        ) -> Pin<Box<dyn Future<Output = Result<Vec<Quote>, FetchError>> + Send + 'a>> {
            self.batches.lock().push(pairs.to_vec());
            Box::pin(async move {
                if let Some(error) = &self.failure {
                    return Err(error.clone());
                }
                Ok(pairs
                    .iter()
                    .rev()
                    .filter_map(|pair| {
                        self.prices
                            .iter()
                            .find(|(candidate, _)| candidate == pair)
                            .map(|(pair, amount)| Quote::new(*pair, *amount).expect("valid"))
                    })
                    .collect())
            })
        }
    }

    const PRICES: &[(Pair, f64)] = &[
        (Pair::BtcUsd, 52000.12),
        (Pair::BtcChf, 47000.5),
        (Pair::BtcEur, 50000.12),
    ];

    fn service_with(
        fetcher: RecordingFetcher,
    ) -> (QuoteService, Arc<RecordingFetcher>, Arc<MemoryQuoteStore>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let store = Arc::new(MemoryQuoteStore::with_clock(
            DEFAULT_FRESHNESS_WINDOW,
            clock.clone(),
        ));
        let fetcher = Arc::new(fetcher);
        let service = QuoteService::new(store.clone(), fetcher.clone());
        (service, fetcher, store, clock)
    }

    #[tokio::test]
    async fn returns_sorted_quotes_for_requested_pairs() {
        let (service, fetcher, _, _) = service_with(RecordingFetcher::with_prices(PRICES));

        let quotes = service.get_quotes("BTC/USD,BTC/EUR").await.expect("quotes");

        let pairs: Vec<_> = quotes.iter().map(|q| q.pair).collect();
        assert_eq!(pairs, vec![Pair::BtcEur, Pair::BtcUsd]);
        assert_eq!(quotes[0].amount, 50000.12);
        assert_eq!(quotes[1].amount, 52000.12);
        assert_eq!(fetcher.batches(), vec![vec![Pair::BtcUsd, Pair::BtcEur]]);
    }

    #[tokio::test]
    async fn only_misses_are_fetched_in_a_single_batch() {
        let (service, fetcher, store, _) = service_with(RecordingFetcher::with_prices(PRICES));
        store.store(Quote::new(Pair::BtcChf, 1.0).expect("valid"));

        let quotes = service.get_quotes("").await.expect("quotes");

        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes[0], Quote::new(Pair::BtcChf, 1.0).expect("valid"));
        assert_eq!(fetcher.batches(), vec![vec![Pair::BtcUsd, Pair::BtcEur]]);
    }

    #[tokio::test]
    async fn fully_cached_request_skips_upstream() {
        let (service, fetcher, _, clock) = service_with(RecordingFetcher::with_prices(PRICES));
        service.get_quotes("BTC/USD").await.expect("first call");

        clock.advance(Duration::from_secs(30));
        service.get_quotes("btc/usd").await.expect("second call");

        assert_eq!(fetcher.batches().len(), 1);
    }

    #[tokio::test]
    async fn failed_batch_caches_nothing() {
        let (service, _, store, _) = service_with(RecordingFetcher::failing(
            FetchError::unavailable("connection reset"),
        ));

        let error = service.get_quotes("BTC/USD").await.expect_err("must fail");

        assert!(matches!(
            error,
            QuoteError::UpstreamUnavailable(FetchError::Unavailable { .. })
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn short_batch_is_rejected_and_not_cached() {
        let (service, _, store, _) =
            service_with(RecordingFetcher::with_prices(&[(Pair::BtcUsd, 52000.12)]));

        let error = service
            .get_quotes("BTC/USD,BTC/CHF")
            .await
            .expect_err("must fail");

        assert_eq!(
            error,
            QuoteError::UpstreamUnavailable(FetchError::SymbolNotFound {
                pair: Pair::BtcChf,
                attempted: Vec::new(),
            })
        );
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn invalid_pair_never_reaches_upstream() {
        let (service, fetcher, _, _) = service_with(RecordingFetcher::with_prices(PRICES));

        let error = service.get_quotes("BTC/USD,ETH/USD").await.expect_err("must fail");
        assert!(matches!(error, QuoteError::InvalidPair(_)));
        assert!(fetcher.batches().is_empty());
    }
}
