use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::{QuoteServiceConfig, DEFAULT_REQUEST_TIMEOUT, DEFAULT_UPSTREAM_URL};
use crate::data_source::QuoteFetcher;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{FetchError, Pair, Quote};

/// Provider-side symbol for each catalog pair. Kraken names bitcoin `XBT`.
const SYMBOL_TABLE: &[(Pair, &str)] = &[
    (Pair::BtcUsd, "XBTUSD"),
    (Pair::BtcChf, "XBTCHF"),
    (Pair::BtcEur, "XBTEUR"),
];

/// Assets that Kraken may answer with under an `X`-prefixed legacy code.
const DECORATED_ASSETS: &[&str] = &["XBT"];

/// Longest body excerpt carried in a bad-status error.
const MAX_DETAIL_LEN: usize = 200;

#[derive(Debug, Deserialize)]
struct TickerResponse {
    #[serde(default)]
    error: Vec<String>,
    #[serde(default)]
    result: HashMap<String, TickerData>,
}

#[derive(Debug, Deserialize)]
struct TickerData {
    /// Last trade closed: `[price, lot volume]`.
    #[serde(default)]
    c: Vec<String>,
}

/// Provider symbol for `pair`; pairs missing from the table use their canonical string.
pub fn provider_symbol(pair: Pair) -> &'static str {
    SYMBOL_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == pair)
        .map(|(_, symbol)| *symbol)
        .unwrap_or_else(|| pair.as_str())
}

/// Ways of matching a requested symbol against response keys, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// The response key equals the requested symbol.
    Exact,
    /// The response key is a known decoration of the requested symbol,
    /// e.g. `XBTUSD` answered as `XXBTZUSD` or `XXBTUSD`.
    Decorated,
    /// The response holds exactly one key, whatever its name.
    Singleton,
}

impl MatchStrategy {
    pub const ORDER: [Self; 3] = [Self::Exact, Self::Decorated, Self::Singleton];

    /// Keys this strategy would look up for `symbol`. Empty for [`Singleton`](Self::Singleton).
    pub fn candidates(self, symbol: &str) -> Vec<String> {
        match self {
            Self::Exact => vec![symbol.to_owned()],
            Self::Decorated => decorated_variants(symbol),
            Self::Singleton => Vec::new(),
        }
    }

    /// First response key matched by this strategy.
    pub fn find<'r, V>(self, symbol: &str, result: &'r HashMap<String, V>) -> Option<&'r str> {
        match self {
            Self::Exact | Self::Decorated => self
                .candidates(symbol)
                .iter()
                .find_map(|candidate| result.get_key_value(candidate.as_str()))
                .map(|(key, _)| key.as_str()),
            Self::Singleton if result.len() == 1 => result.keys().next().map(String::as_str),
            Self::Singleton => None,
        }
    }
}

fn decorated_variants(symbol: &str) -> Vec<String> {
    DECORATED_ASSETS
        .iter()
        .filter_map(|asset| symbol.strip_prefix(asset).map(|quote| (asset, quote)))
        .flat_map(|(asset, quote)| [format!("X{asset}Z{quote}"), format!("X{asset}{quote}")])
        .collect()
}

/// Response key answering `pair`, and the strategy that found it.
pub fn resolve_symbol<'r, V>(
    pair: Pair,
    result: &'r HashMap<String, V>,
) -> Result<(&'r str, MatchStrategy), FetchError> {
    let symbol = provider_symbol(pair);

    for strategy in MatchStrategy::ORDER {
        if let Some(key) = strategy.find(symbol, result) {
            if strategy == MatchStrategy::Singleton {
                warn!(pair = %pair, symbol, key, "resolved symbol through singleton fallback");
            } else {
                debug!(pair = %pair, symbol, key, ?strategy, "resolved symbol");
            }
            return Ok((key, strategy));
        }
    }

    let attempted = MatchStrategy::ORDER
        .iter()
        .flat_map(|strategy| strategy.candidates(symbol))
        .collect();
    Err(FetchError::SymbolNotFound { pair, attempted })
}

/// Decode a `/Ticker` body into one quote per pair, in `pairs` order.
pub fn parse_ticker_response(pairs: &[Pair], body: &str) -> Result<Vec<Quote>, FetchError> {
    let response: TickerResponse = serde_json::from_str(body).map_err(|e| FetchError::Malformed {
        detail: e.to_string(),
    })?;

    if !response.error.is_empty() {
        return Err(FetchError::Protocol {
            errors: response.error,
        });
    }

    pairs
        .iter()
        .map(|&pair| {
            let (key, _) = resolve_symbol(pair, &response.result)?;
            let invalid = || FetchError::InvalidQuoteData {
                pair,
                symbol: key.to_owned(),
            };

            let raw = response
                .result
                .get(key)
                .and_then(|data| data.c.first())
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(invalid)?;

            let amount = raw
                .trim()
                .parse::<f64>()
                .map_err(|source| FetchError::QuoteParse {
                    pair,
                    symbol: key.to_owned(),
                    value: raw.clone(),
                    source,
                })?;

            Quote::new(pair, amount).map_err(|_| invalid())
        })
        .collect()
}

/// Kraken public ticker adapter.
#[derive(Clone)]
pub struct KrakenAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout: Duration,
}

impl Default for KrakenAdapter {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new()), DEFAULT_UPSTREAM_URL)
    }
}

impl KrakenAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn from_config(config: &QuoteServiceConfig) -> Self {
        let http_client = Arc::new(ReqwestHttpClient::with_user_agent(&config.user_agent));
        Self::new(http_client, config.base_url.clone()).with_timeout(config.request_timeout)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    fn ticker_url(&self, symbols: &str) -> String {
        format!(
            "{}/Ticker?pair={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(symbols)
        )
    }

    async fn fetch_tickers(&self, pairs: &[Pair]) -> Result<Vec<Quote>, FetchError> {
        if pairs.is_empty() {
            return Err(FetchError::EmptyBatch);
        }

        let symbols = pairs
            .iter()
            .map(|pair| provider_symbol(*pair))
            .collect::<Vec<_>>()
            .join(",");
        info!(provider = self.id(), symbols = %symbols, count = pairs.len(), "requesting ticker batch");

        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
        let request = HttpRequest::get(self.ticker_url(&symbols))
            .with_header("accept", "application/json")
            .with_timeout_ms(timeout_ms);

        let timed_out =
            || FetchError::unavailable(format!("kraken request timed out after {timeout_ms}ms"));

        // The transport enforces the timeout too; this bounds clients that do not.
        let response = tokio::time::timeout(self.timeout, self.http_client.execute(request))
            .await
            .map_err(|_| timed_out())?
            .map_err(|e| {
                if e.timed_out() {
                    timed_out()
                } else {
                    FetchError::unavailable(format!("kraken transport error: {}", e.message()))
                }
            })?;

        if !response.is_success() {
            return Err(FetchError::BadStatus {
                status: response.status,
                detail: excerpt(&response.body),
            });
        }

        parse_ticker_response(pairs, &response.body)
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_DETAIL_LEN) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_owned(),
    }
}

impl QuoteFetcher for KrakenAdapter {
    fn id(&self) -> &'static str {
        "kraken"
    }

    fn fetch_batch<'a>(
        &'a self,
        pairs: &'a [Pair],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Quote>, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            let result = self.fetch_tickers(pairs).await;
            if let Err(error) = &result {
                warn!(provider = self.id(), code = error.code(), error = %error, "ticker batch failed");
            }
            result
        })
    }
}
