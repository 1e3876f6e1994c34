//! Error taxonomy for quote retrieval.
//!
//! Three layers, each wrapping the one below it:
//!
//! | Type | Raised by | Meaning |
//! |------|-----------|---------|
//! | [`ValidationError`] | domain constructors | client input or value invariants |
//! | [`FetchError`] | upstream adapters | transport, status, protocol or data drift |
//! | [`QuoteError`] | [`QuoteService`](crate::QuoteService) | the public `get_quotes` contract |

use std::num::ParseFloatError;

use thiserror::Error;

use crate::domain::Pair;

/// Validation errors raised while constructing domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid pair '{value}', expected one of BTC/USD, BTC/CHF, BTC/EUR")]
    UnsupportedPair { value: String },

    #[error("at least one valid pair must be specified")]
    EmptyPairSet,

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
}

/// Failures of a single upstream batch fetch.
///
/// Every variant is terminal for the batch; nothing is retried internally.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FetchError {
    #[error("upstream batch must include at least one pair")]
    EmptyBatch,

    #[error("upstream unavailable: {detail}")]
    Unavailable { detail: String },

    #[error("upstream returned status {status}: {detail}")]
    BadStatus { status: u16, detail: String },

    #[error("upstream reported errors: {}", .errors.join("; "))]
    Protocol { errors: Vec<String> },

    #[error("upstream response could not be decoded: {detail}")]
    Malformed { detail: String },

    #[error("no data found for {pair} (tried {})", .attempted.join(", "))]
    SymbolNotFound { pair: Pair, attempted: Vec<String> },

    #[error("invalid ticker data for {pair} (found as {symbol})")]
    InvalidQuoteData { pair: Pair, symbol: String },

    #[error("failed to parse amount '{value}' for {pair} (found as {symbol})")]
    QuoteParse {
        pair: Pair,
        symbol: String,
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

impl FetchError {
    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::Unavailable {
            detail: detail.into(),
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyBatch => "upstream.empty_batch",
            Self::Unavailable { .. } => "upstream.unavailable",
            Self::BadStatus { .. } => "upstream.bad_status",
            Self::Protocol { .. } => "upstream.protocol_error",
            Self::Malformed { .. } => "upstream.malformed",
            Self::SymbolNotFound { .. } => "upstream.symbol_not_found",
            Self::InvalidQuoteData { .. } => "upstream.invalid_quote_data",
            Self::QuoteParse { .. } => "upstream.quote_parse_error",
        }
    }

    /// Transport failures may clear up on their own; the rest need backoff or a fix.
    pub const fn retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Coarse classification used by outer surfaces to choose a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller must change its input.
    Client,
    /// The upstream provider failed or returned data that cannot be interpreted.
    Upstream,
}

/// Errors returned by [`QuoteService::get_quotes`](crate::QuoteService::get_quotes).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuoteError {
    #[error("invalid pairs: {0}")]
    InvalidPair(#[source] ValidationError),

    #[error("at least one valid pair must be specified")]
    EmptyPairSet,

    #[error("failed to fetch from upstream: {0}")]
    UpstreamUnavailable(#[source] FetchError),
}

impl QuoteError {
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidPair(_) | Self::EmptyPairSet => ErrorClass::Client,
            Self::UpstreamUnavailable(_) => ErrorClass::Upstream,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidPair(_) => "pair.invalid",
            Self::EmptyPairSet => "pair.empty_set",
            Self::UpstreamUnavailable(inner) => inner.code(),
        }
    }

    pub const fn retryable(&self) -> bool {
        match self {
            Self::InvalidPair(_) | Self::EmptyPairSet => false,
            Self::UpstreamUnavailable(inner) => inner.retryable(),
        }
    }

    /// The upstream cause, when the failure came from the provider.
    pub const fn fetch_error(&self) -> Option<&FetchError> {
        match self {
            Self::UpstreamUnavailable(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<ValidationError> for QuoteError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::EmptyPairSet => Self::EmptyPairSet,
            other => Self::InvalidPair(other),
        }
    }
}

impl From<FetchError> for QuoteError {
    fn from(error: FetchError) -> Self {
        Self::UpstreamUnavailable(error)
    }
}
