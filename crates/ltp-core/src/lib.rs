//! # ltp core
//!
//! Last traded price quotes for a small, fixed catalog of currency pairs, served from
//! an in-memory cache that is refreshed from the Kraken public ticker.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Upstream adapters and symbol reconciliation |
//! | [`cache`] | TTL quote cache and clocks |
//! | [`config`] | Service configuration |
//! | [`data_source`] | Upstream fetcher trait |
//! | [`domain`] | Pair, pair set and quote types |
//! | [`error`] | Error taxonomy |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`response`] | Serializable response shapes |
//! | [`service`] | Quote orchestration |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ltp_core::{QuoteService, QuoteServiceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = QuoteService::from_config(&QuoteServiceConfig::from_env()?);
//!
//!     for quote in service.get_quotes("BTC/USD,BTC/EUR").await? {
//!         println!("{}: {:.2}", quote.pair, quote.amount);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │  QuoteService   │────▶│ MemoryQuoteStore │
//! └────────┬────────┘     └──────────────────┘
//!          │ misses, one batch
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  KrakenAdapter  │────▶│ HTTP Client      │
//! │ (QuoteFetcher)  │     │ (reqwest)        │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use ltp_core::{ErrorClass, QuoteError};
//!
//! fn status_for(error: &QuoteError) -> u16 {
//!     match error.class() {
//!         ErrorClass::Client => 400,
//!         ErrorClass::Upstream => 502,
//!     }
//! }
//! ```

pub mod adapters;
pub mod cache;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod response;
pub mod service;

pub use adapters::{KrakenAdapter, MatchStrategy};

pub use cache::{Clock, ManualClock, MemoryQuoteStore, QuoteStore, SystemClock};

pub use config::{ConfigError, QuoteServiceConfig};

pub use data_source::QuoteFetcher;

pub use domain::{Pair, PairSet, Quote};

pub use error::{ErrorClass, FetchError, QuoteError, ValidationError};

pub use http_client::{
    CannedHttpClient, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient,
};

pub use response::{ErrorResponse, LtpItem, LtpResponse};

pub use service::QuoteService;
