//! Upstream fetcher contract.
//!
//! A [`QuoteFetcher`] turns a batch of pairs into quotes with a single upstream call.
//! Implementations must return exactly one quote per requested pair, in request order,
//! or fail the whole batch.

use std::future::Future;
use std::pin::Pin;

use crate::{FetchError, Pair, Quote};

/// Source adapter contract.
///
/// Implementations must be `Send + Sync`; one instance is shared by every request.
pub trait QuoteFetcher: Send + Sync {
    /// Provider name used in logs.
    fn id(&self) -> &'static str;

    /// Fetch all `pairs` in one upstream call.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::EmptyBatch`] for an empty slice, and any other
    /// [`FetchError`] when the call or the response cannot be turned into one quote
    /// per pair.
    fn fetch_batch<'a>(
        &'a self,
        pairs: &'a [Pair],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Quote>, FetchError>> + Send + 'a>>;

    /// Fetch a single pair through [`fetch_batch`](QuoteFetcher::fetch_batch).
    fn fetch_one<'a>(
        &'a self,
        pair: Pair,
    ) -> Pin<Box<dyn Future<Output = Result<Quote, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            let batch = [pair];
            let quotes = self.fetch_batch(&batch).await?;
            quotes
                .into_iter()
                .find(|quote| quote.pair == pair)
                .ok_or_else(|| FetchError::SymbolNotFound {
                    pair,
                    attempted: Vec::new(),
                })
        })
    }
}
