//! Market data sources.

pub mod file;

pub use file::FileSource;

use crate::types::{Candle, RawTicker};
use async_trait::async_trait;

/// Supplier of tickers and candle histories.
///
/// An empty candle list is a valid answer (the instrument is simply not
/// ready); `Err` means the fetch itself failed.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// All 24hr tickers known to the source.
    async fn tickers(&self) -> anyhow::Result<Vec<RawTicker>>;

    /// Up to `limit` most recent candles for a pair, oldest first.
    async fn candles(&self, pair: &str, limit: usize) -> anyhow::Result<Vec<Candle>>;
}
