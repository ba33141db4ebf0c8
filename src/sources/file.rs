//! Market data read from exchange JSON dumps on disk.
//!
//! Layout under the data directory:
//! - `ticker_24hr.json`: array of 24hr ticker objects
//! - `klines/<PAIR>.json`: array of kline rows, oldest first

use super::MarketDataSource;
use crate::types::{parse_klines, Candle, RawTicker};
use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-backed market data source.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn kline_path(&self, pair: &str) -> PathBuf {
        self.root.join("klines").join(format!("{}.json", pair))
    }
}

#[async_trait]
impl MarketDataSource for FileSource {
    async fn tickers(&self) -> anyhow::Result<Vec<RawTicker>> {
        let path = self.root.join("ticker_24hr.json");
        let text = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        let tickers: Vec<RawTicker> = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        debug!("Loaded {} tickers from {}", tickers.len(), path.display());
        Ok(tickers)
    }

    async fn candles(&self, pair: &str, limit: usize) -> anyhow::Result<Vec<Candle>> {
        let path = self.kline_path(pair);
        let text = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        let rows: Vec<Vec<Value>> = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        let mut candles = parse_klines(&rows)?;

        if candles.len() > limit {
            candles.drain(..candles.len() - limit);
        }
        Ok(candles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "fundflow-file-source-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(dir.join("klines")).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_candles_keep_most_recent() {
        let root = temp_root("limit");
        std::fs::write(
            root.join("klines").join("BTCUSDT.json"),
            r#"[[1,"1","1","1","1","1"],[2,"2","2","2","2","2"],[3,"3","3","3","3","3"]]"#,
        )
        .unwrap();

        let source = FileSource::new(&root);
        let candles = source.candles("BTCUSDT", 2).await.unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].open_time, 2);
        assert_eq!(candles[1].close, 3.0);

        std::fs::remove_dir_all(root).ok();
    }

    #[tokio::test]
    async fn test_missing_pair_is_error() {
        let root = temp_root("missing");
        let source = FileSource::new(&root);
        assert!(source.candles("NOPEUSDT", 10).await.is_err());
        std::fs::remove_dir_all(root).ok();
    }

    #[tokio::test]
    async fn test_empty_kline_file_is_empty_result() {
        let root = temp_root("empty");
        std::fs::write(root.join("klines").join("ETHUSDT.json"), "[]").unwrap();

        let source = FileSource::new(&root);
        let candles = source.candles("ETHUSDT", 10).await.unwrap();
        assert!(candles.is_empty());

        std::fs::remove_dir_all(root).ok();
    }

    #[tokio::test]
    async fn test_tickers_loaded() {
        let root = temp_root("tickers");
        std::fs::write(
            root.join("ticker_24hr.json"),
            r#"[{"symbol":"BTCUSDT","lastPrice":"100","priceChangePercent":"1","volume":"5","quoteVolume":"500"}]"#,
        )
        .unwrap();

        let source = FileSource::new(&root);
        let tickers = source.tickers().await.unwrap();
        assert_eq!(tickers.len(), 1);
        assert_eq!(tickers[0].symbol, "BTCUSDT");

        std::fs::remove_dir_all(root).ok();
    }
}
