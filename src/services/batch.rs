//! Batch evaluation across instruments.
//!
//! Each instrument is fetched and evaluated on its own; a failure is turned
//! into a data error entry for that instrument and never aborts the batch.

use crate::config::{Config, IndicatorConfig};
use crate::services::signals::evaluate_candles;
use crate::sources::MarketDataSource;
use crate::types::{select_top, IndicatorOutcome, InstrumentResult, Signal, TickerSummary};
use futures_util::future::join_all;
use tracing::{debug, info, warn};

/// Evaluate every ticker, preserving input order.
///
/// Candle histories are fetched concurrently. The ticker's last price is the
/// current price used for classification.
pub async fn evaluate_batch<S: MarketDataSource + ?Sized>(
    source: &S,
    tickers: Vec<TickerSummary>,
    candle_limit: usize,
    config: &IndicatorConfig,
) -> Vec<InstrumentResult> {
    let fetches = tickers
        .iter()
        .map(|ticker| source.candles(&ticker.pair, candle_limit));
    let histories = join_all(fetches).await;

    let results: Vec<InstrumentResult> = tickers
        .into_iter()
        .zip(histories)
        .map(|(ticker, history)| match history {
            Ok(candles) => {
                debug!(
                    pair = %ticker.pair,
                    candles = candles.len(),
                    last_open = ?candles.last().and_then(|c| c.open_datetime()),
                    "evaluating instrument"
                );
                let price = (ticker.price > 0.0).then_some(ticker.price);
                let (outcome, signal) = evaluate_candles(&candles, price, config);
                InstrumentResult {
                    ticker,
                    outcome,
                    signal,
                }
            }
            Err(e) => {
                let message = format!("{:#}", e);
                warn!(pair = %ticker.pair, "candle fetch failed: {}", message);
                InstrumentResult {
                    ticker,
                    outcome: IndicatorOutcome::Failed(message.clone()),
                    signal: Signal::data_error(message),
                }
            }
        })
        .collect();

    let ready = results.iter().filter(|r| r.outcome.is_ready()).count();
    let failed = results
        .iter()
        .filter(|r| matches!(r.outcome, IndicatorOutcome::Failed(_)))
        .count();
    info!(
        total = results.len(),
        ready,
        failed,
        "batch evaluation complete"
    );

    results
}

/// Load tickers, keep the most traded pairs and evaluate them.
pub async fn run_dashboard<S: MarketDataSource + ?Sized>(
    source: &S,
    config: &Config,
) -> anyhow::Result<Vec<InstrumentResult>> {
    let raw = source.tickers().await?;
    let tickers = select_top(&raw, &config.quote_asset, config.top_n);
    info!(
        "Selected {} of {} tickers quoted in {}",
        tickers.len(),
        raw.len(),
        config.quote_asset
    );

    Ok(evaluate_batch(source, tickers, config.candle_limit, &config.indicators).await)
}
