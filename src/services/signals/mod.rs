//! Trading signals service module.
//!
//! Computes the indicator snapshot for one instrument's candle history and
//! classifies it into a directional signal.

pub mod classifier;
pub mod indicators;
pub mod snapshot;

pub use classifier::{classify, Bias, Factors};
pub use snapshot::{validate_candles, Readiness, SnapshotBuilder};

use crate::config::IndicatorConfig;
use crate::types::{Candle, IndicatorOutcome, NotReadyReason, Signal};
use tracing::debug;

/// Evaluate one instrument.
///
/// `price` is the current price; the last close is used when it is absent.
/// Not-ready histories (including an empty one) yield a pending signal and
/// malformed candles a data error signal, so the caller always gets a
/// complete pair.
pub fn evaluate_candles(
    candles: &[Candle],
    price: Option<f64>,
    config: &IndicatorConfig,
) -> (IndicatorOutcome, Signal) {
    let Some(last) = candles.last() else {
        let reason = NotReadyReason::InsufficientCandles;
        return (IndicatorOutcome::NotReady(reason), Signal::pending(&reason));
    };
    let price = price.unwrap_or(last.close);

    match SnapshotBuilder::new(*config).build(candles) {
        Ok(Readiness::Ready(snapshot)) => {
            let signal = classify(price, &snapshot, config);
            debug!(price, side = ?signal.side, "classified snapshot");
            (IndicatorOutcome::Ready(snapshot), signal)
        }
        Ok(Readiness::NotReady(reason)) => {
            (IndicatorOutcome::NotReady(reason), Signal::pending(&reason))
        }
        Err(e) => {
            let message = e.to_string();
            (
                IndicatorOutcome::Failed(message.clone()),
                Signal::data_error(message),
            )
        }
    }
}
