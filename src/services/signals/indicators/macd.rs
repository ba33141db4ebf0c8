//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! - MACD line = EMA(fast) - EMA(slow), taken at equal source indices
//! - Signal line = EMA(signal) of the MACD line
//! - Histogram = MACD line - signal line

use super::ema::{ema, EmaSeries};
use crate::types::NotReadyReason;

/// Latest MACD reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdReading {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Map a position in `from` to the position in `to` covering the same
/// source index.
///
/// Two EMA series over the same source start at different offsets, so equal
/// array positions are different points in time. Returns `None` when `to`
/// does not cover that source index.
pub fn aligned_index(index: usize, from: &EmaSeries, to: &EmaSeries) -> Option<usize> {
    let source_index = from.offset.checked_add(index)?;
    let mapped = source_index.checked_sub(to.offset)?;
    (index < from.values.len() && mapped < to.values.len()).then_some(mapped)
}

/// MACD line: fast minus slow at every source index both series cover.
pub fn macd_line(fast: &EmaSeries, slow: &EmaSeries) -> Vec<f64> {
    slow.values
        .iter()
        .enumerate()
        .filter_map(|(i, s)| aligned_index(i, slow, fast).map(|j| fast.values[j] - s))
        .collect()
}

/// Latest MACD, signal and histogram.
pub fn macd(
    values: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<MacdReading, NotReadyReason> {
    if values.len() < slow_period.saturating_add(signal_period) {
        return Err(NotReadyReason::InsufficientMacdCloses);
    }

    let fast = ema(values, fast_period).ok_or(NotReadyReason::InsufficientMacdCloses)?;
    let slow = ema(values, slow_period).ok_or(NotReadyReason::InsufficientMacdCloses)?;

    let line = macd_line(&fast, &slow);
    let signal_series = ema(&line, signal_period).ok_or(NotReadyReason::InsufficientMacdPoints)?;

    match (line.last(), signal_series.latest()) {
        (Some(&macd), Some(signal)) => Ok(MacdReading {
            macd,
            signal,
            histogram: macd - signal,
        }),
        _ => Err(NotReadyReason::InsufficientMacdPoints),
    }
}
