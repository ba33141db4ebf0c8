//! Relative Strength Index (RSI) with an EMA-smoothed signal line.

use super::ema::ema;
use crate::types::NotReadyReason;

/// Latest RSI reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RsiReading {
    /// Latest raw RSI.
    pub value: f64,
    /// Latest EMA of the RSI series.
    pub signal: f64,
}

/// RSI from average gain and average loss.
///
/// Zero average loss reads 100 even when the average gain is also zero.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

/// Wilder RSI series.
///
/// The first point uses the plain mean of the first `period` gains and
/// losses; later points use Wilder smoothing. Yields `closes.len() - period`
/// points, or `None` when there are not more than `period` closes.
pub fn rsi_series(closes: &[f64], period: usize) -> Option<Vec<f64>> {
    if period == 0 || closes.len() <= period {
        return None;
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = closes
        .windows(2)
        .map(|w| {
            let change = w[1] - w[0];
            (change.max(0.0), (-change).max(0.0))
        })
        .unzip();

    let n = period as f64;
    let mut avg_gain = gains[..period].iter().sum::<f64>() / n;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / n;

    let mut series = Vec::with_capacity(gains.len() - period + 1);
    series.push(rsi_from_averages(avg_gain, avg_loss));

    for (gain, loss) in gains[period..].iter().zip(&losses[period..]) {
        avg_gain = (avg_gain * (n - 1.0) + gain) / n;
        avg_loss = (avg_loss * (n - 1.0) + loss) / n;
        series.push(rsi_from_averages(avg_gain, avg_loss));
    }

    Some(series)
}

/// Latest RSI and its smoothed signal.
pub fn rsi(
    closes: &[f64],
    period: usize,
    smoothing_period: usize,
) -> Result<RsiReading, NotReadyReason> {
    if closes.len() < period.saturating_add(smoothing_period) {
        return Err(NotReadyReason::InsufficientCloses);
    }

    let series = rsi_series(closes, period).ok_or(NotReadyReason::InsufficientCloses)?;
    let smoothed = ema(&series, smoothing_period).ok_or(NotReadyReason::InsufficientRsiPoints)?;

    match (series.last(), smoothed.latest()) {
        (Some(&value), Some(signal)) => Ok(RsiReading { value, signal }),
        _ => Err(NotReadyReason::InsufficientRsiPoints),
    }
}
