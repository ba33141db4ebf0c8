//! Volume Weighted Average Price (VWAP) indicator.

use crate::types::Candle;

/// VWAP over the whole supplied window:
/// Σ(typical price * volume) / Σ(volume).
///
/// Returns `None` for empty or mismatched inputs and for zero total volume.
pub fn vwap(typical_prices: &[f64], volumes: &[f64]) -> Option<f64> {
    if typical_prices.is_empty() || typical_prices.len() != volumes.len() {
        return None;
    }

    let (weighted, total_volume) = typical_prices
        .iter()
        .zip(volumes)
        .fold((0.0, 0.0), |(pv, v), (tp, vol)| (pv + tp * vol, v + vol));

    if total_volume == 0.0 {
        return None;
    }

    Some(weighted / total_volume)
}

/// VWAP of a candle window.
pub fn candle_vwap(candles: &[Candle]) -> Option<f64> {
    let typical: Vec<f64> = candles.iter().map(Candle::typical_price).collect();
    let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();
    vwap(&typical, &volumes)
}
