//! Indicator snapshot builder.
//!
//! Readiness is decided in stages and the first failing stage wins:
//! EMAs and VWAP first, then RSI, then MACD.

use crate::config::IndicatorConfig;
use crate::error::{AppError, Result};
use crate::services::signals::indicators::{candle_vwap, ema, macd, rsi};
use crate::types::{Candle, IndicatorOutcome, IndicatorSnapshot, NotReadyReason};
use tracing::debug;

/// Whether a candle history produced a complete snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Readiness {
    Ready(IndicatorSnapshot),
    NotReady(NotReadyReason),
}

impl From<Readiness> for IndicatorOutcome {
    fn from(readiness: Readiness) -> Self {
        match readiness {
            Readiness::Ready(snapshot) => IndicatorOutcome::Ready(snapshot),
            Readiness::NotReady(reason) => IndicatorOutcome::NotReady(reason),
        }
    }
}

/// Builds indicator snapshots for a fixed configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotBuilder {
    config: IndicatorConfig,
}

impl SnapshotBuilder {
    pub fn new(config: IndicatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Compute every indicator for one instrument's candles (oldest first).
    ///
    /// Insufficient history is `Ok(Readiness::NotReady)`; malformed candles
    /// are an error.
    pub fn build(&self, candles: &[Candle]) -> Result<Readiness> {
        validate_candles(candles)?;

        let cfg = &self.config;
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

        let stack = (
            ema(&closes, cfg.short_period).and_then(|e| e.latest()),
            ema(&closes, cfg.medium_period).and_then(|e| e.latest()),
            ema(&closes, cfg.long_period).and_then(|e| e.latest()),
            candle_vwap(candles),
        );
        let (ema_short, ema_medium, ema_long, vwap) = match stack {
            (Some(s), Some(m), Some(l), Some(v)) => (s, m, l, v),
            _ => {
                debug!(candles = candles.len(), "EMA/VWAP stage not ready");
                return Ok(Readiness::NotReady(NotReadyReason::InsufficientCandles));
            }
        };

        let rsi = match rsi(&closes, cfg.rsi_period, cfg.rsi_smoothing) {
            Ok(reading) => reading,
            Err(reason) => {
                debug!(candles = candles.len(), %reason, "RSI stage not ready");
                return Ok(Readiness::NotReady(reason));
            }
        };

        let macd = match macd(&closes, cfg.macd_fast, cfg.macd_slow, cfg.macd_signal) {
            Ok(reading) => reading,
            Err(reason) => {
                debug!(candles = candles.len(), %reason, "MACD stage not ready");
                return Ok(Readiness::NotReady(reason));
            }
        };

        Ok(Readiness::Ready(IndicatorSnapshot {
            ema_short,
            ema_medium,
            ema_long,
            vwap,
            rsi: rsi.value,
            rsi_signal: rsi.signal,
            macd: macd.macd,
            macd_signal: macd.signal,
            macd_histogram: macd.histogram,
        }))
    }
}

/// Reject candles the math cannot use: non-finite fields or negative volume.
pub fn validate_candles(candles: &[Candle]) -> Result<()> {
    for (index, c) in candles.iter().enumerate() {
        let fields = [
            ("open", c.open),
            ("high", c.high),
            ("low", c.low),
            ("close", c.close),
            ("volume", c.volume),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AppError::InvalidCandle {
                index,
                reason: format!("{} is not finite ({})", name, value),
            });
        }
        if c.volume < 0.0 {
            return Err(AppError::InvalidCandle {
                index,
                reason: format!("negative volume ({})", c.volume),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> IndicatorConfig {
        IndicatorConfig {
            short_period: 3,
            medium_period: 5,
            long_period: 8,
            rsi_period: 4,
            rsi_smoothing: 2,
            macd_fast: 3,
            macd_slow: 6,
            macd_signal: 4,
        }
    }

    fn wave(count: usize) -> Vec<Candle> {
        (0..count)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.9).sin() * 3.0 + i as f64 * 0.2;
                Candle {
                    open_time: 1_000_000 + i as i64 * 60_000,
                    open: close,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 100.0 + i as f64,
                }
            })
            .collect()
    }

    #[test]
    fn test_short_history_fails_on_ema_stage() {
        let builder = SnapshotBuilder::new(small_config());
        let result = builder.build(&wave(7)).unwrap();
        assert_eq!(result, Readiness::NotReady(NotReadyReason::InsufficientCandles));
    }

    #[test]
    fn test_rsi_stage_reason_propagates() {
        let config = IndicatorConfig {
            rsi_period: 20,
            ..small_config()
        };
        let result = SnapshotBuilder::new(config).build(&wave(12)).unwrap();
        assert_eq!(result, Readiness::NotReady(NotReadyReason::InsufficientCloses));
    }

    #[test]
    fn test_macd_stage_reason_propagates() {
        // EMAs and RSI are satisfied by 9 candles, MACD needs 6 + 4
        let result = SnapshotBuilder::new(small_config()).build(&wave(9)).unwrap();
        assert_eq!(
            result,
            Readiness::NotReady(NotReadyReason::InsufficientMacdCloses)
        );
    }

    #[test]
    fn test_ready_at_minimum_history() {
        let config = small_config();
        let candles = wave(config.min_candles());
        let result = SnapshotBuilder::new(config).build(&candles).unwrap();
        let Readiness::Ready(snapshot) = result else {
            panic!("expected ready snapshot, got {:?}", result);
        };
        assert!(snapshot.vwap > 0.0);
        assert_eq!(snapshot.macd_histogram, snapshot.macd - snapshot.macd_signal);
    }

    #[test]
    fn test_huge_rsi_period_is_not_ready() {
        let config = IndicatorConfig {
            rsi_period: usize::MAX,
            ..small_config()
        };
        let result = SnapshotBuilder::new(config).build(&wave(30)).unwrap();
        assert_eq!(result, Readiness::NotReady(NotReadyReason::InsufficientCloses));
    }

    #[test]
    fn test_zero_volume_is_not_ready() {
        let mut candles = wave(20);
        candles.iter_mut().for_each(|c| c.volume = 0.0);
        let result = SnapshotBuilder::new(small_config()).build(&candles).unwrap();
        assert_eq!(result, Readiness::NotReady(NotReadyReason::InsufficientCandles));
    }

    #[test]
    fn test_invalid_candle_is_error() {
        let mut candles = wave(20);
        candles[4].close = f64::NAN;
        let err = SnapshotBuilder::new(small_config()).build(&candles).unwrap_err();
        assert!(matches!(err, AppError::InvalidCandle { index: 4, .. }));
    }

    #[test]
    fn test_negative_volume_is_error() {
        let mut candles = wave(20);
        candles[2].volume = -1.0;
        let err = validate_candles(&candles).unwrap_err();
        assert!(err.to_string().contains("negative volume"));
    }

    #[test]
    fn test_readiness_into_outcome() {
        let outcome: IndicatorOutcome =
            Readiness::NotReady(NotReadyReason::InsufficientRsiPoints).into();
        assert_eq!(
            outcome,
            IndicatorOutcome::NotReady(NotReadyReason::InsufficientRsiPoints)
        );
    }
}
