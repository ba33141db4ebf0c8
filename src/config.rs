use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Parameters for the indicator engine.
///
/// Every window size the engine uses lives here so the same code can be run
/// against arbitrary periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorConfig {
    /// Short EMA period.
    pub short_period: usize,
    /// Medium EMA period.
    pub medium_period: usize,
    /// Long EMA period.
    pub long_period: usize,
    /// RSI lookback (Wilder).
    pub rsi_period: usize,
    /// EMA period applied to the RSI series to build its signal line.
    pub rsi_smoothing: usize,
    /// MACD fast EMA period.
    pub macd_fast: usize,
    /// MACD slow EMA period.
    pub macd_slow: usize,
    /// EMA period of the MACD signal line.
    pub macd_signal: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            short_period: 12,
            medium_period: 48,
            long_period: 192,
            rsi_period: 14,
            rsi_smoothing: 3,
            macd_fast: 12,
            macd_slow: 48,
            macd_signal: 192,
        }
    }
}

impl IndicatorConfig {
    /// Check that the periods describe a computable configuration.
    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("short_period", self.short_period),
            ("medium_period", self.medium_period),
            ("long_period", self.long_period),
            ("rsi_period", self.rsi_period),
            ("rsi_smoothing", self.rsi_smoothing),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
        ];

        if let Some((name, _)) = periods.iter().find(|(_, p)| *p == 0) {
            return Err(AppError::Config(format!("{} must be greater than zero", name)));
        }

        if self.macd_fast >= self.macd_slow {
            return Err(AppError::Config(format!(
                "macd_fast ({}) must be smaller than macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }

        Ok(())
    }

    /// Smallest history that lets every stage become ready.
    pub fn min_candles(&self) -> usize {
        [
            self.short_period,
            self.medium_period,
            self.long_period,
            self.rsi_period.saturating_add(self.rsi_smoothing),
            self.macd_slow.saturating_add(self.macd_signal),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    /// Load indicator parameters from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            short_period: env_or("EMA_SHORT", defaults.short_period),
            medium_period: env_or("EMA_MEDIUM", defaults.medium_period),
            long_period: env_or("EMA_LONG", defaults.long_period),
            rsi_period: env_or("RSI_PERIOD", defaults.rsi_period),
            rsi_smoothing: env_or("RSI_SMOOTHING", defaults.rsi_smoothing),
            macd_fast: env_or("MACD_FAST", defaults.macd_fast),
            macd_slow: env_or("MACD_SLOW", defaults.macd_slow),
            macd_signal: env_or("MACD_SIGNAL", defaults.macd_signal),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding exchange JSON dumps (tickers and klines).
    pub data_dir: String,
    /// Quote asset used to select pairs (e.g. USDT).
    pub quote_asset: String,
    /// Number of instruments evaluated, by descending quote volume.
    pub top_n: usize,
    /// Number of candles requested per instrument.
    pub candle_limit: usize,
    /// Indicator engine parameters.
    pub indicators: IndicatorConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("FUNDFLOW_DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
            quote_asset: env::var("QUOTE_ASSET")
                .map(|q| q.to_uppercase())
                .unwrap_or_else(|_| "USDT".to_string()),
            top_n: env_or("TOP_N", 30),
            candle_limit: env_or("CANDLE_LIMIT", 500),
            indicators: IndicatorConfig::from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            quote_asset: "USDT".to_string(),
            top_n: 30,
            candle_limit: 500,
            indicators: IndicatorConfig::default(),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
