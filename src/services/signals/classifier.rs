//! Signal classifier.
//!
//! Three factors are read off a ready snapshot:
//! - price stack: price against the three EMAs and VWAP
//! - momentum: raw RSI against its signal line and the 55/45 bands
//! - trend: MACD histogram and line against the signal line

use crate::config::IndicatorConfig;
use crate::types::{IndicatorSnapshot, Signal, SignalSide};

/// RSI level above which rising momentum counts as bullish.
pub const RSI_BULL_LEVEL: f64 = 55.0;
/// RSI level below which falling momentum counts as bearish.
pub const RSI_BEAR_LEVEL: f64 = 45.0;

/// Reading of a single factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    Bullish,
    Bearish,
    Mixed,
}

impl Bias {
    fn from_flags(bullish: bool, bearish: bool) -> Self {
        match (bullish, bearish) {
            (true, _) => Bias::Bullish,
            (_, true) => Bias::Bearish,
            _ => Bias::Mixed,
        }
    }
}

/// The three factor readings for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Factors {
    pub price_stack: Bias,
    pub momentum: Bias,
    pub trend: Bias,
}

impl Factors {
    /// Evaluate all factors at the given price.
    pub fn evaluate(price: f64, s: &IndicatorSnapshot) -> Self {
        let levels = [s.ema_short, s.ema_medium, s.ema_long, s.vwap];
        let price_stack = Bias::from_flags(
            levels.iter().all(|level| price > *level),
            levels.iter().all(|level| price < *level),
        );

        let momentum = Bias::from_flags(
            s.rsi > s.rsi_signal && s.rsi > RSI_BULL_LEVEL,
            s.rsi < s.rsi_signal && s.rsi < RSI_BEAR_LEVEL,
        );

        let trend = Bias::from_flags(
            s.macd_histogram > 0.0 && s.macd > s.macd_signal,
            s.macd_histogram < 0.0 && s.macd < s.macd_signal,
        );

        Self {
            price_stack,
            momentum,
            trend,
        }
    }

    fn count(&self, bias: Bias) -> usize {
        [self.price_stack, self.momentum, self.trend]
            .iter()
            .filter(|b| **b == bias)
            .count()
    }

    pub fn bullish_count(&self) -> usize {
        self.count(Bias::Bullish)
    }

    pub fn bearish_count(&self) -> usize {
        self.count(Bias::Bearish)
    }
}

/// Classify a ready snapshot at the current price.
pub fn classify(price: f64, snapshot: &IndicatorSnapshot, config: &IndicatorConfig) -> Signal {
    let factors = Factors::evaluate(price, snapshot);
    let emas = format!(
        "EMA{}/{}/{}",
        config.short_period, config.medium_period, config.long_period
    );

    if factors.bullish_count() == 3 {
        return Signal::new(
            SignalSide::StrongBuy,
            vec![
                format!("Price above {} and VWAP", emas),
                format!("RSI above its signal and above {}", RSI_BULL_LEVEL),
                "MACD histogram positive, line above signal".to_string(),
            ],
        );
    }

    if factors.bearish_count() == 3 {
        return Signal::new(
            SignalSide::StrongSell,
            vec![
                format!("Price below {} and VWAP", emas),
                format!("RSI below its signal and below {}", RSI_BEAR_LEVEL),
                "MACD histogram negative, line below signal".to_string(),
            ],
        );
    }

    let side = if factors.bullish_count() >= 2 {
        SignalSide::WatchBull
    } else if factors.bearish_count() >= 2 {
        SignalSide::WatchBear
    } else {
        SignalSide::Neutral
    };

    let price_reason = match factors.price_stack {
        Bias::Bullish => format!("Price stacked above {} and VWAP", emas),
        Bias::Bearish => format!("Price stacked below {} and VWAP", emas),
        Bias::Mixed => format!("Price mixed around {} and VWAP", emas),
    };
    let momentum_reason = match factors.momentum {
        Bias::Bullish => format!(
            "RSI {:.1} rising over signal {:.1}",
            snapshot.rsi, snapshot.rsi_signal
        ),
        Bias::Bearish => format!(
            "RSI {:.1} falling under signal {:.1}",
            snapshot.rsi, snapshot.rsi_signal
        ),
        Bias::Mixed => format!("RSI {:.1} without clear momentum", snapshot.rsi),
    };
    let trend_reason = match factors.trend {
        Bias::Bullish => "MACD trend up".to_string(),
        Bias::Bearish => "MACD trend down".to_string(),
        Bias::Mixed => "MACD trend flat".to_string(),
    };

    Signal::new(side, vec![price_reason, momentum_reason, trend_reason])
}
