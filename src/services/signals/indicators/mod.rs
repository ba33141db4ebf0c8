//! Technical indicator implementations.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod vwap;

pub use ema::{ema, EmaSeries};
pub use macd::{aligned_index, macd, macd_line, MacdReading};
pub use rsi::{rsi, rsi_series, RsiReading};
pub use vwap::{candle_vwap, vwap};
