//! Fundflow - indicator computation and signal classification for exchange
//! market data.

pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

// Re-export commonly used types
pub use config::{Config, IndicatorConfig};
pub use error::{AppError, Result};
pub use services::{evaluate_batch, evaluate_candles, run_dashboard, SnapshotBuilder};
pub use types::*;
