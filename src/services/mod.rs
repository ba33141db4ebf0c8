//! Indicator engine and batch orchestration.

pub mod batch;
pub mod signals;

pub use batch::{evaluate_batch, run_dashboard};
pub use signals::{evaluate_candles, SnapshotBuilder};
