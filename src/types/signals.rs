use super::TickerSummary;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a classified signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSide {
    StrongBuy,
    StrongSell,
    WatchBull,
    WatchBear,
    Neutral,
}

impl SignalSide {
    /// Get display label for this side.
    pub fn label(&self) -> &'static str {
        match self {
            SignalSide::StrongBuy => "STRONG BUY",
            SignalSide::StrongSell => "STRONG SELL",
            SignalSide::WatchBull => "WATCH (BULL)",
            SignalSide::WatchBear => "WATCH (BEAR)",
            SignalSide::Neutral => "NEUTRAL",
        }
    }
}

/// Label carried by signals emitted while indicators are warming up.
pub const PENDING_LABEL: &str = "PENDING";
/// Label carried by signals emitted when computation failed.
pub const DATA_ERROR_LABEL: &str = "DATA ERROR";

/// Classified trading signal with its justifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub side: SignalSide,
    /// Short display string.
    pub label: String,
    /// Human-readable reasons, in evaluation order.
    pub reasons: Vec<String>,
}

impl Signal {
    pub fn new(side: SignalSide, reasons: Vec<String>) -> Self {
        Self {
            side,
            label: side.label().to_string(),
            reasons,
        }
    }

    /// Signal for an instrument whose indicators are not ready yet.
    pub fn pending(reason: &NotReadyReason) -> Self {
        Self {
            side: SignalSide::Neutral,
            label: PENDING_LABEL.to_string(),
            reasons: vec![reason.to_string()],
        }
    }

    /// Signal for an instrument whose computation failed.
    pub fn data_error(message: impl Into<String>) -> Self {
        Self {
            side: SignalSide::Neutral,
            label: DATA_ERROR_LABEL.to_string(),
            reasons: vec![message.into()],
        }
    }

    pub fn is_pending(&self) -> bool {
        self.label == PENDING_LABEL
    }

    pub fn is_data_error(&self) -> bool {
        self.label == DATA_ERROR_LABEL
    }
}

/// Fully populated indicator values for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub ema_short: f64,
    pub ema_medium: f64,
    pub ema_long: f64,
    pub vwap: f64,
    /// Latest raw RSI.
    pub rsi: f64,
    /// Latest EMA-smoothed RSI.
    pub rsi_signal: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_histogram: f64,
}

/// Stage that could not complete for lack of history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotReadyReason {
    /// Too few candles for one of the EMAs or for VWAP.
    InsufficientCandles,
    /// Too few closes for RSI plus its smoothing.
    InsufficientCloses,
    /// RSI series too short for its signal line.
    InsufficientRsiPoints,
    /// Too few closes for MACD plus its signal line.
    InsufficientMacdCloses,
    /// MACD series too short for its signal line.
    InsufficientMacdPoints,
}

impl fmt::Display for NotReadyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            NotReadyReason::InsufficientCandles => "not enough candles for EMAs/VWAP",
            NotReadyReason::InsufficientCloses => "insufficient closes",
            NotReadyReason::InsufficientRsiPoints => "insufficient RSI points",
            NotReadyReason::InsufficientMacdCloses => "insufficient closes for MACD",
            NotReadyReason::InsufficientMacdPoints => "insufficient MACD points",
        };
        f.write_str(message)
    }
}

/// Result of evaluating one instrument's indicators.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorOutcome {
    Ready(IndicatorSnapshot),
    NotReady(NotReadyReason),
    Failed(String),
}

impl IndicatorOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, IndicatorOutcome::Ready(_))
    }

    pub fn snapshot(&self) -> Option<&IndicatorSnapshot> {
        match self {
            IndicatorOutcome::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// Flatten into the nullable-field view consumed by presentation layers.
    pub fn to_view(&self) -> SnapshotView {
        match self {
            IndicatorOutcome::Ready(s) => SnapshotView {
                ready: true,
                reason: None,
                ema_short: Some(s.ema_short),
                ema_medium: Some(s.ema_medium),
                ema_long: Some(s.ema_long),
                vwap: Some(s.vwap),
                rsi: Some(s.rsi),
                rsi_signal: Some(s.rsi_signal),
                macd: Some(s.macd),
                macd_signal: Some(s.macd_signal),
                macd_histogram: Some(s.macd_histogram),
            },
            IndicatorOutcome::NotReady(reason) => SnapshotView::empty(reason.to_string()),
            IndicatorOutcome::Failed(message) => SnapshotView::empty(message.clone()),
        }
    }
}

/// Presentation view of an indicator snapshot.
///
/// Numeric fields are `null` unless `ready` is true; they are never zero
/// stand-ins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotView {
    pub ready: bool,
    pub reason: Option<String>,
    pub ema_short: Option<f64>,
    pub ema_medium: Option<f64>,
    pub ema_long: Option<f64>,
    pub vwap: Option<f64>,
    pub rsi: Option<f64>,
    pub rsi_signal: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
}

impl SnapshotView {
    fn empty(reason: String) -> Self {
        Self {
            ready: false,
            reason: Some(reason),
            ema_short: None,
            ema_medium: None,
            ema_long: None,
            vwap: None,
            rsi: None,
            rsi_signal: None,
            macd: None,
            macd_signal: None,
            macd_histogram: None,
        }
    }
}

/// One instrument's ticker, indicators and signal.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentResult {
    pub ticker: TickerSummary,
    pub outcome: IndicatorOutcome,
    pub signal: Signal,
}

impl Serialize for InstrumentResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Row<'a> {
            #[serde(flatten)]
            ticker: &'a TickerSummary,
            indicators: SnapshotView,
            signal: &'a Signal,
        }

        Row {
            ticker: &self.ticker,
            indicators: self.outcome.to_view(),
            signal: &self.signal,
        }
        .serialize(serializer)
    }
}
