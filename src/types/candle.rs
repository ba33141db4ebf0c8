use crate::error::{AppError, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// OHLCV candle, supplied oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    /// Open time (unix milliseconds).
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Typical price: (high + low + close) / 3.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Parse one exchange kline row.
    ///
    /// Rows are arrays of `[openTime, open, high, low, close, volume, ...]`
    /// where the prices are usually encoded as strings. Trailing columns
    /// (close time, quote volume, trade count, ...) are ignored.
    pub fn from_kline(row: &[Value]) -> Result<Self> {
        if row.len() < 6 {
            return Err(AppError::MalformedKline(format!(
                "expected at least 6 columns, got {}",
                row.len()
            )));
        }

        let open_time = row[0]
            .as_i64()
            .ok_or_else(|| AppError::MalformedKline(format!("bad open time: {}", row[0])))?;

        Ok(Self {
            open_time,
            open: kline_number(&row[1], "open")?,
            high: kline_number(&row[2], "high")?,
            low: kline_number(&row[3], "low")?,
            close: kline_number(&row[4], "close")?,
            volume: kline_number(&row[5], "volume")?,
        })
    }

    /// Open time as a UTC datetime, if representable.
    pub fn open_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.open_time).single()
    }
}

fn kline_number(value: &Value, field: &str) -> Result<f64> {
    let parsed = match value {
        Value::String(s) => s.parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed.ok_or_else(|| AppError::MalformedKline(format!("bad {}: {}", field, value)))
}

/// Parse a full kline payload into candles, preserving order.
pub fn parse_klines(rows: &[Vec<Value>]) -> Result<Vec<Candle>> {
    rows.iter().map(|row| Candle::from_kline(row)).collect()
}
