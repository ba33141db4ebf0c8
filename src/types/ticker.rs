use serde::{Deserialize, Serialize};

/// Exchange 24hr ticker as delivered by the data source.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTicker {
    pub symbol: String,
    #[serde(default)]
    pub last_price: String,
    #[serde(default)]
    pub price_change_percent: String,
    #[serde(default)]
    pub quote_volume: String,
}

/// Reshaped 24hr ticker for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerSummary {
    /// Base asset (pair with the quote suffix removed).
    pub symbol: String,
    /// Exchange trading pair, e.g. BTCUSDT.
    pub pair: String,
    /// Last traded price.
    pub price: f64,
    /// 24h change in percent.
    pub change: f64,
    /// 24h traded volume in quote currency.
    pub quote_volume: f64,
    /// Signed quote volume: quote_volume * change / 100.
    pub fund_flow: f64,
}

impl TickerSummary {
    /// Reshape a raw ticker. Unparsable numbers read as zero.
    pub fn from_raw(raw: &RawTicker, quote_asset: &str) -> Self {
        let last_price = parse_or_zero(&raw.last_price);
        let change_pct = parse_or_zero(&raw.price_change_percent);
        let quote_volume = parse_or_zero(&raw.quote_volume);
        let fund_flow = quote_volume * (change_pct / 100.0);

        Self {
            symbol: raw
                .symbol
                .strip_suffix(quote_asset)
                .unwrap_or(&raw.symbol)
                .to_string(),
            pair: raw.symbol.clone(),
            price: round_to(last_price, 8),
            change: round_to(change_pct, 2),
            quote_volume: round_to(quote_volume, 2),
            fund_flow: round_to(fund_flow, 2),
        }
    }
}

/// Select the `limit` most traded pairs quoted in `quote_asset`.
///
/// Output is ordered by descending quote volume.
pub fn select_top(raw: &[RawTicker], quote_asset: &str, limit: usize) -> Vec<TickerSummary> {
    let mut tickers: Vec<TickerSummary> = raw
        .iter()
        .filter(|t| t.symbol.ends_with(quote_asset))
        .map(|t| TickerSummary::from_raw(t, quote_asset))
        .collect();

    tickers.sort_by(|a, b| b.quote_volume.total_cmp(&a.quote_volume));
    tickers.truncate(limit);
    tickers
}

fn parse_or_zero(value: &str) -> f64 {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(symbol: &str, price: &str, change: &str, quote_volume: &str) -> RawTicker {
        RawTicker {
            symbol: symbol.to_string(),
            last_price: price.to_string(),
            price_change_percent: change.to_string(),
            quote_volume: quote_volume.to_string(),
        }
    }

    #[test]
    fn test_raw_ticker_deserialization() {
        let json = r#"{
            "symbol": "BTCUSDT",
            "lastPrice": "43500.50",
            "priceChangePercent": "2.5",
            "volume": "50000",
            "quoteVolume": "2175000000"
        }"#;

        let ticker: RawTicker = serde_json::from_str(json).unwrap();
        assert_eq!(ticker.symbol, "BTCUSDT");
        assert_eq!(ticker.last_price, "43500.50");
        assert_eq!(ticker.quote_volume, "2175000000");
    }

    #[test]
    fn test_from_raw_fund_flow() {
        let summary = TickerSummary::from_raw(&raw("ETHUSDT", "2500", "-2", "1000000"), "USDT");
        assert_eq!(summary.symbol, "ETH");
        assert_eq!(summary.pair, "ETHUSDT");
        assert_eq!(summary.price, 2500.0);
        assert_eq!(summary.change, -2.0);
        assert_eq!(summary.fund_flow, -20000.0);
    }

    #[test]
    fn test_from_raw_rounding() {
        let summary =
            TickerSummary::from_raw(&raw("XUSDT", "0.123456789", "1.23456", "10.005"), "USDT");
        assert_eq!(summary.price, 0.12345679);
        assert_eq!(summary.change, 1.23);
    }

    #[test]
    fn test_from_raw_unparsable_reads_zero() {
        let summary = TickerSummary::from_raw(&raw("BADUSDT", "", "n/a", "oops"), "USDT");
        assert_eq!(summary.price, 0.0);
        assert_eq!(summary.change, 0.0);
        assert_eq!(summary.quote_volume, 0.0);
        assert_eq!(summary.fund_flow, 0.0);
    }

    #[test]
    fn test_select_top_filters_and_sorts() {
        let tickers = vec![
            raw("BTCUSDT", "1", "1", "300"),
            raw("ETHBTC", "1", "1", "9999"),
            raw("SOLUSDT", "1", "1", "500"),
            raw("ADAUSDT", "1", "1", "100"),
        ];

        let top = select_top(&tickers, "USDT", 2);
        let pairs: Vec<&str> = top.iter().map(|t| t.pair.as_str()).collect();
        assert_eq!(pairs, vec!["SOLUSDT", "BTCUSDT"]);
    }
}
