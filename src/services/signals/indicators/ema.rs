//! Exponential Moving Average (EMA) series.

use std::ops::Range;

/// EMA computed over a source series.
///
/// `values[i]` is the EMA at source index `offset + i`. The first value is
/// the simple mean of the first `period` source elements, so
/// `offset == period - 1` and `values.len() == source.len() - period + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct EmaSeries {
    pub period: usize,
    pub offset: usize,
    pub values: Vec<f64>,
}

impl EmaSeries {
    /// Most recent EMA value.
    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Source indices covered by this series.
    pub fn source_range(&self) -> Range<usize> {
        self.offset..self.offset + self.values.len()
    }

    /// EMA value at a source index, if the series covers it.
    pub fn value_at(&self, source_index: usize) -> Option<f64> {
        source_index
            .checked_sub(self.offset)
            .and_then(|i| self.values.get(i))
            .copied()
    }
}

/// Smoothing constant for a period: 2 / (period + 1).
pub fn smoothing(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// Compute the full EMA series.
///
/// Returns `None` when the source has fewer than `period` elements (or the
/// period is zero).
pub fn ema(series: &[f64], period: usize) -> Option<EmaSeries> {
    if period == 0 || series.len() < period {
        return None;
    }

    let k = smoothing(period);
    let seed = series[..period].iter().sum::<f64>() / period as f64;

    let mut values = Vec::with_capacity(series.len() - period + 1);
    values.push(seed);

    let mut prev = seed;
    for &v in &series[period..] {
        prev = v * k + prev * (1.0 - k);
        values.push(prev);
    }

    Some(EmaSeries {
        period,
        offset: period - 1,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema_insufficient_data() {
        assert!(ema(&[1.0, 2.0, 3.0], 4).is_none());
        assert!(ema(&[], 1).is_none());
    }

    #[test]
    fn test_ema_zero_period() {
        assert!(ema(&[1.0, 2.0], 0).is_none());
    }

    #[test]
    fn test_ema_length_relation_holds() {
        for period in 1..=20 {
            for len in 0..=40 {
                let series: Vec<f64> = (0..len).map(|i| (i as f64 * 0.7).sin() + 10.0).collect();
                match ema(&series, period) {
                    Some(result) => {
                        assert!(len >= period);
                        assert_eq!(result.values.len(), len - period + 1);
                        assert_eq!(result.offset, period - 1);
                    }
                    None => assert!(len < period),
                }
            }
        }
    }

    #[test]
    fn test_ema_seed_is_mean() {
        let result = ema(&[2.0, 4.0, 6.0], 3).unwrap();
        assert_eq!(result.values, vec![4.0]);
        assert_eq!(result.latest(), Some(4.0));
    }

    #[test]
    fn test_ema_recurrence() {
        // k = 0.5 for period 3
        let result = ema(&[2.0, 4.0, 6.0, 10.0, 0.0], 3).unwrap();
        assert_eq!(result.values, vec![4.0, 7.0, 3.5]);
    }

    #[test]
    fn test_ema_constant_series() {
        let series = vec![42.0; 30];
        let result = ema(&series, 10).unwrap();
        assert!(result.values.iter().all(|v| (*v - 42.0).abs() < 1e-12));
    }

    #[test]
    fn test_value_at_maps_source_index() {
        let result = ema(&[2.0, 4.0, 6.0, 10.0, 0.0], 3).unwrap();
        assert_eq!(result.source_range(), 2..5);
        assert_eq!(result.value_at(1), None);
        assert_eq!(result.value_at(2), Some(4.0));
        assert_eq!(result.value_at(4), Some(3.5));
        assert_eq!(result.value_at(5), None);
    }
}
