//! Stochastic RSI indicator.

use super::rsi::rsi;
use super::window::{rolling_max, rolling_mean, rolling_min};

/// %K and %D lines, aligned with the input.
#[derive(Debug, Clone, PartialEq)]
pub struct StochRsiSeries {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
}

/// Stochastic RSI.
///
/// Applies the stochastic oscillator to RSI instead of price:
/// StochRSI = (RSI - Lowest RSI) / (Highest RSI - Lowest RSI) over `k_period`
/// %K = mean(StochRSI, k_period) * 100
/// %D = mean(%K, d_period)
///
/// A flat RSI window has a zero range and the ratio is left non-finite.
///
/// Signals:
/// - %K crossing above %D below 20: bullish
/// - %K crossing below %D above 80: bearish
pub fn stoch_rsi(close: &[f64], rsi_period: usize, k_period: usize, d_period: usize) -> StochRsiSeries {
    let rsi = rsi(close, rsi_period);
    let lowest = rolling_min(&rsi, k_period);
    let highest = rolling_max(&rsi, k_period);

    let stoch: Vec<f64> = rsi
        .iter()
        .zip(lowest.iter().zip(&highest))
        .map(|(r, (lo, hi))| (r - lo) / (hi - lo))
        .collect();

    let k: Vec<f64> = rolling_mean(&stoch, k_period)
        .into_iter()
        .map(|v| v * 100.0)
        .collect();
    let d = rolling_mean(&k, d_period);

    StochRsiSeries { k, d }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(count: usize) -> Vec<f64> {
        (0..count)
            .map(|i| 100.0 + (i as f64 * 0.4).sin() * 5.0 + if i % 2 == 0 { 0.7 } else { -0.7 })
            .collect()
    }

    #[test]
    fn test_stoch_rsi_warmup() {
        let out = stoch_rsi(&wave(60), 14, 3, 3);
        // rsi from 14, stoch from 16, %K from 18, %D from 20
        assert!(out.k[17].is_nan());
        assert!(out.k[18].is_finite());
        assert!(out.d[19].is_nan());
        assert!(out.d[20].is_finite());
    }

    #[test]
    fn test_stoch_rsi_value_range() {
        let out = stoch_rsi(&wave(80), 14, 3, 3);
        for (k, d) in out.k.iter().zip(&out.d).skip(20) {
            assert!(*k >= 0.0 && *k <= 100.0, "%K out of range: {}", k);
            assert!(*d >= 0.0 && *d <= 100.0, "%D out of range: {}", d);
        }
    }

    #[test]
    fn test_stoch_rsi_flat_rsi_is_not_finite() {
        // Monotonic rise pins RSI at 100, so every window has zero range.
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let out = stoch_rsi(&closes, 14, 3, 3);
        assert!(out.k.iter().all(|v| !v.is_finite()));
    }
}
