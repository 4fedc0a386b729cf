//! Average True Range (ATR) indicator.

use super::window::rolling_mean;

/// True Range: `max(High-Low, |High-PrevClose|, |Low-PrevClose|)`.
///
/// The first candle has no previous close and uses `High-Low` alone.
pub fn true_range(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    (0..high.len())
        .map(|i| {
            let hl = high[i] - low[i];
            if i == 0 {
                return hl;
            }
            let hc = (high[i] - close[i - 1]).abs();
            let lc = (low[i] - close[i - 1]).abs();
            hl.max(hc).max(lc)
        })
        .collect()
}

/// ATR (Average True Range).
///
/// Measures market volatility as the plain `period`-wide mean of the true
/// range. The first `period - 1` entries are NaN.
pub fn atr(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
    rolling_mean(&true_range(high, low, close), period)
}
