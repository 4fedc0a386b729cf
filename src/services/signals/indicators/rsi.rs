//! Relative Strength Index (RSI) indicator.

use super::window::rolling_mean;

/// RSI (Relative Strength Index).
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - Below 30: Oversold (potential buy signal)
/// - Above 70: Overbought (potential sell signal)
///
/// Gains and losses are averaged with a plain `period`-wide mean, so the
/// first `period` entries are NaN. A window without losses gives an infinite
/// relative strength and an RSI of exactly 100; a window with neither gains
/// nor losses gives NaN.
pub fn rsi(values: &[f64], period: usize) -> Vec<f64> {
    let deltas: Vec<f64> = values
        .iter()
        .enumerate()
        .map(|(i, v)| if i == 0 { f64::NAN } else { v - values[i - 1] })
        .collect();

    let gains: Vec<f64> = deltas
        .iter()
        .map(|&d| if d.is_nan() || d > 0.0 { d } else { 0.0 })
        .collect();
    let losses: Vec<f64> = deltas
        .iter()
        .map(|&d| if d.is_nan() { d } else if d < 0.0 { -d } else { 0.0 })
        .collect();

    let avg_gain = rolling_mean(&gains, period);
    let avg_loss = rolling_mean(&losses, period);

    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(g, l)| {
            let rs = g / l;
            100.0 - 100.0 / (1.0 + rs)
        })
        .collect()
}
