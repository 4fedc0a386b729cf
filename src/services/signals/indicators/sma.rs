//! Simple Moving Average (SMA) indicator.

use super::window::rolling_mean;

/// SMA (Simple Moving Average).
///
/// Mean of the trailing `period` values; the first `period - 1` entries are NaN.
pub fn sma(values: &[f64], period: usize) -> Vec<f64> {
    rolling_mean(values, period)
}
