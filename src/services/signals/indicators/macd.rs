//! MACD (Moving Average Convergence Divergence) indicator.

use super::ema::ema;

/// MACD line, signal line and histogram, aligned with the input.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// MACD indicator.
///
/// Shows the relationship between two EMAs:
/// - MACD Line = EMA(fast) - EMA(slow)
/// - Signal Line = EMA(signal) of MACD Line
/// - Histogram = MACD Line - Signal Line
///
/// Buy signal: MACD crosses above signal line
/// Sell signal: MACD crosses below signal line
pub fn macd(close: &[f64], fast_period: usize, slow_period: usize, signal_period: usize) -> MacdSeries {
    let fast = ema(close, fast_period);
    let slow = ema(close, slow_period);
    let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal = ema(&macd, signal_period);
    let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

    MacdSeries {
        macd,
        signal,
        histogram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macd_flat_is_zero() {
        let out = macd(&[100.0; 40], 12, 26, 9);
        assert!(out.macd.iter().all(|v| *v == 0.0));
        assert!(out.histogram.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_macd_uptrend_positive() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let out = macd(&closes, 12, 26, 9);
        assert_eq!(out.macd.len(), 60);
        assert!(out.macd[59] > 0.0);
        assert!(out.signal[59] > 0.0);
    }

    #[test]
    fn test_macd_histogram_identity() {
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
        let out = macd(&closes, 12, 26, 9);
        for i in 0..50 {
            assert_eq!(out.histogram[i], out.macd[i] - out.signal[i]);
        }
    }
}
