//! Choppiness Index indicator.

use super::atr::true_range;
use super::window::{rolling_max, rolling_min, rolling_sum};

/// Choppiness Index and its intermediate columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoppinessSeries {
    pub tr_sum: Vec<f64>,
    pub highest_high: Vec<f64>,
    pub lowest_low: Vec<f64>,
    pub range: Vec<f64>,
    pub choppiness: Vec<f64>,
}

/// Choppiness Index.
///
/// `100 × log10(ΣTR / (highest high − lowest low)) / log10(period)`.
/// High values mean a sideways market, low values a trending one.
///
/// When an ATR series is supplied, `ATR × period` stands in for the true
/// range before summing. This approximates the exact sum and is kept as is
/// so existing outputs do not shift.
pub fn choppiness_index(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
    atr: Option<&[f64]>,
) -> ChoppinessSeries {
    let tr: Vec<f64> = match atr {
        Some(atr) => atr.iter().map(|a| a * period as f64).collect(),
        None => true_range(high, low, close),
    };

    let tr_sum = rolling_sum(&tr, period);
    let highest_high = rolling_max(high, period);
    let lowest_low = rolling_min(low, period);
    let range: Vec<f64> = highest_high
        .iter()
        .zip(&lowest_low)
        .map(|(h, l)| h - l)
        .collect();

    let log_period = (period as f64).log10();
    let choppiness = tr_sum
        .iter()
        .zip(&range)
        .map(|(s, r)| 100.0 * (s / r).log10() / log_period)
        .collect();

    ChoppinessSeries {
        tr_sum,
        highest_high,
        lowest_low,
        range,
        choppiness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choppiness_trending_is_low() {
        // Non-overlapping staircase: every TR equals the step, ΣTR == range.
        let high: Vec<f64> = (0..20).map(|i| (i + 1) as f64).collect();
        let low: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let close = high.clone();
        let out = choppiness_index(&high, &low, &close, 10, None);
        assert!(out.choppiness[8].is_nan());
        assert!(out.choppiness[19].abs() < 1e-9);
    }

    #[test]
    fn test_choppiness_sideways_is_high() {
        let high = vec![11.0; 20];
        let low = vec![9.0; 20];
        let close = vec![10.0; 20];
        let out = choppiness_index(&high, &low, &close, 10, None);
        // ΣTR = 20 over a range of 2: log10(10) / log10(10) = 1.
        assert!((out.choppiness[19] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_choppiness_uses_atr_approximation() {
        let high = vec![11.0; 12];
        let low = vec![9.0; 12];
        let close = vec![10.0; 12];
        let atr = vec![2.0; 12];
        let out = choppiness_index(&high, &low, &close, 4, Some(&atr));
        // Σ(ATR × period) = 4 × 8 = 32, not the exact 8.
        assert_eq!(out.tr_sum[11], 32.0);
    }
}
