//! Donchian Channel indicator.

use super::window::{rolling_max, rolling_min};

/// Channel high, low and midpoint, aligned with the input.
#[derive(Debug, Clone, PartialEq)]
pub struct DonchianSeries {
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub mid: Vec<f64>,
}

/// Donchian Channel: highest high and lowest low over `period`, plus their midpoint.
pub fn donchian_channel(high: &[f64], low: &[f64], period: usize) -> DonchianSeries {
    let upper = rolling_max(high, period);
    let lower = rolling_min(low, period);
    let mid = upper.iter().zip(&lower).map(|(h, l)| (h + l) / 2.0).collect();

    DonchianSeries {
        high: upper,
        low: lower,
        mid,
    }
}
