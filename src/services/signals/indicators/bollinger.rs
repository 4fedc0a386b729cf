//! Bollinger Bands indicator.

use super::sma::sma;
use super::window::rolling_std;

/// Upper, middle and lower bands, aligned with the input.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerSeries {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Bollinger Bands.
///
/// Consists of:
/// - Middle band: SMA(period)
/// - Upper band: SMA + multiplier * StdDev
/// - Lower band: SMA - multiplier * StdDev
///
/// StdDev is the windowed sample deviation. All bands are NaN for the first
/// `period - 1` entries.
///
/// Signals:
/// - Close below lower band = oversold (bullish)
/// - Close above upper band = overbought (bearish)
pub fn bollinger_bands(close: &[f64], period: usize, std_dev_multiplier: f64) -> BollingerSeries {
    let middle = sma(close, period);
    let std_dev = rolling_std(close, period);

    let upper = middle
        .iter()
        .zip(&std_dev)
        .map(|(m, s)| m + s * std_dev_multiplier)
        .collect();
    let lower = middle
        .iter()
        .zip(&std_dev)
        .map(|(m, s)| m - s * std_dev_multiplier)
        .collect();

    BollingerSeries {
        upper,
        middle,
        lower,
    }
}
