//! Volume Weighted Average Price (VWAP) indicator.

/// Cumulative VWAP from the start of the series.
///
/// VWAP = Cumulative(Close * Volume) / Cumulative(Volume)
///
/// Not windowed: every value covers all candles up to and including its own.
/// Entries stay NaN while cumulative volume is zero.
pub fn vwap(close: &[f64], volume: &[f64]) -> Vec<f64> {
    let mut cum_price_vol = 0.0;
    let mut cum_vol = 0.0;

    close
        .iter()
        .zip(volume)
        .map(|(c, v)| {
            cum_price_vol += c * v;
            cum_vol += v;
            if cum_vol == 0.0 {
                f64::NAN
            } else {
                cum_price_vol / cum_vol
            }
        })
        .collect()
}
