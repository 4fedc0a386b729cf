//! Supertrend indicator.

/// Supertrend bands, trend line and direction (1 = up, -1 = down).
#[derive(Debug, Clone, PartialEq)]
pub struct SupertrendSeries {
    pub basic_upper: Vec<f64>,
    pub basic_lower: Vec<f64>,
    pub line: Vec<f64>,
    pub direction: Vec<f64>,
}

/// Supertrend.
///
/// Basic bands sit `multiplier × ATR` above and below the candle midpoint
/// `(high + low) / 2`. The trend line rides the lower band in an uptrend and
/// the upper band in a downtrend:
/// - uptrend (previous line equals previous lower band): stays up unless the
///   close is at or below the current lower band, which flips to the upper band;
/// - downtrend: stays down unless the close is at or above the current upper
///   band, which flips to the lower band.
///
/// The first candle starts in a downtrend on the upper band when its close is
/// at or below that band, otherwise in an uptrend on the lower band.
///
/// `atr` must be aligned with the candles. While ATR is still warming up the
/// bands and the line are NaN; the first direction reads as an uptrend and
/// every later one as a downtrend until ATR is defined.
pub fn supertrend(high: &[f64], low: &[f64], close: &[f64], atr: &[f64], multiplier: f64) -> SupertrendSeries {
    let len = close.len();
    let basic_upper: Vec<f64> = (0..len)
        .map(|i| (high[i] + low[i]) / 2.0 + multiplier * atr[i])
        .collect();
    let basic_lower: Vec<f64> = (0..len)
        .map(|i| (high[i] + low[i]) / 2.0 - multiplier * atr[i])
        .collect();

    let mut line = Vec::with_capacity(len);
    let mut direction = Vec::with_capacity(len);

    for i in 0..len {
        let (value, dir) = if i == 0 {
            if close[0] <= basic_upper[0] {
                (basic_upper[0], -1.0)
            } else {
                (basic_lower[0], 1.0)
            }
        } else {
            let in_uptrend = line[i - 1] == basic_lower[i - 1];
            if in_uptrend {
                if close[i] <= basic_lower[i] {
                    (basic_upper[i], -1.0)
                } else {
                    (basic_lower[i], 1.0)
                }
            } else if close[i] >= basic_upper[i] {
                (basic_lower[i], 1.0)
            } else {
                (basic_upper[i], -1.0)
            }
        };
        line.push(value);
        direction.push(dir);
    }

    SupertrendSeries {
        basic_upper,
        basic_lower,
        line,
        direction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supertrend_first_candle_below_upper_is_down() {
        let out = supertrend(&[11.0], &[9.0], &[10.0], &[1.0], 3.0);
        assert_eq!(out.basic_upper[0], 13.0);
        assert_eq!(out.basic_lower[0], 7.0);
        assert_eq!(out.line[0], 13.0);
        assert_eq!(out.direction[0], -1.0);
    }

    #[test]
    fn test_supertrend_flips_up_on_breakout() {
        let high = [11.0, 11.0, 20.0, 21.0];
        let low = [9.0, 9.0, 18.0, 19.0];
        let close = [10.0, 10.0, 19.5, 20.5];
        let atr = [1.0; 4];
        let out = supertrend(&high, &low, &close, &atr, 0.5);
        assert_eq!(out.direction, vec![-1.0, -1.0, 1.0, 1.0]);
        assert_eq!(out.line[2], out.basic_lower[2]);
        assert_eq!(out.line[3], out.basic_lower[3]);
    }

    #[test]
    fn test_supertrend_flips_down_on_breakdown() {
        let high = [11.0, 20.0, 21.0, 12.0];
        let low = [9.0, 18.0, 19.0, 10.0];
        let close = [10.0, 19.5, 20.5, 10.5];
        let atr = [1.0; 4];
        let out = supertrend(&high, &low, &close, &atr, 0.5);
        assert_eq!(out.direction, vec![-1.0, 1.0, 1.0, -1.0]);
        assert_eq!(out.line[3], out.basic_upper[3]);
    }

    #[test]
    fn test_supertrend_warmup_reads_as_downtrend() {
        let high = [11.0, 11.0, 11.0];
        let low = [9.0, 9.0, 9.0];
        let close = [10.0, 10.0, 10.0];
        let atr = [f64::NAN, f64::NAN, 1.0];
        let out = supertrend(&high, &low, &close, &atr, 3.0);
        assert!(out.line[0].is_nan());
        assert_eq!(out.direction[0], 1.0);
        assert_eq!(out.direction[1], -1.0);
        assert_eq!(out.direction[2], -1.0);
        assert_eq!(out.line[2], 13.0);
    }
}
