//! Heikin-Ashi candles.

/// Smoothed candle columns, aligned with the input.
#[derive(Debug, Clone, PartialEq)]
pub struct HeikinAshiSeries {
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

/// Heikin-Ashi.
///
/// - close = (O + H + L + C) / 4
/// - open  = first open, then the midpoint of the previous HA open and close
/// - high  = max(high, HA open, HA close)
/// - low   = min(low, HA open, HA close)
pub fn heikin_ashi(open: &[f64], high: &[f64], low: &[f64], close: &[f64]) -> HeikinAshiSeries {
    let len = close.len();
    let ha_close: Vec<f64> = (0..len)
        .map(|i| (open[i] + high[i] + low[i] + close[i]) / 4.0)
        .collect();

    let mut ha_open = Vec::with_capacity(len);
    let mut carry: Option<(f64, f64)> = None;
    for i in 0..len {
        let value = match carry {
            Some((prev_open, prev_close)) => (prev_open + prev_close) / 2.0,
            None => open[i],
        };
        ha_open.push(value);
        carry = Some((value, ha_close[i]));
    }

    let ha_high = (0..len)
        .map(|i| high[i].max(ha_open[i]).max(ha_close[i]))
        .collect();
    let ha_low = (0..len)
        .map(|i| low[i].min(ha_open[i]).min(ha_close[i]))
        .collect();

    HeikinAshiSeries {
        open: ha_open,
        high: ha_high,
        low: ha_low,
        close: ha_close,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heikin_ashi_recurrence() {
        let open = [10.0, 12.0, 11.0];
        let high = [14.0, 15.0, 13.0];
        let low = [9.0, 11.0, 8.0];
        let close = [13.0, 14.0, 9.0];
        let out = heikin_ashi(&open, &high, &low, &close);

        assert_eq!(out.close, vec![11.5, 13.0, 10.25]);
        assert_eq!(out.open[0], 10.0);
        assert_eq!(out.open[1], (10.0 + 11.5) / 2.0);
        assert_eq!(out.open[2], (out.open[1] + 13.0) / 2.0);
    }

    #[test]
    fn test_heikin_ashi_envelope() {
        let open = [10.0, 12.0, 11.0, 15.0];
        let high = [14.0, 15.0, 13.0, 16.0];
        let low = [9.0, 11.0, 8.0, 14.0];
        let close = [13.0, 14.0, 9.0, 15.5];
        let out = heikin_ashi(&open, &high, &low, &close);
        for i in 0..4 {
            assert!(out.high[i] >= high[i]);
            assert!(out.high[i] >= out.open[i] && out.high[i] >= out.close[i]);
            assert!(out.low[i] <= low[i]);
            assert!(out.low[i] <= out.open[i] && out.low[i] <= out.close[i]);
        }
    }

    #[test]
    fn test_heikin_ashi_empty() {
        let out = heikin_ashi(&[], &[], &[], &[]);
        assert!(out.open.is_empty());
    }
}
