//! Exponential Moving Average (EMA) indicator.

/// EMA (Exponential Moving Average).
///
/// Like SMA but gives more weight to recent prices:
/// `ema[i] = α·x[i] + (1 - α)·ema[i-1]` with `α = 2 / (period + 1)`.
///
/// Seeded with the first input value, no early-term adjustment, so there is
/// no warm-up region. Leading NaN inputs stay NaN; an interior NaN carries
/// the previous average forward.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;

    for &x in values {
        let next = match (prev, x.is_nan()) {
            (None, true) => f64::NAN,
            (None, false) => x,
            (Some(p), true) => p,
            (Some(p), false) => alpha * x + (1.0 - alpha) * p,
        };
        if !next.is_nan() {
            prev = Some(next);
        }
        out.push(next);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema_seeds_with_first_value() {
        let out = ema(&[10.0, 20.0], 3);
        assert_eq!(out[0], 10.0);
        // α = 0.5
        assert_eq!(out[1], 15.0);
    }

    #[test]
    fn test_ema_constant_input() {
        let out = ema(&[42.5; 50], 21);
        assert!(out.iter().all(|v| *v == 42.5));
    }

    #[test]
    fn test_ema_tracks_trend() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let out = ema(&closes, 9);
        assert!(out[39] < closes[39]);
        assert!(out[39] > closes[30]);
    }

    #[test]
    fn test_ema_leading_nan() {
        let out = ema(&[f64::NAN, 4.0, 8.0], 3);
        assert!(out[0].is_nan());
        assert_eq!(out[1], 4.0);
        assert_eq!(out[2], 6.0);
    }

    #[test]
    fn test_ema_interior_nan_carries_forward() {
        let out = ema(&[4.0, f64::NAN, 8.0], 3);
        assert_eq!(out[1], 4.0);
        assert_eq!(out[2], 6.0);
    }
}
