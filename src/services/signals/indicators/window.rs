//! Trailing-window reductions over aligned series.
//!
//! Every helper returns a series the same length as its input. An entry is
//! NaN until a full window is available, and whenever the window holds a NaN.

/// Apply `reduce` to each full trailing window of `values`.
pub fn rolling<F>(values: &[f64], window: usize, reduce: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let mut out = vec![f64::NAN; values.len()];
    if window == 0 || window > values.len() {
        return out;
    }

    for (i, slot) in out.iter_mut().enumerate().skip(window - 1) {
        let slice = &values[i + 1 - window..=i];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        *slot = reduce(slice);
    }
    out
}

pub fn rolling_sum(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| w.iter().sum())
}

pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| w.iter().sum::<f64>() / w.len() as f64)
}

pub fn rolling_min(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| w.iter().copied().fold(f64::INFINITY, f64::min))
}

pub fn rolling_max(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

/// Windowed sample standard deviation (divisor `window - 1`).
///
/// A one-element window has no sample deviation and yields NaN.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| {
        let n = w.len();
        if n < 2 {
            return f64::NAN;
        }
        let mean = w.iter().sum::<f64>() / n as f64;
        let variance = w.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    })
}

/// Shift a series forward by one index, NaN-filling the first slot.
pub fn previous(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    if !values.is_empty() {
        out.push(f64::NAN);
        out.extend_from_slice(&values[..values.len() - 1]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_mean_warmup() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 3);
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert_eq!(out[2], 2.0);
        assert_eq!(out[3], 3.0);
    }

    #[test]
    fn test_rolling_skips_windows_with_nan() {
        let out = rolling_sum(&[f64::NAN, 1.0, 1.0, 1.0], 2);
        assert!(out[1].is_nan());
        assert_eq!(out[2], 2.0);
        assert_eq!(out[3], 2.0);
    }

    #[test]
    fn test_rolling_min_max() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(rolling_min(&values, 2)[2], 1.0);
        assert_eq!(rolling_max(&values, 2)[2], 4.0);
        assert_eq!(rolling_max(&values, 5)[4], 5.0);
    }

    #[test]
    fn test_rolling_std_is_sample_deviation() {
        let out = rolling_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 8);
        // Sample deviation of the textbook population-2.0 set.
        assert!((out[7] - 2.138_089_935_299_395).abs() < 1e-12);
    }

    #[test]
    fn test_zero_or_oversized_window_is_all_nan() {
        assert!(rolling_mean(&[1.0, 2.0], 0).iter().all(|v| v.is_nan()));
        assert!(rolling_mean(&[1.0, 2.0], 3).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_previous() {
        let out = previous(&[1.0, 2.0, 3.0]);
        assert!(out[0].is_nan());
        assert_eq!(&out[1..], &[1.0, 2.0]);
        assert!(previous(&[]).is_empty());
    }
}
