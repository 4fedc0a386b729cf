//! Parabolic SAR (Stop And Reverse) indicator.

/// SAR values and trend direction (1 = bull, -1 = bear), aligned with the input.
#[derive(Debug, Clone, PartialEq)]
pub struct ParabolicSarSeries {
    pub sar: Vec<f64>,
    pub direction: Vec<f64>,
}

/// Per-candle state carried through the recurrence.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SarState {
    sar: f64,
    bull: bool,
    /// Acceleration factor.
    af: f64,
    /// Extreme point while bullish.
    ep_bull: f64,
    /// Extreme point while bearish.
    ep_bear: f64,
}

impl SarState {
    /// Assume a bull trend with the SAR at the first low.
    fn start(high: f64, low: f64, step: f64) -> Self {
        Self {
            sar: low,
            bull: true,
            af: step,
            ep_bull: low,
            ep_bear: high,
        }
    }

    /// Advance to candle `i`.
    fn advance(self, i: usize, high: &[f64], low: &[f64], step: f64, max_step: f64) -> Self {
        let mut next = self;
        let back2 = i.saturating_sub(2);

        if self.bull {
            let candidate = self.sar + self.af * (self.ep_bull - self.sar);
            // Never above the previous two lows.
            next.sar = candidate.min(low[i - 1]).min(low[back2]);

            if next.sar > low[i] {
                next.bull = false;
                next.sar = self.ep_bull;
                next.ep_bear = high[i];
                next.af = step;
            } else if high[i] > self.ep_bull {
                next.ep_bull = high[i];
                next.af = (self.af + step).min(max_step);
            }
        } else {
            let candidate = self.sar - self.af * (self.sar - self.ep_bear);
            // Never below the previous two highs.
            next.sar = candidate.max(high[i - 1]).max(high[back2]);

            if next.sar < high[i] {
                next.bull = true;
                next.sar = self.ep_bear;
                next.ep_bull = low[i];
                next.af = step;
            } else if low[i] < self.ep_bear {
                next.ep_bear = low[i];
                next.af = (self.af + step).min(max_step);
            }
        }
        next
    }

    fn direction(&self) -> f64 {
        if self.bull {
            1.0
        } else {
            -1.0
        }
    }
}

/// Parabolic SAR.
///
/// Trailing stop that accelerates toward price as a trend extends. Computed
/// strictly left to right: each value depends on the previous SAR, the trend
/// flag, the extreme point and the acceleration factor.
///
/// - Bull: SAR rises toward the highest high, clamped at or below the two
///   previous lows. A low under the SAR flips to bear.
/// - Bear: SAR falls toward the lowest low, clamped at or above the two
///   previous highs. A high over the SAR flips to bull.
///
/// A new extreme raises the acceleration factor by `step` up to `max_step`;
/// a flip resets it to `step`. Fewer than two candles yields all NaN.
pub fn parabolic_sar(high: &[f64], low: &[f64], step: f64, max_step: f64) -> ParabolicSarSeries {
    let len = high.len();
    if len < 2 {
        return ParabolicSarSeries {
            sar: vec![f64::NAN; len],
            direction: vec![f64::NAN; len],
        };
    }

    let mut sar = Vec::with_capacity(len);
    let mut direction = Vec::with_capacity(len);
    let mut state = SarState::start(high[0], low[0], step);
    sar.push(state.sar);
    direction.push(state.direction());

    for i in 1..len {
        state = state.advance(i, high, low, step, max_step);
        sar.push(state.sar);
        direction.push(state.direction());
    }

    ParabolicSarSeries { sar, direction }
}
