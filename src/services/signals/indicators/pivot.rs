//! Pivot Points indicator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::window::previous;
use crate::error::StrategyError;

/// Pivot point formula family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PivotType {
    Standard,
    Fibonacci,
    Camarilla,
    Woodie,
}

impl PivotType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PivotType::Standard => "standard",
            PivotType::Fibonacci => "fibonacci",
            PivotType::Camarilla => "camarilla",
            PivotType::Woodie => "woodie",
        }
    }

    /// Whether this family defines a third support/resistance pair.
    pub fn has_third_level(&self) -> bool {
        !matches!(self, PivotType::Woodie)
    }
}

impl fmt::Display for PivotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PivotType {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(PivotType::Standard),
            "fibonacci" => Ok(PivotType::Fibonacci),
            "camarilla" => Ok(PivotType::Camarilla),
            "woodie" => Ok(PivotType::Woodie),
            other => Err(StrategyError::InvalidConfig(format!(
                "unknown pivot points type '{}'",
                other
            ))),
        }
    }
}

/// Pivot and support/resistance levels, aligned with the input.
///
/// `r3`/`s3` are `None` for Woodie pivots.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotSeries {
    pub pivot: Vec<f64>,
    pub r1: Vec<f64>,
    pub s1: Vec<f64>,
    pub r2: Vec<f64>,
    pub s2: Vec<f64>,
    pub r3: Option<Vec<f64>>,
    pub s3: Option<Vec<f64>>,
}

/// Pivot Points from the previous candle's high, low and close.
///
/// The first entry of every level is NaN. Returns `None` for fewer than two
/// candles, in which case no level is produced at all.
pub fn pivot_points(high: &[f64], low: &[f64], close: &[f64], pivot_type: PivotType) -> Option<PivotSeries> {
    if close.len() < 2 {
        return None;
    }

    let prev_high = previous(high);
    let prev_low = previous(low);
    let prev_close = previous(close);
    let len = close.len();

    let mut out = PivotSeries {
        pivot: Vec::with_capacity(len),
        r1: Vec::with_capacity(len),
        s1: Vec::with_capacity(len),
        r2: Vec::with_capacity(len),
        s2: Vec::with_capacity(len),
        r3: pivot_type.has_third_level().then(|| Vec::with_capacity(len)),
        s3: pivot_type.has_third_level().then(|| Vec::with_capacity(len)),
    };

    for i in 0..len {
        let (ph, pl, pc) = (prev_high[i], prev_low[i], prev_close[i]);
        let range = ph - pl;
        let classic = (ph + pl + pc) / 3.0;

        let (pivot, levels) = match pivot_type {
            PivotType::Standard => (
                classic,
                [
                    2.0 * classic - pl,
                    2.0 * classic - ph,
                    classic + range,
                    classic - range,
                    classic + 2.0 * range,
                    classic - 2.0 * range,
                ],
            ),
            PivotType::Fibonacci => (
                classic,
                [
                    classic + 0.382 * range,
                    classic - 0.382 * range,
                    classic + 0.618 * range,
                    classic - 0.618 * range,
                    classic + range,
                    classic - range,
                ],
            ),
            PivotType::Camarilla => (
                classic,
                [
                    pc + 1.1 * range / 12.0,
                    pc - 1.1 * range / 12.0,
                    pc + 1.1 * range / 6.0,
                    pc - 1.1 * range / 6.0,
                    pc + 1.1 * range / 4.0,
                    pc - 1.1 * range / 4.0,
                ],
            ),
            PivotType::Woodie => {
                let pivot = (ph + pl + 2.0 * pc) / 4.0;
                (
                    pivot,
                    [
                        2.0 * pivot - pl,
                        2.0 * pivot - ph,
                        pivot + range,
                        pivot - range,
                        f64::NAN,
                        f64::NAN,
                    ],
                )
            }
        };

        out.pivot.push(pivot);
        out.r1.push(levels[0]);
        out.s1.push(levels[1]);
        out.r2.push(levels[2]);
        out.s2.push(levels[3]);
        if let Some(r3) = out.r3.as_mut() {
            r3.push(levels[4]);
        }
        if let Some(s3) = out.s3.as_mut() {
            s3.push(levels[5]);
        }
    }

    Some(out)
}
