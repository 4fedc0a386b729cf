//! Indicator table: named numeric columns aligned with the candle series.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Result, StrategyError};
use crate::types::Candle;

/// Column names written by the pipeline.
pub mod columns {
    pub const RSI: &str = "rsi";
    pub const STOCH_RSI_K: &str = "stoch_rsi_k";
    pub const STOCH_RSI_D: &str = "stoch_rsi_d";
    pub const MACD: &str = "macd";
    pub const MACD_SIGNAL: &str = "macd_signal";
    pub const MACD_HIST: &str = "macd_hist";
    pub const BB_UPPER: &str = "bb_upper";
    pub const BB_MIDDLE: &str = "bb_middle";
    pub const BB_LOWER: &str = "bb_lower";
    pub const EMA_FAST: &str = "ema_fast";
    pub const EMA_SLOW: &str = "ema_slow";
    pub const ATR: &str = "atr";
    pub const PSAR: &str = "psar";
    pub const PSAR_DIRECTION: &str = "psar_direction";
    pub const VWAP: &str = "vwap";
    pub const BASIC_UPPER: &str = "basic_upper";
    pub const BASIC_LOWER: &str = "basic_lower";
    pub const SUPERTREND: &str = "supertrend";
    pub const SUPERTREND_DIRECTION: &str = "supertrend_direction";
    pub const DONCHIAN_HIGH: &str = "donchian_high";
    pub const DONCHIAN_LOW: &str = "donchian_low";
    pub const DONCHIAN_MID: &str = "donchian_mid";
    pub const TR_SUM: &str = "tr_sum";
    pub const HIGHEST_HIGH: &str = "highest_high";
    pub const LOWEST_LOW: &str = "lowest_low";
    pub const RANGE: &str = "range";
    pub const CHOPPINESS: &str = "choppiness";
    pub const PIVOT: &str = "pivot";
    pub const R1: &str = "r1";
    pub const S1: &str = "s1";
    pub const R2: &str = "r2";
    pub const S2: &str = "s2";
    pub const R3: &str = "r3";
    pub const S3: &str = "s3";
    pub const HA_OPEN: &str = "ha_open";
    pub const HA_HIGH: &str = "ha_high";
    pub const HA_LOW: &str = "ha_low";
    pub const HA_CLOSE: &str = "ha_close";
}

/// Computed indicator columns, each exactly as long as the candle series.
///
/// Columns only exist for indicators that were enabled. Missing columns read
/// as NaN through [`IndicatorTable::value`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndicatorTable {
    len: usize,
    columns: BTreeMap<&'static str, Vec<f64>>,
}

/// One candle together with every indicator value at its index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorRow {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    #[serde(flatten)]
    pub values: BTreeMap<&'static str, f64>,
}

impl IndicatorTable {
    /// Create an empty table for a series of `len` candles.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            columns: BTreeMap::new(),
        }
    }

    /// Insert or replace a column.
    pub fn insert(&mut self, name: &'static str, values: Vec<f64>) -> Result<()> {
        if values.len() != self.len {
            return Err(StrategyError::Analysis(format!(
                "column '{}' has {} values, expected {}",
                name,
                values.len(),
                self.len
            )));
        }
        self.columns.insert(name, values);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Value of column `name` at `index`, NaN when either is absent.
    pub fn value(&self, name: &str, index: usize) -> f64 {
        self.get(name)
            .and_then(|col| col.get(index).copied())
            .unwrap_or(f64::NAN)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Column names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.keys().copied()
    }

    /// Number of candles the table is aligned with.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Every column's value at `index`.
    pub fn row(&self, index: usize) -> BTreeMap<&'static str, f64> {
        self.columns
            .iter()
            .map(|(name, col)| (*name, col.get(index).copied().unwrap_or(f64::NAN)))
            .collect()
    }

    /// Per-candle view joining each candle with its indicator values.
    pub fn rows(&self, candles: &[Candle]) -> Vec<IndicatorRow> {
        candles
            .iter()
            .take(self.len)
            .enumerate()
            .map(|(i, c)| IndicatorRow {
                timestamp: c.timestamp,
                open: c.open,
                high: c.high,
                low: c.low,
                close: c.close,
                volume: c.volume,
                values: self.row(i),
            })
            .collect()
    }
}
