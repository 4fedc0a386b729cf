use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::Deref;
use tracing::warn;

use crate::error::{Result, StrategyError};

/// Fields every candle record must carry.
pub const REQUIRED_FIELDS: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

/// One OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bar open time, unix milliseconds.
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Bar open time as a UTC datetime.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Column extraction over a run of candles.
///
/// Implemented for `[Candle]`, so it is available on `Vec<Candle>` and
/// [`CandleSeries`] alike.
pub trait CandleColumns {
    fn opens(&self) -> Vec<f64>;
    fn highs(&self) -> Vec<f64>;
    fn lows(&self) -> Vec<f64>;
    fn closes(&self) -> Vec<f64>;
    fn volumes(&self) -> Vec<f64>;
}

impl CandleColumns for [Candle] {
    fn opens(&self) -> Vec<f64> {
        self.iter().map(|c| c.open).collect()
    }

    fn highs(&self) -> Vec<f64> {
        self.iter().map(|c| c.high).collect()
    }

    fn lows(&self) -> Vec<f64> {
        self.iter().map(|c| c.low).collect()
    }

    fn closes(&self) -> Vec<f64> {
        self.iter().map(|c| c.close).collect()
    }

    fn volumes(&self) -> Vec<f64> {
        self.iter().map(|c| c.volume).collect()
    }
}

/// Chronologically ordered, read-only candle sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Wrap candles as supplied. Ordering is assumed, not enforced.
    pub fn new(candles: Vec<Candle>) -> Self {
        let series = Self { candles };
        if !series.is_chronological() {
            warn!(
                candles = series.len(),
                "candle timestamps are not strictly increasing"
            );
        }
        series
    }

    /// Parse a JSON array of candle records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Build a series from an already-parsed JSON array of candle records.
    pub fn from_value(value: &Value) -> Result<Self> {
        let records = value
            .as_array()
            .ok_or_else(|| StrategyError::InvalidInput("expected an array of candles".to_string()))?;
        if records.is_empty() {
            return Err(StrategyError::InvalidInput("no candles supplied".to_string()));
        }

        let mut candles = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            let fields = record.as_object().ok_or_else(|| {
                StrategyError::InvalidInput(format!("candle {} is not an object", i))
            })?;
            if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !fields.contains_key(**f)) {
                return Err(StrategyError::MissingField(missing.to_string()));
            }
            candles.push(Candle::deserialize(record)?);
        }

        Ok(Self::new(candles))
    }

    /// True when every timestamp is strictly greater than the one before it.
    pub fn is_chronological(&self) -> bool {
        self.candles
            .windows(2)
            .all(|pair| pair[0].timestamp < pair[1].timestamp)
    }

    pub fn into_inner(self) -> Vec<Candle> {
        self.candles
    }
}

impl Deref for CandleSeries {
    type Target = [Candle];

    fn deref(&self) -> &Self::Target {
        &self.candles
    }
}

impl From<Vec<Candle>> for CandleSeries {
    fn from(candles: Vec<Candle>) -> Self {
        Self::new(candles)
    }
}

impl From<&[Candle]> for CandleSeries {
    fn from(candles: &[Candle]) -> Self {
        Self::new(candles.to_vec())
    }
}
