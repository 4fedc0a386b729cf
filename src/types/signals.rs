use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a trade signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    Long,
    Short,
}

impl SignalType {
    /// Get display label for this direction.
    pub fn label(&self) -> &'static str {
        match self {
            SignalType::Long => "long",
            SignalType::Short => "short",
        }
    }

    /// Take-profit and stop-loss for an entry, given percentage distances.
    ///
    /// Long: target above entry, stop below. Short: mirrored.
    pub fn exit_levels(&self, entry_price: f64, profit_target_pct: f64, stop_loss_pct: f64) -> (f64, f64) {
        match self {
            SignalType::Long => (
                entry_price * (1.0 + profit_target_pct / 100.0),
                entry_price * (1.0 - stop_loss_pct / 100.0),
            ),
            SignalType::Short => (
                entry_price * (1.0 - profit_target_pct / 100.0),
                entry_price * (1.0 + stop_loss_pct / 100.0),
            ),
        }
    }
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A trade signal emitted for one candle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Candle index the signal was raised on.
    pub index: usize,
    /// Candle timestamp (unix milliseconds).
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    /// Entry at the candle close.
    pub entry_price: f64,
    pub take_profit: f64,
    pub stop_loss: f64,
    /// Bullish evidence that fired on this candle.
    pub bullish_tags: Vec<String>,
    /// Bearish evidence that fired on this candle.
    pub bearish_tags: Vec<String>,
}

impl Signal {
    /// Signal time as a UTC datetime.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    pub fn is_long(&self) -> bool {
        self.signal_type == SignalType::Long
    }

    pub fn is_short(&self) -> bool {
        self.signal_type == SignalType::Short
    }
}

/// Static description of a strategy and what it can compute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub supported_timeframes: Vec<String>,
    pub indicators: Vec<String>,
}
