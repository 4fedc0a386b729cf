//! The closed set of indicators the engine knows about.

use serde::{Deserialize, Serialize};

/// Every indicator the pipeline can compute or the classifier can consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    Rsi,
    StochRsi,
    Macd,
    BollingerBands,
    Ema,
    Atr,
    ParabolicSar,
    Vwap,
    Supertrend,
    DonchianChannel,
    ChoppinessIndex,
    PivotPoints,
    HeikinAshi,
    /// Entry filter on candle volume; produces no column.
    Volume,
}

impl IndicatorKind {
    /// All indicators in pipeline order. ATR precedes Supertrend and the
    /// Choppiness Index because both read the `atr` column when present.
    pub const ALL: [IndicatorKind; 14] = [
        IndicatorKind::Rsi,
        IndicatorKind::StochRsi,
        IndicatorKind::Macd,
        IndicatorKind::BollingerBands,
        IndicatorKind::Ema,
        IndicatorKind::Atr,
        IndicatorKind::ParabolicSar,
        IndicatorKind::Vwap,
        IndicatorKind::Supertrend,
        IndicatorKind::DonchianChannel,
        IndicatorKind::ChoppinessIndex,
        IndicatorKind::PivotPoints,
        IndicatorKind::HeikinAshi,
        IndicatorKind::Volume,
    ];

    /// Indicators that vote in the classifier, in tag order.
    pub const VOTING: [IndicatorKind; 6] = [
        IndicatorKind::Rsi,
        IndicatorKind::StochRsi,
        IndicatorKind::Macd,
        IndicatorKind::BollingerBands,
        IndicatorKind::Ema,
        IndicatorKind::Supertrend,
    ];

    /// Unique identifier for this indicator.
    pub fn id(&self) -> &'static str {
        match self {
            IndicatorKind::Rsi => "rsi",
            IndicatorKind::StochRsi => "stoch_rsi",
            IndicatorKind::Macd => "macd",
            IndicatorKind::BollingerBands => "bollinger_bands",
            IndicatorKind::Ema => "ema",
            IndicatorKind::Atr => "atr",
            IndicatorKind::ParabolicSar => "parabolic_sar",
            IndicatorKind::Vwap => "vwap",
            IndicatorKind::Supertrend => "supertrend",
            IndicatorKind::DonchianChannel => "donchian_channel",
            IndicatorKind::ChoppinessIndex => "choppiness_index",
            IndicatorKind::PivotPoints => "pivot_points",
            IndicatorKind::HeikinAshi => "heikin_ashi",
            IndicatorKind::Volume => "volume",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            IndicatorKind::Rsi => "RSI",
            IndicatorKind::StochRsi => "Stochastic RSI",
            IndicatorKind::Macd => "MACD",
            IndicatorKind::BollingerBands => "Bollinger Bands",
            IndicatorKind::Ema => "EMA",
            IndicatorKind::Atr => "ATR",
            IndicatorKind::ParabolicSar => "Parabolic SAR",
            IndicatorKind::Vwap => "VWAP",
            IndicatorKind::Supertrend => "Supertrend",
            IndicatorKind::DonchianChannel => "Donchian Channel",
            IndicatorKind::ChoppinessIndex => "Choppiness Index",
            IndicatorKind::PivotPoints => "Pivot Points",
            IndicatorKind::HeikinAshi => "Heikin-Ashi",
            IndicatorKind::Volume => "Volume",
        }
    }

    /// Whether this indicator contributes bullish/bearish tags.
    pub fn votes(&self) -> bool {
        Self::VOTING.contains(self)
    }
}

impl std::fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
