//! Scalper - multi-indicator crypto scalping signal engine

pub mod config;
pub mod error;
pub mod services;
pub mod types;

pub use config::StrategyConfig;
pub use error::{Result, StrategyError};
pub use services::signals::{
    columns, compute_indicators, generate_signals, Analysis, IndicatorKind, IndicatorRow,
    IndicatorTable, ScalpingStrategy, MIN_CANDLES,
};
pub use types::{Candle, CandleColumns, CandleSeries, Signal, SignalType, StrategyInfo};
