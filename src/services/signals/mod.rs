//! Scalping signal service module.
//!
//! Computes the enabled technical indicators over a candle series and runs
//! the confirmation-voting classifier over them.

pub mod classifier;
pub mod indicators;
pub mod kind;
pub mod pipeline;
pub mod table;

pub use classifier::{generate_signals, WARMUP_OFFSET};
pub use kind::IndicatorKind;
pub use pipeline::compute_indicators;
pub use table::{columns, IndicatorRow, IndicatorTable};

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::StrategyConfig;
use crate::error::{Result, StrategyError};
use crate::types::{Candle, Signal, StrategyInfo};

/// Fewest candles an analysis accepts.
pub const MIN_CANDLES: usize = 50;

const STRATEGY_NAME: &str = "Scalping Strategy";
const STRATEGY_DESCRIPTION: &str = "High-frequency trading strategy focusing on small price movements";
const SUPPORTED_TIMEFRAMES: [&str; 4] = ["1m", "3m", "5m", "15m"];

/// Outcome of a successful analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Signals in candle order.
    pub signals: Vec<Signal>,
    pub indicators: IndicatorTable,
}

impl Analysis {
    pub fn long_signals(&self) -> impl Iterator<Item = &Signal> {
        self.signals.iter().filter(|s| s.is_long())
    }

    pub fn short_signals(&self) -> impl Iterator<Item = &Signal> {
        self.signals.iter().filter(|s| s.is_short())
    }
}

/// Multi-indicator scalping strategy.
///
/// Holds only its configuration; every call to [`analyze`](Self::analyze)
/// is independent.
#[derive(Debug, Clone, Default)]
pub struct ScalpingStrategy {
    config: StrategyConfig,
}

impl ScalpingStrategy {
    pub fn new(config: StrategyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Static description of the strategy.
    pub fn info(&self) -> StrategyInfo {
        StrategyInfo {
            name: STRATEGY_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: STRATEGY_DESCRIPTION.to_string(),
            supported_timeframes: SUPPORTED_TIMEFRAMES.iter().map(|t| t.to_string()).collect(),
            indicators: IndicatorKind::ALL
                .iter()
                .filter(|k| **k != IndicatorKind::Volume)
                .map(|k| k.name().to_string())
                .collect(),
        }
    }

    /// Compute indicators and signals for a chronologically ordered series.
    ///
    /// Fails with [`StrategyError::InsufficientData`] below [`MIN_CANDLES`].
    /// Any panic raised while computing is caught and reported as
    /// [`StrategyError::Analysis`].
    pub fn analyze(&self, candles: &[Candle]) -> Result<Analysis> {
        if candles.len() < MIN_CANDLES {
            warn!(
                candles = candles.len(),
                minimum = MIN_CANDLES,
                "Insufficient data for analysis"
            );
            return Err(StrategyError::InsufficientData {
                needed: MIN_CANDLES,
                available: candles.len(),
            });
        }
        self.config.validate()?;

        let config = &self.config;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> Result<Analysis> {
            let indicators = compute_indicators(candles, config)?;
            let signals = generate_signals(candles, &indicators, config);
            Ok(Analysis { signals, indicators })
        }));

        let result = match outcome {
            Ok(result) => result,
            Err(payload) => Err(StrategyError::Analysis(panic_message(payload.as_ref()))),
        };

        match &result {
            Ok(analysis) => info!(
                candles = candles.len(),
                signals = analysis.signals.len(),
                long = analysis.long_signals().count(),
                short = analysis.short_signals().count(),
                "Analysis complete"
            ),
            Err(e) => error!("Error analyzing candle data: {}", e),
        }
        result
    }

    /// Analyze several independent series in parallel.
    ///
    /// Results come back in input order, each paired with its key.
    pub fn analyze_batch<'a, K>(&self, series: &'a [(K, Vec<Candle>)]) -> Vec<(&'a K, Result<Analysis>)>
    where
        K: Sync,
    {
        series
            .par_iter()
            .map(|(key, candles)| (key, self.analyze(candles)))
            .collect()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic during analysis".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles(count: usize) -> Vec<Candle> {
        (0..count)
            .map(|i| {
                let base = 100.0 + (i as f64 * 0.3).sin() * 2.0;
                Candle::new(i as i64 * 60_000, base, base + 0.5, base - 0.5, base + 0.1, 2_000.0)
            })
            .collect()
    }

    #[test]
    fn test_rejects_short_series() {
        let strategy = ScalpingStrategy::default();
        let err = strategy.analyze(&candles(49)).unwrap_err();
        assert!(matches!(err, StrategyError::InsufficientData { needed: 50, available: 49 }));
        assert!(err.is_input_error());
        assert!(strategy.analyze(&candles(50)).is_ok());
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let mut config = StrategyConfig::default();
        config.rsi.period = 0;
        let err = ScalpingStrategy::new(config).analyze(&candles(60)).unwrap_err();
        assert!(matches!(err, StrategyError::InvalidConfig(_)));
    }

    #[test]
    fn test_panic_message() {
        let payload = std::panic::catch_unwind(|| panic!("boom")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "boom");
    }

    #[test]
    fn test_info_lists_indicators() {
        let info = ScalpingStrategy::default().info();
        assert_eq!(info.name, "Scalping Strategy");
        assert_eq!(info.supported_timeframes, vec!["1m", "3m", "5m", "15m"]);
        assert_eq!(info.indicators.len(), 13);
        assert_eq!(info.indicators[0], "RSI");
    }

    #[test]
    fn test_batch_preserves_order() {
        let strategy = ScalpingStrategy::default();
        let series = vec![
            ("BTC/USDT", candles(60)),
            ("ETH/USDT", candles(10)),
            ("BNB/USDT", candles(70)),
        ];
        let results = strategy.analyze_batch(&series);
        assert_eq!(results.len(), 3);
        assert_eq!(*results[0].0, "BTC/USDT");
        assert!(results[0].1.is_ok());
        assert!(results[1].1.is_err());
        assert_eq!(results[2].1.as_ref().unwrap().indicators.len(), 70);
    }
}
