//! Confirmation-voting signal classifier.
//!
//! Each voting indicator looks at the current and previous candle and may
//! add a bullish or bearish tag. A candle becomes a signal once enough tags
//! agree and none disagree.

use tracing::{debug, trace};

use super::kind::IndicatorKind;
use super::table::{columns, IndicatorTable};
use crate::config::{MacdSettings, RsiSettings, StrategyConfig};
use crate::types::{Candle, Signal, SignalType};

/// First candle index the classifier evaluates.
pub const WARMUP_OFFSET: usize = 50;

pub const STOCH_RSI_OVERSOLD: f64 = 20.0;
pub const STOCH_RSI_OVERBOUGHT: f64 = 80.0;

/// Which side a tag argues for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    Bullish,
    Bearish,
}

/// Tags collected for one candle, in the order they fired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evidence {
    pub bullish: Vec<&'static str>,
    pub bearish: Vec<&'static str>,
}

impl Evidence {
    pub fn push(&mut self, bias: Bias, tag: &'static str) {
        match bias {
            Bias::Bullish => self.bullish.push(tag),
            Bias::Bearish => self.bearish.push(tag),
        }
    }

    /// Direction the evidence supports, if any.
    ///
    /// Needs `min_confirming` tags on one side and none on the other.
    pub fn decide(&self, min_confirming: usize) -> Option<SignalType> {
        if self.bullish.len() >= min_confirming && self.bearish.is_empty() {
            Some(SignalType::Long)
        } else if self.bearish.len() >= min_confirming && self.bullish.is_empty() {
            Some(SignalType::Short)
        } else {
            None
        }
    }
}

/// Indicator values at candle `index` and the one before it.
#[derive(Debug, Clone, Copy)]
pub struct CandleView<'a> {
    table: &'a IndicatorTable,
    index: usize,
    pub close: f64,
}

impl<'a> CandleView<'a> {
    /// `index` must be at least 1.
    pub fn new(table: &'a IndicatorTable, index: usize, close: f64) -> Self {
        Self { table, index, close }
    }

    pub fn current(&self, column: &str) -> f64 {
        self.table.value(column, self.index)
    }

    pub fn previous(&self, column: &str) -> f64 {
        self.table.value(column, self.index - 1)
    }

    /// `(previous, current)` pair for a column.
    fn pair(&self, column: &str) -> (f64, f64) {
        (self.previous(column), self.current(column))
    }
}

/// Direction of a crossover of `a` over `b` between two candles.
///
/// Bullish when `a` ends above `b` after being at or below it; bearish for
/// the mirror. NaN on either side never crosses.
fn crossover(a: (f64, f64), b: (f64, f64)) -> Option<Bias> {
    let (prev_a, cur_a) = a;
    let (prev_b, cur_b) = b;
    if cur_a > cur_b && prev_a <= prev_b {
        Some(Bias::Bullish)
    } else if cur_a < cur_b && prev_a >= prev_b {
        Some(Bias::Bearish)
    } else {
        None
    }
}

/// RSI below the oversold level votes bullish, above overbought bearish.
pub fn rsi_rule(view: &CandleView<'_>, settings: &RsiSettings, evidence: &mut Evidence) {
    let value = view.current(columns::RSI);
    if value < settings.oversold {
        evidence.push(Bias::Bullish, "RSI oversold");
    } else if value > settings.overbought {
        evidence.push(Bias::Bearish, "RSI overbought");
    }
}

/// %K crossing %D while both sit in an extreme zone.
pub fn stoch_rsi_rule(view: &CandleView<'_>, evidence: &mut Evidence) {
    let k = view.pair(columns::STOCH_RSI_K);
    let d = view.pair(columns::STOCH_RSI_D);
    if k.1.is_nan() || d.1.is_nan() {
        return;
    }

    match crossover(k, d) {
        Some(Bias::Bullish) if k.1 < STOCH_RSI_OVERSOLD && d.1 < STOCH_RSI_OVERSOLD => {
            evidence.push(Bias::Bullish, "StochRSI bullish crossover in oversold");
        }
        Some(Bias::Bearish) if k.1 > STOCH_RSI_OVERBOUGHT && d.1 > STOCH_RSI_OVERBOUGHT => {
            evidence.push(Bias::Bearish, "StochRSI bearish crossover in overbought");
        }
        _ => {}
    }
}

/// MACD crossing its signal line, plus the histogram changing sign when
/// enabled.
pub fn macd_rule(view: &CandleView<'_>, settings: &MacdSettings, evidence: &mut Evidence) {
    let line = view.pair(columns::MACD);
    let signal = view.pair(columns::MACD_SIGNAL);
    if line.1.is_nan() || signal.1.is_nan() {
        return;
    }

    match crossover(line, signal) {
        Some(Bias::Bullish) => evidence.push(Bias::Bullish, "MACD bullish crossover"),
        Some(Bias::Bearish) => evidence.push(Bias::Bearish, "MACD bearish crossover"),
        None => {}
    }

    if settings.use_histogram {
        let (prev, cur) = view.pair(columns::MACD_HIST);
        if cur > 0.0 && prev <= 0.0 {
            evidence.push(Bias::Bullish, "MACD histogram turned positive");
        } else if cur < 0.0 && prev >= 0.0 {
            evidence.push(Bias::Bearish, "MACD histogram turned negative");
        }
    }
}

/// Close outside the bands.
pub fn bollinger_rule(view: &CandleView<'_>, evidence: &mut Evidence) {
    let upper = view.current(columns::BB_UPPER);
    let lower = view.current(columns::BB_LOWER);
    if upper.is_nan() || lower.is_nan() {
        return;
    }

    if view.close < lower {
        evidence.push(Bias::Bullish, "Price below lower Bollinger Band");
    } else if view.close > upper {
        evidence.push(Bias::Bearish, "Price above upper Bollinger Band");
    }
}

/// Fast EMA crossing the slow EMA.
pub fn ema_rule(view: &CandleView<'_>, evidence: &mut Evidence) {
    match crossover(view.pair(columns::EMA_FAST), view.pair(columns::EMA_SLOW)) {
        Some(Bias::Bullish) => evidence.push(Bias::Bullish, "Fast EMA crossed above slow EMA"),
        Some(Bias::Bearish) => evidence.push(Bias::Bearish, "Fast EMA crossed below slow EMA"),
        None => {}
    }
}

/// Supertrend direction flipping.
pub fn supertrend_rule(view: &CandleView<'_>, evidence: &mut Evidence) {
    match view.pair(columns::SUPERTREND_DIRECTION) {
        (prev, cur) if cur == 1.0 && prev == -1.0 => {
            evidence.push(Bias::Bullish, "Supertrend changed to uptrend");
        }
        (prev, cur) if cur == -1.0 && prev == 1.0 => {
            evidence.push(Bias::Bearish, "Supertrend changed to downtrend");
        }
        _ => {}
    }
}

/// Run the rule for one voting indicator.
pub fn vote(kind: IndicatorKind, view: &CandleView<'_>, config: &StrategyConfig, evidence: &mut Evidence) {
    match kind {
        IndicatorKind::Rsi => rsi_rule(view, &config.rsi, evidence),
        IndicatorKind::StochRsi => stoch_rsi_rule(view, evidence),
        IndicatorKind::Macd => macd_rule(view, &config.macd, evidence),
        IndicatorKind::BollingerBands => bollinger_rule(view, evidence),
        IndicatorKind::Ema => ema_rule(view, evidence),
        IndicatorKind::Supertrend => supertrend_rule(view, evidence),
        _ => {}
    }
}

/// Gather every enabled indicator's vote for candle `index`.
pub fn collect_evidence(view: &CandleView<'_>, config: &StrategyConfig) -> Evidence {
    let mut evidence = Evidence::default();
    for kind in IndicatorKind::VOTING {
        if config.is_enabled(kind) {
            vote(kind, view, config, &mut evidence);
        }
    }
    evidence
}

/// Classify a single candle.
///
/// Returns `None` below the warm-up offset, when the volume gate rejects the
/// candle, or when the evidence is mixed or too thin.
pub fn check_candle(
    candles: &[Candle],
    table: &IndicatorTable,
    config: &StrategyConfig,
    index: usize,
) -> Option<Signal> {
    if index < WARMUP_OFFSET {
        return None;
    }
    let candle = candles.get(index)?;

    if config.volume.enabled && candle.volume < config.minimum_volume {
        trace!(index, volume = candle.volume, "below minimum volume");
        return None;
    }

    let view = CandleView::new(table, index, candle.close);
    let evidence = collect_evidence(&view, config);
    let signal_type = evidence.decide(config.min_confirming_signals)?;
    let (take_profit, stop_loss) =
        signal_type.exit_levels(candle.close, config.profit_target, config.stop_loss);
    debug!(
        index,
        signal = %signal_type,
        bullish = evidence.bullish.len(),
        bearish = evidence.bearish.len(),
        "signal"
    );

    Some(Signal {
        index,
        timestamp: candle.timestamp,
        signal_type,
        entry_price: candle.close,
        take_profit,
        stop_loss,
        bullish_tags: evidence.bullish.iter().map(|t| t.to_string()).collect(),
        bearish_tags: evidence.bearish.iter().map(|t| t.to_string()).collect(),
    })
}

/// Scan every candle from the warm-up offset onward, in index order.
pub fn generate_signals(candles: &[Candle], table: &IndicatorTable, config: &StrategyConfig) -> Vec<Signal> {
    (WARMUP_OFFSET..candles.len())
        .filter_map(|i| check_candle(candles, table, config, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_candles(count: usize) -> Vec<Candle> {
        (0..count)
            .map(|i| Candle::new(i as i64 * 60_000, 100.0, 100.0, 100.0, 100.0, 1_000.0))
            .collect()
    }

    fn table_with(len: usize, cols: &[(&'static str, f64, f64)]) -> IndicatorTable {
        // Each column holds `prev` everywhere except the last index, which holds `cur`.
        let mut table = IndicatorTable::new(len);
        for (name, prev, cur) in cols {
            let mut values = vec![*prev; len];
            values[len - 1] = *cur;
            table.insert(*name, values).unwrap();
        }
        table
    }

    fn view(table: &IndicatorTable, close: f64) -> CandleView<'_> {
        CandleView::new(table, table.len() - 1, close)
    }

    #[test]
    fn test_crossover() {
        assert_eq!(crossover((1.0, 3.0), (2.0, 2.0)), Some(Bias::Bullish));
        assert_eq!(crossover((2.0, 3.0), (2.0, 2.0)), Some(Bias::Bullish));
        assert_eq!(crossover((3.0, 1.0), (2.0, 2.0)), Some(Bias::Bearish));
        assert_eq!(crossover((3.0, 3.5), (2.0, 2.0)), None);
        assert_eq!(crossover((f64::NAN, 3.0), (2.0, 2.0)), None);
    }

    #[test]
    fn test_rsi_rule() {
        let settings = RsiSettings::default();
        for (value, expected) in [
            (25.0, Some("RSI oversold")),
            (75.0, Some("RSI overbought")),
            (50.0, None),
            (30.0, None),
            (f64::NAN, None),
        ] {
            let table = table_with(2, &[(columns::RSI, 50.0, value)]);
            let mut ev = Evidence::default();
            rsi_rule(&view(&table, 100.0), &settings, &mut ev);
            let fired: Vec<_> = ev.bullish.iter().chain(&ev.bearish).copied().collect();
            assert_eq!(fired.first().copied(), expected, "rsi {}", value);
        }
    }

    #[test]
    fn test_stoch_rsi_rule_requires_zone() {
        let table = table_with(2, &[(columns::STOCH_RSI_K, 5.0, 15.0), (columns::STOCH_RSI_D, 10.0, 12.0)]);
        let mut ev = Evidence::default();
        stoch_rsi_rule(&view(&table, 100.0), &mut ev);
        assert_eq!(ev.bullish, vec!["StochRSI bullish crossover in oversold"]);

        // Same crossover outside the oversold zone.
        let table = table_with(2, &[(columns::STOCH_RSI_K, 45.0, 55.0), (columns::STOCH_RSI_D, 50.0, 52.0)]);
        let mut ev = Evidence::default();
        stoch_rsi_rule(&view(&table, 100.0), &mut ev);
        assert!(ev.bullish.is_empty());

        let table = table_with(2, &[(columns::STOCH_RSI_K, 95.0, 84.0), (columns::STOCH_RSI_D, 90.0, 88.0)]);
        let mut ev = Evidence::default();
        stoch_rsi_rule(&view(&table, 100.0), &mut ev);
        assert_eq!(ev.bearish, vec!["StochRSI bearish crossover in overbought"]);
    }

    #[test]
    fn test_macd_rule_with_histogram() {
        let table = table_with(
            2,
            &[
                (columns::MACD, -0.5, 0.4),
                (columns::MACD_SIGNAL, 0.0, 0.1),
                (columns::MACD_HIST, -0.5, 0.3),
            ],
        );
        let mut settings = MacdSettings::default();
        let mut ev = Evidence::default();
        macd_rule(&view(&table, 100.0), &settings, &mut ev);
        assert_eq!(ev.bullish, vec!["MACD bullish crossover"]);

        settings.use_histogram = true;
        let mut ev = Evidence::default();
        macd_rule(&view(&table, 100.0), &settings, &mut ev);
        assert_eq!(ev.bullish, vec!["MACD bullish crossover", "MACD histogram turned positive"]);
    }

    #[test]
    fn test_bollinger_rule() {
        let table = table_with(2, &[(columns::BB_UPPER, 110.0, 110.0), (columns::BB_LOWER, 90.0, 90.0)]);

        let mut ev = Evidence::default();
        bollinger_rule(&view(&table, 89.0), &mut ev);
        assert_eq!(ev.bullish, vec!["Price below lower Bollinger Band"]);

        let mut ev = Evidence::default();
        bollinger_rule(&view(&table, 111.0), &mut ev);
        assert_eq!(ev.bearish, vec!["Price above upper Bollinger Band"]);

        let mut ev = Evidence::default();
        bollinger_rule(&view(&table, 100.0), &mut ev);
        assert_eq!(ev, Evidence::default());
    }

    #[test]
    fn test_ema_and_supertrend_rules() {
        let table = table_with(
            2,
            &[
                (columns::EMA_FAST, 99.0, 101.0),
                (columns::EMA_SLOW, 100.0, 100.0),
                (columns::SUPERTREND_DIRECTION, 1.0, -1.0),
            ],
        );
        let mut ev = Evidence::default();
        ema_rule(&view(&table, 100.0), &mut ev);
        supertrend_rule(&view(&table, 100.0), &mut ev);
        assert_eq!(ev.bullish, vec!["Fast EMA crossed above slow EMA"]);
        assert_eq!(ev.bearish, vec!["Supertrend changed to downtrend"]);
        assert_eq!(ev.decide(2), None);
    }

    #[test]
    fn test_decide() {
        let mut ev = Evidence::default();
        ev.push(Bias::Bullish, "a");
        assert_eq!(ev.decide(2), None);
        ev.push(Bias::Bullish, "b");
        assert_eq!(ev.decide(2), Some(SignalType::Long));
        ev.push(Bias::Bearish, "c");
        assert_eq!(ev.decide(2), None);
    }

    #[test]
    fn test_disabled_indicator_does_not_vote() {
        let len = 60;
        let table = table_with(len, &[(columns::RSI, 50.0, 20.0), (columns::EMA_FAST, 99.0, 101.0), (columns::EMA_SLOW, 100.0, 100.0)]);
        let candles = flat_candles(len);

        let config = StrategyConfig::all_disabled()
            .with(IndicatorKind::Rsi, true)
            .with(IndicatorKind::Ema, true);
        let signal = check_candle(&candles, &table, &config, len - 1).unwrap();
        assert_eq!(signal.signal_type, SignalType::Long);
        assert_eq!(signal.bullish_tags, vec!["RSI oversold", "Fast EMA crossed above slow EMA"]);
        assert!((signal.take_profit - 100.5).abs() < 1e-9);
        assert!((signal.stop_loss - 99.7).abs() < 1e-9);

        let config = config.with(IndicatorKind::Ema, false);
        assert!(check_candle(&candles, &table, &config, len - 1).is_none());
    }

    #[test]
    fn test_volume_gate() {
        let len = 60;
        let table = table_with(len, &[(columns::RSI, 50.0, 20.0), (columns::EMA_FAST, 99.0, 101.0), (columns::EMA_SLOW, 100.0, 100.0)]);
        let candles = flat_candles(len);
        let mut config = StrategyConfig::all_disabled()
            .with(IndicatorKind::Rsi, true)
            .with(IndicatorKind::Ema, true)
            .with(IndicatorKind::Volume, true);

        config.minimum_volume = 5_000.0;
        assert!(check_candle(&candles, &table, &config, len - 1).is_none());
        config.minimum_volume = 1_000.0;
        assert!(check_candle(&candles, &table, &config, len - 1).is_some());
    }

    #[test]
    fn test_warmup_region_is_skipped() {
        let len = 40;
        let table = table_with(len, &[(columns::RSI, 50.0, 20.0), (columns::EMA_FAST, 99.0, 101.0), (columns::EMA_SLOW, 100.0, 100.0)]);
        let candles = flat_candles(len);
        let config = StrategyConfig::default();
        assert!(generate_signals(&candles, &table, &config).is_empty());
    }
}
