//! Indicator pipeline: computes every enabled indicator into one table.

use tracing::debug;

use super::indicators::{
    atr, bollinger_bands, choppiness_index, donchian_channel, ema, heikin_ashi, macd, parabolic_sar,
    pivot_points, rsi, stoch_rsi, supertrend, vwap,
};
use super::kind::IndicatorKind;
use super::table::{columns, IndicatorTable};
use crate::config::StrategyConfig;
use crate::error::Result;
use crate::types::{Candle, CandleColumns};

/// Price columns extracted once per run.
struct Prices {
    open: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
    volume: Vec<f64>,
}

impl Prices {
    fn from_candles(candles: &[Candle]) -> Self {
        Self {
            open: candles.opens(),
            high: candles.highs(),
            low: candles.lows(),
            close: candles.closes(),
            volume: candles.volumes(),
        }
    }
}

/// Compute every enabled indicator for `candles`.
///
/// Indicators run in [`IndicatorKind::ALL`] order, so ATR is always in the
/// table before Supertrend or the Choppiness Index look for it. The result
/// depends only on the inputs.
pub fn compute_indicators(candles: &[Candle], config: &StrategyConfig) -> Result<IndicatorTable> {
    let prices = Prices::from_candles(candles);
    let mut table = IndicatorTable::new(candles.len());

    for kind in IndicatorKind::ALL {
        if !config.is_enabled(kind) {
            continue;
        }
        compute(kind, &prices, config, &mut table)?;
        debug!(indicator = kind.id(), columns = table.column_count(), "computed indicator");
    }

    Ok(table)
}

fn compute(kind: IndicatorKind, p: &Prices, config: &StrategyConfig, table: &mut IndicatorTable) -> Result<()> {
    match kind {
        IndicatorKind::Rsi => {
            table.insert(columns::RSI, rsi(&p.close, config.rsi.period))?;
        }
        IndicatorKind::StochRsi => {
            let s = &config.stoch_rsi;
            let out = stoch_rsi(&p.close, s.rsi_period, s.k_period, s.d_period);
            table.insert(columns::STOCH_RSI_K, out.k)?;
            table.insert(columns::STOCH_RSI_D, out.d)?;
        }
        IndicatorKind::Macd => {
            let m = &config.macd;
            let out = macd(&p.close, m.fast_period, m.slow_period, m.signal_period);
            table.insert(columns::MACD, out.macd)?;
            table.insert(columns::MACD_SIGNAL, out.signal)?;
            table.insert(columns::MACD_HIST, out.histogram)?;
        }
        IndicatorKind::BollingerBands => {
            let b = &config.bollinger_bands;
            let out = bollinger_bands(&p.close, b.period, b.std_dev);
            table.insert(columns::BB_UPPER, out.upper)?;
            table.insert(columns::BB_MIDDLE, out.middle)?;
            table.insert(columns::BB_LOWER, out.lower)?;
        }
        IndicatorKind::Ema => {
            table.insert(columns::EMA_FAST, ema(&p.close, config.ema.fast_period))?;
            table.insert(columns::EMA_SLOW, ema(&p.close, config.ema.slow_period))?;
        }
        IndicatorKind::Atr => {
            table.insert(columns::ATR, atr(&p.high, &p.low, &p.close, config.atr.period))?;
        }
        IndicatorKind::ParabolicSar => {
            let s = &config.parabolic_sar;
            let out = parabolic_sar(&p.high, &p.low, s.step, s.max_step);
            table.insert(columns::PSAR, out.sar)?;
            table.insert(columns::PSAR_DIRECTION, out.direction)?;
        }
        IndicatorKind::Vwap => {
            table.insert(columns::VWAP, vwap(&p.close, &p.volume))?;
        }
        IndicatorKind::Supertrend => {
            let s = &config.supertrend;
            let atr_values = match table.get(columns::ATR) {
                Some(existing) => existing.to_vec(),
                None => {
                    debug!(period = s.period, "supertrend computing its own ATR");
                    let own = atr(&p.high, &p.low, &p.close, s.period);
                    table.insert(columns::ATR, own.clone())?;
                    own
                }
            };
            let out = supertrend(&p.high, &p.low, &p.close, &atr_values, s.multiplier);
            table.insert(columns::BASIC_UPPER, out.basic_upper)?;
            table.insert(columns::BASIC_LOWER, out.basic_lower)?;
            table.insert(columns::SUPERTREND, out.line)?;
            table.insert(columns::SUPERTREND_DIRECTION, out.direction)?;
        }
        IndicatorKind::DonchianChannel => {
            let out = donchian_channel(&p.high, &p.low, config.donchian_channel.period);
            table.insert(columns::DONCHIAN_HIGH, out.high)?;
            table.insert(columns::DONCHIAN_LOW, out.low)?;
            table.insert(columns::DONCHIAN_MID, out.mid)?;
        }
        IndicatorKind::ChoppinessIndex => {
            let out = choppiness_index(
                &p.high,
                &p.low,
                &p.close,
                config.choppiness_index.period,
                table.get(columns::ATR),
            );
            table.insert(columns::TR_SUM, out.tr_sum)?;
            table.insert(columns::HIGHEST_HIGH, out.highest_high)?;
            table.insert(columns::LOWEST_LOW, out.lowest_low)?;
            table.insert(columns::RANGE, out.range)?;
            table.insert(columns::CHOPPINESS, out.choppiness)?;
        }
        IndicatorKind::PivotPoints => {
            let Some(out) = pivot_points(&p.high, &p.low, &p.close, config.pivot_points.pivot_type) else {
                debug!("fewer than two candles, skipping pivot points");
                return Ok(());
            };
            table.insert(columns::PIVOT, out.pivot)?;
            table.insert(columns::R1, out.r1)?;
            table.insert(columns::S1, out.s1)?;
            table.insert(columns::R2, out.r2)?;
            table.insert(columns::S2, out.s2)?;
            if let Some(r3) = out.r3 {
                table.insert(columns::R3, r3)?;
            }
            if let Some(s3) = out.s3 {
                table.insert(columns::S3, s3)?;
            }
        }
        IndicatorKind::HeikinAshi => {
            let out = heikin_ashi(&p.open, &p.high, &p.low, &p.close);
            table.insert(columns::HA_OPEN, out.open)?;
            table.insert(columns::HA_HIGH, out.high)?;
            table.insert(columns::HA_LOW, out.low)?;
            table.insert(columns::HA_CLOSE, out.close)?;
        }
        // Entry filter only.
        IndicatorKind::Volume => {}
    }
    Ok(())
}
