use std::env;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{Result, StrategyError};
use crate::services::signals::indicators::PivotType;
use crate::services::signals::IndicatorKind;

/// Number of independent tags that must agree before a signal fires.
pub const MIN_CONFIRMING_SIGNALS: usize = 2;

/// Prefix for every environment variable read by [`StrategyConfig::from_env`].
pub const ENV_PREFIX: &str = "SCALPER_";

/// RSI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiSettings {
    pub enabled: bool,
    pub period: usize,
    /// Level above which the market reads as overbought.
    pub overbought: f64,
    /// Level below which the market reads as oversold.
    pub oversold: f64,
}

impl Default for RsiSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            period: 14,
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

/// Stochastic RSI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StochRsiSettings {
    pub enabled: bool,
    pub rsi_period: usize,
    pub k_period: usize,
    pub d_period: usize,
}

impl Default for StochRsiSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            rsi_period: 14,
            k_period: 3,
            d_period: 3,
        }
    }
}

/// MACD settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdSettings {
    pub enabled: bool,
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
    /// Also vote on histogram sign flips.
    pub use_histogram: bool,
}

impl Default for MacdSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
            use_histogram: false,
        }
    }
}

/// Bollinger Bands settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerSettings {
    pub enabled: bool,
    pub period: usize,
    pub std_dev: f64,
}

impl Default for BollingerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            period: 20,
            std_dev: 2.0,
        }
    }
}

/// Fast/slow EMA pair settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmaSettings {
    pub enabled: bool,
    pub fast_period: usize,
    pub slow_period: usize,
}

impl Default for EmaSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            fast_period: 9,
            slow_period: 21,
        }
    }
}

/// VWAP settings.
///
/// `period` is accepted for compatibility but VWAP is cumulative from the
/// first candle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VwapSettings {
    pub enabled: bool,
    pub period: usize,
}

impl Default for VwapSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            period: 14,
        }
    }
}

/// Supertrend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupertrendSettings {
    pub enabled: bool,
    /// ATR period used when ATR is not computed on its own.
    pub period: usize,
    pub multiplier: f64,
}

impl Default for SupertrendSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            period: 10,
            multiplier: 3.0,
        }
    }
}

/// ATR settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtrSettings {
    pub enabled: bool,
    pub period: usize,
}

impl Default for AtrSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            period: 10,
        }
    }
}

/// Choppiness Index settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoppinessSettings {
    pub enabled: bool,
    pub period: usize,
}

impl Default for ChoppinessSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            period: 14,
        }
    }
}

/// Donchian Channel settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DonchianSettings {
    pub enabled: bool,
    pub period: usize,
}

impl Default for DonchianSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            period: 20,
        }
    }
}

/// Parabolic SAR settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParabolicSarSettings {
    pub enabled: bool,
    /// Acceleration factor start and increment.
    pub step: f64,
    /// Acceleration factor ceiling.
    pub max_step: f64,
}

impl Default for ParabolicSarSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            step: 0.02,
            max_step: 0.2,
        }
    }
}

/// Pivot point settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PivotSettings {
    pub enabled: bool,
    pub pivot_type: PivotType,
}

impl Default for PivotSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            pivot_type: PivotType::Standard,
        }
    }
}

/// Settings for switches without parameters (Heikin-Ashi, volume gate).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toggle {
    pub enabled: bool,
}

/// Strategy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub rsi: RsiSettings,
    pub stoch_rsi: StochRsiSettings,
    pub macd: MacdSettings,
    pub bollinger_bands: BollingerSettings,
    pub ema: EmaSettings,
    pub vwap: VwapSettings,
    pub supertrend: SupertrendSettings,
    pub atr: AtrSettings,
    pub choppiness_index: ChoppinessSettings,
    pub parabolic_sar: ParabolicSarSettings,
    pub donchian_channel: DonchianSettings,
    pub pivot_points: PivotSettings,
    pub heikin_ashi: Toggle,
    /// Skip candles whose volume is below `minimum_volume`.
    pub volume: Toggle,
    /// Take-profit distance, percent of entry.
    pub profit_target: f64,
    /// Stop-loss distance, percent of entry.
    pub stop_loss: f64,
    pub minimum_volume: f64,
    pub min_confirming_signals: usize,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            rsi: RsiSettings::default(),
            stoch_rsi: StochRsiSettings::default(),
            macd: MacdSettings::default(),
            bollinger_bands: BollingerSettings::default(),
            ema: EmaSettings::default(),
            vwap: VwapSettings::default(),
            supertrend: SupertrendSettings::default(),
            atr: AtrSettings::default(),
            choppiness_index: ChoppinessSettings::default(),
            parabolic_sar: ParabolicSarSettings::default(),
            donchian_channel: DonchianSettings::default(),
            pivot_points: PivotSettings::default(),
            heikin_ashi: Toggle::default(),
            volume: Toggle { enabled: true },
            profit_target: 0.5,
            stop_loss: 0.3,
            minimum_volume: 1000.0,
            min_confirming_signals: MIN_CONFIRMING_SIGNALS,
        }
    }
}

impl StrategyConfig {
    /// A configuration with every indicator and the volume gate switched off.
    pub fn all_disabled() -> Self {
        let mut config = Self::default();
        for kind in IndicatorKind::ALL {
            config.set_enabled(kind, false);
        }
        config
    }

    /// Whether the given indicator is active.
    pub fn is_enabled(&self, kind: IndicatorKind) -> bool {
        match kind {
            IndicatorKind::Rsi => self.rsi.enabled,
            IndicatorKind::StochRsi => self.stoch_rsi.enabled,
            IndicatorKind::Macd => self.macd.enabled,
            IndicatorKind::BollingerBands => self.bollinger_bands.enabled,
            IndicatorKind::Ema => self.ema.enabled,
            IndicatorKind::Atr => self.atr.enabled,
            IndicatorKind::ParabolicSar => self.parabolic_sar.enabled,
            IndicatorKind::Vwap => self.vwap.enabled,
            IndicatorKind::Supertrend => self.supertrend.enabled,
            IndicatorKind::DonchianChannel => self.donchian_channel.enabled,
            IndicatorKind::ChoppinessIndex => self.choppiness_index.enabled,
            IndicatorKind::PivotPoints => self.pivot_points.enabled,
            IndicatorKind::HeikinAshi => self.heikin_ashi.enabled,
            IndicatorKind::Volume => self.volume.enabled,
        }
    }

    /// Switch a single indicator on or off.
    pub fn set_enabled(&mut self, kind: IndicatorKind, enabled: bool) {
        let flag = match kind {
            IndicatorKind::Rsi => &mut self.rsi.enabled,
            IndicatorKind::StochRsi => &mut self.stoch_rsi.enabled,
            IndicatorKind::Macd => &mut self.macd.enabled,
            IndicatorKind::BollingerBands => &mut self.bollinger_bands.enabled,
            IndicatorKind::Ema => &mut self.ema.enabled,
            IndicatorKind::Atr => &mut self.atr.enabled,
            IndicatorKind::ParabolicSar => &mut self.parabolic_sar.enabled,
            IndicatorKind::Vwap => &mut self.vwap.enabled,
            IndicatorKind::Supertrend => &mut self.supertrend.enabled,
            IndicatorKind::DonchianChannel => &mut self.donchian_channel.enabled,
            IndicatorKind::ChoppinessIndex => &mut self.choppiness_index.enabled,
            IndicatorKind::PivotPoints => &mut self.pivot_points.enabled,
            IndicatorKind::HeikinAshi => &mut self.heikin_ashi.enabled,
            IndicatorKind::Volume => &mut self.volume.enabled,
        };
        *flag = enabled;
    }

    /// Builder-style variant of [`set_enabled`](Self::set_enabled).
    pub fn with(mut self, kind: IndicatorKind, enabled: bool) -> Self {
        self.set_enabled(kind, enabled);
        self
    }

    /// Indicators that are switched on, in pipeline order.
    pub fn enabled_indicators(&self) -> Vec<IndicatorKind> {
        IndicatorKind::ALL
            .into_iter()
            .filter(|kind| self.is_enabled(*kind))
            .collect()
    }

    /// Reject parameter sets that would make a windowed computation meaningless.
    pub fn validate(&self) -> Result<()> {
        let mut periods: Vec<(&str, usize)> = Vec::new();
        if self.rsi.enabled {
            periods.push(("rsi.period", self.rsi.period));
        }
        if self.stoch_rsi.enabled {
            periods.push(("stoch_rsi.rsi_period", self.stoch_rsi.rsi_period));
            periods.push(("stoch_rsi.k_period", self.stoch_rsi.k_period));
            periods.push(("stoch_rsi.d_period", self.stoch_rsi.d_period));
        }
        if self.macd.enabled {
            periods.push(("macd.fast_period", self.macd.fast_period));
            periods.push(("macd.slow_period", self.macd.slow_period));
            periods.push(("macd.signal_period", self.macd.signal_period));
        }
        if self.bollinger_bands.enabled {
            periods.push(("bollinger_bands.period", self.bollinger_bands.period));
        }
        if self.ema.enabled {
            periods.push(("ema.fast_period", self.ema.fast_period));
            periods.push(("ema.slow_period", self.ema.slow_period));
        }
        if self.atr.enabled {
            periods.push(("atr.period", self.atr.period));
        }
        if self.supertrend.enabled {
            periods.push(("supertrend.period", self.supertrend.period));
        }
        if self.donchian_channel.enabled {
            periods.push(("donchian_channel.period", self.donchian_channel.period));
        }
        if self.choppiness_index.enabled {
            periods.push(("choppiness_index.period", self.choppiness_index.period));
        }

        if let Some((name, _)) = periods.iter().find(|(_, period)| *period == 0) {
            return Err(StrategyError::InvalidConfig(format!(
                "{} must be at least 1",
                name
            )));
        }
        if self.min_confirming_signals == 0 {
            return Err(StrategyError::InvalidConfig(
                "min_confirming_signals must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Build a configuration from the flat camelCase parameter map used by
    /// front-end clients (`useRSI`, `rsiPeriod`, `bbDeviation`, ...).
    ///
    /// Numbers may be sent as JSON numbers or numeric strings. Missing keys
    /// keep their defaults.
    pub fn from_params(params: &Value) -> Result<Self> {
        let map = params.as_object().ok_or_else(|| {
            StrategyError::InvalidConfig("parameters must be a JSON object".to_string())
        })?;
        let d = Self::default();

        Ok(Self {
            rsi: RsiSettings {
                enabled: param_bool(map, "useRSI", d.rsi.enabled)?,
                period: param_usize(map, "rsiPeriod", d.rsi.period)?,
                overbought: param_f64(map, "rsiOverbought", d.rsi.overbought)?,
                oversold: param_f64(map, "rsiOversold", d.rsi.oversold)?,
            },
            stoch_rsi: StochRsiSettings {
                enabled: param_bool(map, "useStochRSI", d.stoch_rsi.enabled)?,
                rsi_period: param_usize(map, "stochRSIPeriod", d.stoch_rsi.rsi_period)?,
                k_period: param_usize(map, "stochRSIKPeriod", d.stoch_rsi.k_period)?,
                d_period: param_usize(map, "stochRSIDPeriod", d.stoch_rsi.d_period)?,
            },
            macd: MacdSettings {
                enabled: param_bool(map, "useMACD", d.macd.enabled)?,
                fast_period: param_usize(map, "macdFastPeriod", d.macd.fast_period)?,
                slow_period: param_usize(map, "macdSlowPeriod", d.macd.slow_period)?,
                signal_period: param_usize(map, "macdSignalPeriod", d.macd.signal_period)?,
                use_histogram: param_bool(map, "useMACDHistogram", d.macd.use_histogram)?,
            },
            bollinger_bands: BollingerSettings {
                enabled: param_bool(map, "useBollingerBands", d.bollinger_bands.enabled)?,
                period: param_usize(map, "bbPeriod", d.bollinger_bands.period)?,
                std_dev: param_f64(map, "bbDeviation", d.bollinger_bands.std_dev)?,
            },
            ema: EmaSettings {
                enabled: param_bool(map, "useEMA", d.ema.enabled)?,
                fast_period: param_usize(map, "fastEMA", d.ema.fast_period)?,
                slow_period: param_usize(map, "slowEMA", d.ema.slow_period)?,
            },
            vwap: VwapSettings {
                enabled: param_bool(map, "useVWAP", d.vwap.enabled)?,
                period: param_usize(map, "vwapPeriod", d.vwap.period)?,
            },
            supertrend: SupertrendSettings {
                enabled: param_bool(map, "useSupertrend", d.supertrend.enabled)?,
                period: param_usize(map, "supertrendPeriod", d.supertrend.period)?,
                multiplier: param_f64(map, "supertrendMultiplier", d.supertrend.multiplier)?,
            },
            atr: AtrSettings {
                enabled: param_bool(map, "useATR", d.atr.enabled)?,
                period: param_usize(map, "atrPeriod", d.atr.period)?,
            },
            choppiness_index: ChoppinessSettings {
                enabled: param_bool(map, "useChoppinessIndex", d.choppiness_index.enabled)?,
                period: param_usize(map, "choppinessPeriod", d.choppiness_index.period)?,
            },
            parabolic_sar: ParabolicSarSettings {
                enabled: param_bool(map, "useParabolicSAR", d.parabolic_sar.enabled)?,
                step: param_f64(map, "sarStep", d.parabolic_sar.step)?,
                max_step: param_f64(map, "sarMaxStep", d.parabolic_sar.max_step)?,
            },
            donchian_channel: DonchianSettings {
                enabled: param_bool(map, "useDonchianChannel", d.donchian_channel.enabled)?,
                period: param_usize(map, "donchianPeriod", d.donchian_channel.period)?,
            },
            pivot_points: PivotSettings {
                enabled: param_bool(map, "usePivotPoints", d.pivot_points.enabled)?,
                pivot_type: match map.get("pivotPointsType") {
                    Some(Value::String(s)) => s.parse()?,
                    Some(Value::Null) | None => d.pivot_points.pivot_type,
                    Some(other) => {
                        return Err(StrategyError::InvalidConfig(format!(
                            "pivotPointsType: expected a string, got {}",
                            other
                        )))
                    }
                },
            },
            heikin_ashi: Toggle {
                enabled: param_bool(map, "useHeikinAshi", d.heikin_ashi.enabled)?,
            },
            volume: Toggle {
                enabled: param_bool(map, "useVolume", d.volume.enabled)?,
            },
            profit_target: param_f64(map, "profitTarget", d.profit_target)?,
            stop_loss: param_f64(map, "stopLoss", d.stop_loss)?,
            minimum_volume: param_f64(map, "minimumVolume", d.minimum_volume)?,
            min_confirming_signals: d.min_confirming_signals,
        })
    }

    /// Load configuration from `SCALPER_*` environment variables.
    ///
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let d = Self::default();

        let pivot_type = env_var("PIVOT_POINTS_TYPE")
            .and_then(|v| match v.parse::<PivotType>() {
                Ok(t) => Some(t),
                Err(e) => {
                    warn!("ignoring {}PIVOT_POINTS_TYPE: {}", ENV_PREFIX, e);
                    None
                }
            })
            .unwrap_or(d.pivot_points.pivot_type);

        Self {
            rsi: RsiSettings {
                enabled: env_flag("USE_RSI", d.rsi.enabled),
                period: env_parse("RSI_PERIOD", d.rsi.period),
                overbought: env_parse("RSI_OVERBOUGHT", d.rsi.overbought),
                oversold: env_parse("RSI_OVERSOLD", d.rsi.oversold),
            },
            stoch_rsi: StochRsiSettings {
                enabled: env_flag("USE_STOCH_RSI", d.stoch_rsi.enabled),
                rsi_period: env_parse("STOCH_RSI_PERIOD", d.stoch_rsi.rsi_period),
                k_period: env_parse("STOCH_RSI_K_PERIOD", d.stoch_rsi.k_period),
                d_period: env_parse("STOCH_RSI_D_PERIOD", d.stoch_rsi.d_period),
            },
            macd: MacdSettings {
                enabled: env_flag("USE_MACD", d.macd.enabled),
                fast_period: env_parse("MACD_FAST_PERIOD", d.macd.fast_period),
                slow_period: env_parse("MACD_SLOW_PERIOD", d.macd.slow_period),
                signal_period: env_parse("MACD_SIGNAL_PERIOD", d.macd.signal_period),
                use_histogram: env_flag("USE_MACD_HISTOGRAM", d.macd.use_histogram),
            },
            bollinger_bands: BollingerSettings {
                enabled: env_flag("USE_BOLLINGER_BANDS", d.bollinger_bands.enabled),
                period: env_parse("BB_PERIOD", d.bollinger_bands.period),
                std_dev: env_parse("BB_DEVIATION", d.bollinger_bands.std_dev),
            },
            ema: EmaSettings {
                enabled: env_flag("USE_EMA", d.ema.enabled),
                fast_period: env_parse("FAST_EMA", d.ema.fast_period),
                slow_period: env_parse("SLOW_EMA", d.ema.slow_period),
            },
            vwap: VwapSettings {
                enabled: env_flag("USE_VWAP", d.vwap.enabled),
                period: env_parse("VWAP_PERIOD", d.vwap.period),
            },
            supertrend: SupertrendSettings {
                enabled: env_flag("USE_SUPERTREND", d.supertrend.enabled),
                period: env_parse("SUPERTREND_PERIOD", d.supertrend.period),
                multiplier: env_parse("SUPERTREND_MULTIPLIER", d.supertrend.multiplier),
            },
            atr: AtrSettings {
                enabled: env_flag("USE_ATR", d.atr.enabled),
                period: env_parse("ATR_PERIOD", d.atr.period),
            },
            choppiness_index: ChoppinessSettings {
                enabled: env_flag("USE_CHOPPINESS_INDEX", d.choppiness_index.enabled),
                period: env_parse("CHOPPINESS_PERIOD", d.choppiness_index.period),
            },
            parabolic_sar: ParabolicSarSettings {
                enabled: env_flag("USE_PARABOLIC_SAR", d.parabolic_sar.enabled),
                step: env_parse("SAR_STEP", d.parabolic_sar.step),
                max_step: env_parse("SAR_MAX_STEP", d.parabolic_sar.max_step),
            },
            donchian_channel: DonchianSettings {
                enabled: env_flag("USE_DONCHIAN_CHANNEL", d.donchian_channel.enabled),
                period: env_parse("DONCHIAN_PERIOD", d.donchian_channel.period),
            },
            pivot_points: PivotSettings {
                enabled: env_flag("USE_PIVOT_POINTS", d.pivot_points.enabled),
                pivot_type,
            },
            heikin_ashi: Toggle {
                enabled: env_flag("USE_HEIKIN_ASHI", d.heikin_ashi.enabled),
            },
            volume: Toggle {
                enabled: env_flag("USE_VOLUME", d.volume.enabled),
            },
            profit_target: env_parse("PROFIT_TARGET", d.profit_target),
            stop_loss: env_parse("STOP_LOSS", d.stop_loss),
            minimum_volume: env_parse("MINIMUM_VOLUME", d.minimum_volume),
            min_confirming_signals: d.min_confirming_signals,
        }
    }

    /// Load a dotenv file, then read the environment as [`from_env`](Self::from_env) does.
    pub fn from_env_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        dotenvy::from_path(path)
            .with_context(|| format!("failed to load environment file {}", path.display()))?;
        Ok(Self::from_env())
    }
}

fn env_var(key: &str) -> Option<String> {
    env::var(format!("{}{}", ENV_PREFIX, key)).ok()
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env_var(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_flag(key: &str, default: bool) -> bool {
    env_var(key)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(default)
}

fn invalid_param(key: &str, value: &Value, expected: &str) -> StrategyError {
    StrategyError::InvalidConfig(format!("{}: expected {}, got {}", key, expected, value))
}

fn param_bool(map: &Map<String, Value>, key: &str, default: bool) -> Result<bool> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(invalid_param(key, &map[key], "a boolean")),
        },
        Some(Value::Number(n)) => Ok(n.as_f64().map(|v| v != 0.0).unwrap_or(false)),
        Some(other) => Err(invalid_param(key, other, "a boolean")),
    }
}

fn param_f64(map: &Map<String, Value>, key: &str, default: f64) -> Result<f64> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| invalid_param(key, &map[key], "a number")),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid_param(key, &map[key], "a number")),
        Some(other) => Err(invalid_param(key, other, "a number")),
    }
}

fn param_usize(map: &Map<String, Value>, key: &str, default: usize) -> Result<usize> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Number(n)) => match (n.as_u64(), n.as_f64()) {
            (Some(v), _) => Ok(v as usize),
            // Fractional periods truncate toward zero.
            (None, Some(v)) if v >= 0.0 && v.is_finite() => Ok(v.trunc() as usize),
            _ => Err(invalid_param(key, &map[key], "a non-negative integer")),
        },
        Some(Value::String(s)) => s
            .trim()
            .parse::<usize>()
            .map_err(|_| invalid_param(key, &map[key], "a non-negative integer")),
        Some(other) => Err(invalid_param(key, other, "a non-negative integer")),
    }
}
