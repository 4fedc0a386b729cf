//! Technical indicator implementations.
//!
//! Each indicator is a pure function over aligned price columns and returns
//! series of the same length, NaN through its warm-up region.

pub mod atr;
pub mod bollinger;
pub mod choppiness;
pub mod donchian;
pub mod ema;
pub mod heikin_ashi;
pub mod macd;
pub mod parabolic_sar;
pub mod pivot;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod supertrend;
pub mod vwap;
pub mod window;

pub use atr::{atr, true_range};
pub use bollinger::{bollinger_bands, BollingerSeries};
pub use choppiness::{choppiness_index, ChoppinessSeries};
pub use donchian::{donchian_channel, DonchianSeries};
pub use ema::ema;
pub use heikin_ashi::{heikin_ashi, HeikinAshiSeries};
pub use macd::{macd, MacdSeries};
pub use parabolic_sar::{parabolic_sar, ParabolicSarSeries};
pub use pivot::{pivot_points, PivotSeries, PivotType};
pub use rsi::rsi;
pub use sma::sma;
pub use stochastic::{stoch_rsi, StochRsiSeries};
pub use supertrend::{supertrend, SupertrendSeries};
pub use vwap::vwap;
