pub mod signals;

pub use signals::{Analysis, IndicatorKind, IndicatorTable, ScalpingStrategy};
