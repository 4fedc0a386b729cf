use thiserror::Error;

/// Strategy error types.
#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("Insufficient data for analysis: {available} candles supplied, minimum {needed} required")]
    InsufficientData { needed: usize, available: usize },

    #[error("Required field '{0}' not found in candle data")]
    MissingField(String),

    #[error("Invalid candle data: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl StrategyError {
    /// True for errors caused by the caller's candles rather than by the engine.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            StrategyError::InsufficientData { .. }
                | StrategyError::MissingField(_)
                | StrategyError::InvalidInput(_)
                | StrategyError::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StrategyError>;
