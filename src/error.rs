use thiserror::Error;

/// Startup configuration problems. Any of these stops the game from starting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("sentence pool is empty")]
    EmptySentencePool,

    #[error("sentence #{index} is empty")]
    EmptySentence { index: usize },

    #[error("time limit must be positive, got {0}")]
    NonPositiveTimeLimit(i64),

    #[error("time limit of {0} seconds is too large")]
    TimeLimitTooLarge(i64),
}
