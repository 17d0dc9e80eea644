//! Engine error type

use thiserror::Error;

use crate::choice::{Choice, Mode};

#[derive(Error, Debug)]
pub enum EngineError {
    /// Rejected before any state is touched.
    #[error("{choice} is not a valid choice in {mode} mode")]
    InvalidChoice { choice: Choice, mode: Mode },

    #[error("unknown choice: {0:?}")]
    UnknownChoice(String),

    #[error("unknown mode: {0:?}")]
    UnknownMode(String),

    #[error("unknown difficulty: {0:?}")]
    UnknownDifficulty(String),

    /// A rule table that was built wrong. Never the player's fault.
    #[error("rule configuration error: {0}")]
    Configuration(String),

    #[error("no history to export")]
    NoData,

    #[error("tournament must have at least one round, got {total_rounds}")]
    InvalidTournament { total_rounds: u32 },

    #[error("tournament series is already decided")]
    SeriesConcluded,

    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl EngineError {
    /// Whether the session can carry on after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, EngineError::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
