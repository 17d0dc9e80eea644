//! Best-of-N series on top of a match

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::state::MatchState;

/// Series length. Meant to be odd; even lengths round the target up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTournamentConfig")]
pub struct TournamentConfig {
    total_rounds: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTournamentConfig {
    total_rounds: u32,
}

impl TryFrom<RawTournamentConfig> for TournamentConfig {
    type Error = EngineError;

    fn try_from(raw: RawTournamentConfig) -> Result<Self> {
        Self::new(raw.total_rounds)
    }
}

impl TournamentConfig {
    pub fn new(total_rounds: u32) -> Result<Self> {
        if total_rounds == 0 {
            return Err(EngineError::InvalidTournament { total_rounds });
        }
        Ok(Self { total_rounds })
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// Wins needed to take the series.
    pub fn target_wins(&self) -> u32 {
        self.total_rounds.div_ceil(2)
    }
}

impl Default for TournamentConfig {
    /// Best of three.
    fn default() -> Self {
        Self { total_rounds: 3 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesStatus {
    InProgress,
    PlayerWon,
    ComputerWon,
}

impl SeriesStatus {
    pub fn is_concluded(self) -> bool {
        self != SeriesStatus::InProgress
    }
}

/// Where the series stands after the latest round.
///
/// Draws never count toward the target, so a series may run past
/// `total_rounds` and may also end before it.
pub fn status(state: &MatchState, config: &TournamentConfig) -> SeriesStatus {
    let target = config.target_wins();
    let scores = state.scores();
    if scores.player >= target {
        SeriesStatus::PlayerWon
    } else if scores.computer >= target {
        SeriesStatus::ComputerWon
    } else {
        SeriesStatus::InProgress
    }
}
