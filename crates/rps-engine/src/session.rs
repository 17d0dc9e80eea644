//! Session controller: one live match, driven round by round
//!
//! A round runs as a single synchronous chain: validate the move, let the
//! opponent choose, resolve, fold into the state, then check the series.
//! Any error before the fold leaves the state exactly as it was.

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::choice::{Choice, Difficulty, Mode, Outcome};
use crate::error::{EngineError, Result};
use crate::export;
use crate::random::{RandomSource, SeededRng};
use crate::rules::{determine_outcome, RuleSet};
use crate::snapshot;
use crate::state::{MatchState, MatchSummary};
use crate::strategy::choose;
use crate::tournament::{status, SeriesStatus, TournamentConfig};

/// Session-wide preferences. Survive a reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub mode: Mode,
    pub difficulty: Difficulty,
    /// `Some` plays a best-of-N series.
    pub tournament: Option<TournamentConfig>,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Raw input for one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMove {
    pub choice: Choice,
    pub mode: Mode,
    pub difficulty: Difficulty,
}

impl PlayerMove {
    pub fn new(choice: Choice, mode: Mode, difficulty: Difficulty) -> Self {
        Self { choice, mode, difficulty }
    }
}

/// Everything a front end needs to present a finished round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub player_choice: Choice,
    pub computer_choice: Choice,
    pub outcome: Outcome,
    /// Present when a tournament is configured.
    pub series: Option<SeriesStatus>,
    pub match_state: MatchState,
}

pub struct GameSession<R: RandomSource> {
    settings: Settings,
    state: MatchState,
    rng: R,
}

impl GameSession<SeededRng> {
    pub fn seeded(settings: Settings, seed: u64) -> Self {
        Self::new(settings, SeededRng::from_u64(seed))
    }
}

impl<R: RandomSource> GameSession<R> {
    pub fn new(settings: Settings, rng: R) -> Self {
        Self::with_state(settings, MatchState::default(), rng)
    }

    /// Resume from an already restored state.
    pub fn with_state(settings: Settings, state: MatchState, rng: R) -> Self {
        Self { settings, state, rng }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Swap preferences between rounds. The match itself is untouched.
    pub fn configure(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn into_state(self) -> MatchState {
        self.state
    }

    /// Play a round with the configured mode and difficulty.
    pub fn play_choice(&mut self, choice: Choice) -> Result<RoundResult> {
        let mv = PlayerMove::new(choice, self.settings.mode, self.settings.difficulty);
        self.play(mv)
    }

    pub fn play(&mut self, mv: PlayerMove) -> Result<RoundResult> {
        self.play_at(mv, Utc::now())
    }

    /// Play a round stamped with `timestamp`.
    pub fn play_at(&mut self, mv: PlayerMove, timestamp: DateTime<Utc>) -> Result<RoundResult> {
        if !mv.mode.allows(mv.choice) {
            return Err(EngineError::InvalidChoice { choice: mv.choice, mode: mv.mode });
        }
        if self.series_status().is_some_and(SeriesStatus::is_concluded) {
            return Err(EngineError::SeriesConcluded);
        }

        let rules = RuleSet::for_mode(mv.mode);
        let mut window = self.state.recent_player_moves().clone();
        let computer = choose(
            mv.choice,
            mv.difficulty,
            &rules,
            self.state.player_choice_frequency(),
            &mut window,
            &mut self.rng,
        )?;
        let outcome = determine_outcome(mv.choice, computer, &rules)?;

        self.state.set_recent_moves(window);
        let record = self.state.apply(outcome, mv.choice, computer, timestamp);
        debug!(
            "round {}: {} vs {} -> {}",
            record.round, record.player_choice, record.computer_choice, record.outcome
        );

        let series = self.series_status();
        match series {
            Some(SeriesStatus::PlayerWon) => info!("series won by player after {} rounds", record.round),
            Some(SeriesStatus::ComputerWon) => info!("series won by computer after {} rounds", record.round),
            _ => {}
        }

        Ok(RoundResult {
            player_choice: mv.choice,
            computer_choice: computer,
            outcome,
            series,
            match_state: self.state.clone(),
        })
    }

    /// `None` outside tournament play.
    pub fn series_status(&self) -> Option<SeriesStatus> {
        self.settings.tournament.map(|t| status(&self.state, &t))
    }

    pub fn summary(&self) -> MatchSummary {
        self.state.summary(self.settings.mode)
    }

    /// Start over with a fresh match. Settings are kept.
    pub fn reset(&mut self) {
        info!("resetting match after {} rounds", self.state.current_round());
        self.state = MatchState::default();
    }

    pub fn clear_history(&mut self) {
        if !self.state.history().is_empty() {
            info!("clearing {} history records", self.state.history().len());
        }
        self.state.clear_history();
    }

    pub fn export_json(&self) -> Result<String> {
        export::to_json(self.state.history())
    }

    pub fn export_csv(&self) -> Result<String> {
        export::to_csv(self.state.history())
    }

    pub fn snapshot(&self) -> Result<String> {
        snapshot::serialize(&self.state)
    }

    /// Replace the state from a snapshot, falling back to a fresh one.
    ///
    /// Returns the restore error, if there was one.
    pub fn restore(&mut self, text: &str) -> Option<EngineError> {
        let (state, err) = snapshot::restore_or_default(text);
        self.state = state;
        err
    }
}
