//! Session state: scores, streaks, frequency tables and round history

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::choice::{Choice, Mode, Outcome};
use crate::pattern::MoveWindow;

/// Running score, always from the player's side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub player: u32,
    pub computer: u32,
    pub draws: u32,
}

impl Scores {
    pub fn total(&self) -> u32 {
        self.player.saturating_add(self.computer).saturating_add(self.draws)
    }

    /// Exact total, `None` when it does not fit.
    pub fn checked_total(&self) -> Option<u32> {
        self.player.checked_add(self.computer)?.checked_add(self.draws)
    }
}

/// Per-choice usage counts, zero for every symbol until played.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Choice, u32>", into = "BTreeMap<Choice, u32>")]
pub struct ChoiceCounts {
    counts: [u32; 5],
}

impl ChoiceCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, choice: Choice) -> u32 {
        self.counts[choice.index()]
    }

    pub fn increment(&mut self, choice: Choice) {
        self.counts[choice.index()] += 1;
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().fold(0u32, |acc, n| acc.saturating_add(*n))
    }

    pub fn checked_total(&self) -> Option<u32> {
        self.counts.iter().try_fold(0u32, |acc, n| acc.checked_add(*n))
    }

    /// Counts for the mode's choices, highest first; ties keep declaration order.
    pub fn ranked(&self, mode: Mode) -> Vec<(Choice, u32)> {
        let mut rows: Vec<_> = mode.choices().iter().map(|c| (*c, self.get(*c))).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows
    }
}

impl From<BTreeMap<Choice, u32>> for ChoiceCounts {
    fn from(map: BTreeMap<Choice, u32>) -> Self {
        let mut counts = Self::new();
        for (choice, n) in map {
            counts.counts[choice.index()] = n;
        }
        counts
    }
}

impl From<ChoiceCounts> for BTreeMap<Choice, u32> {
    fn from(counts: ChoiceCounts) -> Self {
        Choice::ALL.into_iter().map(|c| (c, counts.get(c))).collect()
    }
}

/// One resolved round. Never edited after it is appended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub round: u32,
    pub player_choice: Choice,
    pub computer_choice: Choice,
    #[serde(alias = "result")]
    pub outcome: Outcome,
    pub timestamp: DateTime<Utc>,
}

/// Mutable state of one game session.
///
/// Only [`MatchState::apply`] advances scores, streaks, counters and
/// history. History can additionally be wiped as a whole.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchState {
    scores: Scores,
    current_streak: i32,
    best_streak: i32,
    worst_streak: i32,
    current_round: u32,
    player_choice_frequency: ChoiceCounts,
    computer_choice_frequency: ChoiceCounts,
    recent_player_moves: MoveWindow,
    history: Vec<RoundRecord>,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one resolved round into the state and log it.
    pub fn apply(
        &mut self,
        outcome: Outcome,
        player_choice: Choice,
        computer_choice: Choice,
        timestamp: DateTime<Utc>,
    ) -> RoundRecord {
        self.current_round += 1;

        match outcome {
            Outcome::Win => {
                self.scores.player += 1;
                self.current_streak += 1;
                self.best_streak = self.best_streak.max(self.current_streak);
            }
            Outcome::Lose => {
                self.scores.computer += 1;
                self.current_streak = if self.current_streak > 0 { -1 } else { self.current_streak - 1 };
                self.worst_streak = self.worst_streak.min(self.current_streak);
            }
            Outcome::Draw => {
                self.scores.draws += 1;
                self.current_streak = 0;
            }
        }

        self.player_choice_frequency.increment(player_choice);
        self.computer_choice_frequency.increment(computer_choice);

        let record = RoundRecord {
            round: self.current_round,
            player_choice,
            computer_choice,
            outcome,
            timestamp,
        };
        self.history.push(record.clone());
        record
    }

    /// Drop every history record. Scores and streaks stay.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub(crate) fn set_recent_moves(&mut self, window: MoveWindow) {
        self.recent_player_moves = window;
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn current_streak(&self) -> i32 {
        self.current_streak
    }

    pub fn best_streak(&self) -> i32 {
        self.best_streak
    }

    pub fn worst_streak(&self) -> i32 {
        self.worst_streak
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn player_choice_frequency(&self) -> &ChoiceCounts {
        &self.player_choice_frequency
    }

    pub fn computer_choice_frequency(&self) -> &ChoiceCounts {
        &self.computer_choice_frequency
    }

    pub fn recent_player_moves(&self) -> &MoveWindow {
        &self.recent_player_moves
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    /// Derived figures for a stats panel or share text.
    pub fn summary(&self, mode: Mode) -> MatchSummary {
        let total_games = self.scores.total();
        let win_rate = if total_games > 0 {
            (f64::from(self.scores.player) * 100.0 / f64::from(total_games)).round() as u32
        } else {
            0
        };
        MatchSummary {
            scores: self.scores,
            total_games,
            win_rate,
            current_streak: self.current_streak.unsigned_abs(),
            best_streak: self.best_streak.unsigned_abs(),
            worst_streak: self.worst_streak.unsigned_abs(),
            player_choices: self.player_choice_frequency.ranked(mode),
            computer_choices: self.computer_choice_frequency.ranked(mode),
        }
    }
}

/// Read-only statistics derived from a [`MatchState`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub scores: Scores,
    pub total_games: u32,
    /// Whole percent of rounds won, rounded half up.
    pub win_rate: u32,
    /// Length of the active streak, either direction.
    pub current_streak: u32,
    pub best_streak: u32,
    pub worst_streak: u32,
    pub player_choices: Vec<(Choice, u32)>,
    pub computer_choices: Vec<(Choice, u32)>,
}
