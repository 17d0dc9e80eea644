//! Game engine for Rock Paper Scissors
//!
//! Core logic for player-vs-computer play in the classic three-symbol
//! game and the five-symbol lizard/spock variant, with an adaptive
//! opponent and best-of-N tournament series.
//! This crate is compiled to:
//! - Native (for tests and any host front end)
//! - WASM (for the browser front end)

mod choice;
mod error;
mod export;
mod pattern;
mod random;
mod rules;
mod session;
mod snapshot;
mod state;
mod strategy;
mod tournament;

#[cfg(feature = "wasm")]
mod wasm;

pub use choice::{Choice, Difficulty, Mode, Outcome};
pub use error::{EngineError, Result};
pub use export::{parse_json, to_csv, to_json, CSV_HEADER};
pub use pattern::{predict_next, MoveWindow, MIN_PATTERN_LEN, WINDOW_CAPACITY};
pub use random::{pick, RandomSource, SeededRng, SequenceRng};
pub use rules::{determine_outcome, RuleRow, RuleSet};
pub use session::{GameSession, PlayerMove, RoundResult, Settings};
pub use snapshot::{restore, restore_or_default, serialize};
pub use state::{ChoiceCounts, MatchState, MatchSummary, RoundRecord, Scores};
pub use strategy::{choose, counter_to, describe_difficulty, most_frequent, profile, Branch, Tactic};
pub use tournament::{status, SeriesStatus, TournamentConfig};
