//! Persistence contract for a [`MatchState`]
//!
//! The core only produces and reads the snapshot text. Where it is stored
//! is up to the caller.

use log::warn;

use crate::error::{EngineError, Result};
use crate::pattern::WINDOW_CAPACITY;
use crate::state::MatchState;

pub fn serialize(state: &MatchState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

/// Parse a snapshot and check it describes a state `apply` could reach.
pub fn restore(snapshot: &str) -> Result<MatchState> {
    let state: MatchState = serde_json::from_str(snapshot)?;
    check(&state)?;
    Ok(state)
}

/// Like [`restore`], but hands back a fresh state on failure.
///
/// The error is returned alongside so the caller can report it.
pub fn restore_or_default(snapshot: &str) -> (MatchState, Option<EngineError>) {
    match restore(snapshot) {
        Ok(state) => (state, None),
        Err(e) => {
            warn!("discarding unreadable snapshot: {e}");
            (MatchState::default(), Some(e))
        }
    }
}

fn malformed(msg: impl Into<String>) -> EngineError {
    EngineError::MalformedSnapshot(msg.into())
}

fn check(state: &MatchState) -> Result<()> {
    if state.recent_player_moves().len() > WINDOW_CAPACITY {
        return Err(malformed(format!(
            "{} recent moves exceed the window of {WINDOW_CAPACITY}",
            state.recent_player_moves().len()
        )));
    }

    let (current, best, worst) = (state.current_streak(), state.best_streak(), state.worst_streak());
    // the next round must still be able to move the streak either way
    if best < 0 || worst > 0 || best == i32::MAX || worst == i32::MIN {
        return Err(malformed(format!("streak extremes out of range: best {best}, worst {worst}")));
    }
    if current > best || current < worst {
        return Err(malformed(format!(
            "current streak {current} outside [{worst}, {best}]"
        )));
    }

    let rounds = state.current_round();
    if rounds == u32::MAX {
        return Err(malformed("round counter is exhausted"));
    }
    // each round bumps one score and one count per table, so all three
    // totals match the round counter and every counter stays below u32::MAX
    let totals = [
        ("scores", state.scores().checked_total()),
        ("player choices", state.player_choice_frequency().checked_total()),
        ("computer choices", state.computer_choice_frequency().checked_total()),
    ];
    for (name, total) in totals {
        match total {
            Some(total) if total == rounds => {}
            Some(total) => {
                return Err(malformed(format!(
                    "{name} add up to {total} but {rounds} rounds were played"
                )));
            }
            None => return Err(malformed(format!("{name} overflow"))),
        }
    }

    let mut last = 0;
    for record in state.history() {
        if record.round <= last || record.round > state.current_round() {
            return Err(malformed(format!("history round {} out of sequence", record.round)));
        }
        last = record.round;
    }
    Ok(())
}
