//! Opponent decision making

use log::debug;
use serde::{Deserialize, Serialize};

use crate::choice::{Choice, Difficulty};
use crate::error::{EngineError, Result};
use crate::pattern::{predict_next, MoveWindow, MIN_PATTERN_LEN};
use crate::random::{pick, RandomSource};
use crate::rules::RuleSet;
use crate::state::ChoiceCounts;

/// How the computer picks a move in a given round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tactic {
    /// Uniform random over the mode's choices.
    Random,
    /// Beat whatever the player has thrown most often.
    CounterMostFrequent,
    /// Beat the move the pattern detector expects next.
    /// Needs at least three recorded player moves.
    CounterPattern,
}

/// One entry of a difficulty profile.
///
/// Branches are tried in order. A branch with probability 1.0 is taken
/// without a draw; otherwise one draw decides it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Branch {
    pub probability: f64,
    pub tactic: Tactic,
}

const fn branch(probability: f64, tactic: Tactic) -> Branch {
    Branch { probability, tactic }
}

const EASY: &[Branch] = &[branch(1.0, Tactic::Random)];

const MEDIUM: &[Branch] = &[
    branch(0.7, Tactic::Random),
    branch(1.0, Tactic::CounterMostFrequent),
];

const HARD: &[Branch] = &[
    branch(0.6, Tactic::CounterPattern),
    branch(1.0, Tactic::CounterMostFrequent),
];

/// Ordered branch table for a difficulty.
pub fn profile(difficulty: Difficulty) -> &'static [Branch] {
    match difficulty {
        Difficulty::Easy => EASY,
        Difficulty::Medium => MEDIUM,
        Difficulty::Hard => HARD,
    }
}

/// The player's most used choice within the active mode.
///
/// Ties go to the earliest choice in declaration order, so an untouched
/// table yields rock.
pub fn most_frequent(frequency: &ChoiceCounts, rules: &RuleSet) -> Choice {
    let mut best = Choice::Rock;
    let mut best_count = None;
    for &choice in rules.choices() {
        let count = frequency.get(choice);
        if best_count.map_or(true, |b| count > b) {
            best = choice;
            best_count = Some(count);
        }
    }
    best
}

/// A choice that beats `target`, drawn uniformly when several do.
pub fn counter_to(target: Choice, rules: &RuleSet, rng: &mut impl RandomSource) -> Result<Choice> {
    let mut counters = Vec::with_capacity(2);
    for &c in rules.choices() {
        if rules.defeats(c, target)? {
            counters.push(c);
        }
    }
    match counters.as_slice() {
        [] => Err(EngineError::Configuration(format!("nothing beats {target}"))),
        [only] => Ok(*only),
        many => pick(rng, many).ok_or_else(|| EngineError::Configuration("empty counter set".into())),
    }
}

fn available(tactic: Tactic, window: &MoveWindow) -> bool {
    match tactic {
        Tactic::CounterPattern => window.len() >= MIN_PATTERN_LEN,
        Tactic::Random | Tactic::CounterMostFrequent => true,
    }
}

fn execute_tactic(
    tactic: Tactic,
    rules: &RuleSet,
    frequency: &ChoiceCounts,
    window: &MoveWindow,
    rng: &mut impl RandomSource,
) -> Result<Choice> {
    match tactic {
        Tactic::Random => pick(rng, rules.choices())
            .ok_or_else(|| EngineError::Configuration(format!("{} mode has no choices", rules.mode()))),
        Tactic::CounterMostFrequent => counter_to(most_frequent(frequency, rules), rules, rng),
        Tactic::CounterPattern => {
            let fallback = most_frequent(frequency, rules);
            let mut predicted = predict_next(&window.to_vec(), fallback);
            // moves remembered from the other mode cannot be countered here
            if !rules.contains(predicted) {
                predicted = fallback;
            }
            counter_to(predicted, rules, rng)
        }
    }
}

/// Pick the computer's move for this round.
///
/// `player_move` is pushed onto `window` first, so the detector already
/// sees the current round.
pub fn choose(
    player_move: Choice,
    difficulty: Difficulty,
    rules: &RuleSet,
    frequency: &ChoiceCounts,
    window: &mut MoveWindow,
    rng: &mut impl RandomSource,
) -> Result<Choice> {
    window.push(player_move);

    for b in profile(difficulty) {
        if !available(b.tactic, window) {
            continue;
        }
        if b.probability >= 1.0 || rng.next_unit() < b.probability {
            let choice = execute_tactic(b.tactic, rules, frequency, window, rng)?;
            debug!("{difficulty} opponent used {:?} -> {choice}", b.tactic);
            return Ok(choice);
        }
    }
    Err(EngineError::Configuration(format!("{difficulty} profile took no branch")))
}

/// Get a human-readable description of a difficulty
pub fn describe_difficulty(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "Plays completely at random.",
        Difficulty::Medium => "Mostly random, but 30% of the time counters your favourite move.",
        Difficulty::Hard => "Reads your recent moves and counters what you are likely to play next.",
    }
}
