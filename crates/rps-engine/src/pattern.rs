//! Recent-move window and next-move prediction

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::choice::Choice;

/// Moves kept for pattern reading.
pub const WINDOW_CAPACITY: usize = 10;

/// Moves needed before a prediction is attempted.
pub const MIN_PATTERN_LEN: usize = 3;

/// Bounded FIFO of the player's latest moves, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveWindow {
    moves: VecDeque<Choice>,
}

impl MoveWindow {
    pub fn new() -> Self {
        Self { moves: VecDeque::with_capacity(WINDOW_CAPACITY) }
    }

    /// Append a move, evicting the oldest one when full.
    pub fn push(&mut self, choice: Choice) {
        if self.moves.len() == WINDOW_CAPACITY {
            self.moves.pop_front();
        }
        self.moves.push_back(choice);
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Choice> + '_ {
        self.moves.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<Choice> {
        self.iter().collect()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }
}

/// Guess the player's next move from their recent moves.
///
/// With fewer than three moves on record the `fallback` is returned.
/// Three identical trailing moves predict a repeat; anything else
/// predicts the latest move again.
pub fn predict_next(recent: &[Choice], fallback: Choice) -> Choice {
    if recent.len() < MIN_PATTERN_LEN {
        return fallback;
    }
    let tail = &recent[recent.len() - MIN_PATTERN_LEN..];
    if tail.iter().all(|c| *c == tail[0]) {
        return tail[0];
    }
    tail[MIN_PATTERN_LEN - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use Choice::*;

    #[test]
    fn test_window_evicts_oldest() {
        let mut window = MoveWindow::new();
        for _ in 0..WINDOW_CAPACITY {
            window.push(Rock);
        }
        window.push(Paper);
        assert_eq!(window.len(), WINDOW_CAPACITY);
        let moves = window.to_vec();
        assert_eq!(moves.last(), Some(&Paper));
        assert_eq!(moves.iter().filter(|c| **c == Rock).count(), WINDOW_CAPACITY - 1);
    }

    #[test]
    fn test_short_history_uses_fallback() {
        assert_eq!(predict_next(&[], Spock), Spock);
        assert_eq!(predict_next(&[Paper, Paper], Rock), Rock);
    }

    #[test]
    fn test_repeat_detected() {
        assert_eq!(predict_next(&[Rock, Scissors, Scissors, Scissors], Rock), Scissors);
    }

    #[test]
    fn test_continuation() {
        assert_eq!(predict_next(&[Rock, Paper, Lizard], Rock), Lizard);
        assert_eq!(predict_next(&[Paper, Paper, Rock], Scissors), Rock);
    }

    #[test]
    fn test_window_serializes_as_list() {
        let mut window = MoveWindow::new();
        window.push(Rock);
        window.push(Spock);
        assert_eq!(serde_json::to_string(&window).unwrap(), r#"["rock","spock"]"#);
    }
}
