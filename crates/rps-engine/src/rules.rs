//! Dominance relation per mode, and round resolution

use crate::choice::{Choice, Mode, Outcome};
use crate::error::{EngineError, Result};

/// One row of a rule table: a symbol and the symbols it defeats.
pub type RuleRow = (Choice, &'static [Choice]);

const CLASSIC: &[RuleRow] = &[
    (Choice::Rock, &[Choice::Scissors]),
    (Choice::Paper, &[Choice::Rock]),
    (Choice::Scissors, &[Choice::Paper]),
];

const EXTENDED: &[RuleRow] = &[
    (Choice::Rock, &[Choice::Scissors, Choice::Lizard]),
    (Choice::Paper, &[Choice::Rock, Choice::Spock]),
    (Choice::Scissors, &[Choice::Paper, Choice::Lizard]),
    (Choice::Lizard, &[Choice::Paper, Choice::Spock]),
    (Choice::Spock, &[Choice::Rock, Choice::Scissors]),
];

/// Which choices defeat which, for one mode.
///
/// Immutable once built. Every unordered pair of distinct choices has
/// exactly one winner and no choice defeats itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleSet {
    mode: Mode,
    table: &'static [RuleRow],
}

impl RuleSet {
    pub fn for_mode(mode: Mode) -> Self {
        let table = match mode {
            Mode::Classic => CLASSIC,
            Mode::Extended => EXTENDED,
        };
        Self { mode, table }
    }

    /// Build from a custom table, rejecting it unless the relation is total.
    pub fn from_table(mode: Mode, table: &'static [RuleRow]) -> Result<Self> {
        let rules = Self { mode, table };
        rules.validate()?;
        Ok(rules)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn choices(&self) -> &'static [Choice] {
        self.mode.choices()
    }

    pub fn contains(&self, choice: Choice) -> bool {
        self.mode.allows(choice)
    }

    /// Symbols `choice` defeats.
    pub fn beaten_by(&self, choice: Choice) -> Result<&'static [Choice]> {
        if !self.contains(choice) {
            return Err(EngineError::Configuration(format!(
                "{choice} is not part of the {} rule set",
                self.mode
            )));
        }
        self.table
            .iter()
            .find(|(c, _)| *c == choice)
            .map(|(_, beaten)| *beaten)
            .ok_or_else(|| {
                EngineError::Configuration(format!("no rule row for {choice} in {} mode", self.mode))
            })
    }

    /// True iff `a` beats `b`.
    pub fn defeats(&self, a: Choice, b: Choice) -> Result<bool> {
        let beaten = self.beaten_by(a)?;
        if !self.contains(b) {
            return Err(EngineError::Configuration(format!(
                "{b} is not part of the {} rule set",
                self.mode
            )));
        }
        Ok(beaten.contains(&b))
    }

    /// Check the totality invariant over every pair.
    pub fn validate(&self) -> Result<()> {
        let choices = self.choices();
        for (i, &a) in choices.iter().enumerate() {
            if self.defeats(a, a)? {
                return Err(EngineError::Configuration(format!("{a} defeats itself")));
            }
            for &b in &choices[i + 1..] {
                if self.defeats(a, b)? == self.defeats(b, a)? {
                    return Err(EngineError::Configuration(format!(
                        "{a} vs {b} has no unique winner in {} mode",
                        self.mode
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Resolve a round from the player's perspective.
pub fn determine_outcome(player: Choice, computer: Choice, rules: &RuleSet) -> Result<Outcome> {
    if player == computer {
        // still reject symbols outside the mode
        rules.beaten_by(player)?;
        return Ok(Outcome::Draw);
    }
    match (rules.defeats(player, computer)?, rules.defeats(computer, player)?) {
        (true, false) => Ok(Outcome::Win),
        (false, true) => Ok(Outcome::Lose),
        _ => Err(EngineError::Configuration(format!(
            "{player} vs {computer} has no unique winner in {} mode",
            rules.mode()
        ))),
    }
}
