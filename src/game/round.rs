//! State of a single round of play
//!
//! A round owns its target, the guesses made so far, the row being typed and
//! the keyboard hints. It performs no I/O; validating a guess with the word
//! oracle is the controller's job, and only accepted guesses reach
//! [`RoundState::apply_guess`].

use super::GameError;
use crate::core::{
    KeyStatus, ScoreError, ScoreResult, Word, WordError, is_allowed_letter, is_valid_length, score,
};
use serde::Serialize;

/// Guesses allowed per round
pub const MAX_ATTEMPTS: usize = 6;

/// Round result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

/// One accepted guess and its feedback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub guess: Word,
    pub result: ScoreResult,
}

/// Mutable state of one round
#[derive(Debug, Clone)]
pub struct RoundState {
    word_length: usize,
    target: Option<Word>,
    attempts: Vec<Attempt>,
    input: Vec<char>,
    key_status: KeyStatus,
    outcome: Outcome,
}

impl From<WordError> for GameError {
    fn from(err: WordError) -> Self {
        match err {
            WordError::InvalidLength(len) => Self::InvalidLength(len),
            WordError::InvalidCharacter(c) => Self::InvalidCharacter(c),
        }
    }
}

impl RoundState {
    /// Start an empty round that is still waiting for its target word
    ///
    /// # Errors
    /// Returns `GameError::InvalidLength` if `word_length` is outside 3..=10.
    pub fn new(word_length: usize) -> Result<Self, GameError> {
        if !is_valid_length(word_length) {
            return Err(GameError::InvalidLength(word_length));
        }

        Ok(Self {
            word_length,
            target: None,
            attempts: Vec::with_capacity(MAX_ATTEMPTS),
            input: Vec::with_capacity(word_length),
            key_status: KeyStatus::new(),
            outcome: Outcome::InProgress,
        })
    }

    /// Start a round with a known target
    #[must_use]
    pub fn with_target(target: Word) -> Self {
        let word_length = target.len();
        Self {
            word_length,
            target: Some(target),
            attempts: Vec::with_capacity(MAX_ATTEMPTS),
            input: Vec::with_capacity(word_length),
            key_status: KeyStatus::new(),
            outcome: Outcome::InProgress,
        }
    }

    /// Reinitialize every field for a new round of `word_length` letters
    ///
    /// The target is cleared until [`RoundState::set_target`] is called.
    ///
    /// # Errors
    /// Returns `GameError::InvalidLength` if `word_length` is outside 3..=10;
    /// the current round is left untouched in that case.
    pub fn reset(&mut self, word_length: usize) -> Result<(), GameError> {
        *self = Self::new(word_length)?;
        Ok(())
    }

    /// Install the target word once it has been delivered
    ///
    /// # Errors
    /// Returns a length mismatch if the word does not fit the round.
    pub fn set_target(&mut self, target: Word) -> Result<(), GameError> {
        if target.len() != self.word_length {
            return Err(ScoreError::LengthMismatch {
                target: target.len(),
                guess: self.word_length,
            }
            .into());
        }
        self.target = Some(target);
        Ok(())
    }

    /// Append a letter to the current row
    ///
    /// Uppercase letters are folded to lowercase first.
    ///
    /// # Errors
    /// - `RoundOver` once the round has ended
    /// - `InvalidCharacter` for anything outside the alphabet
    /// - `RowFull` when the row already holds `word_length` letters
    pub fn insert_char(&mut self, c: char) -> Result<(), GameError> {
        self.ensure_in_progress()?;

        let mut lowered = c.to_lowercase();
        let letter = match (lowered.next(), lowered.next()) {
            (Some(l), None) if is_allowed_letter(l) => l,
            _ => return Err(GameError::InvalidCharacter(c)),
        };

        if self.input.len() >= self.word_length {
            return Err(GameError::RowFull);
        }

        self.input.push(letter);
        Ok(())
    }

    /// Remove the last letter of the current row
    ///
    /// # Errors
    /// `RoundOver` once the round has ended, `EmptyInput` if the row is empty.
    pub fn delete_char(&mut self) -> Result<char, GameError> {
        self.ensure_in_progress()?;
        self.input.pop().ok_or(GameError::EmptyInput)
    }

    /// Assemble the current row into a word ready for validation
    ///
    /// Does not mutate the round.
    ///
    /// # Errors
    /// `RoundOver`, `NoTarget`, or `IncompleteGuess` if the row is short.
    pub fn current_guess(&self) -> Result<Word, GameError> {
        self.ensure_in_progress()?;
        if self.target.is_none() {
            return Err(GameError::NoTarget);
        }
        if self.input.len() != self.word_length {
            return Err(GameError::IncompleteGuess {
                have: self.input.len(),
                need: self.word_length,
            });
        }

        Ok(Word::new(self.input.iter().collect::<String>())?)
    }

    /// Record a guess the validator accepted
    ///
    /// Scores it, updates the keyboard, clears the row and settles the
    /// outcome: won if it equals the target, lost if it was the last attempt.
    ///
    /// # Errors
    /// `RoundOver`, `NoTarget`, or a scorer length mismatch.
    pub fn apply_guess(&mut self, guess: Word) -> Result<Attempt, GameError> {
        self.ensure_in_progress()?;
        let target = self.target.as_ref().ok_or(GameError::NoTarget)?;

        let result = score(target, &guess)?;
        let won = result.is_perfect();

        self.key_status.record(&guess, &result);
        let attempt = Attempt { guess, result };
        self.attempts.push(attempt.clone());
        self.input.clear();

        if won {
            self.outcome = Outcome::Won;
        } else if self.attempts.len() == MAX_ATTEMPTS {
            self.outcome = Outcome::Lost;
        }

        Ok(attempt)
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        if self.outcome == Outcome::InProgress {
            Ok(())
        } else {
            Err(GameError::RoundOver)
        }
    }

    #[inline]
    #[must_use]
    pub const fn word_length(&self) -> usize {
        self.word_length
    }

    #[inline]
    #[must_use]
    pub const fn target(&self) -> Option<&Word> {
        self.target.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    #[inline]
    #[must_use]
    pub fn input(&self) -> &[char] {
        &self.input
    }

    #[must_use]
    pub fn input_text(&self) -> String {
        self.input.iter().collect()
    }

    #[inline]
    #[must_use]
    pub const fn key_status(&self) -> &KeyStatus {
        &self.key_status
    }

    #[inline]
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::InProgress
    }

    #[must_use]
    pub fn remaining_attempts(&self) -> usize {
        MAX_ATTEMPTS - self.attempts.len()
    }

    /// The target, once the round is lost
    #[must_use]
    pub fn reveal(&self) -> Option<&Word> {
        match self.outcome {
            Outcome::Lost => self.target.as_ref(),
            _ => None,
        }
    }
}
