//! Errors surfaced by round and controller operations

use crate::core::{MAX_WORD_LENGTH, MIN_WORD_LENGTH, ScoreError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Requested word length outside the playable range
    #[error("word length must be between {MIN_WORD_LENGTH} and {MAX_WORD_LENGTH}, got {0}")]
    InvalidLength(usize),

    /// Typed character is not a playable letter
    #[error("{0:?} is not a playable letter")]
    InvalidCharacter(char),

    /// The input row already holds a full word
    #[error("no room for another letter")]
    RowFull,

    #[error("nothing to delete")]
    EmptyInput,

    /// Submitted before the row was complete
    #[error("guess has {have} of {need} letters")]
    IncompleteGuess { have: usize, need: usize },

    /// Validator did not accept the word
    #[error("{0:?} is not a recognized word")]
    RejectedGuess(String),

    /// An external call is outstanding and blocks this operation
    #[error("a request is already in flight")]
    SubmissionInFlight,

    /// The round has ended; start a new one
    #[error("the round is over")]
    RoundOver,

    /// No target word has been delivered yet
    #[error("waiting for a target word")]
    NoTarget,

    /// Scorer contract violation; a bug in the caller
    #[error(transparent)]
    Score(#[from] ScoreError),
}

impl GameError {
    /// Errors caused by player input, shown briefly and then cleared
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCharacter(_)
                | Self::RowFull
                | Self::EmptyInput
                | Self::IncompleteGuess { .. }
                | Self::RejectedGuess(_)
        )
    }
}
