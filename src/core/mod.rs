//! Core domain types for the word game
//!
//! This module contains the pure game types: words, letter statuses and the
//! scorer. Nothing here performs I/O.

mod score;
mod status;
mod word;

pub use score::{KEYBOARD_ROWS, KeyStatus, ScoreError, ScoreResult, score};
pub use status::LetterStatus;
pub use word::{
    ALPHABET, MAX_WORD_LENGTH, MIN_WORD_LENGTH, Word, WordError, is_allowed_letter,
    is_valid_length,
};
