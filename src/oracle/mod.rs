//! Word oracle: where target words come from and who decides a guess is a word
//!
//! The game never carries a dictionary. Target words are generated and
//! guesses are validated by an external service behind two small traits:
//! - [`WordSource`] supplies a target word of a given length
//! - [`WordValidator`] says whether a word is accepted
//!
//! Two implementations ship with the crate: [`OpenAiOracle`] talks to a
//! chat-completion API directly, [`RemoteOracle`] talks to this crate's own
//! HTTP service (see [`crate::server`]).

mod openai;
mod remote;
#[cfg(test)]
pub(crate) mod testing;

pub use openai::{OpenAiConfig, OpenAiOracle};
pub use remote::RemoteOracle;

use crate::core::{MAX_WORD_LENGTH, MIN_WORD_LENGTH, Word, is_valid_length};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Oracle failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// Requested or submitted length outside what the oracle accepts
    #[error("length must be between {MIN_WORD_LENGTH} and {MAX_WORD_LENGTH} letters, got {0}")]
    InvalidLength(usize),

    /// Transport or provider failure
    #[error("word service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The provider answered, but not with something usable
    #[error("unusable answer from word service: {0}")]
    MalformedResponse(String),
}

/// Supplies target words
#[async_trait]
pub trait WordSource: Send + Sync {
    /// Produce a word of exactly `length` letters
    ///
    /// # Errors
    /// `InvalidLength` if `length` is outside 3..=10, `UpstreamUnavailable`
    /// on transport/provider failure.
    async fn generate_word(&self, length: usize) -> Result<Word, OracleError>;
}

/// Decides whether a word is acceptable as a guess
#[async_trait]
pub trait WordValidator: Send + Sync {
    /// # Errors
    /// `InvalidLength` for words shorter than three letters (checked before
    /// any upstream call), `UpstreamUnavailable` on transport failure.
    async fn is_valid_word(&self, word: &str) -> Result<bool, OracleError>;
}

#[async_trait]
impl<T: WordSource + ?Sized> WordSource for Arc<T> {
    async fn generate_word(&self, length: usize) -> Result<Word, OracleError> {
        (**self).generate_word(length).await
    }
}

#[async_trait]
impl<T: WordValidator + ?Sized> WordValidator for Arc<T> {
    async fn is_valid_word(&self, word: &str) -> Result<bool, OracleError> {
        (**self).is_valid_word(word).await
    }
}

/// Both halves of the oracle behind one object
pub trait Oracle: WordSource + WordValidator {}

impl<T: WordSource + WordValidator + ?Sized> Oracle for T {}

/// Reject lengths no oracle should be asked for
///
/// # Errors
/// `OracleError::InvalidLength` outside 3..=10.
pub fn check_length(length: usize) -> Result<(), OracleError> {
    if is_valid_length(length) {
        Ok(())
    } else {
        Err(OracleError::InvalidLength(length))
    }
}

/// Reject candidates too short to be worth an upstream call
///
/// # Errors
/// `OracleError::InvalidLength` when `word` has fewer than three letters.
pub fn check_candidate(word: &str) -> Result<(), OracleError> {
    let len = word.trim().chars().count();
    if len < MIN_WORD_LENGTH {
        Err(OracleError::InvalidLength(len))
    } else {
        Ok(())
    }
}

/// Clean up a word produced by a language model
///
/// Trims whitespace, surrounding quotes and punctuation, lower-cases and folds
/// accented vowels to plain ones. `ñ` is a letter of its own and is kept.
#[must_use]
pub fn normalize_word(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| !c.is_alphabetic())
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            other => other,
        })
        .collect()
}

/// Parse generated text into a word of the requested length
///
/// # Errors
/// `MalformedResponse` if the text is not a single playable word of
/// `length` letters.
pub fn parse_generated(raw: &str, length: usize) -> Result<Word, OracleError> {
    let normalized = normalize_word(raw);
    let word = Word::new(normalized.as_str())
        .map_err(|e| OracleError::MalformedResponse(format!("{normalized:?}: {e}")))?;

    if word.len() != length {
        return Err(OracleError::MalformedResponse(format!(
            "asked for {length} letters, got {:?}",
            word.text()
        )));
    }

    Ok(word)
}
