//! Game word representation
//!
//! A Word stores a 3-10 letter Spanish word along with letter position indices
//! for scoring.

use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;

/// Shortest playable word
pub const MIN_WORD_LENGTH: usize = 3;

/// Longest playable word
pub const MAX_WORD_LENGTH: usize = 10;

/// Letters accepted in a word, in keyboard order (Spanish layout, includes `ñ`)
pub const ALPHABET: &str = "qwertyuiopasdfghjklñzxcvbnm";

/// Check whether `c` is a playable letter
///
/// Only lowercase letters are accepted; callers lower-case input first.
#[inline]
#[must_use]
pub fn is_allowed_letter(c: char) -> bool {
    ALPHABET.contains(c)
}

/// Check whether `length` is a playable word length
#[inline]
#[must_use]
pub const fn is_valid_length(length: usize) -> bool {
    length >= MIN_WORD_LENGTH && length <= MAX_WORD_LENGTH
}

/// An immutable lowercase word with letter position tracking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    text: String,
    chars: Vec<char>,
    char_positions: FxHashMap<char, Vec<usize>>,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("word must be {MIN_WORD_LENGTH}-{MAX_WORD_LENGTH} letters, got {0}")]
    InvalidLength(usize),
    #[error("word contains invalid character {0:?}")]
    InvalidCharacter(char),
}

impl Word {
    /// Create a new Word from a string
    ///
    /// The input is lower-cased before validation.
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - Length (in characters) is outside 3..=10
    /// - Contains a character outside [`ALPHABET`]
    ///
    /// # Examples
    /// ```
    /// use palabrle::core::Word;
    ///
    /// let word = Word::new("Niño").unwrap();
    /// assert_eq!(word.text(), "niño");
    /// assert_eq!(word.len(), 4);
    ///
    /// assert!(Word::new("no").is_err());
    /// assert!(Word::new("p3rro").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, WordError> {
        let text: String = text.into().to_lowercase();
        let chars: Vec<char> = text.chars().collect();

        if !is_valid_length(chars.len()) {
            return Err(WordError::InvalidLength(chars.len()));
        }

        if let Some(&bad) = chars.iter().find(|&&c| !is_allowed_letter(c)) {
            return Err(WordError::InvalidCharacter(bad));
        }

        let mut char_positions: FxHashMap<char, Vec<usize>> = FxHashMap::default();
        for (i, &ch) in chars.iter().enumerate() {
            char_positions.entry(ch).or_default().push(i);
        }

        Ok(Self {
            text,
            chars,
            char_positions,
        })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the word's letters
    #[inline]
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of letters (not bytes)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false: a valid word has at least three letters
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Get the letter at a specific position
    ///
    /// # Panics
    /// Panics if `position >= self.len()`
    #[inline]
    #[must_use]
    pub fn char_at(&self, position: usize) -> char {
        self.chars[position]
    }

    /// Get all positions where a letter appears
    ///
    /// Returns an empty slice if the letter doesn't appear.
    #[inline]
    pub fn positions_of(&self, letter: char) -> &[usize] {
        self.char_positions
            .get(&letter)
            .map_or(&[], std::vec::Vec::as_slice)
    }

    /// Get the count of each letter in the word
    ///
    /// Used by the scorer to handle repeated letters.
    #[inline]
    pub(crate) fn char_counts(&self) -> FxHashMap<char, usize> {
        self.char_positions
            .iter()
            .map(|(&ch, positions)| (ch, positions.len()))
            .collect()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl std::str::FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_creation_valid() {
        let word = Word::new("perro").unwrap();
        assert_eq!(word.text(), "perro");
        assert_eq!(word.chars(), &['p', 'e', 'r', 'r', 'o']);
        assert_eq!(word.len(), 5);
    }

    #[test]
    fn word_creation_uppercase_normalized() {
        let word = Word::new("GATO").unwrap();
        assert_eq!(word.text(), "gato");

        let word2 = Word::new("ÑaNdÚ");
        // Accented vowels are not part of the alphabet
        assert_eq!(word2, Err(WordError::InvalidCharacter('ú')));
    }

    #[test]
    fn word_counts_letters_not_bytes() {
        // "ñ" is two bytes in UTF-8 but one letter
        let word = Word::new("año").unwrap();
        assert_eq!(word.len(), 3);
        assert_eq!(word.char_at(1), 'ñ');
    }

    #[test]
    fn word_creation_invalid_length() {
        assert_eq!(Word::new("no"), Err(WordError::InvalidLength(2)));
        assert_eq!(
            Word::new("electricidad"),
            Err(WordError::InvalidLength(12))
        );
        assert_eq!(Word::new(""), Err(WordError::InvalidLength(0)));
        assert!(Word::new("sol").is_ok());
        assert!(Word::new("murcielago").is_ok());
    }

    #[test]
    fn word_creation_invalid_characters() {
        assert!(Word::new("gat0").is_err()); // Number
        assert!(Word::new("ga to").is_err()); // Space
        assert!(Word::new("gato!").is_err()); // Punctuation
    }

    #[test]
    fn word_positions_of_duplicates() {
        let word = Word::new("perro").unwrap();
        assert_eq!(word.positions_of('r'), &[2, 3]);
        assert_eq!(word.positions_of('p'), &[0]);
        assert!(word.positions_of('z').is_empty());
    }

    #[test]
    fn word_char_counts() {
        let word = Word::new("perro").unwrap();
        let counts = word.char_counts();
        assert_eq!(counts.get(&'p'), Some(&1));
        assert_eq!(counts.get(&'r'), Some(&2));
        assert_eq!(counts.len(), 4);
    }

    #[test]
    fn alphabet_has_spanish_layout() {
        assert_eq!(ALPHABET.chars().count(), 27);
        assert!(is_allowed_letter('ñ'));
        assert!(!is_allowed_letter('á'));
        assert!(!is_allowed_letter('A'));
    }

    #[test]
    fn word_display_and_parse() {
        let word: Word = "Casa".parse().unwrap();
        assert_eq!(format!("{word}"), "casa");
    }
}
