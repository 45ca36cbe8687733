//! Fixed words used when the word source cannot deliver

use crate::core::{MIN_WORD_LENGTH, Word};

/// One word per playable length, shortest first
const FALLBACK_WORDS: [&str; 8] = [
    "sol",
    "gato",
    "perro",
    "camino",
    "ventana",
    "elefante",
    "chocolate",
    "murcielago",
];

/// Fallback target for a round of `length` letters
///
/// Returns `None` only for lengths outside 3..=10.
#[must_use]
pub fn fallback_word(length: usize) -> Option<Word> {
    let index = length.checked_sub(MIN_WORD_LENGTH)?;
    FALLBACK_WORDS.get(index).and_then(|w| Word::new(*w).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MAX_WORD_LENGTH;

    #[test]
    fn every_length_has_a_fallback() {
        for length in MIN_WORD_LENGTH..=MAX_WORD_LENGTH {
            let word = fallback_word(length).unwrap();
            assert_eq!(word.len(), length);
        }
        assert_eq!(fallback_word(5).unwrap().text(), "perro");
    }

    #[test]
    fn out_of_range_has_none() {
        assert!(fallback_word(2).is_none());
        assert!(fallback_word(11).is_none());
    }
}
