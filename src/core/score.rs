//! Guess scoring and keyboard status aggregation
//!
//! Scoring follows Wordle's feedback rules with proper handling of repeated
//! letters: exact matches consume target letters before any letter can be
//! marked present elsewhere.

use super::{LetterStatus, Word};
use rustc_hash::FxHashMap;
use serde::Serialize;
use thiserror::Error;

/// Scorer contract violation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("cannot score a {guess}-letter guess against a {target}-letter target")]
    LengthMismatch { target: usize, guess: usize },
}

/// Per-position feedback for one guess, aligned with the guess's letters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ScoreResult(Vec<LetterStatus>);

impl ScoreResult {
    /// Statuses in guess order
    #[inline]
    #[must_use]
    pub fn statuses(&self) -> &[LetterStatus] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if every position is correct
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.0.iter().all(|&s| s == LetterStatus::Correct)
    }

    #[must_use]
    pub fn count(&self, status: LetterStatus) -> usize {
        self.0.iter().filter(|&&s| s == status).count()
    }

    /// Render as emoji squares, e.g. "🟨⬛🟩🟩🟩"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|s| s.emoji()).collect()
    }
}

/// Score `guess` against `target`
///
/// # Algorithm
/// 1. Count each letter of the target
/// 2. First pass: mark exact position matches as correct and consume them
/// 3. Second pass: for every other position, mark present while the letter
///    still has unconsumed occurrences, otherwise absent
///
/// The correct pass must run to completion before the second pass starts,
/// otherwise an early misplaced letter can steal an occurrence that a later
/// exact match needs.
///
/// # Errors
/// Returns `ScoreError::LengthMismatch` if the words differ in length.
///
/// # Examples
/// ```
/// use palabrle::core::{score, LetterStatus::*, Word};
///
/// let target = Word::new("perro").unwrap();
/// let guess = Word::new("rorro").unwrap();
/// let result = score(&target, &guess).unwrap();
///
/// assert_eq!(result.statuses(), &[Absent, Absent, Correct, Correct, Correct]);
/// ```
pub fn score(target: &Word, guess: &Word) -> Result<ScoreResult, ScoreError> {
    if target.len() != guess.len() {
        return Err(ScoreError::LengthMismatch {
            target: target.len(),
            guess: guess.len(),
        });
    }

    let mut result = vec![LetterStatus::Absent; guess.len()];
    let mut remaining = target.char_counts();

    for (i, (&g, &t)) in guess.chars().iter().zip(target.chars()).enumerate() {
        if g == t {
            result[i] = LetterStatus::Correct;
            if let Some(count) = remaining.get_mut(&g) {
                *count -= 1;
            }
        }
    }

    for (i, &g) in guess.chars().iter().enumerate() {
        if result[i] == LetterStatus::Correct {
            continue;
        }
        if let Some(count) = remaining.get_mut(&g)
            && *count > 0
        {
            result[i] = LetterStatus::Present;
            *count -= 1;
        }
    }

    Ok(ScoreResult(result))
}

/// Keyboard rows of the on-screen keyboard
pub const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjklñ", "zxcvbnm"];

/// Best-known status per letter across all guesses of a round
///
/// A key's status only ever moves up in precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyStatus {
    keys: FxHashMap<char, LetterStatus>,
}

impl KeyStatus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status of a letter, `Unknown` if never guessed
    #[must_use]
    pub fn get(&self, letter: char) -> LetterStatus {
        self.keys.get(&letter).copied().unwrap_or_default()
    }

    /// Fold one scored guess into the key map
    ///
    /// # Panics
    /// Panics in debug mode if `result` is not aligned with `guess`
    pub fn record(&mut self, guess: &Word, result: &ScoreResult) {
        debug_assert_eq!(guess.len(), result.len(), "score not aligned with guess");

        for (&letter, &status) in guess.chars().iter().zip(result.statuses()) {
            let current = self.keys.entry(letter).or_default();
            if status.supersedes(*current) {
                *current = status;
            }
        }
    }

    /// Keyboard rows with each key's status, for rendering
    #[must_use]
    pub fn keyboard_rows(&self) -> Vec<Vec<(char, LetterStatus)>> {
        KEYBOARD_ROWS
            .iter()
            .map(|row| row.chars().map(|c| (c, self.get(c))).collect())
            .collect()
    }

    /// Letters with a known status, in keyboard order
    #[must_use]
    pub fn known(&self) -> Vec<(char, LetterStatus)> {
        KEYBOARD_ROWS
            .iter()
            .flat_map(|row| row.chars())
            .filter_map(|c| {
                let status = self.get(c);
                (status != LetterStatus::Unknown).then_some((c, status))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::LetterStatus::{Absent, Correct, Present, Unknown};
    use super::*;
    use proptest::prelude::*;

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    #[test]
    fn score_all_correct() {
        let result = score(&word("gato"), &word("gato")).unwrap();
        assert!(result.is_perfect());
        assert_eq!(result.count(Correct), 4);
    }

    #[test]
    fn score_all_absent() {
        let result = score(&word("sol"), &word("pan")).unwrap();
        assert_eq!(result.statuses(), &[Absent, Absent, Absent]);
        assert!(!result.is_perfect());
    }

    #[test]
    fn score_repeated_letters_exact_matches_win() {
        // Both target r's are consumed by the exact matches at 2 and 3,
        // so the leading r has nothing left to be present against.
        let result = score(&word("perro"), &word("rorro")).unwrap();
        assert_eq!(result.statuses(), &[Absent, Absent, Correct, Correct, Correct]);
    }

    #[test]
    fn score_repeated_letters_only_as_many_as_target() {
        // Target has one 'a'; only the first misplaced 'a' is present
        let result = score(&word("gato"), &word("alas")).unwrap();
        assert_eq!(result.statuses(), &[Present, Absent, Absent, Absent]);
    }

    #[test]
    fn score_present_then_correct_same_letter() {
        // ROBOT vs FLOOR shape: first o misplaced, second o exact
        let result = score(&word("floor"), &word("robot")).unwrap();
        assert_eq!(result.statuses(), &[Present, Present, Absent, Correct, Absent]);
    }

    #[test]
    fn score_handles_enye() {
        let result = score(&word("año"), &word("ñoa")).unwrap();
        assert_eq!(result.statuses(), &[Present, Present, Present]);
    }

    #[test]
    fn score_length_mismatch() {
        assert_eq!(
            score(&word("perro"), &word("gato")),
            Err(ScoreError::LengthMismatch {
                target: 5,
                guess: 4
            })
        );
    }

    #[test]
    fn score_to_emoji() {
        let result = score(&word("perro"), &word("rorro")).unwrap();
        assert_eq!(result.to_emoji(), "⬛⬛🟩🟩🟩");
    }

    #[test]
    fn key_status_never_downgrades() {
        let target = word("perro");
        let mut keys = KeyStatus::new();

        let first = word("pasto");
        keys.record(&first, &score(&target, &first).unwrap());
        assert_eq!(keys.get('p'), Correct);
        assert_eq!(keys.get('o'), Correct);
        assert_eq!(keys.get('a'), Absent);

        // p misplaced now, must stay correct
        let second = word("sapos");
        keys.record(&second, &score(&target, &second).unwrap());
        assert_eq!(keys.get('p'), Correct);
        assert_eq!(keys.get('o'), Correct);
        assert_eq!(keys.get('z'), Unknown);
    }

    #[test]
    fn key_status_duplicate_letter_in_one_guess_keeps_best() {
        // Only the r at position 2 scores; the key keeps the best of the four
        let target = word("cura");
        let guess = word("rrrr");
        let result = score(&target, &guess).unwrap();
        let mut keys = KeyStatus::new();
        keys.record(&guess, &result);
        assert_eq!(keys.get('r'), Correct);
    }

    #[test]
    fn keyboard_rows_layout() {
        let keys = KeyStatus::new();
        let rows = keys.keyboard_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][9], ('ñ', Unknown));
        assert!(keys.known().is_empty());
    }

    fn word_pair() -> impl Strategy<Value = (Word, Word)> {
        (3usize..=10).prop_flat_map(|len| {
            let letters = proptest::sample::select(vec!['a', 'e', 'r', 'o', 'ñ', 's']);
            (
                proptest::collection::vec(letters.clone(), len),
                proptest::collection::vec(letters, len),
            )
                .prop_map(|(t, g)| {
                    (
                        Word::new(t.into_iter().collect::<String>()).unwrap(),
                        Word::new(g.into_iter().collect::<String>()).unwrap(),
                    )
                })
        })
    }

    proptest! {
        #[test]
        fn prop_one_status_per_position((target, guess) in word_pair()) {
            let result = score(&target, &guess).unwrap();
            prop_assert_eq!(result.len(), guess.len());
            prop_assert!(!result.statuses().contains(&Unknown));
        }

        #[test]
        fn prop_hits_never_exceed_target_occurrences((target, guess) in word_pair()) {
            let result = score(&target, &guess).unwrap();
            for &letter in guess.chars() {
                let hits = guess
                    .chars()
                    .iter()
                    .zip(result.statuses())
                    .filter(|&(&c, &s)| c == letter && matches!(s, Correct | Present))
                    .count();
                prop_assert!(hits <= target.positions_of(letter).len());
            }
        }

        #[test]
        fn prop_scoring_is_idempotent((target, guess) in word_pair()) {
            prop_assert_eq!(score(&target, &guess).unwrap(), score(&target, &guess).unwrap());
        }

        #[test]
        fn prop_correct_iff_same_letter((target, guess) in word_pair()) {
            let result = score(&target, &guess).unwrap();
            for (i, &status) in result.statuses().iter().enumerate() {
                prop_assert_eq!(status == Correct, target.char_at(i) == guess.char_at(i));
            }
        }

        #[test]
        fn prop_key_status_monotonic(
            (target, first) in word_pair(),
            seed in proptest::collection::vec(0usize..6, 10),
        ) {
            let letters = ['a', 'e', 'r', 'o', 'ñ', 's'];
            let second: String = seed.iter().cycle().take(target.len()).map(|&i| letters[i]).collect();
            let second = Word::new(second).unwrap();
            let first = if first.len() == target.len() { first } else { target.clone() };

            let mut keys = KeyStatus::new();
            keys.record(&first, &score(&target, &first).unwrap());
            let before: Vec<_> = letters.iter().map(|&c| keys.get(c)).collect();
            keys.record(&second, &score(&target, &second).unwrap());
            for (i, &c) in letters.iter().enumerate() {
                prop_assert!(keys.get(c) >= before[i]);
            }
        }
    }
}
