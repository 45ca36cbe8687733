//! Events and snapshots for presentation layers
//!
//! The controller never draws anything. It queues [`GameEvent`]s and exposes
//! a [`Snapshot`] of the board, and any front end (terminal UI, line mode,
//! tests) renders from those.

use super::round::{MAX_ATTEMPTS, Outcome, RoundState};
use crate::core::{LetterStatus, ScoreResult};
use serde::Serialize;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// Target installed; typing and submitting are open
    WordReady { length: usize },
    /// Word source failed; a fixed word was used instead
    FallbackWord { length: usize, reason: String },
    /// Word source repeated a word from this session; asking again
    DuplicateWord { word: String, retry: usize },
    InvalidCharRejected { ch: char },
    IncompleteGuess { have: usize, need: usize },
    /// Validator said the guess is not a word
    GuessRejected { guess: String },
    /// Validator could not be reached; the guess was not counted
    OracleUnavailable { detail: String },
    GuessScored {
        guess: String,
        result: ScoreResult,
        keyboard: Vec<(char, LetterStatus)>,
    },
    RoundWon { attempts: usize },
    RoundLost { target: String },
}

impl GameEvent {
    /// Mirror the event into the log at a level matching its severity
    pub fn log(&self) {
        match self {
            Self::FallbackWord { length, reason } => {
                warn!(length, %reason, "word source failed, using fallback word");
            }
            Self::OracleUnavailable { detail } => {
                error!(%detail, "word validator unavailable");
            }
            Self::RoundWon { attempts } => info!(attempts, "round won"),
            Self::RoundLost { .. } => info!("round lost"),
            Self::DuplicateWord { retry, .. } => debug!(retry, "duplicate target word, retrying"),
            other => debug!(event = ?other, "game event"),
        }
    }
}

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub letter: Option<char>,
    pub status: LetterStatus,
}

/// Render-ready view of the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub word_length: usize,
    /// `MAX_ATTEMPTS` rows of `word_length` cells: scored guesses, then the
    /// row being typed, then empty rows
    pub grid: Vec<Vec<Cell>>,
    pub keyboard: Vec<Vec<(char, LetterStatus)>>,
    pub outcome: Outcome,
    pub remaining_attempts: usize,
    pub reveal: Option<String>,
    pub waiting_for_word: bool,
    pub validating: bool,
}

impl Snapshot {
    pub(crate) fn capture(round: &RoundState, waiting_for_word: bool, validating: bool) -> Self {
        let word_length = round.word_length();
        let blank = Cell {
            letter: None,
            status: LetterStatus::Unknown,
        };

        let mut grid: Vec<Vec<Cell>> = round
            .attempts()
            .iter()
            .map(|attempt| {
                attempt
                    .guess
                    .chars()
                    .iter()
                    .zip(attempt.result.statuses())
                    .map(|(&letter, &status)| Cell {
                        letter: Some(letter),
                        status,
                    })
                    .collect()
            })
            .collect();

        if grid.len() < MAX_ATTEMPTS {
            let mut row: Vec<Cell> = round
                .input()
                .iter()
                .map(|&letter| Cell {
                    letter: Some(letter),
                    status: LetterStatus::Unknown,
                })
                .collect();
            row.resize(word_length, blank);
            grid.push(row);
        }
        grid.resize(MAX_ATTEMPTS, vec![blank; word_length]);

        Self {
            word_length,
            grid,
            keyboard: round.key_status().keyboard_rows(),
            outcome: round.outcome(),
            remaining_attempts: round.remaining_attempts(),
            reveal: round.reveal().map(|w| w.text().to_string()),
            waiting_for_word,
            validating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;

    #[test]
    fn snapshot_grid_shape() {
        let mut round = RoundState::with_target(Word::new("sol").unwrap());
        for c in "pan".chars() {
            round.insert_char(c).unwrap();
        }
        let guess = round.current_guess().unwrap();
        round.apply_guess(guess).unwrap();
        round.insert_char('s').unwrap();

        let snap = Snapshot::capture(&round, false, false);
        assert_eq!(snap.grid.len(), MAX_ATTEMPTS);
        assert!(snap.grid.iter().all(|row| row.len() == 3));
        assert_eq!(snap.grid[0][0].letter, Some('p'));
        assert_eq!(snap.grid[0][0].status, LetterStatus::Absent);
        assert_eq!(snap.grid[1][0].letter, Some('s'));
        assert_eq!(snap.grid[1][1].letter, None);
        assert_eq!(snap.grid[5][2].letter, None);
        assert_eq!(snap.remaining_attempts, MAX_ATTEMPTS - 1);
        assert!(snap.reveal.is_none());
    }

    #[test]
    fn events_serialize_tagged() {
        let event = GameEvent::RoundLost {
            target: "perro".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "round_lost");
        assert_eq!(json["target"], "perro");
    }
}
