//! Round orchestration around the word oracle
//!
//! The controller is a synchronous state machine. Whenever it needs the
//! oracle it hands back a [`Request`] and remembers it as pending; the caller
//! performs the I/O however it likes and feeds the [`Response`] back through
//! [`GameController::handle`]. Every request carries a [`SessionToken`], so
//! a response that arrives after it was superseded is recognised and dropped.

use super::event::{GameEvent, Snapshot};
use super::fallback::fallback_word;
use super::round::{Outcome, RoundState};
use super::GameError;
use crate::core::Word;
use crate::oracle::OracleError;
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::{debug, warn};

/// Times the controller re-asks for a word it has already served this
/// session before accepting the repeat
pub const MAX_DUPLICATE_RETRIES: usize = 5;

/// Identifies one outstanding oracle call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SessionToken(u64);

/// Oracle work the caller must perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    FetchWord { token: SessionToken, length: usize },
    Validate { token: SessionToken, guess: Word },
}

impl Request {
    #[must_use]
    pub const fn token(&self) -> SessionToken {
        match self {
            Self::FetchWord { token, .. } | Self::Validate { token, .. } => *token,
        }
    }
}

/// Result of a [`Request`], handed back to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    WordFetched {
        token: SessionToken,
        result: Result<Word, OracleError>,
    },
    Validated {
        token: SessionToken,
        result: Result<bool, OracleError>,
    },
}

impl Response {
    #[must_use]
    pub const fn token(&self) -> SessionToken {
        match self {
            Self::WordFetched { token, .. } | Self::Validated { token, .. } => *token,
        }
    }
}

#[derive(Debug, Clone)]
enum Pending {
    FetchWord {
        token: SessionToken,
        length: usize,
        retries: usize,
    },
    Validate {
        token: SessionToken,
        guess: Word,
    },
}

impl Pending {
    const fn token(&self) -> SessionToken {
        match self {
            Self::FetchWord { token, .. } | Self::Validate { token, .. } => *token,
        }
    }
}

/// Drives rounds of play for one player session
#[derive(Debug)]
pub struct GameController {
    round: RoundState,
    pending: Option<Pending>,
    used_words: FxHashSet<String>,
    next_token: u64,
    events: Vec<GameEvent>,
}

impl GameController {
    /// Create a controller with an empty round of `word_length` letters
    ///
    /// Call [`GameController::start_round`] to fetch the first target.
    ///
    /// # Errors
    /// `GameError::InvalidLength` outside 3..=10.
    pub fn new(word_length: usize) -> Result<Self, GameError> {
        Ok(Self {
            round: RoundState::new(word_length)?,
            pending: None,
            used_words: FxHashSet::default(),
            next_token: 0,
            events: Vec::new(),
        })
    }

    fn issue_token(&mut self) -> SessionToken {
        self.next_token += 1;
        SessionToken(self.next_token)
    }

    fn emit(&mut self, event: GameEvent) {
        event.log();
        self.events.push(event);
    }

    /// Begin a new round of `length` letters
    ///
    /// Any outstanding request is superseded; its response will be ignored.
    /// The board is cleared immediately and typing is accepted while the
    /// word is being fetched.
    ///
    /// # Errors
    /// `GameError::InvalidLength` outside 3..=10; the current round is kept.
    pub fn start_round(&mut self, length: usize) -> Result<Request, GameError> {
        self.round.reset(length)?;

        let token = self.issue_token();
        if let Some(previous) = self.pending.take() {
            debug!(previous = ?previous.token(), "superseding outstanding request");
        }
        self.pending = Some(Pending::FetchWord {
            token,
            length,
            retries: 0,
        });

        Ok(Request::FetchWord { token, length })
    }

    /// Type a letter into the current row
    ///
    /// # Errors
    /// `SubmissionInFlight` while a guess is being validated, otherwise
    /// whatever [`RoundState::insert_char`] reports.
    pub fn insert_char(&mut self, c: char) -> Result<(), GameError> {
        if self.is_validating() {
            return Err(GameError::SubmissionInFlight);
        }

        let result = self.round.insert_char(c);
        if let Err(GameError::InvalidCharacter(ch)) = result {
            self.emit(GameEvent::InvalidCharRejected { ch });
        }
        result
    }

    /// Remove the last typed letter
    ///
    /// # Errors
    /// `SubmissionInFlight` while a guess is being validated, otherwise
    /// whatever [`RoundState::delete_char`] reports.
    pub fn delete_char(&mut self) -> Result<char, GameError> {
        if self.is_validating() {
            return Err(GameError::SubmissionInFlight);
        }
        self.round.delete_char()
    }

    /// Submit the current row for validation
    ///
    /// Nothing in the round changes until the validation response arrives.
    ///
    /// # Errors
    /// `SubmissionInFlight` while any request is outstanding, `IncompleteGuess`
    /// for a short row, `RoundOver` after the round ended.
    pub fn submit(&mut self) -> Result<Request, GameError> {
        if self.pending.is_some() {
            return Err(GameError::SubmissionInFlight);
        }

        let guess = match self.round.current_guess() {
            Ok(guess) => guess,
            Err(GameError::IncompleteGuess { have, need }) => {
                self.emit(GameEvent::IncompleteGuess { have, need });
                return Err(GameError::IncompleteGuess { have, need });
            }
            Err(e) => return Err(e),
        };

        let token = self.issue_token();
        self.pending = Some(Pending::Validate {
            token,
            guess: guess.clone(),
        });
        Ok(Request::Validate { token, guess })
    }

    /// Feed back the result of a [`Request`]
    ///
    /// Returns a follow-up request when the word source must be asked again
    /// (it repeated a word from this session). Responses that do not match
    /// the outstanding request are discarded.
    ///
    /// # Errors
    /// `RejectedGuess` when the validator refused the guess or could not be
    /// reached; the typed row is kept so the player can edit it.
    pub fn handle(&mut self, response: Response) -> Result<Option<Request>, GameError> {
        let Some(pending) = self.pending.take() else {
            debug!(token = ?response.token(), "discarding response with nothing pending");
            return Ok(None);
        };
        if pending.token() != response.token() {
            debug!(
                expected = ?pending.token(),
                got = ?response.token(),
                "discarding stale response"
            );
            self.pending = Some(pending);
            return Ok(None);
        }

        match (pending, response) {
            (
                Pending::FetchWord {
                    length, retries, ..
                },
                Response::WordFetched { result, .. },
            ) => self.on_word(length, retries, result),
            (Pending::Validate { guess, .. }, Response::Validated { result, .. }) => {
                self.on_verdict(guess, result).map(|()| None)
            }
            (pending, response) => {
                warn!(?response, "response kind does not match pending request");
                self.pending = Some(pending);
                Ok(None)
            }
        }
    }

    fn on_word(
        &mut self,
        length: usize,
        retries: usize,
        result: Result<Word, OracleError>,
    ) -> Result<Option<Request>, GameError> {
        let word = match result {
            Ok(word) if word.len() == length => word,
            Ok(word) => {
                return self.use_fallback(
                    length,
                    format!("source returned {}-letter word for {length}", word.len()),
                );
            }
            Err(e) => return self.use_fallback(length, e.to_string()),
        };

        if self.used_words.contains(word.text()) {
            if retries < MAX_DUPLICATE_RETRIES {
                let retry = retries + 1;
                self.emit(GameEvent::DuplicateWord {
                    word: word.text().to_string(),
                    retry,
                });
                let token = self.issue_token();
                self.pending = Some(Pending::FetchWord {
                    token,
                    length,
                    retries: retry,
                });
                return Ok(Some(Request::FetchWord { token, length }));
            }
            warn!(retries, "word source keeps repeating, accepting duplicate");
        }

        self.install(word)?;
        Ok(None)
    }

    fn use_fallback(
        &mut self,
        length: usize,
        reason: String,
    ) -> Result<Option<Request>, GameError> {
        let word = fallback_word(length).ok_or(GameError::InvalidLength(length))?;
        self.emit(GameEvent::FallbackWord { length, reason });
        self.install(word)?;
        Ok(None)
    }

    fn install(&mut self, word: Word) -> Result<(), GameError> {
        self.used_words.insert(word.text().to_string());
        self.round.set_target(word)?;
        self.emit(GameEvent::WordReady {
            length: self.round.word_length(),
        });
        Ok(())
    }

    fn on_verdict(
        &mut self,
        guess: Word,
        result: Result<bool, OracleError>,
    ) -> Result<(), GameError> {
        match result {
            Ok(true) => {}
            Ok(false) => {
                self.emit(GameEvent::GuessRejected {
                    guess: guess.text().to_string(),
                });
                return Err(GameError::RejectedGuess(guess.text().to_string()));
            }
            Err(e) => {
                self.emit(GameEvent::OracleUnavailable {
                    detail: e.to_string(),
                });
                return Err(GameError::RejectedGuess(guess.text().to_string()));
            }
        }

        let attempt = self.round.apply_guess(guess)?;
        self.emit(GameEvent::GuessScored {
            guess: attempt.guess.text().to_string(),
            result: attempt.result,
            keyboard: self.round.key_status().known(),
        });

        match self.round.outcome() {
            Outcome::Won => self.emit(GameEvent::RoundWon {
                attempts: self.round.attempts().len(),
            }),
            Outcome::Lost => {
                let target = self
                    .round
                    .target()
                    .map(|w| w.text().to_string())
                    .unwrap_or_default();
                self.emit(GameEvent::RoundLost { target });
            }
            Outcome::InProgress => {}
        }
        Ok(())
    }

    /// Take every event queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub const fn round(&self) -> &RoundState {
        &self.round
    }

    #[must_use]
    pub fn is_fetching(&self) -> bool {
        matches!(self.pending, Some(Pending::FetchWord { .. }))
    }

    #[must_use]
    pub fn is_validating(&self) -> bool {
        matches!(self.pending, Some(Pending::Validate { .. }))
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.round, self.is_fetching(), self.is_validating())
    }
}
