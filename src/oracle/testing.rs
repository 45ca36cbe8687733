//! Scripted oracle for tests
//!
//! Answers are queued up front and handed out in order; every call is
//! recorded so tests can assert what was asked.

use super::{OracleError, WordSource, WordValidator, check_candidate, check_length};
use crate::core::Word;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub(crate) struct ScriptedOracle {
    words: Mutex<VecDeque<Result<Word, OracleError>>>,
    verdicts: Mutex<VecDeque<Result<bool, OracleError>>>,
    pub(crate) generate_calls: Mutex<Vec<usize>>,
    pub(crate) validate_calls: Mutex<Vec<String>>,
}

impl ScriptedOracle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_words(words: &[&str]) -> Self {
        let oracle = Self::new();
        for w in words {
            oracle.push_word(w);
        }
        oracle
    }

    pub(crate) fn push_word(&self, word: &str) {
        self.push_word_result(Ok(Word::new(word).expect("scripted word must be valid")));
    }

    pub(crate) fn push_word_result(&self, result: Result<Word, OracleError>) {
        self.words.lock().unwrap().push_back(result);
    }

    pub(crate) fn push_verdict(&self, result: Result<bool, OracleError>) {
        self.verdicts.lock().unwrap().push_back(result);
    }

    pub(crate) fn generate_count(&self) -> usize {
        self.generate_calls.lock().unwrap().len()
    }

    pub(crate) fn validate_count(&self) -> usize {
        self.validate_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl WordSource for ScriptedOracle {
    async fn generate_word(&self, length: usize) -> Result<Word, OracleError> {
        check_length(length)?;
        self.generate_calls.lock().unwrap().push(length);
        self.words
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(OracleError::UpstreamUnavailable("script exhausted".into())))
    }
}

#[async_trait]
impl WordValidator for ScriptedOracle {
    async fn is_valid_word(&self, word: &str) -> Result<bool, OracleError> {
        check_candidate(word)?;
        self.validate_calls.lock().unwrap().push(word.to_string());
        // Unscripted validations accept the word
        self.verdicts.lock().unwrap().pop_front().unwrap_or(Ok(true))
    }
}
