//! Palabrle
//!
//! Spanish Wordle with variable word length (3 to 10 letters). Target words
//! come from a language model and guesses are checked by it, so the game
//! carries no dictionary.
//!
//! # Quick Start
//!
//! ```rust
//! use palabrle::core::{LetterStatus, Word, score};
//!
//! let target = Word::new("perro").unwrap();
//! let guess = Word::new("rorro").unwrap();
//!
//! let result = score(&target, &guess).unwrap();
//! assert_eq!(result.to_emoji(), "⬛⬛🟩🟩🟩");
//! assert_eq!(result.statuses()[2], LetterStatus::Correct);
//! ```

// Core domain types and scoring
pub mod core;

// Rounds, the controller and its events
pub mod game;

// Word generation and validation backends
pub mod oracle;

// HTTP word service
pub mod server;

// Command-line and environment configuration
pub mod config;

// Logging setup
pub mod telemetry;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
