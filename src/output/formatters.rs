//! Player-facing text shared by the terminal front ends

use crate::core::{MAX_WORD_LENGTH, MIN_WORD_LENGTH, ScoreResult};
use crate::game::{GameError, GameEvent};

/// Severity of a message line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

/// Emoji row followed by the guess, e.g. `🟩⬛🟨 SOL`
#[must_use]
pub fn score_line(guess: &str, result: &ScoreResult) -> String {
    format!("{} {}", result.to_emoji(), guess.to_uppercase())
}

/// Text shown to the player for an event, if any
#[must_use]
pub fn event_message(event: &GameEvent) -> Option<(String, Tone)> {
    let message = match event {
        GameEvent::WordReady { length } => (
            format!("Nueva palabra de {length} letras. ¡Suerte!"),
            Tone::Info,
        ),
        GameEvent::FallbackWord { .. } => (
            "⚠️ No se pudo obtener una palabra nueva; usando una de reserva.".to_string(),
            Tone::Warning,
        ),
        GameEvent::InvalidCharRejected { ch } => {
            (format!("'{ch}' no es una letra válida."), Tone::Warning)
        }
        GameEvent::IncompleteGuess { .. } => (
            "Completa la palabra antes de enviar.".to_string(),
            Tone::Warning,
        ),
        GameEvent::GuessRejected { .. } => (
            "❌ Esa palabra no está en la DRAE.".to_string(),
            Tone::Error,
        ),
        GameEvent::OracleUnavailable { .. } => (
            "❌ No se pudo validar la palabra. Inténtalo de nuevo.".to_string(),
            Tone::Error,
        ),
        GameEvent::RoundWon { attempts } => (
            format!("🎉 ¡Ganaste en {attempts} {}!", plural(*attempts)),
            Tone::Success,
        ),
        GameEvent::RoundLost { target } => (
            format!("La palabra era: {}", target.to_uppercase()),
            Tone::Error,
        ),
        GameEvent::DuplicateWord { .. } | GameEvent::GuessScored { .. } => return None,
    };
    Some(message)
}

/// Text for errors that did not already produce an event
#[must_use]
pub fn error_message(error: &GameError) -> Option<String> {
    match error {
        GameError::InvalidLength(_) => Some(format!(
            "⚠️ Selecciona un número entre {MIN_WORD_LENGTH} y {MAX_WORD_LENGTH}."
        )),
        GameError::RowFull => Some("La fila está completa.".to_string()),
        GameError::SubmissionInFlight => Some("Espera un momento...".to_string()),
        GameError::RoundOver => Some("La partida terminó. Empieza una nueva.".to_string()),
        GameError::NoTarget => Some("Todavía no hay palabra; espera un momento.".to_string()),
        GameError::Score(e) => Some(e.to_string()),
        GameError::InvalidCharacter(_)
        | GameError::EmptyInput
        | GameError::IncompleteGuess { .. }
        | GameError::RejectedGuess(_) => None,
    }
}

const fn plural(attempts: usize) -> &'static str {
    if attempts == 1 { "intento" } else { "intentos" }
}
