//! Simple interactive CLI mode
//!
//! Line-based game without the full-screen UI: type a word and press Enter.

use crate::game::{GameController, GameError};
use crate::oracle::Oracle;
use crate::output::{Tone, error_message, print_board, print_event, print_keyboard, print_message};
use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use tokio::runtime::Runtime;

/// One line of player input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    Guess(String),
    New,
    Length(usize),
    Quit,
    Help,
}

impl LineCommand {
    /// Parse a trimmed input line
    ///
    /// # Errors
    /// Returns a message for unknown `:` commands and bad `:len` arguments.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            return Ok(Self::Guess(line.to_lowercase()));
        };

        let mut parts = command.split_whitespace();
        match parts.next() {
            Some("new" | "n") => Ok(Self::New),
            Some("quit" | "q" | "exit") => Ok(Self::Quit),
            Some("help" | "h" | "?") => Ok(Self::Help),
            Some("len" | "length") => parts
                .next()
                .and_then(|n| n.parse().ok())
                .map(Self::Length)
                .ok_or_else(|| "Uso: :len N".to_string()),
            _ => Err(format!("Comando desconocido: {line}")),
        }
    }
}

/// Whether the loop keeps reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

fn print_help() {
    println!("Escribe una palabra y pulsa Enter.");
    println!("Comandos: :new (nueva partida), :len N (longitud 3-10), :quit (salir)\n");
}

fn print_error(error: &GameError) {
    if let Some(text) = error_message(error) {
        let tone = if error.is_user_error() {
            Tone::Warning
        } else {
            Tone::Error
        };
        print_message(&text, tone);
    }
}

fn flush_events(game: &mut GameController) {
    for event in game.drain_events() {
        print_event(&event);
    }
}

async fn enter_guess<O>(game: &mut GameController, oracle: &O, guess: &str) -> Result<(), GameError>
where
    O: Oracle + ?Sized,
{
    if game.round().is_over() {
        return Err(GameError::RoundOver);
    }

    // Line mode retypes the whole row every time
    for _ in 0..game.round().input().len() {
        game.delete_char()?;
    }

    let need = game.round().word_length();
    if guess.chars().count() > need {
        print_message(&format!("La palabra debe tener {need} letras."), Tone::Warning);
        return Ok(());
    }
    for c in guess.chars() {
        game.insert_char(c)?;
    }
    game.submit_with(oracle).await
}

/// Apply one command to the game, printing whatever it produced
pub async fn step<O>(game: &mut GameController, oracle: &O, command: LineCommand) -> Flow
where
    O: Oracle + ?Sized,
{
    let result = match command {
        LineCommand::Quit => return Flow::Quit,
        LineCommand::Help => {
            print_help();
            return Flow::Continue;
        }
        LineCommand::New => {
            let length = game.round().word_length();
            game.reset_with(oracle, length).await
        }
        LineCommand::Length(length) => game.reset_with(oracle, length).await,
        LineCommand::Guess(guess) if guess.is_empty() => return Flow::Continue,
        LineCommand::Guess(guess) => enter_guess(game, oracle, &guess).await,
    };

    flush_events(game);
    if let Err(e) = &result {
        print_error(e);
    }

    let snapshot = game.snapshot();
    println!();
    print_board(&snapshot);
    println!();
    print_keyboard(&snapshot);
    println!();

    if game.round().is_over() {
        println!("{}", ":new para jugar otra vez, :quit para salir".bright_black());
    }
    Flow::Continue
}

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error on I/O failure reading stdin or for an invalid initial
/// word length.
pub fn run_simple<O>(oracle: &O, runtime: &Runtime, length: usize) -> Result<()>
where
    O: Oracle + ?Sized,
{
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                     Palabrle - Modo simple                   ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    print_help();

    let mut game = GameController::new(length)?;
    runtime.block_on(step(&mut game, oracle, LineCommand::Length(length)));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} ", ">".cyan().bold());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let command = match LineCommand::parse(&line?) {
            Ok(command) => command,
            Err(message) => {
                print_message(&message, Tone::Warning);
                continue;
            }
        };

        if runtime.block_on(step(&mut game, oracle, command)) == Flow::Quit {
            break;
        }
    }

    println!("\n👋 ¡Hasta luego!\n");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Outcome;
    use crate::oracle::testing::ScriptedOracle;

    #[test]
    fn parse_commands() {
        assert_eq!(LineCommand::parse(" Perro "), Ok(LineCommand::Guess("perro".into())));
        assert_eq!(LineCommand::parse(":new"), Ok(LineCommand::New));
        assert_eq!(LineCommand::parse(":len 7"), Ok(LineCommand::Length(7)));
        assert_eq!(LineCommand::parse(":q"), Ok(LineCommand::Quit));
        assert!(LineCommand::parse(":len").is_err());
        assert!(LineCommand::parse(":len siete").is_err());
        assert!(LineCommand::parse(":bogus").is_err());
    }

    #[tokio::test]
    async fn guesses_until_won() {
        let oracle = ScriptedOracle::with_words(&["gato"]);
        let mut game = GameController::new(4).unwrap();
        step(&mut game, &oracle, LineCommand::Length(4)).await;

        step(&mut game, &oracle, LineCommand::Guess("casa".into())).await;
        assert_eq!(game.round().attempts().len(), 1);

        step(&mut game, &oracle, LineCommand::Guess("gato".into())).await;
        assert_eq!(game.round().outcome(), Outcome::Won);
    }

    #[tokio::test]
    async fn rejected_row_is_retyped_on_next_line() {
        let oracle = ScriptedOracle::with_words(&["gato"]);
        oracle.push_verdict(Ok(false));
        let mut game = GameController::new(4).unwrap();
        step(&mut game, &oracle, LineCommand::Length(4)).await;

        step(&mut game, &oracle, LineCommand::Guess("xxxx".into())).await;
        assert_eq!(game.round().input_text(), "xxxx");
        step(&mut game, &oracle, LineCommand::Guess("pato".into())).await;
        assert_eq!(game.round().attempts().len(), 1);
        assert_eq!(game.round().attempts()[0].guess.text(), "pato");
    }

    #[tokio::test]
    async fn overlong_guess_is_not_submitted() {
        let oracle = ScriptedOracle::with_words(&["sol"]);
        let mut game = GameController::new(3).unwrap();
        step(&mut game, &oracle, LineCommand::Length(3)).await;

        step(&mut game, &oracle, LineCommand::Guess("perro".into())).await;
        assert_eq!(oracle.validate_count(), 0);
        assert!(game.round().attempts().is_empty());
    }

    #[tokio::test]
    async fn length_change_starts_new_round() {
        let oracle = ScriptedOracle::with_words(&["gato", "ventana"]);
        let mut game = GameController::new(4).unwrap();
        step(&mut game, &oracle, LineCommand::Length(4)).await;
        step(&mut game, &oracle, LineCommand::Length(7)).await;
        assert_eq!(game.round().word_length(), 7);
        assert_eq!(game.round().target().map(|w| w.text()), Some("ventana"));

        // Out of range keeps the current round
        step(&mut game, &oracle, LineCommand::Length(11)).await;
        assert_eq!(game.round().word_length(), 7);
    }

    #[tokio::test]
    async fn quit_stops_loop() {
        let oracle = ScriptedOracle::new();
        let mut game = GameController::new(5).unwrap();
        assert_eq!(step(&mut game, &oracle, LineCommand::Quit).await, Flow::Quit);
    }
}
