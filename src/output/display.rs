//! Coloured board printing for line mode

use super::formatters::{Tone, event_message, score_line};
use crate::core::LetterStatus;
use crate::game::{Cell, GameEvent, Snapshot};
use colored::{ColoredString, Colorize};

fn paint(letter: char, status: LetterStatus) -> ColoredString {
    let text = format!(" {} ", letter.to_uppercase());
    match status {
        LetterStatus::Correct => text.black().on_green().bold(),
        LetterStatus::Present => text.black().on_yellow().bold(),
        LetterStatus::Absent => text.white().on_bright_black(),
        LetterStatus::Unknown => text.normal(),
    }
}

fn cell(cell: Cell) -> ColoredString {
    match cell.letter {
        Some(letter) => paint(letter, cell.status),
        None => " · ".bright_black(),
    }
}

/// Print the rows that hold letters
pub fn print_board(snapshot: &Snapshot) {
    for row in &snapshot.grid {
        if row.iter().all(|c| c.letter.is_none()) {
            continue;
        }
        let line: Vec<String> = row.iter().map(|&c| cell(c).to_string()).collect();
        println!("  {}", line.join(""));
    }
}

/// Print the keyboard with each key coloured by its best status
pub fn print_keyboard(snapshot: &Snapshot) {
    for (indent, row) in snapshot.keyboard.iter().enumerate() {
        let keys: Vec<String> = row
            .iter()
            .map(|&(letter, status)| paint(letter, status).to_string())
            .collect();
        println!("  {}{}", " ".repeat(indent), keys.join(""));
    }
}

/// Print an event's message, if it has one
///
/// Scored guesses print as a shareable emoji line.
pub fn print_event(event: &GameEvent) {
    if let GameEvent::GuessScored { guess, result, .. } = event {
        println!("{}", score_line(guess, result));
    }
    if let Some((text, tone)) = event_message(event) {
        print_message(&text, tone);
    }
}

pub fn print_message(text: &str, tone: Tone) {
    let line = match tone {
        Tone::Info => text.normal(),
        Tone::Success => text.green().bold(),
        Tone::Warning => text.yellow(),
        Tone::Error => text.red(),
    };
    println!("{line}");
}
