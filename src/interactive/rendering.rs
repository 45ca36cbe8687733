//! TUI rendering with ratatui
//!
//! Board, keyboard, messages and session statistics.

use super::app::App;
use crate::core::LetterStatus;
use crate::game::{Cell, Outcome, Snapshot};
use crate::output::Tone;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let snapshot = app.game.snapshot();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Board
            Constraint::Length(5), // Keyboard
            Constraint::Length(7), // Messages
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_board(f, &snapshot, chunks[1]);
    render_keyboard(f, &snapshot, chunks[2]);
    render_messages(f, app, chunks[3]);
    render_status(f, app, chunks[4]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🇪🇸 PALABRLE - Wordle en español")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn status_style(status: LetterStatus) -> Style {
    match status {
        LetterStatus::Correct => Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
        LetterStatus::Present => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        LetterStatus::Absent => Style::default().fg(Color::White).bg(Color::DarkGray),
        LetterStatus::Unknown => Style::default().fg(Color::White),
    }
}

fn cell_span(cell: Cell) -> Span<'static> {
    match cell.letter {
        Some(letter) => Span::styled(
            format!(" {} ", letter.to_uppercase()),
            status_style(cell.status),
        ),
        None => Span::styled(" _ ", Style::default().fg(Color::DarkGray)),
    }
}

/// One line per grid row, cells separated by a space
#[must_use]
pub fn board_lines(snapshot: &Snapshot) -> Vec<Line<'static>> {
    snapshot
        .grid
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .flat_map(|&cell| [cell_span(cell), Span::raw(" ")])
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn board_title(snapshot: &Snapshot) -> String {
    if snapshot.waiting_for_word {
        " Buscando palabra... ".to_string()
    } else if snapshot.validating {
        " Validando... ".to_string()
    } else {
        format!(
            " {} letras | {} intentos ",
            snapshot.word_length, snapshot.remaining_attempts
        )
    }
}

fn render_board(f: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let mut lines = board_lines(snapshot);

    match snapshot.outcome {
        Outcome::Won => {
            lines.push(Line::from(""));
            lines.push(Line::styled(
                "🎉 ¡Ganaste!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        Outcome::Lost => {
            if let Some(word) = &snapshot.reveal {
                lines.push(Line::from(""));
                lines.push(Line::styled(
                    format!("La palabra era: {}", word.to_uppercase()),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ));
            }
        }
        Outcome::InProgress => {}
    }

    let board = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(board_title(snapshot))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(board, area);
}

fn render_keyboard(f: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let mut lines: Vec<Line> = snapshot
        .keyboard
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|&(letter, status)| {
                    Span::styled(format!(" {} ", letter.to_uppercase()), status_style(status))
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    if let Some(last) = lines.last_mut() {
        last.spans.insert(0, Span::raw(" ⏎ "));
        last.spans.push(Span::raw(" ⌫ "));
    }

    let keyboard = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title(" Teclado ").borders(Borders::ALL));
    f.render_widget(keyboard, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.tone {
                Tone::Info => Style::default().fg(Color::White),
                Tone::Success => Style::default().fg(Color::Green),
                Tone::Warning => Style::default().fg(Color::Yellow),
                Tone::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Mensajes ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(50),
        ])
        .split(area);

    let stats_text = format!(
        "Partidas: {} | Ganadas: {:.0}%",
        app.stats.total_games,
        app.stats.win_rate()
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[0]);

    let distribution: Vec<String> = app
        .stats
        .guess_distribution
        .iter()
        .enumerate()
        .skip(1)
        .map(|(attempts, count)| format!("{attempts}:{count}"))
        .collect();
    let distribution = Paragraph::new(distribution.join(" ")).alignment(Alignment::Center);
    f.render_widget(distribution, chunks[1]);

    let help = Paragraph::new(app.help_text())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}
