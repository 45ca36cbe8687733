//! TUI application state and logic

use crate::core::{MAX_WORD_LENGTH, MIN_WORD_LENGTH};
use crate::game::{GameController, GameError, GameEvent, MAX_ATTEMPTS, Request, Response, fulfil};
use crate::oracle::Oracle;
use crate::output::{Tone, error_message, event_message};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, info};

const MAX_MESSAGES: usize = 5;
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Application state
pub struct App {
    pub game: GameController,
    oracle: Arc<dyn Oracle>,
    runtime: Handle,
    responses_tx: UnboundedSender<Response>,
    responses_rx: UnboundedReceiver<Response>,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub should_quit: bool,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub tone: Tone,
    /// Input feedback, dropped on the next keypress
    pub transient: bool,
}

fn is_input_feedback(event: &GameEvent) -> bool {
    matches!(
        event,
        GameEvent::InvalidCharRejected { .. }
            | GameEvent::IncompleteGuess { .. }
            | GameEvent::GuessRejected { .. }
    )
}

/// Results of the rounds finished in this session
#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub total_games: usize,
    pub games_won: usize,
    /// Wins by number of attempts; index 0 is unused
    pub guess_distribution: [usize; MAX_ATTEMPTS + 1],
}

impl Statistics {
    fn record_win(&mut self, attempts: usize) {
        self.total_games += 1;
        self.games_won += 1;
        if let Some(slot) = self.guess_distribution.get_mut(attempts) {
            *slot += 1;
        }
    }

    fn record_loss(&mut self) {
        self.total_games += 1;
    }

    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        self.games_won as f64 / self.total_games as f64 * 100.0
    }
}

impl App {
    /// Create the app and request the first word
    ///
    /// # Errors
    /// Fails for a word length outside 3..=10.
    pub fn new(oracle: Arc<dyn Oracle>, runtime: Handle, word_length: usize) -> Result<Self> {
        let (responses_tx, responses_rx) = unbounded_channel();
        let mut app = Self {
            game: GameController::new(word_length)?,
            oracle,
            runtime,
            responses_tx,
            responses_rx,
            messages: vec![Message {
                text: "¡Bienvenido! Adivina la palabra en español.".to_string(),
                tone: Tone::Info,
                transient: false,
            }],
            stats: Statistics::default(),
            should_quit: false,
        };
        app.new_game(word_length);
        Ok(app)
    }

    /// Run a request in the background; its response arrives through the channel
    fn dispatch(&self, request: Request) {
        debug!(token = ?request.token(), "dispatching oracle request");
        let oracle = Arc::clone(&self.oracle);
        let tx = self.responses_tx.clone();
        self.runtime.spawn(async move {
            let response = fulfil(oracle.as_ref(), request).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(response);
        });
    }

    pub fn new_game(&mut self, word_length: usize) {
        match self.game.start_round(word_length) {
            Ok(request) => {
                info!(word_length, "new round");
                self.dispatch(request);
            }
            Err(e) => self.show_error(&e),
        }
        self.flush_events();
    }

    fn change_length(&mut self, delta: isize) {
        let length = self.game.round().word_length().saturating_add_signed(delta);
        self.new_game(length);
    }

    fn type_char(&mut self, c: char) {
        if let Err(e) = self.game.insert_char(c) {
            self.show_error(&e);
        }
        self.flush_events();
    }

    fn delete_char(&mut self) {
        if let Err(e) = self.game.delete_char() {
            self.show_error(&e);
        }
    }

    fn submit(&mut self) {
        if self.game.round().is_over() {
            self.new_game(self.game.round().word_length());
            return;
        }
        match self.game.submit() {
            Ok(request) => self.dispatch(request),
            Err(e) => self.show_error(&e),
        }
        self.flush_events();
    }

    /// Apply every response that has arrived so far
    pub fn pump(&mut self) {
        while let Ok(response) = self.responses_rx.try_recv() {
            self.on_response(response);
        }
    }

    fn on_response(&mut self, response: Response) {
        match self.game.handle(response) {
            Ok(Some(next)) => self.dispatch(next),
            Ok(None) => {}
            Err(e) => self.show_error(&e),
        }
        self.flush_events();
    }

    fn flush_events(&mut self) {
        for event in self.game.drain_events() {
            match &event {
                GameEvent::RoundWon { attempts } => self.stats.record_win(*attempts),
                GameEvent::RoundLost { .. } => self.stats.record_loss(),
                _ => {}
            }
            if let Some((text, tone)) = event_message(&event) {
                self.push_message(text, tone, is_input_feedback(&event));
            }
        }
    }

    fn show_error(&mut self, error: &GameError) {
        if let Some(text) = error_message(error) {
            let user_error = error.is_user_error();
            let tone = if user_error { Tone::Warning } else { Tone::Error };
            self.push_message(text, tone, user_error);
        }
    }

    fn push_message(&mut self, text: String, tone: Tone, transient: bool) {
        self.messages.push(Message {
            text,
            tone,
            transient,
        });

        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.messages.retain(|m| !m.transient);

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        // Shift is the only modifier that still produces a letter
        let plain = !key.modifiers.intersects(
            KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER | KeyModifiers::META,
        );
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('n') if ctrl => self.new_game(self.game.round().word_length()),
            KeyCode::Left => self.change_length(-1),
            KeyCode::Right => self.change_length(1),
            KeyCode::Char('-') if plain => self.change_length(-1),
            KeyCode::Char('+') if plain => self.change_length(1),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) if plain => self.type_char(c),
            _ => {}
        }
    }

    #[must_use]
    pub fn help_text(&self) -> String {
        if self.game.round().is_over() {
            "Enter: nueva partida | Esc: salir".to_string()
        } else {
            format!(
                "Enter: enviar | ←/→: longitud ({MIN_WORD_LENGTH}-{MAX_WORD_LENGTH}) | Ctrl-N: nueva | Esc: salir"
            )
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        app.pump();
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            // Only key presses (Windows also reports releases)
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
