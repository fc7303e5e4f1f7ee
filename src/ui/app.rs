use crate::ai::{Difficulty, OracleConfig};
use crate::error::SessionError;
use crate::game::{GameResult, GameSession, HumanCommand, Side, COLS};
use crate::scores::ScoreStore;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::warn;
use ratatui::{backend::Backend, Terminal};
use std::io;

/// Message shown when a game ends.
pub fn outcome_message(result: GameResult) -> &'static str {
    match result {
        GameResult::Win => "Congratulations! You win!",
        GameResult::Loss => "AI wins! Better luck next time.",
        GameResult::Tie => "It's a draw!",
    }
}

pub struct App {
    session: GameSession,
    difficulty: Difficulty,
    oracle: OracleConfig,
    scores: ScoreStore,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    recorded: bool,
}

impl App {
    pub fn new(difficulty: Difficulty, oracle: OracleConfig, scores: ScoreStore) -> Self {
        let session = GameSession::new(difficulty, &oracle);
        Self::with_session(session, oracle, scores)
    }

    /// Start from an existing session; later games use `oracle` and the
    /// session's difficulty.
    pub fn with_session(session: GameSession, oracle: OracleConfig, scores: ScoreStore) -> Self {
        let mut app = App {
            difficulty: session.difficulty(),
            session,
            oracle,
            scores,
            selected_column: 3, // Start in middle
            should_quit: false,
            message: None,
            recorded: false,
        };
        app.greet();
        app
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn scores(&self) -> &ScoreStore {
        &self.scores
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            if self.is_automated_turn() {
                self.tick();
                continue;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    fn is_automated_turn(&self) -> bool {
        !self.session.is_terminal() && self.session.active_side() == Side::Automated
    }

    /// Let the AI move if it is its turn.
    pub fn tick(&mut self) {
        if !self.is_automated_turn() {
            return;
        }
        match self.session.play_automated() {
            Ok(Some(mv)) => {
                self.selected_column = mv.column;
                self.message = Some(format!("AI played column {}", mv.column + 1));
            }
            Ok(None) => {}
            Err(e) => self.message = Some(e.to_string()),
        }
        self.conclude();
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.apply(HumanCommand::Drop(self.selected_column));
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                if self.session.is_terminal() {
                    self.new_game();
                } else {
                    self.message = Some("Finish this game first, or press Q to quit.".to_string());
                }
            }
            KeyCode::Char(c) => {
                if let Ok(command) = c.to_string().parse::<HumanCommand>() {
                    self.apply(command);
                }
            }
            _ => {}
        }
    }

    fn apply(&mut self, command: HumanCommand) {
        if let HumanCommand::Quit = command {
            self.should_quit = true;
            return;
        }
        if self.session.is_terminal() {
            self.message = Some("Game over! Press N for a new game.".to_string());
            return;
        }

        match command {
            HumanCommand::Drop(col) => {
                self.selected_column = col;
                match self.session.play_human(col) {
                    Ok(_) => self.message = None,
                    Err(e) => self.message = Some(format!("Invalid move: {e}")),
                }
            }
            HumanCommand::Suggest => match self.session.suggest() {
                Ok(Some(col)) => {
                    self.selected_column = col;
                    self.message = Some(format!("AI suggests column {}", col + 1));
                }
                Ok(None) => self.message = Some("No moves available.".to_string()),
                Err(e) => self.message = Some(e.to_string()),
            },
            HumanCommand::Undo => match self.session.undo() {
                Ok(mv) => {
                    self.selected_column = mv.column;
                    self.message = Some("Undo successful!".to_string());
                }
                Err(SessionError::EmptyHistory(_)) => {
                    self.message = Some("No moves to undo.".to_string());
                }
                Err(e) => self.message = Some(e.to_string()),
            },
            HumanCommand::Quit => {}
        }
        self.conclude();
    }

    /// Record a finished game once.
    fn conclude(&mut self) {
        let Some(result) = self.session.result() else {
            return;
        };
        if self.recorded {
            return;
        }
        self.recorded = true;

        let mut text = outcome_message(result).to_string();
        if let Err(e) = self.scores.record(result) {
            warn!("could not save scores: {e}");
            text.push_str(" (scores not saved)");
        }
        text.push_str(" Press N for a new game or Q to quit.");
        self.message = Some(text);
    }

    fn new_game(&mut self) {
        self.session = GameSession::new(self.difficulty, &self.oracle);
        self.selected_column = 3;
        self.recorded = false;
        self.greet();
    }

    fn greet(&mut self) {
        self.message = Some(format!(
            "New game! You are {}, AI is {}.",
            self.session.human_symbol(),
            self.session.automated_symbol()
        ));
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.session,
            self.selected_column,
            &self.message,
            self.scores.scores(),
        );
    }
}
