use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ai::{Difficulty, MovePolicy, OracleConfig};
use crate::error::SessionError;

use super::board::{check_winner, Board};
use super::history::{Move, UndoStack};
use super::player::{Side, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    Won(Side),
    Drawn,
}

/// Finished game from the human's point of view, as kept in the score file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Tie,
}

/// One game between the human and the automated policy.
///
/// The turn counter is the number of plies on the board: even means X moves.
pub struct GameSession {
    board: Board,
    history: UndoStack,
    turn: usize,
    human: Symbol,
    policy: MovePolicy,
    advisor: MovePolicy,
    rng: StdRng,
    status: SessionStatus,
}

impl GameSession {
    /// Set up a game with randomly assigned symbols.
    pub fn new(difficulty: Difficulty, oracle: &OracleConfig) -> Self {
        let mut rng = StdRng::from_os_rng();
        let human = if rng.random_bool(0.5) { Symbol::X } else { Symbol::O };
        Self::with_sides(
            human,
            MovePolicy::for_difficulty(difficulty, oracle),
            MovePolicy::advisor(oracle),
            rng,
        )
    }

    /// Set up a game with a fixed human symbol and explicit policies.
    pub fn with_sides(human: Symbol, policy: MovePolicy, advisor: MovePolicy, rng: StdRng) -> Self {
        info!(
            "new game: human is {}, AI is {} ({} difficulty)",
            human,
            human.other(),
            policy.difficulty()
        );
        GameSession {
            board: Board::new(),
            history: UndoStack::new(),
            turn: 0,
            human,
            policy,
            advisor,
            rng,
            status: SessionStatus::InProgress,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Plies played so far.
    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status != SessionStatus::InProgress
    }

    pub fn difficulty(&self) -> Difficulty {
        self.policy.difficulty()
    }

    pub fn human_symbol(&self) -> Symbol {
        self.human
    }

    pub fn automated_symbol(&self) -> Symbol {
        self.human.other()
    }

    pub fn symbol_to_move(&self) -> Symbol {
        Symbol::for_ply(self.turn)
    }

    pub fn side_of(&self, symbol: Symbol) -> Side {
        if symbol == self.human {
            Side::Human
        } else {
            Side::Automated
        }
    }

    /// Side whose turn it is.
    pub fn active_side(&self) -> Side {
        self.side_of(self.symbol_to_move())
    }

    pub fn legal_columns(&self) -> Vec<usize> {
        self.board.legal_columns()
    }

    /// The finished game as a score entry, `None` while in progress.
    pub fn result(&self) -> Option<GameResult> {
        match self.status {
            SessionStatus::InProgress => None,
            SessionStatus::Won(Side::Human) => Some(GameResult::Win),
            SessionStatus::Won(Side::Automated) => Some(GameResult::Loss),
            SessionStatus::Drawn => Some(GameResult::Tie),
        }
    }

    /// Drop the human's piece into `column`.
    pub fn play_human(&mut self, column: usize) -> Result<SessionStatus, SessionError> {
        self.ensure_turn(Side::Human)?;
        self.apply(column)?;
        Ok(self.status)
    }

    /// Let the policy move. Returns the move played, or `None` if no column
    /// was available, which ends the game as a draw.
    pub fn play_automated(&mut self) -> Result<Option<Move>, SessionError> {
        self.ensure_turn(Side::Automated)?;
        let symbol = self.symbol_to_move();
        let Some(column) = self.policy.choose_column(&self.board, symbol, &mut self.rng) else {
            self.finish(SessionStatus::Drawn);
            return Ok(None);
        };
        self.apply(column).map(Some)
    }

    /// Ask the advisor for a column for the human, without playing it.
    pub fn suggest(&mut self) -> Result<Option<usize>, SessionError> {
        self.ensure_turn(Side::Human)?;
        Ok(self
            .advisor
            .choose_column(&self.board, self.human, &mut self.rng))
    }

    /// Take back the last ply, whoever played it.
    pub fn undo(&mut self) -> Result<Move, SessionError> {
        if self.is_terminal() {
            return Err(SessionError::GameOver);
        }
        let mv = self.history.pop_last()?;
        self.board.remove(mv.row, mv.column);
        self.turn -= 1;
        debug!("undid {} at column {}", mv.symbol, mv.column + 1);
        Ok(mv)
    }

    fn ensure_turn(&self, side: Side) -> Result<(), SessionError> {
        if self.is_terminal() {
            return Err(SessionError::GameOver);
        }
        if self.active_side() != side {
            return Err(SessionError::NotYourTurn);
        }
        Ok(())
    }

    fn apply(&mut self, column: usize) -> Result<Move, SessionError> {
        let symbol = self.symbol_to_move();
        let row = self.board.drop_piece(column, symbol)?;
        let mv = Move { row, column, symbol };
        self.history.push(mv);
        self.turn += 1;
        debug!("{} dropped into column {}", symbol, column + 1);

        if check_winner(&self.board, symbol) {
            self.finish(SessionStatus::Won(self.side_of(symbol)));
        } else if self.board.is_full() {
            self.finish(SessionStatus::Drawn);
        }
        Ok(mv)
    }

    fn finish(&mut self, status: SessionStatus) {
        info!("game over after {} plies: {:?}", self.turn, status);
        self.status = status;
    }
}
