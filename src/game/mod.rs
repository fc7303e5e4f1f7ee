//! Core Connect Four game logic: board, win detection, undo history, and the
//! session state machine.

mod board;
mod command;
mod history;
mod player;
mod session;

pub use board::{check_winner, Board, Cell, COLS, ROWS, RUN};
pub use command::HumanCommand;
pub use history::{Move, UndoStack};
pub use player::{Side, Symbol};
pub use session::{GameResult, GameSession, SessionStatus};
