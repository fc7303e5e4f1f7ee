use crate::error::EmptyHistoryError;

use super::player::Symbol;

/// A single placement: where it landed and who placed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub row: usize,
    pub column: usize,
    pub symbol: Symbol,
}

/// Placements in play order. Append-only apart from popping the last one.
#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    moves: Vec<Move>,
}

impl UndoStack {
    pub fn new() -> Self {
        UndoStack { moves: Vec::new() }
    }

    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Remove and return the most recent move.
    pub fn pop_last(&mut self) -> Result<Move, EmptyHistoryError> {
        self.moves.pop().ok_or(EmptyHistoryError)
    }

    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter()
    }
}
