use std::fmt;

use super::board::Cell;

/// Token placed on the board. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// Get the other symbol
    pub fn other(self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    /// Convert symbol to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Symbol::X => Cell::X,
            Symbol::O => Cell::O,
        }
    }

    /// Symbol that moves after `plies` placements.
    pub fn for_ply(plies: usize) -> Symbol {
        if plies % 2 == 0 {
            Symbol::X
        } else {
            Symbol::O
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Symbol::X => "X",
            Symbol::O => "O",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Who controls a symbol in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Human,
    Automated,
}

impl Side {
    pub fn name(self) -> &'static str {
        match self {
            Side::Human => "You",
            Side::Automated => "AI",
        }
    }
}
