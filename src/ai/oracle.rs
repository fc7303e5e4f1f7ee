use std::time::Duration;

use crate::error::OracleError;
use crate::game::{Board, Symbol};

use super::command::CommandOracle;
use super::negamax::NegamaxOracle;
use super::policy::Difficulty;

/// Everything an oracle gets to see when asked for a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleRequest {
    pub board: Board,
    pub legal: Vec<usize>,
    pub to_move: Symbol,
    pub difficulty: Difficulty,
}

impl OracleRequest {
    /// Plain-text rendering of the request for oracles that take free text.
    pub fn prompt(&self) -> String {
        format!(
            "Given the Connect Four board below (top row first, '.' is empty):\n{}\n\
             You are playing {} at {} difficulty. What is the best move? \
             Choose a 0-based column from {:?}. Reply with the column number only.\n",
            self.board.rows().join("\n"),
            self.to_move,
            self.difficulty,
            self.legal,
        )
    }
}

/// Something that can propose a column for a board.
///
/// Replies are raw text and untrusted: callers parse and validate them
/// against the legal columns themselves.
pub trait Oracle {
    fn name(&self) -> &str;

    fn propose(&mut self, request: &OracleRequest) -> Result<String, OracleError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleBackend {
    /// Local alpha-beta search.
    Negamax,
    /// External program fed the prompt on stdin.
    Command,
}

/// Oracle settings. Medium always searches locally; Hard uses `backend`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub backend: OracleBackend,
    pub medium_depth: usize,
    pub hard_depth: usize,
    /// Program and arguments for the command backend.
    pub command: Vec<String>,
    pub timeout_ms: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        OracleConfig {
            backend: OracleBackend::Negamax,
            medium_depth: 2,
            hard_depth: 6,
            command: Vec::new(),
            timeout_ms: 5_000,
        }
    }
}

impl OracleConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Build the oracle backing a difficulty level.
    pub fn build(&self, difficulty: Difficulty) -> Box<dyn Oracle> {
        match (difficulty, self.backend) {
            (Difficulty::Hard, OracleBackend::Command) => {
                Box::new(CommandOracle::new(self.command.clone(), self.timeout()))
            }
            (Difficulty::Hard, OracleBackend::Negamax) => {
                Box::new(NegamaxOracle::new(self.hard_depth))
            }
            (Difficulty::Easy | Difficulty::Medium, _) => {
                Box::new(NegamaxOracle::new(self.medium_depth))
            }
        }
    }
}
