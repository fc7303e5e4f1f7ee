use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use rand::Rng;

use crate::error::DifficultyParseError;
use crate::game::{Board, Symbol};

use super::oracle::{Oracle, OracleConfig, OracleRequest};
use super::random::random_column;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = DifficultyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(DifficultyParseError(s.trim().to_string())),
        }
    }
}

/// How the automated side picks a column, one variant per difficulty.
pub enum MovePolicy {
    /// Uniform choice among legal columns.
    Random,
    /// Local search oracle.
    Heuristic(Box<dyn Oracle>),
    /// Strongest configured oracle, also used for suggestions.
    Oracle(Box<dyn Oracle>),
}

impl MovePolicy {
    pub fn for_difficulty(difficulty: Difficulty, config: &OracleConfig) -> Self {
        match difficulty {
            Difficulty::Easy => MovePolicy::Random,
            Difficulty::Medium => MovePolicy::Heuristic(config.build(difficulty)),
            Difficulty::Hard => MovePolicy::Oracle(config.build(difficulty)),
        }
    }

    /// Policy used to advise the human, always at Hard.
    pub fn advisor(config: &OracleConfig) -> Self {
        Self::for_difficulty(Difficulty::Hard, config)
    }

    pub fn difficulty(&self) -> Difficulty {
        match self {
            MovePolicy::Random => Difficulty::Easy,
            MovePolicy::Heuristic(_) => Difficulty::Medium,
            MovePolicy::Oracle(_) => Difficulty::Hard,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            MovePolicy::Random => "random",
            MovePolicy::Heuristic(oracle) | MovePolicy::Oracle(oracle) => oracle.name(),
        }
    }

    /// Pick a column for `to_move`, or `None` when the board is full.
    ///
    /// Oracle answers are checked against the legal columns; anything else
    /// (errors, timeouts, garbage, illegal columns) falls back to a random
    /// legal column.
    pub fn choose_column<R: Rng + ?Sized>(
        &mut self,
        board: &Board,
        to_move: Symbol,
        rng: &mut R,
    ) -> Option<usize> {
        let legal = board.legal_columns();
        if legal.is_empty() {
            return None;
        }

        let difficulty = self.difficulty();
        let oracle = match self {
            MovePolicy::Random => return random_column(&legal, rng),
            MovePolicy::Heuristic(oracle) | MovePolicy::Oracle(oracle) => oracle,
        };

        let request = OracleRequest {
            board: *board,
            legal,
            to_move,
            difficulty,
        };
        match oracle.propose(&request) {
            Ok(reply) => match parse_reply(&reply) {
                Some(col) if request.legal.contains(&col) => {
                    debug!("oracle {} chose column {}", oracle.name(), col);
                    return Some(col);
                }
                _ => warn!(
                    "oracle {} replied {:?}, not one of {:?}; choosing randomly",
                    oracle.name(),
                    reply,
                    request.legal
                ),
            },
            Err(e) => warn!("oracle {} failed: {}; choosing randomly", oracle.name(), e),
        }
        random_column(&request.legal, rng)
    }
}

impl fmt::Debug for MovePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MovePolicy")
            .field(&self.difficulty())
            .field(&self.name())
            .finish()
    }
}

/// Parse an oracle reply as a 0-based column.
fn parse_reply(reply: &str) -> Option<usize> {
    let digits = reply.trim().trim_end_matches('.');
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
