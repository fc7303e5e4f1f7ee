use std::path::PathBuf;
use std::time::Duration;

/// A drop the board cannot accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMoveError {
    #[error("column index {0} is outside the board")]
    OutOfRange(usize),

    #[error("column {} is full", .0 + 1)]
    ColumnFull(usize),
}

/// Undo was requested with no moves on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no moves to undo")]
pub struct EmptyHistoryError;

/// Errors from driving a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    IllegalMove(#[from] IllegalMoveError),

    #[error(transparent)]
    EmptyHistory(#[from] EmptyHistoryError),

    #[error("it is not this player's turn")]
    NotYourTurn,

    #[error("the game is over")]
    GameOver,
}

/// Failures of a move oracle. Never fatal: the policy falls back to a random
/// legal column.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("oracle did not answer within {0:?}")]
    Timeout(Duration),

    #[error("oracle I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("oracle failed: {0}")]
    Failed(String),

    #[error("oracle returned an empty reply")]
    EmptyReply,
}

/// Errors that can occur while loading or saving the score file.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("failed to read scores from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse scores from {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write scores to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}' (expected easy, medium, or hard)")]
pub struct DifficultyParseError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid input '{0}': enter a column 1-7, 's' for a suggestion, 'u' to undo, or 'q' to quit")]
pub struct CommandParseError(pub String);
