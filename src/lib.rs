//! # Connect Four CLI
//!
//! Connect Four in the terminal against a computer opponent. The opponent is
//! a random mover, a shallow negamax search, or an external oracle process,
//! depending on difficulty and configuration. Any oracle reply that is not a
//! legal column falls back to a random legal move.
//!
//! ## Modules
//!
//! - [`game`]: Board, pieces, undo history, and the game session
//! - [`ai`]: Difficulty levels, move policies, and oracle backends
//! - [`scores`]: Persistent win/loss/tie counters
//! - [`ui`]: Terminal UI and plain console front-ends
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod scores;
pub mod ui;
