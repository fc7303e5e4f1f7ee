//! Front-ends: a ratatui game view and a plain line-prompt console.

mod app;
mod console;
mod game_view;

pub use app::{outcome_message, App};
pub use console::Console;
