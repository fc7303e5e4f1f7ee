//! Move selection for the automated side: the difficulty-tagged policy and
//! the oracles it consults.

mod command;
mod negamax;
mod oracle;
mod policy;
mod random;

pub use command::CommandOracle;
pub use negamax::{ConnectFourHeuristic, Heuristic, NegamaxOracle};
pub use oracle::{Oracle, OracleBackend, OracleConfig, OracleRequest};
pub use policy::{Difficulty, MovePolicy};
pub use random::random_column;
