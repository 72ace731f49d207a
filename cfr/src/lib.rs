pub mod error;
pub mod holdem;
pub mod solver;

pub use error::{Result, SolverError};
pub use holdem::{Action, GameState};
pub use solver::{query_move, CfrTrainer, StrategyTable, TrainingConfig};
