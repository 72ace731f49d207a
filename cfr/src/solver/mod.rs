pub mod cfr;
pub mod info_set;
pub mod strategy;

pub use cfr::{CfrTrainer, TrainingConfig};
pub use info_set::{InfoSetStore, InformationSet};
pub use strategy::{query_move, StrategyTable};
