use std::path::PathBuf;

use clap::Parser;
use hu_plo_cfr::solver::{CfrTrainer, TrainingConfig};

/// Trains a heads-up pot-limit Hold'em strategy via CFR and writes the
/// resulting average strategy to disk as JSON.
#[derive(Parser)]
pub struct TrainingArgs {
    #[clap(long, short, value_parser, default_value_t = 1000)]
    iterations: usize,

    #[clap(long, short, value_parser)]
    seed: Option<u64>,

    #[clap(long, short, value_parser, default_value = "strategy.json")]
    output: PathBuf,
}

fn main() {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    let args = TrainingArgs::parse();

    let mut trainer = CfrTrainer::new();
    trainer.train(&TrainingConfig {
        iterations: args.iterations,
        seed: args.seed,
    });

    let strategy = trainer.to_strategy_table();
    match strategy.save(&args.output) {
        Ok(()) => log::info!("wrote {} information sets to {}", strategy.len(), args.output.display()),
        Err(e) => log::error!("failed to save strategy to {}: {}", args.output.display(), e),
    }
}
