//! The CFR training engine: recurses over the game tree, accumulates
//! per-information-set regrets, and derives an average strategy.
//!
//! Every call returns the utility from player 0's perspective; the regret
//! update derives `util_for_actor` locally from that. Chance is
//! outcome-sampled: the one random deal per iteration lives entirely in the
//! shuffled deck handed to `GameState::new_root`, so there is no separate
//! chance-node branch in the recursion.

use std::time::{Duration, Instant};

use more_asserts::assert_gt;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::holdem::GameState;
use crate::solver::info_set::InfoSetStore;
use crate::solver::strategy::StrategyTable;

#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub iterations: usize,
    /// A fixed seed reproduces the same training run; absent, a fresh
    /// entropy source is used per run.
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> TrainingConfig {
        TrainingConfig {
            iterations: 1000,
            seed: None,
        }
    }
}

pub struct CfrTrainer {
    store: InfoSetStore,
}

impl Default for CfrTrainer {
    fn default() -> Self {
        Self::new()
    }
}

impl CfrTrainer {
    pub fn new() -> CfrTrainer {
        CfrTrainer {
            store: InfoSetStore::new(),
        }
    }

    pub fn info_set_count(&self) -> usize {
        self.store.len()
    }

    /// Outcome-sampled-over-chance, exhaustive-over-actions CFR recursion.
    /// Always returns the utility from player 0's perspective; `p0`/`p1` are
    /// the reach probabilities contributed by each player's own strategy
    /// along the path from the root.
    pub fn cfr_recurse(&mut self, state: &GameState, p0: f64, p1: f64) -> f64 {
        if state.is_terminal() {
            return state.terminal_utility(0);
        }

        let player = state.player;
        let fingerprint = state.fingerprint(player);
        let actions = state.legal_actions();
        let realization_weight = if player == 0 { p0 } else { p1 };

        let strategy = {
            let node = self.store.get_or_create(&fingerprint, || actions.clone());
            assert_gt!(node.actions().len(), 0);
            node.get_strategy(realization_weight)
        };

        let mut action_utils = vec![0.0; actions.len()];
        for (i, &action) in actions.iter().enumerate() {
            let next_state = state.apply(action);
            let (next_p0, next_p1) = if player == 0 {
                (p0 * strategy[i], p1)
            } else {
                (p0, p1 * strategy[i])
            };
            action_utils[i] = self.cfr_recurse(&next_state, next_p0, next_p1);
        }

        let node_util: f64 = strategy.iter().zip(&action_utils).map(|(s, u)| s * u).sum();

        let opponent_prob = if player == 0 { p1 } else { p0 };
        let node_util_for_actor = if player == 0 { node_util } else { -node_util };
        let node = self.store.get_or_create(&fingerprint, || actions.clone());
        for (i, &util_p0) in action_utils.iter().enumerate() {
            let util_for_actor = if player == 0 { util_p0 } else { -util_p0 };
            node.add_regret(i, opponent_prob, util_for_actor - node_util_for_actor);
        }

        node_util
    }

    /// Trains for `config.iterations` iterations, dealing a fresh random
    /// hand each time, and returns the average game value for player 0 —
    /// it should decay toward 0 as `iterations` grows, since the game is
    /// symmetric at equilibrium.
    pub fn train(&mut self, config: &TrainingConfig) -> f64 {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut util_sum = 0.0;
        let mut timer = Instant::now();
        for i in 0..config.iterations {
            let initial = GameState::new_root(&mut rng, 0);
            util_sum += self.cfr_recurse(&initial, 1.0, 1.0);

            if timer.elapsed() > Duration::from_secs(2) {
                log::info!(
                    "iteration {:>7}/{}: avg game value = {:.4}, info sets = {}",
                    i + 1,
                    config.iterations,
                    util_sum / (i + 1) as f64,
                    self.store.len()
                );
                timer = Instant::now();
            }
        }
        let avg_game_value = util_sum / config.iterations as f64;
        log::info!(
            "training finished: {} info sets, avg game value = {:.4}",
            self.store.len(),
            avg_game_value
        );
        avg_game_value
    }

    /// Flattens the information-set store into a persistable average
    /// strategy.
    pub fn to_strategy_table(&self) -> StrategyTable {
        StrategyTable::from_info_sets(&self.store)
    }
}
