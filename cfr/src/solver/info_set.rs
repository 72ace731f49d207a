//! The information-set store: fingerprint -> regret/strategy-sum vectors.

use std::collections::HashMap;

use more_asserts::debug_assert_ge;

use crate::holdem::Action;

/// A single decision node. Created lazily on first visit; the action set is
/// fixed for the lifetime of the node.
#[derive(Debug, Clone)]
pub struct InformationSet {
    actions: Vec<Action>,
    regret_sum: Vec<f64>,
    strategy_sum: Vec<f64>,
}

impl InformationSet {
    fn new(actions: Vec<Action>) -> InformationSet {
        let n = actions.len();
        InformationSet {
            actions,
            regret_sum: vec![0.0; n],
            strategy_sum: vec![0.0; n],
        }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Regret matching: returns the current strategy and accumulates it
    /// (weighted by `realization_weight`) into `strategy_sum`.
    pub fn get_strategy(&mut self, realization_weight: f64) -> Vec<f64> {
        let positive_sum: f64 = self.regret_sum.iter().filter(|&&r| r > 0.0).sum();
        let n = self.actions.len();
        let strategy: Vec<f64> = if positive_sum > 0.0 {
            self.regret_sum.iter().map(|&r| if r > 0.0 { r / positive_sum } else { 0.0 }).collect()
        } else {
            vec![1.0 / n as f64; n]
        };

        for (i, &p) in strategy.iter().enumerate() {
            debug_assert_ge!(p, 0.0);
            self.strategy_sum[i] += realization_weight * p;
        }
        strategy
    }

    pub fn add_regret(&mut self, action_index: usize, opponent_prob: f64, regret: f64) {
        self.regret_sum[action_index] += opponent_prob * regret;
    }

    /// `strategy_sum` normalized to a distribution, or uniform if the
    /// fingerprint was never actually reached with positive weight.
    pub fn average_strategy(&self) -> Vec<f64> {
        let total: f64 = self.strategy_sum.iter().sum();
        let n = self.actions.len();
        if total > 0.0 {
            self.strategy_sum.iter().map(|&s| s / total).collect()
        } else {
            vec![1.0 / n as f64; n]
        }
    }
}

/// Fingerprint -> information set. Nodes are created lazily and never
/// removed during training.
#[derive(Debug, Default)]
pub struct InfoSetStore {
    nodes: HashMap<String, InformationSet>,
}

impl InfoSetStore {
    pub fn new() -> InfoSetStore {
        InfoSetStore {
            nodes: HashMap::new(),
        }
    }

    pub fn get_or_create(&mut self, fingerprint: &str, actions: impl FnOnce() -> Vec<Action>) -> &mut InformationSet {
        self.nodes.entry(fingerprint.to_string()).or_insert_with(|| InformationSet::new(actions()))
    }

    pub fn get(&self, fingerprint: &str) -> Option<&InformationSet> {
        self.nodes.get(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &InformationSet)> {
        self.nodes.iter()
    }
}
