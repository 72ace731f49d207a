//! Persisted average strategy and the move-query operation.
//!
//! The strategy table is a plain `serde`/`serde_json`-backed nested map
//! (fingerprint -> action-code string -> probability). The query logic is
//! deterministic argmax with a uniform-random fallback for an unseen
//! fingerprint — a missing node is never an error, just a fallback branch.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SolverError};
use crate::holdem::{Action, GameState};
use crate::solver::info_set::InfoSetStore;

/// Fingerprint -> (action code string -> probability). Logically a nested
/// map per the external interfaces contract; read-only once constructed by
/// `load` or `from_info_sets` (every public method here takes `&self`).
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StrategyTable {
    entries: HashMap<String, HashMap<String, f64>>,
}

impl StrategyTable {
    /// Flattens a trained `InfoSetStore` into its average strategy.
    pub fn from_info_sets(store: &InfoSetStore) -> StrategyTable {
        let mut entries = HashMap::with_capacity(store.len());
        for (fingerprint, node) in store.iter() {
            let avg = node.average_strategy();
            let mut probs = HashMap::with_capacity(node.actions().len());
            for (action, p) in node.actions().iter().zip(avg) {
                probs.insert(action.code().to_string(), p);
            }
            entries.insert(fingerprint.clone(), probs);
        }
        StrategyTable { entries }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| SolverError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .map_err(|e| SolverError::MalformedStrategy(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<StrategyTable> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SolverError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(file).map_err(|e| SolverError::MalformedStrategy(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn probs_for(&self, fingerprint: &str) -> Option<&HashMap<String, f64>> {
        self.entries.get(fingerprint)
    }
}

/// Deterministic argmax over `probs`, restricted to `actions` (which arrive
/// in ascending action-code order); ties go to the lowest code since only a
/// strictly greater probability replaces the incumbent.
fn best_action(probs: &HashMap<String, f64>, actions: &[Action]) -> Action {
    let mut best = actions[0];
    let mut best_prob = probs.get(&best.code().to_string()).copied().unwrap_or(0.0);
    for &action in &actions[1..] {
        let p = probs.get(&action.code().to_string()).copied().unwrap_or(0.0);
        if p > best_prob {
            best = action;
            best_prob = p;
        }
    }
    best
}

/// Selects a move for `player` at `state`: argmax of the stored average
/// strategy if the fingerprint was visited during training, otherwise a
/// uniform-random pick among the legal actions (an unseen fingerprint is
/// not an error — see `SolverError`'s doc comment).
pub fn query_move<R: Rng>(
    table: &StrategyTable,
    state: &GameState,
    player: usize,
    rng: &mut R,
) -> Result<Action> {
    state.validate()?;
    let actions = state.legal_actions();
    let fingerprint = state.fingerprint(player);
    match table.probs_for(&fingerprint) {
        Some(probs) => Ok(best_action(probs, &actions)),
        None => Ok(actions[rng.gen_range(0..actions.len())]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn table_with(fingerprint: &str, probs: &[(Action, f64)]) -> StrategyTable {
        let mut entries = HashMap::new();
        let mut inner = HashMap::new();
        for &(action, p) in probs {
            inner.insert(action.code().to_string(), p);
        }
        entries.insert(fingerprint.to_string(), inner);
        StrategyTable { entries }
    }

    #[test]
    fn best_action_picks_highest_probability() {
        let actions = vec![Action::Fold, Action::CallOrCheck];
        let mut probs = HashMap::new();
        probs.insert("0".to_string(), 0.2);
        probs.insert("1".to_string(), 0.8);
        assert_eq!(best_action(&probs, &actions), Action::CallOrCheck);
    }

    #[test]
    fn best_action_breaks_ties_with_lowest_code() {
        let actions = vec![Action::CallOrCheck, Action::Raise];
        let mut probs = HashMap::new();
        probs.insert("1".to_string(), 0.5);
        probs.insert("2".to_string(), 0.5);
        assert_eq!(best_action(&probs, &actions), Action::CallOrCheck);
    }

    #[test]
    fn query_move_uses_stored_strategy_when_fingerprint_is_known() {
        let state = GameState::new_root(&mut rand::rngs::StdRng::seed_from_u64(5), 0);
        let fingerprint = state.fingerprint(0);
        let table = table_with(&fingerprint, &[(Action::CallOrCheck, 0.1), (Action::Raise, 0.9)]);
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let action = query_move(&table, &state, 0, &mut rng).unwrap();
        assert_eq!(action, Action::Raise);
    }

    #[test]
    fn query_move_picks_the_higher_probability_action_for_a_known_fingerprint() {
        let state = GameState::new_root(&mut rand::rngs::StdRng::seed_from_u64(5), 0);
        let fingerprint = state.fingerprint(0);
        let table = table_with(&fingerprint, &[(Action::CallOrCheck, 0.8), (Action::Raise, 0.2)]);
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let action = query_move(&table, &state, 0, &mut rng).unwrap();
        assert_eq!(action, Action::CallOrCheck);
    }

    #[test]
    fn query_move_falls_back_to_a_legal_action_when_fingerprint_is_unseen() {
        let state = GameState::new_root(&mut rand::rngs::StdRng::seed_from_u64(5), 0);
        let table = StrategyTable::default();
        let mut rng = rand::rngs::StdRng::seed_from_u64(2);
        let action = query_move(&table, &state, 0, &mut rng).unwrap();
        assert!(state.legal_actions().contains(&action));
    }

    #[test]
    fn round_trips_through_json() {
        let mut store = InfoSetStore::new();
        store.get_or_create("fp", || vec![Action::Fold, Action::CallOrCheck]);
        let table = StrategyTable::from_info_sets(&store);
        let json = serde_json::to_string(&table).unwrap();
        let reloaded: StrategyTable = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded.len(), table.len());
    }
}
